//! Touch controls — four debounced, edge-triggered buttons over hit regions.
//!
//! Each button is a small state machine fed one touch reading per
//! control-loop tick:
//!
//! ```text
//!   raw = point ∈ hit region ──┐
//!                              ▼
//!   raw != touched?  ──────── detected transition
//!        │                       │ timestamp reset ALWAYS
//!        │                       │ edge latched only if the debounce
//!        ▼                       ▼ window had elapsed AND raw is a press
//!   touched := raw          active := true
//! ```
//!
//! The transition timestamp resets on every *detected* raw transition,
//! including ones the debounce window rejects. Under rapid flicker this
//! shortens the effective window; the behaviour is kept because a rejected
//! bounce still proves the contact is unstable, and a quiet 100 ms is the
//! signal that it settled.
//!
//! The latched edge follows read-once semantics: [`TouchControls::consume`]
//! returns it at most once per assertion.

use embassy_time::{Duration, Instant};
use embedded_graphics::prelude::Point;
use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Minimum quiet time between accepted state transitions for one button.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// The closed set of transport controls on the touch screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    /// Previous track / restart.
    Back,
    /// Next track.
    Next,
    /// Start or resume playback.
    Play,
    /// Suspend playback.
    Pause,
}

impl ControlButton {
    /// All buttons, in polling order.
    pub const ALL: [ControlButton; 4] = [
        ControlButton::Back,
        ControlButton::Next,
        ControlButton::Play,
        ControlButton::Pause,
    ];

    fn index(self) -> usize {
        match self {
            ControlButton::Back => 0,
            ControlButton::Next => 1,
            ControlButton::Play => 2,
            ControlButton::Pause => 3,
        }
    }
}

/// Axis-aligned hit box around a centre point.
///
/// Bounds are exclusive on all four edges, matching the panel's edge
/// behaviour: a point exactly on the boundary does not count as inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    /// Centre of the box in display coordinates.
    pub center: Point,
    /// Full width of the box.
    pub width: i32,
    /// Full height of the box.
    pub height: i32,
}

impl HitRegion {
    /// A `width` × `height` box centred on (`cx`, `cy`).
    pub const fn new(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self {
            center: Point::new(cx, cy),
            width,
            height,
        }
    }

    /// `true` when `point` falls strictly inside the box.
    #[allow(clippy::arithmetic_side_effects)] // display coordinates are far from i32 limits
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.center.x - self.width / 2
            && point.x < self.center.x + self.width / 2
            && point.y > self.center.y - self.height / 2
            && point.y < self.center.y + self.height / 2
    }
}

/// Per-button debounce state.
#[derive(Debug, Clone, Copy)]
struct ButtonSlot {
    region: HitRegion,
    /// Debounced view of "finger over this button".
    touched: bool,
    /// Latched press edge, cleared by `consume`.
    active: bool,
    /// Time of the last detected raw transition.
    last_transition: Option<Instant>,
    /// Disabled buttons are skipped entirely during `poll`.
    disabled: bool,
    /// Adopt the raw state without edge detection on the next poll.
    /// Set when the button is re-enabled so a finger already resting on a
    /// freshly swapped-in button (play ↔ pause share a centre) does not
    /// register as a new press.
    resync: bool,
}

impl ButtonSlot {
    const fn new(region: HitRegion) -> Self {
        Self {
            region,
            touched: false,
            active: false,
            last_transition: None,
            disabled: false,
            resync: false,
        }
    }
}

/// The four transport buttons, polled once per tick.
pub struct TouchControls {
    slots: [ButtonSlot; 4],
}

/// Percentage-of-display helper, mirroring the screen layout description.
#[allow(clippy::arithmetic_side_effects)] // vw/vh are small constants
const fn vw(percent: i32) -> i32 {
    percent * DISPLAY_WIDTH / 100
}

#[allow(clippy::arithmetic_side_effects)]
const fn vh(percent: i32) -> i32 {
    percent * DISPLAY_HEIGHT / 100
}

impl TouchControls {
    /// The standard transport row: back, play/pause, next along the bottom
    /// of the screen. Play and pause share a centre; the control loop keeps
    /// exactly one of them enabled at a time.
    pub const fn standard_layout() -> Self {
        Self::with_regions([
            HitRegion::new(vw(20), vh(80), 30, 30), // Back
            HitRegion::new(vw(80), vh(80), 30, 30), // Next
            HitRegion::new(vw(50), vh(80), 30, 30), // Play
            HitRegion::new(vw(50), vh(80), 30, 30), // Pause
        ])
    }

    /// Controls with explicit hit regions, in [`ControlButton::ALL`] order.
    pub const fn with_regions(regions: [HitRegion; 4]) -> Self {
        Self {
            slots: [
                ButtonSlot::new(regions[0]),
                ButtonSlot::new(regions[1]),
                ButtonSlot::new(regions[2]),
                ButtonSlot::new(regions[3]),
            ],
        }
    }

    /// Feed one touch reading (or the absence of one) to every enabled
    /// button.
    pub fn poll(&mut self, touch: Option<Point>, now: Instant) {
        for slot in &mut self.slots {
            if slot.disabled {
                continue;
            }
            let raw = touch.is_some_and(|p| slot.region.contains(p));
            if slot.resync {
                // Adopt the state silently; no edge, no timestamp reset.
                slot.touched = raw;
                slot.resync = false;
                continue;
            }
            if raw != slot.touched {
                let accepted = match slot.last_transition {
                    None => true,
                    // Saturating: a fabricated or wrapped clock must reject,
                    // not panic.
                    Some(t) => {
                        now.as_millis().saturating_sub(t.as_millis()) >= DEBOUNCE_WINDOW.as_millis()
                    }
                };
                if accepted && raw {
                    slot.active = true;
                }
                // State and timestamp update regardless of the debounce
                // outcome — a rejected bounce still restarts the window.
                slot.touched = raw;
                slot.last_transition = Some(now);
            }
        }
    }

    /// Take the latched press edge for `button`, clearing it.
    ///
    /// Read-once: a second call without an intervening press returns
    /// `false`.
    #[allow(clippy::indexing_slicing)] // Safety: index() is 0..=3 by construction; slots has 4 elements
    pub fn consume(&mut self, button: ControlButton) -> bool {
        let slot = &mut self.slots[button.index()];
        core::mem::take(&mut slot.active)
    }

    /// Enable or disable `button`.
    ///
    /// Disabled buttons are skipped entirely during [`poll`] and can never
    /// latch an edge. Re-enabling resynchronises against the live touch
    /// state before edges are detected again.
    ///
    /// [`poll`]: TouchControls::poll
    #[allow(clippy::indexing_slicing)] // Safety: index() is 0..=3 by construction
    pub fn set_enabled(&mut self, button: ControlButton, enabled: bool) {
        let slot = &mut self.slots[button.index()];
        if enabled && slot.disabled {
            slot.resync = true;
        }
        if !enabled {
            slot.active = false;
        }
        slot.disabled = !enabled;
    }

    /// `true` when `button` currently accepts input.
    #[allow(clippy::indexing_slicing)] // Safety: index() is 0..=3 by construction
    pub fn is_enabled(&self, button: ControlButton) -> bool {
        !self.slots[button.index()].disabled
    }

    /// Debounced touched state of `button` (for rendering pressed visuals).
    #[allow(clippy::indexing_slicing)] // Safety: index() is 0..=3 by construction
    pub fn is_touched(&self, button: ControlButton) -> bool {
        self.slots[button.index()].touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn inside(controls: &TouchControls, button: ControlButton) -> Point {
        controls.slots[button.index()].region.center
    }

    fn far_away() -> Point {
        Point::new(1, 1)
    }

    #[test]
    fn test_press_latches_edge_once() {
        let mut c = TouchControls::standard_layout();
        let p = inside(&c, ControlButton::Next);
        c.poll(Some(p), at(0));
        assert!(c.consume(ControlButton::Next));
        // Read-once: no intervening poll, second consume is false.
        assert!(!c.consume(ControlButton::Next));
    }

    #[test]
    fn test_holding_does_not_relatch() {
        let mut c = TouchControls::standard_layout();
        let p = inside(&c, ControlButton::Next);
        c.poll(Some(p), at(0));
        assert!(c.consume(ControlButton::Next));
        // Finger stays down well past the debounce window.
        c.poll(Some(p), at(500));
        c.poll(Some(p), at(1000));
        assert!(!c.consume(ControlButton::Next));
    }

    /// Transitions at t=0 (press), t=40 (release), t=95 (press): only the
    /// first press latches. The t=95 press is rejected because it is less
    /// than 100 ms after the *detected* transition at t=40.
    #[test]
    fn test_debounce_window_counts_from_last_detected_transition() {
        let mut c = TouchControls::standard_layout();
        let p = inside(&c, ControlButton::Back);
        c.poll(Some(p), at(0));
        assert!(c.consume(ControlButton::Back));

        c.poll(None, at(40)); // release, rejected (40 < 100) but detected
        c.poll(Some(p), at(95)); // press, 55 ms after t=40 → rejected
        assert!(!c.consume(ControlButton::Back));

        // A later press with a quiet window is accepted again.
        c.poll(None, at(150));
        c.poll(Some(p), at(300));
        assert!(c.consume(ControlButton::Back));
    }

    #[test]
    fn test_release_never_latches() {
        let mut c = TouchControls::standard_layout();
        let p = inside(&c, ControlButton::Next);
        c.poll(Some(p), at(0));
        let _ = c.consume(ControlButton::Next);
        c.poll(None, at(200));
        assert!(!c.consume(ControlButton::Next));
    }

    #[test]
    fn test_disabled_button_never_latches() {
        let mut c = TouchControls::standard_layout();
        c.set_enabled(ControlButton::Pause, false);
        let p = inside(&c, ControlButton::Pause);
        for ms in [0u64, 200, 400, 600] {
            c.poll(Some(p), at(ms));
        }
        assert!(!c.consume(ControlButton::Pause));
    }

    #[test]
    fn test_disabling_clears_a_pending_edge() {
        let mut c = TouchControls::standard_layout();
        let p = inside(&c, ControlButton::Play);
        c.poll(Some(p), at(0));
        c.set_enabled(ControlButton::Play, false);
        assert!(!c.consume(ControlButton::Play));
    }

    #[test]
    fn test_reenabled_button_resyncs_without_spurious_edge() {
        let mut c = TouchControls::standard_layout();
        // Play and Pause share a centre. Pause is disabled while the finger
        // lands on Play.
        c.set_enabled(ControlButton::Pause, false);
        let p = inside(&c, ControlButton::Play);
        c.poll(Some(p), at(0));
        assert!(c.consume(ControlButton::Play));

        // The loop swaps the pair; the finger is still down.
        c.set_enabled(ControlButton::Play, false);
        c.set_enabled(ControlButton::Pause, true);
        c.poll(Some(p), at(10));
        assert!(
            !c.consume(ControlButton::Pause),
            "held-over finger must not press the swapped-in button"
        );

        // An actual release-then-press later IS a pause.
        c.poll(None, at(300));
        c.poll(Some(p), at(600));
        assert!(c.consume(ControlButton::Pause));
    }

    #[test]
    fn test_touch_outside_every_region_latches_nothing() {
        let mut c = TouchControls::standard_layout();
        c.poll(Some(far_away()), at(0));
        for b in ControlButton::ALL {
            assert!(!c.consume(b));
        }
    }

    #[test]
    fn test_hit_region_bounds_are_exclusive() {
        let r = HitRegion::new(100, 100, 30, 30);
        assert!(r.contains(Point::new(100, 100)));
        assert!(r.contains(Point::new(86, 114)));
        // Exactly on the boundary → outside.
        assert!(!r.contains(Point::new(85, 100)));
        assert!(!r.contains(Point::new(115, 100)));
        assert!(!r.contains(Point::new(100, 85)));
        assert!(!r.contains(Point::new(100, 115)));
    }
}
