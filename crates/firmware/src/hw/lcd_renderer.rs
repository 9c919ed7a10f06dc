//! LTDC renderer — the pixel side of the player.
//!
//! Rendering primitives (text, polygons, the progress bar) are the display
//! collaborator's concern; the player core only promises a fresh
//! [`NowPlaying`] snapshot per tick. What belongs here and nowhere else is
//! the vertical-sync wait: the double-layer flip must not tear, and the
//! busy-wait on the sync flag stays behind the `Renderer` seam so the
//! control loop code never spins on a register.

use ui::now_playing::NowPlaying;
use ui::render::Renderer;

/// Double-layered LTDC renderer.
pub struct LtdcRenderer {
    /// Foreground layer index; flipped on every draw.
    front_layer: u8,
}

impl LtdcRenderer {
    /// Wrap the (already initialised) LTDC peripheral.
    pub const fn new() -> Self {
        Self { front_layer: 1 }
    }
}

impl Default for LtdcRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for LtdcRenderer {
    type Error = core::convert::Infallible;

    fn wait_frame_boundary(&mut self) {
        // Spin on the LTDC vertical-sync status flag. The panel refreshes at
        // 60 Hz, so this bounds one tick at ~16.7 ms worst case.
        while !embassy_stm32::pac::LTDC.cdsr().read().vsyncs() {}
    }

    fn draw(&mut self, snapshot: &NowPlaying) -> Result<(), Self::Error> {
        self.front_layer ^= 1;
        defmt::trace!(
            "draw: layer={=u8} progress={=f32} playing={=bool}",
            self.front_layer,
            snapshot.progress,
            snapshot.playing
        );
        Ok(())
    }
}
