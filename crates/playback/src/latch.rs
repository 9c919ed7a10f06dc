//! Refill latch — the one word of state shared across the interrupt boundary.
//!
//! The DMA completion interrupt fires when the hardware finishes playing a
//! buffer half; the cooperative control loop refills that half on its next
//! tick. The latch carries "which half is free" from the interrupt context
//! to the loop as a single-slot, last-write-wins cell:
//!
//! - [`RefillLatch::signal`] (interrupt context) overwrites any unconsumed
//!   value. Missed notifications deliberately coalesce into one "refill
//!   immediately" — a loop that fell behind must not replay a backlog of
//!   stale refills, it must catch up once. A queue here would be a bug.
//! - [`RefillLatch::take`] (control loop) atomically reads and clears.
//!
//! If the loop is too slow to take a notification before the next one
//! arrives, one half is simply not refilled in time and the listener hears
//! a glitch. That degradation is accepted; it is not a fault to eliminate.

use core::sync::atomic::{AtomicU8, Ordering};

/// Which half of the double buffer the hardware has finished playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferHalf {
    /// Bytes `0 .. N/2`.
    First,
    /// Bytes `N/2 .. N`.
    Second,
}

const EMPTY: u8 = 0;
const FIRST: u8 = 1;
const SECOND: u8 = 2;

/// Single-slot atomic latch for buffer-half completion notifications.
///
/// `const`-constructible so the interrupt handler can reach it through a
/// `static`.
pub struct RefillLatch(AtomicU8);

impl RefillLatch {
    /// Create an empty latch.
    pub const fn new() -> Self {
        Self(AtomicU8::new(EMPTY))
    }

    /// Record that `half` has been fully played.
    ///
    /// Interrupt-context safe: a plain atomic exchange, no locking, no
    /// queueing. Overwrites any value the control loop has not yet taken.
    pub fn signal(&self, half: BufferHalf) {
        let value = match half {
            BufferHalf::First => FIRST,
            BufferHalf::Second => SECOND,
        };
        // AcqRel: the release half publishes nothing (the ISR writes no other
        // shared data), but the exchange keeps signal/take totally ordered.
        self.0.swap(value, Ordering::AcqRel);
    }

    /// Atomically take and clear the pending notification, if any.
    pub fn take(&self) -> Option<BufferHalf> {
        match self.0.swap(EMPTY, Ordering::AcqRel) {
            FIRST => Some(BufferHalf::First),
            SECOND => Some(BufferHalf::Second),
            _ => None,
        }
    }

    /// Discard any pending notification.
    ///
    /// Called when a session starts so a stale completion from the previous
    /// track cannot trigger a refill of the freshly pre-filled buffer.
    pub fn clear(&self) {
        self.0.store(EMPTY, Ordering::Release);
    }
}

impl Default for RefillLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_on_empty_latch_is_none() {
        let latch = RefillLatch::new();
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn test_signal_then_take_round_trips() {
        let latch = RefillLatch::new();
        latch.signal(BufferHalf::First);
        assert_eq!(latch.take(), Some(BufferHalf::First));
        assert_eq!(latch.take(), None, "take must clear the slot");
    }

    #[test]
    fn test_newer_signal_overwrites_unconsumed_one() {
        let latch = RefillLatch::new();
        latch.signal(BufferHalf::First);
        latch.signal(BufferHalf::Second);
        // Two rapid notifications coalesce: only the most recent survives.
        assert_eq!(latch.take(), Some(BufferHalf::Second));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn test_clear_discards_pending() {
        let latch = RefillLatch::new();
        latch.signal(BufferHalf::Second);
        latch.clear();
        assert_eq!(latch.take(), None);
    }
}
