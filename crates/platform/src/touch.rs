//! Touch panel contract.
//!
//! The panel reports at most one point per call. Multi-touch hardware is
//! truncated to the first detected point — the controls this player draws
//! are single-finger targets, so additional points carry no meaning.

use embedded_graphics::prelude::Point;

/// Touch input device, polled once per control-loop tick.
pub trait TouchPanel {
    /// Current touch point in display coordinates, or `None` when the
    /// screen is not being touched.
    fn read(&mut self) -> Option<Point>;
}
