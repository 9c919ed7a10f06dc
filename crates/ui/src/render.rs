//! Renderer collaborator seam.
//!
//! Drawing (text, polygons, progress bar, layer flipping) is outside the
//! player core; the loop only promises to hand the renderer one
//! [`NowPlaying`] snapshot per tick. The panel's vertical-sync spin lives
//! behind [`wait_frame_boundary`] so no busy-wait leaks into the core.
//!
//! [`wait_frame_boundary`]: Renderer::wait_frame_boundary

use crate::now_playing::NowPlaying;

/// Screen renderer, invoked once per control-loop tick.
pub trait Renderer {
    /// Error type for draw failures.
    type Error: core::fmt::Debug;

    /// Block until the display reaches a frame boundary.
    ///
    /// On hardware this waits for the LTDC vertical-sync flag before the
    /// back/front layers are swapped.
    fn wait_frame_boundary(&mut self);

    /// Draw the player screen described by `snapshot`.
    fn draw(&mut self, snapshot: &NowPlaying) -> Result<(), Self::Error>;
}
