//! Application UI layer — debounced touch controls, renderer seam, and the
//! per-tick now-playing snapshot.
//!
//! This crate is `no_std` by default; it only uses `core` + `heapless` +
//! `embassy-time` timestamps.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]


pub mod now_playing;
pub mod render;
pub mod touch;

pub use now_playing::NowPlaying;
pub use render::Renderer;
pub use touch::{ControlButton, HitRegion, TouchControls, DEBOUNCE_WINDOW};
