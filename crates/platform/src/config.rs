//! Application configuration and constants
//!
//! Central configuration values used across the player. All naming and
//! sizing should reference these constants rather than hardcoding values.

use crate::audio_types::VolumePercent;

/// The application name
pub const APP_NAME: &str = "Tonewheel";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Audio DMA double buffer size in bytes; the hardware consumes it in two
/// equal halves (ping-pong). Allocated once for the process lifetime.
pub const AUDIO_BUFFER_BYTES: usize = 32 * 1024;

/// Control-loop tick period.
pub const TICK_INTERVAL_MS: u64 = 5;

/// Most tracks a scan may collect.
pub const PLAYLIST_CAPACITY: usize = 25;

/// Longest full file path the playlist stores, in bytes.
pub const MAX_PATH_BYTES: usize = 128;

/// Deepest directory nesting the scanner follows.
pub const MAX_SCAN_DEPTH: usize = 4;

/// The one file extension the scanner collects (ASCII, case-insensitive).
pub const SCAN_EXTENSION: &str = "flac";

/// Output volume programmed at codec bring-up.
pub const INITIAL_VOLUME: VolumePercent = VolumePercent::new_const(10);

/// Display panel width in pixels (RK043FN48H).
pub const DISPLAY_WIDTH: i32 = 480;

/// Display panel height in pixels.
pub const DISPLAY_HEIGHT: i32 = 272;

