//! Boot sequence for the Tonewheel player.
//!
//! Startup order (order matters — each step feeds the next):
//!   1. Bring up clocks, I2C (touch), LTDC (display), SAI+DMA (audio out)
//!   2. Codec init — failures are REPORTED, NOT retried: the player runs on
//!      in a degraded state rather than halting at boot
//!   3. Block until the removable volume is inserted and mounted
//!   4. Scan the volume into the playlist (a scan failure leaves the
//!      playlist empty — there are no partial results)
//!   5. Start the first track and enter the control loop
//!
//! Nothing is persisted: every boot rebuilds all session state from the
//! storage scan.

use embassy_time::Timer;
use library::playlist::Playlist;
use library::scanner;
use platform::error::ScanError;
use platform::storage::Volume;

/// Poll interval while waiting for the medium, in milliseconds.
pub const VOLUME_POLL_MS: u64 = 100;

/// Ordered boot steps, for documentation and the bring-up narration.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Clocks + peripherals: I2C3 (touch), LTDC (display), SAI2+DMA (audio)",
    "2. Codec init at 44.1 kHz — report failure, continue degraded",
    "3. Wait for the removable volume",
    "4. Scan .flac files into the playlist (no partial results)",
    "5. Start the first track, enter the control loop",
];

/// Block until the volume reports ready, polling every [`VOLUME_POLL_MS`].
pub async fn wait_for_volume<V: Volume>(volume: &mut V) {
    while !volume.ready() {
        Timer::after_millis(VOLUME_POLL_MS).await;
    }
}

/// Scan the volume into `playlist`.
///
/// On failure the playlist is left empty (the scanner clears it) and the
/// error is handed back for logging; the caller continues with an idle
/// player rather than halting the device.
///
/// # Errors
///
/// See [`scanner::scan`].
pub fn scan_volume<V: Volume, const N: usize>(
    volume: &mut V,
    playlist: &mut Playlist<N>,
) -> Result<usize, ScanError> {
    scanner::scan(volume, playlist)?;
    Ok(playlist.len())
}
