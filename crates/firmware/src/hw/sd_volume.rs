//! SD card volume integration point.
//!
//! The FAT mechanics belong to the storage collaborator. The bring-up that
//! remains on this board:
//!
//!   1. SDMMC1 in 4-bit bus mode (PC8-PC12 + PD2), card-detect on PC13
//!   2. a FAT driver over the SDMMC block device
//!   3. `Volume::list_dir` mapped onto the driver's directory iteration
//!
//! TODO(sdmmc-bringup): wire embassy-stm32's SDMMC driver to a FAT layer
//! and replace the placeholder below. `ready()` polls the card-detect pin
//! level once that is wired; reporting `false` keeps the boot sequence
//! parked at "waiting for volume" instead of scanning nothing.

use heapless::Vec;
use platform::storage::{DirEntry, Volume, MAX_DIR_ENTRIES};

/// Removable-volume collaborator for the hardware target.
pub struct SdVolume;

impl SdVolume {
    /// Create the volume front-end.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SdVolume {
    fn default() -> Self {
        Self::new()
    }
}

/// Listing failure (no variants yet; the placeholder cannot fail).
#[derive(Debug)]
pub struct SdError;

impl Volume for SdVolume {
    type Error = SdError;

    fn ready(&mut self) -> bool {
        false
    }

    fn list_dir(
        &mut self,
        _path: &str,
        _out: &mut Vec<DirEntry, MAX_DIR_ENTRIES>,
    ) -> Result<(), SdError> {
        Ok(())
    }
}
