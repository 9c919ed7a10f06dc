//! Error taxonomy shared across the player.
//!
//! Two layers:
//!
//! - [`SourceError`] — failures raised by the codec collaborator while
//!   opening, parsing, or decoding a track.
//! - [`ScanError`] — failures raised while walking the storage volume.
//!
//! End-of-stream is deliberately NOT an error: the stream reader reports it
//! as a short read and the engine stops cleanly.

use thiserror_no_std::Error;

/// Failures raised by the codec collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// The requested path does not exist on the volume.
    #[error("file not found")]
    NotFound,
    /// The file is not a recognisable FLAC stream.
    #[error("unrecognised stream container")]
    Format,
    /// The stream header could not be parsed into track metadata.
    #[error("metadata unreadable")]
    Metadata,
    /// The bitstream is corrupt mid-track. Treated like end-of-stream by the
    /// engine: playback stops.
    #[error("bitstream decode failure")]
    Decode,
}

/// Failures raised during a storage scan.
///
/// Any error aborts the entire scan with no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// The underlying volume failed while a directory was being read.
    #[error("directory read failed")]
    Storage,
    /// The directory tree nests deeper than the walker's fixed bound.
    #[error("directory tree too deep")]
    DepthExceeded,
    /// The playlist rejected an entry under its `Fail` overflow policy.
    #[error("playlist capacity exhausted")]
    CapacityExceeded,
}
