//! FLAC codec integration point.
//!
//! # Decoder crate selection rationale
//!
//! * `libfoxenflac` via C FFI — tiny, heap-free, state-machine based; the
//!   natural fit for this board, build.rs integration pending.
//! * `claxon` — pure Rust but requires `std`; unusable in this firmware.
//! * `symphonia` — requires `std` and is far too large for internal flash.
//!
//! TODO(foxenflac-ffi): land the build.rs + FFI wrapper and implement
//! `FrameStream::next_frame` over it. Until then `open` reports the track
//! as unreadable and the player idles; the decode pipeline itself is
//! exercised end-to-end by the host test suite over the scripted source.

use platform::error::SourceError;
use platform::frame_source::{Frame, FrameRead, FrameSource, FrameStream, TrackMetadata};

/// FLAC decode collaborator for the hardware target.
pub struct FlacCodec;

impl FlacCodec {
    /// Create the codec front-end.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for FlacCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Open decode stream (never constructed until the FFI lands).
pub struct FlacStream;

impl FrameSource for FlacCodec {
    type Stream = FlacStream;

    fn open(&mut self, path: &str) -> Result<Self::Stream, SourceError> {
        defmt::warn!("FLAC decode not wired yet, refusing {=str}", path);
        Err(SourceError::Format)
    }
}

impl FrameStream for FlacStream {
    fn metadata(&mut self) -> Result<TrackMetadata, SourceError> {
        Err(SourceError::Metadata)
    }

    fn next_frame(&mut self, _out: &mut Frame) -> Result<FrameRead, SourceError> {
        Ok(FrameRead::EndOfStream)
    }
}
