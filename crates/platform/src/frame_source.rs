//! Codec collaborator contract — frame-oriented FLAC decode.
//!
//! The decoder itself (bitstream parsing, residual reconstruction) is an
//! external collaborator; this module only fixes the seam the player core
//! consumes: open a path, read the stream header once, then produce discrete
//! PCM frames on demand until end-of-stream.
//!
//! The constraint of fixed-size stack arrays is intentional: decoded frames
//! feed a DMA buffer and must never touch the heap.

use crate::error::SourceError;

/// Largest decoded frame the contract permits, in bytes.
///
/// FLAC block size tops out at 4 096 samples; at 2 channels × 16-bit that is
/// 16 384 bytes. The array is always fully allocated; `len` marks the valid
/// prefix.
pub const FRAME_CAPACITY_BYTES: usize = 4096 * 2 * 2;

/// One decoded PCM frame — interleaved little-endian samples.
pub struct Frame {
    /// Raw interleaved sample bytes.
    pub bytes: [u8; FRAME_CAPACITY_BYTES],
    /// Number of valid bytes in `bytes`.
    pub len: usize,
    /// Number of inter-channel samples the frame carries.
    pub samples: usize,
}

impl Frame {
    /// Create a zeroed `Frame` suitable for use as a decode target.
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0u8; FRAME_CAPACITY_BYTES],
            len: 0,
            samples: 0,
        }
    }
}

/// Stream header fields, populated once per track and immutable until the
/// next track is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackMetadata {
    /// Total inter-channel samples in the stream (0 when the header omits it).
    pub total_samples: u64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (16 or 24).
    pub bits_per_sample: u8,
    /// Channel count (1 = mono, 2 = stereo).
    pub channels: u8,
}

impl TrackMetadata {
    /// Bytes occupied by one inter-channel sample frame
    /// (`channels × bits_per_sample / 8`).
    ///
    /// Returns `None` for degenerate headers (zero channels or sub-byte
    /// depth) so callers never divide by zero.
    pub fn bytes_per_sample_frame(&self) -> Option<usize> {
        let bytes_per_sample = usize::from(self.bits_per_sample).checked_div(8)?;
        let n = usize::from(self.channels).checked_mul(bytes_per_sample)?;
        if n == 0 {
            None
        } else {
            Some(n)
        }
    }

    /// Whole-second track duration, rounded down; 0 when the rate is unknown.
    #[allow(clippy::arithmetic_side_effects)] // divisor checked non-zero at entry
    pub fn duration_seconds(&self) -> u32 {
        if self.sample_rate == 0 {
            return 0;
        }
        let seconds = self.total_samples / u64::from(self.sample_rate);
        #[allow(clippy::cast_possible_truncation)] // duration of any real track fits u32
        let seconds = seconds as u32;
        seconds
    }
}

/// Outcome of a [`FrameStream::next_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRead {
    /// `out` now holds one decoded frame.
    Decoded,
    /// The stream is exhausted; `out` was not touched. Not an error.
    EndOfStream,
}

/// Factory side of the codec seam: opens a track for decoding.
pub trait FrameSource {
    /// Per-track decode stream handle.
    type Stream: FrameStream;

    /// Open `path` and prepare it for decoding.
    ///
    /// # Errors
    ///
    /// [`SourceError::NotFound`] when the path does not exist,
    /// [`SourceError::Format`] when the file is not a FLAC stream.
    fn open(&mut self, path: &str) -> Result<Self::Stream, SourceError>;
}

/// Per-track side of the codec seam. Dropping the stream closes the file.
///
/// All calls run synchronously to completion within one cooperative tick;
/// there is no cancellation.
pub trait FrameStream {
    /// Parse the stream header.
    ///
    /// Called once, before the first [`next_frame`].
    ///
    /// # Errors
    ///
    /// [`SourceError::Metadata`] when the header cannot be parsed.
    ///
    /// [`next_frame`]: FrameStream::next_frame
    fn metadata(&mut self) -> Result<TrackMetadata, SourceError>;

    /// Decode the next frame into `out`.
    ///
    /// # Errors
    ///
    /// [`SourceError::Decode`] on a corrupt bitstream.
    fn next_frame(&mut self, out: &mut Frame) -> Result<FrameRead, SourceError>;
}
