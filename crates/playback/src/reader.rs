//! Stream reader — flattens frame-oriented decode into byte-sized pulls.
//!
//! The codec hands out whole frames; the DMA buffer wants exact half-buffer
//! byte counts. `StreamReader` bridges the two by carrying a partially
//! consumed frame across calls.
//!
//! Invariant: `offset <= frame.len` at all times; a new frame is requested
//! only when `offset == frame.len`.

use platform::error::SourceError;
use platform::frame_source::{Frame, FrameRead, FrameStream, TrackMetadata};

/// Pull-oriented adapter over one open decode stream.
///
/// Owned exclusively by the active playback session; dropping it closes the
/// underlying file.
pub struct StreamReader<S: FrameStream> {
    stream: S,
    metadata: TrackMetadata,
    frame: Frame,
    offset: usize,
    /// Set once the stream reports end-of-stream; the stream is never asked
    /// for another frame after that.
    finished: bool,
}

impl<S: FrameStream> StreamReader<S> {
    /// Wrap `stream`, reading its header.
    ///
    /// # Errors
    ///
    /// Propagates [`SourceError::Metadata`] from the header parse.
    pub fn new(mut stream: S) -> Result<Self, SourceError> {
        let metadata = stream.metadata()?;
        Ok(Self {
            stream,
            metadata,
            frame: Frame::zeroed(),
            offset: 0,
            finished: false,
        })
    }

    /// Stream header fields, fixed for the lifetime of this reader.
    pub fn metadata(&self) -> &TrackMetadata {
        &self.metadata
    }

    /// Copy up to `out.len()` decoded bytes into `out`, draining the current
    /// frame before requesting the next one.
    ///
    /// Returns fewer bytes than requested only at end-of-stream. Runs
    /// synchronously to completion; there is no partial-progress error state.
    ///
    /// # Errors
    ///
    /// Propagates [`SourceError::Decode`] from the codec. The caller treats
    /// it like end-of-stream: playback stops.
    #[allow(clippy::arithmetic_side_effects)] // Safety: offset <= frame.len and filled <= out.len() invariants bound every op
    #[allow(clippy::indexing_slicing)] // Safety: ranges derived from the same invariants
    pub fn pull(&mut self, out: &mut [u8]) -> Result<usize, SourceError> {
        let mut filled = 0;
        while filled < out.len() {
            if self.offset == self.frame.len {
                if self.finished {
                    break;
                }
                match self.stream.next_frame(&mut self.frame)? {
                    FrameRead::Decoded => self.offset = 0,
                    FrameRead::EndOfStream => {
                        self.finished = true;
                        break;
                    }
                }
                // A zero-length frame is legal; loop back for the next one.
                continue;
            }
            let take = (self.frame.len - self.offset).min(out.len() - filled);
            out[filled..filled + take]
                .copy_from_slice(&self.frame.bytes[self.offset..self.offset + take]);
            self.offset += take;
            filled += take;
        }
        Ok(filled)
    }
}
