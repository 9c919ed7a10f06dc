//! Audio engine — transport state machine plus the double-buffer refill
//! protocol.
//!
//! The engine owns the process-lifetime double buffer and streams a track
//! through it:
//!
//! ```text
//!   FrameSource ──▶ StreamReader ──▶ [ half 0 | half 1 ] ──▶ AudioSink (DMA)
//!                        ▲                                        │
//!                        └──── tick(): refill the free half ◀─────┘
//!                                       RefillLatch (ISR boundary)
//! ```
//!
//! `start` pre-fills BOTH halves before hardware output begins, so the sink
//! always plays one half while the other is either fresh or being refilled.
//! Decode and storage latency is unpredictable relative to the audio clock;
//! output stays gap-free provided each refill lands before the hardware
//! wraps back into that half. A late refill is audible and accepted — the
//! latch coalesces, nothing crashes.
//!
//! All state transitions happen on the control loop. The only engine state
//! the interrupt context touches is the [`RefillLatch`].

use platform::audio::AudioSink;
use platform::audio_types::SampleRateHz;
use platform::error::SourceError;
use platform::frame_source::{FrameSource, TrackMetadata};
use thiserror_no_std::Error;

use crate::latch::{BufferHalf, RefillLatch};
use crate::reader::StreamReader;

/// Current playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No track is loaded or playback has been explicitly stopped.
    Stopped,
    /// A track is actively decoding and streaming to the sink.
    Playing,
    /// Playback is temporarily suspended; buffered content is preserved.
    Paused,
}

/// Errors returned by [`AudioEngine`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The codec collaborator failed.
    #[error("codec failure")]
    Source(#[from] SourceError),
    /// The audio hardware refused an operation. Reported, never retried;
    /// the player continues degraded.
    #[error("audio hardware fault")]
    Hardware,
    /// `start` requires the `Stopped` state.
    #[error("a session is already active")]
    NotStopped,
    /// `pause` requires the `Playing` state.
    #[error("not playing")]
    NotPlaying,
    /// `resume` requires the `Paused` state.
    #[error("not paused")]
    NotPaused,
    /// `stop` requires an active (playing or paused) session.
    #[error("no active session")]
    NotActive,
}

/// Double-buffered decode-ahead playback engine.
///
/// Generic over the codec factory `F` and the hardware sink `O`; both are
/// owned for the process lifetime. The audio buffer is a caller-provided
/// arena (even length, split into two equal halves) so the firmware can
/// place it in DMA-reachable memory.
pub struct AudioEngine<'a, F: FrameSource, O: AudioSink> {
    source: F,
    sink: O,
    latch: &'a RefillLatch,
    buffer: &'a mut [u8],
    session: Option<StreamReader<F::Stream>>,
    state: PlayerState,
    samples_played: u64,
}

impl<'a, F: FrameSource, O: AudioSink> AudioEngine<'a, F, O> {
    /// Create a stopped engine over `buffer`.
    ///
    /// `buffer` must have a non-zero, even length; the two halves must be
    /// equal for the hardware's midpoint notification to mean anything.
    pub fn new(source: F, sink: O, latch: &'a RefillLatch, buffer: &'a mut [u8]) -> Self {
        debug_assert!(!buffer.is_empty() && buffer.len() % 2 == 0);
        Self {
            source,
            sink,
            latch,
            buffer,
            session: None,
            state: PlayerState::Stopped,
            samples_played: 0,
        }
    }

    /// Open `path`, pre-fill the whole buffer, and begin hardware output.
    ///
    /// Precondition: `Stopped`. On success the state is `Playing`.
    ///
    /// If the track is shorter than the double buffer the session ends
    /// immediately: the file is closed, hardware output never starts, and
    /// the call still returns `Ok` — a short track is not an error.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::NotStopped`] when a session is already active.
    /// - [`PlayerError::Source`] for open/metadata/decode failures; the
    ///   stream is closed and the engine remains `Stopped`.
    /// - [`PlayerError::Hardware`] when the sink refuses to configure or
    ///   start.
    pub fn start(&mut self, path: &str) -> Result<(), PlayerError> {
        if self.state != PlayerState::Stopped {
            return Err(PlayerError::NotStopped);
        }
        debug_assert_eq!(self.samples_played, 0);

        let stream = self.source.open(path)?;
        let mut reader = StreamReader::new(stream)?;
        let metadata = *reader.metadata();
        // Degenerate headers (zero channels, sub-byte depth, out-of-range
        // rate) are format errors: the sink cannot be programmed for them.
        let rate = SampleRateHz::new(metadata.sample_rate)
            .map_err(|_| PlayerError::Source(SourceError::Format))?;
        if metadata.bytes_per_sample_frame().is_none() {
            return Err(PlayerError::Source(SourceError::Format));
        }
        self.sink
            .configure(rate, metadata.channels)
            .map_err(|_| PlayerError::Hardware)?;

        // Pre-fill BOTH halves before any hardware streaming begins.
        let filled = reader.pull(self.buffer)?;
        if filled < self.buffer.len() {
            // Track shorter than the double buffer: session over before it
            // started. `reader` drops here, closing the file.
            return Ok(());
        }

        // A stale completion from the previous session must not trigger a
        // refill of the freshly filled buffer.
        self.latch.clear();
        if self.sink.start(&*self.buffer).is_err() {
            return Err(PlayerError::Hardware);
        }
        self.session = Some(reader);
        self.state = PlayerState::Playing;
        Ok(())
    }

    /// Suspend hardware output. Precondition: `Playing`.
    ///
    /// # Errors
    ///
    /// [`PlayerError::NotPlaying`]; [`PlayerError::Hardware`] leaves the
    /// state unchanged.
    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlayerState::Playing {
            return Err(PlayerError::NotPlaying);
        }
        self.sink.pause().map_err(|_| PlayerError::Hardware)?;
        self.state = PlayerState::Paused;
        Ok(())
    }

    /// Resume hardware output. Precondition: `Paused`.
    ///
    /// # Errors
    ///
    /// [`PlayerError::NotPaused`]; [`PlayerError::Hardware`] leaves the
    /// state unchanged.
    pub fn resume(&mut self) -> Result<(), PlayerError> {
        if self.state != PlayerState::Paused {
            return Err(PlayerError::NotPaused);
        }
        self.sink.resume().map_err(|_| PlayerError::Hardware)?;
        self.state = PlayerState::Playing;
        Ok(())
    }

    /// Halt output, close the track, and reset the play position.
    ///
    /// Precondition: `Playing` or `Paused`. Also invoked internally when the
    /// stream ends.
    ///
    /// # Errors
    ///
    /// [`PlayerError::NotActive`] when already stopped.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlayerState::Playing | PlayerState::Paused => {
                self.teardown();
                Ok(())
            }
            PlayerState::Stopped => Err(PlayerError::NotActive),
        }
    }

    /// One control-loop iteration of the refill protocol.
    ///
    /// Takes and clears the pending half-completion, if any, and refills
    /// exactly that half. A short pull means the stream ended: the engine
    /// stops itself. A decode failure behaves identically to end-of-stream.
    pub fn tick(&mut self) {
        if self.state != PlayerState::Playing {
            return;
        }
        let Some(half) = self.latch.take() else {
            return;
        };
        let Some(reader) = self.session.as_mut() else {
            // Playing implies an open session; tolerate the impossible.
            return;
        };
        let metadata = *reader.metadata();

        let half_len = self.buffer.len() / 2;
        let (first, second) = self.buffer.split_at_mut(half_len);
        let slot = match half {
            BufferHalf::First => first,
            BufferHalf::Second => second,
        };

        let pulled = match reader.pull(slot) {
            Ok(n) => n,
            Err(_) => {
                // Corrupt bitstream mid-track: same handling as running out
                // of stream — stop cleanly.
                self.teardown();
                return;
            }
        };

        if let Some(frame_bytes) = metadata.bytes_per_sample_frame() {
            #[allow(clippy::arithmetic_side_effects)] // frame_bytes > 0 by construction
            let samples = (pulled / frame_bytes) as u64;
            self.samples_played = self.samples_played.saturating_add(samples);
        }

        if pulled < half_len {
            self.teardown();
        }
    }

    /// Fraction of the track played so far, clamped to `[0.0, 1.0]`.
    ///
    /// 0.0 while stopped, and 0.0 for headers that omit the total sample
    /// count — a defined edge case, not an error.
    pub fn progress(&self) -> f32 {
        let Some(reader) = self.session.as_ref() else {
            return 0.0;
        };
        let total = reader.metadata().total_samples;
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)] // progress display needs ~3 digits
        let ratio = self.samples_played as f32 / total as f32;
        ratio.min(1.0)
    }

    /// Current transport state.
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Inter-channel samples decoded into the buffer since `start`.
    pub fn samples_played(&self) -> u64 {
        self.samples_played
    }

    /// Header of the active track, if a session is open.
    pub fn metadata(&self) -> Option<&TrackMetadata> {
        self.session.as_ref().map(StreamReader::metadata)
    }

    /// The latch the hardware completion handler must signal.
    ///
    /// The notification side of the refill protocol lives here:
    /// the DMA half-transfer and transfer-complete interrupts call
    /// [`RefillLatch::signal`] with the half they just finished.
    pub fn refill_latch(&self) -> &RefillLatch {
        self.latch
    }

    /// Shared access to the sink.
    pub fn sink(&self) -> &O {
        &self.sink
    }

    /// Mutable access to the sink (volume changes from the control loop).
    pub fn sink_mut(&mut self) -> &mut O {
        &mut self.sink
    }

    /// Common exit path: halt hardware, drop the session (closing the
    /// file), zero the play position.
    fn teardown(&mut self) {
        // The sink is being abandoned; a stop failure changes nothing.
        let _ = self.sink.stop();
        self.session = None;
        self.samples_played = 0;
        self.state = PlayerState::Stopped;
    }
}
