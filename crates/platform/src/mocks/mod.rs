//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests: a scripted frame source, a
//! state-recording audio sink, a queued touch panel, and an in-memory
//! volume.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::arithmetic_side_effects)] // test scaffolding; inputs are scripted
#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // mocks may fail loudly

use embedded_graphics::prelude::Point;
use heapless::{Deque, String, Vec};

use crate::audio_types::{SampleRateHz, VolumePercent};
use crate::error::SourceError;
use crate::frame_source::{Frame, FrameRead, FrameSource, FrameStream, TrackMetadata};
use crate::storage::{DirEntry, EntryKind, Volume, MAX_DIR_ENTRIES, MAX_NAME_BYTES};
use crate::touch::TouchPanel;

// ── Frame source ─────────────────────────────────────────────────────────────

/// Most frames one scripted track may emit.
pub const MOCK_MAX_FRAMES: usize = 64;

/// Failure a scripted track injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// `open` fails with `NotFound`.
    OpenNotFound,
    /// `open` fails with `Format`.
    OpenFormat,
    /// `metadata` fails.
    Metadata,
    /// `next_frame` fails with `Decode` when asked for frame `n` (0-based).
    DecodeAtFrame(usize),
}

/// One scripted track: header fields plus the byte size of each frame.
#[derive(Debug, Clone)]
pub struct MockTrack {
    /// Path the track answers to.
    pub path: String<128>,
    /// Header handed out by `metadata`.
    pub metadata: TrackMetadata,
    /// Frame sizes, in emission order.
    pub frame_sizes: Vec<usize, MOCK_MAX_FRAMES>,
    /// Optional injected failure.
    pub failure: Option<MockFailure>,
}

impl MockTrack {
    /// A stereo 16-bit 44.1 kHz track emitting `frame_sizes`-byte frames.
    pub fn new(path: &str, total_samples: u64, frame_sizes: &[usize]) -> Self {
        let mut sizes = Vec::new();
        for &s in frame_sizes {
            sizes.push(s).expect("too many scripted frames");
        }
        let mut p = String::new();
        p.push_str(path).expect("path too long");
        Self {
            path: p,
            metadata: TrackMetadata {
                total_samples,
                sample_rate: 44_100,
                bits_per_sample: 16,
                channels: 2,
            },
            frame_sizes: sizes,
            failure: None,
        }
    }

    /// Attach an injected failure.
    #[must_use]
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Scripted codec collaborator: serves [`MockTrack`]s by path.
#[derive(Debug, Default)]
pub struct MockFrameSource {
    tracks: Vec<MockTrack, 8>,
    open_streams: std::sync::Arc<core::sync::atomic::AtomicUsize>,
}

impl MockFrameSource {
    /// Create an empty source; every `open` fails with `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scripted track.
    pub fn add_track(&mut self, track: MockTrack) {
        self.tracks.push(track).expect("too many mock tracks");
    }

    /// Handle onto the open-stream counter: streams handed out minus streams
    /// dropped. Clone it before moving the source into the engine to assert
    /// that `stop()` really closed the file.
    pub fn open_stream_counter(&self) -> std::sync::Arc<core::sync::atomic::AtomicUsize> {
        self.open_streams.clone()
    }
}

/// One open scripted decode stream.
#[derive(Debug)]
pub struct MockStream {
    metadata: TrackMetadata,
    frame_sizes: Vec<usize, MOCK_MAX_FRAMES>,
    failure: Option<MockFailure>,
    next_frame_index: usize,
    /// Running byte counter — emitted bytes follow `counter % 251` so tests
    /// can check ordering across arbitrary chunkings.
    byte_counter: usize,
    eos_reported: bool,
    open_guard: std::sync::Arc<core::sync::atomic::AtomicUsize>,
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.open_guard
            .fetch_sub(1, core::sync::atomic::Ordering::Relaxed);
    }
}

impl FrameSource for MockFrameSource {
    type Stream = MockStream;

    fn open(&mut self, path: &str) -> Result<Self::Stream, SourceError> {
        let track = self
            .tracks
            .iter()
            .find(|t| t.path.as_str() == path)
            .ok_or(SourceError::NotFound)?;
        match track.failure {
            Some(MockFailure::OpenNotFound) => return Err(SourceError::NotFound),
            Some(MockFailure::OpenFormat) => return Err(SourceError::Format),
            _ => {}
        }
        self.open_streams
            .fetch_add(1, core::sync::atomic::Ordering::Relaxed);
        Ok(MockStream {
            metadata: track.metadata,
            frame_sizes: track.frame_sizes.clone(),
            failure: track.failure,
            next_frame_index: 0,
            byte_counter: 0,
            eos_reported: false,
            open_guard: self.open_streams.clone(),
        })
    }
}

impl FrameStream for MockStream {
    fn metadata(&mut self) -> Result<TrackMetadata, SourceError> {
        if self.failure == Some(MockFailure::Metadata) {
            return Err(SourceError::Metadata);
        }
        Ok(self.metadata)
    }

    fn next_frame(&mut self, out: &mut Frame) -> Result<FrameRead, SourceError> {
        // Contract check: callers must not ask for frames past a reported
        // end-of-stream.
        assert!(
            !self.eos_reported,
            "next_frame called after EndOfStream was reported"
        );
        if let Some(MockFailure::DecodeAtFrame(n)) = self.failure {
            if self.next_frame_index == n {
                return Err(SourceError::Decode);
            }
        }
        let Some(&size) = self.frame_sizes.get(self.next_frame_index) else {
            self.eos_reported = true;
            return Ok(FrameRead::EndOfStream);
        };
        self.next_frame_index += 1;
        for slot in out.bytes.iter_mut().take(size) {
            *slot = (self.byte_counter % 251) as u8;
            self.byte_counter += 1;
        }
        out.len = size;
        out.samples = size / 4; // stereo 16-bit
        Ok(FrameRead::Decoded)
    }
}

/// Reference byte for position `i` of a mock stream (`i % 251`).
pub fn mock_byte_at(i: usize) -> u8 {
    (i % 251) as u8
}

// ── Audio sink ───────────────────────────────────────────────────────────────

/// Error injected by [`MockAudioSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSinkError;

/// State-recording audio sink.
#[derive(Debug, Default)]
pub struct MockAudioSink {
    configured: Option<(u32, u8)>,
    volume: Option<u8>,
    streaming: bool,
    paused: bool,
    start_count: usize,
    stop_count: usize,
    pause_count: usize,
    resume_count: usize,
    last_buffer_len: usize,
    /// When set, `start` fails.
    pub fail_start: bool,
}

impl MockAudioSink {
    /// Create an idle sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last configured `(sample_rate, channels)`.
    pub fn configured(&self) -> Option<(u32, u8)> {
        self.configured
    }

    /// `true` between `start` and `stop`, regardless of pause.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// `true` while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of `start` calls.
    pub fn start_count(&self) -> usize {
        self.start_count
    }

    /// Number of `stop` calls.
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Number of `pause` calls.
    pub fn pause_count(&self) -> usize {
        self.pause_count
    }

    /// Number of `resume` calls.
    pub fn resume_count(&self) -> usize {
        self.resume_count
    }

    /// Length of the buffer handed to the last `start`.
    pub fn last_buffer_len(&self) -> usize {
        self.last_buffer_len
    }
}

impl crate::audio::AudioSink for MockAudioSink {
    type Error = MockSinkError;

    fn configure(&mut self, sample_rate: SampleRateHz, channels: u8) -> Result<(), MockSinkError> {
        self.configured = Some((sample_rate.get(), channels));
        Ok(())
    }

    fn set_volume(&mut self, volume: VolumePercent) -> Result<(), MockSinkError> {
        self.volume = Some(volume.get());
        Ok(())
    }

    fn start(&mut self, buffer: &[u8]) -> Result<(), MockSinkError> {
        if self.fail_start {
            return Err(MockSinkError);
        }
        self.streaming = true;
        self.paused = false;
        self.start_count += 1;
        self.last_buffer_len = buffer.len();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MockSinkError> {
        self.paused = true;
        self.pause_count += 1;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), MockSinkError> {
        self.paused = false;
        self.resume_count += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MockSinkError> {
        self.streaming = false;
        self.paused = false;
        self.stop_count += 1;
        Ok(())
    }
}

// ── Touch panel ──────────────────────────────────────────────────────────────

/// Scripted touch panel: queued readings, then `None` forever.
#[derive(Debug, Default)]
pub struct MockTouchPanel {
    readings: Deque<Option<Point>, 64>,
}

impl MockTouchPanel {
    /// Create a panel with no queued readings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one reading (a touch point or an explicit no-touch).
    pub fn push(&mut self, reading: Option<Point>) {
        self.readings.push_back(reading).expect("too many readings");
    }
}

impl TouchPanel for MockTouchPanel {
    fn read(&mut self) -> Option<Point> {
        self.readings.pop_front().flatten()
    }
}

// ── Volume ───────────────────────────────────────────────────────────────────

/// Error injected by [`MockVolume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockVolumeError;

/// In-memory directory tree: `(parent path, entry)` pairs.
#[derive(Debug, Default)]
pub struct MockVolume {
    entries: std::vec::Vec<(std::string::String, DirEntry)>,
    ready: bool,
    /// When set, listing this path fails.
    pub fail_path: Option<std::string::String>,
}

impl MockVolume {
    /// Create an empty, ready volume.
    pub fn new() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    fn add(&mut self, parent: &str, name: &str, kind: EntryKind) {
        let mut n = String::<MAX_NAME_BYTES>::new();
        n.push_str(name).expect("name too long");
        self.entries
            .push((parent.into(), DirEntry { name: n, kind }));
    }

    /// Add a regular file under `parent` (`""` is the root).
    pub fn add_file(&mut self, parent: &str, name: &str) {
        self.add(parent, name, EntryKind::File);
    }

    /// Add a subdirectory under `parent`.
    pub fn add_dir(&mut self, parent: &str, name: &str) {
        self.add(parent, name, EntryKind::Directory);
    }

    /// Mark the medium inserted or removed.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
}

impl Volume for MockVolume {
    type Error = MockVolumeError;

    fn ready(&mut self) -> bool {
        self.ready
    }

    fn list_dir(
        &mut self,
        path: &str,
        out: &mut Vec<DirEntry, MAX_DIR_ENTRIES>,
    ) -> Result<(), MockVolumeError> {
        if self.fail_path.as_deref() == Some(path) {
            return Err(MockVolumeError);
        }
        for (parent, entry) in &self.entries {
            if parent == path {
                out.push(entry.clone()).map_err(|_| MockVolumeError)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioSink;

    #[test]
    fn test_mock_stream_emits_scripted_sizes() {
        let mut source = MockFrameSource::new();
        source.add_track(MockTrack::new("/a.flac", 1000, &[100, 37]));
        let mut stream = source.open("/a.flac").unwrap();
        assert_eq!(stream.metadata().unwrap().sample_rate, 44_100);

        let mut frame = Frame::zeroed();
        assert_eq!(stream.next_frame(&mut frame).unwrap(), FrameRead::Decoded);
        assert_eq!(frame.len, 100);
        assert_eq!(stream.next_frame(&mut frame).unwrap(), FrameRead::Decoded);
        assert_eq!(frame.len, 37);
        // First byte of the second frame continues the global pattern.
        assert_eq!(frame.bytes[0], mock_byte_at(100));
        assert_eq!(
            stream.next_frame(&mut frame).unwrap(),
            FrameRead::EndOfStream
        );
    }

    #[test]
    fn test_mock_source_unknown_path_is_not_found() {
        let mut source = MockFrameSource::new();
        assert_eq!(source.open("/missing.flac").unwrap_err(), SourceError::NotFound);
    }

    #[test]
    fn test_mock_sink_records_transitions() {
        let mut sink = MockAudioSink::new();
        sink.configure(SampleRateHz::new(44_100).unwrap(), 2).unwrap();
        sink.start(&[0u8; 64]).unwrap();
        assert!(sink.is_streaming());
        assert_eq!(sink.last_buffer_len(), 64);
        sink.pause().unwrap();
        assert!(sink.is_paused());
        sink.stop().unwrap();
        assert!(!sink.is_streaming());
        assert_eq!(sink.stop_count(), 1);
    }

    #[test]
    fn test_mock_touch_drains_then_reports_no_touch() {
        let mut panel = MockTouchPanel::new();
        panel.push(Some(Point::new(10, 20)));
        panel.push(None);
        assert_eq!(panel.read(), Some(Point::new(10, 20)));
        assert_eq!(panel.read(), None);
        assert_eq!(panel.read(), None);
    }

    #[test]
    fn test_mock_volume_lists_only_requested_dir() {
        let mut vol = MockVolume::new();
        vol.add_file("", "a.flac");
        vol.add_dir("", "sub");
        vol.add_file("sub", "b.flac");
        let mut out = Vec::new();
        vol.list_dir("sub", &mut out).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.as_str(), "b.flac");
    }
}
