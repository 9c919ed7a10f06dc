//! The cooperative control loop.
//!
//! One [`Player::tick`] per loop iteration, always in the same order:
//!
//! 1. poll the touch panel (one point) and feed the button state machines
//! 2. act on consumed edges: back, next, play, pause
//! 3. run the engine's refill protocol
//! 4. re-derive play/pause enablement from the transport state
//! 5. hand the renderer a fresh snapshot
//!
//! The loop is non-preemptible; everything in a tick runs to completion.
//! The only asynchronous visitor is the DMA completion interrupt, and it
//! touches nothing but the refill latch.

use embassy_time::Instant;
use library::playlist::Playlist;
use platform::audio::AudioSink;
use platform::frame_source::{FrameSource, TrackMetadata};
use platform::touch::TouchPanel;
use playback::engine::{AudioEngine, PlayerError, PlayerState};
use playback::transport;
use ui::now_playing::NowPlaying;
use ui::render::Renderer;
use ui::touch::{ControlButton, TouchControls};

/// The assembled player: engine, playlist, controls, and the two remaining
/// collaborator seams (touch in, pixels out).
pub struct Player<'a, F, O, T, R, const N: usize>
where
    F: FrameSource,
    O: AudioSink,
    T: TouchPanel,
    R: Renderer,
{
    engine: AudioEngine<'a, F, O>,
    playlist: Playlist<N>,
    controls: TouchControls,
    touch: T,
    renderer: R,
}

impl<'a, F, O, T, R, const N: usize> Player<'a, F, O, T, R, N>
where
    F: FrameSource,
    O: AudioSink,
    T: TouchPanel,
    R: Renderer,
{
    /// Assemble a player. Button enablement starts consistent with the
    /// stopped engine: play enabled, pause disabled.
    pub fn new(
        engine: AudioEngine<'a, F, O>,
        playlist: Playlist<N>,
        controls: TouchControls,
        touch: T,
        renderer: R,
    ) -> Self {
        let mut player = Self {
            engine,
            playlist,
            controls,
            touch,
            renderer,
        };
        player.sync_button_enablement();
        player
    }

    /// Start (or resume) playback of the track under the cursor.
    ///
    /// Used at boot for the first track; afterwards the play button edge
    /// takes the same path.
    ///
    /// # Errors
    ///
    /// See [`transport::play`].
    pub fn play_current(&mut self) -> Result<(), PlayerError> {
        let result = transport::play(&mut self.engine, &self.playlist);
        self.sync_button_enablement();
        result
    }

    /// One control-loop iteration.
    ///
    /// # Errors
    ///
    /// The first transport error of the tick, if any. The tick always runs
    /// to completion — a failed edge must not starve the refill protocol or
    /// the renderer.
    pub fn tick(&mut self, now: Instant) -> Result<(), PlayerError> {
        let point = self.touch.read();
        self.controls.poll(point, now);

        let mut result = Ok(());

        // Edge handling in a fixed order. Back/next move the cursor (or
        // not, for a mid-track back) and then restart playback at whatever
        // the cursor points to.
        if self.controls.consume(ControlButton::Back) {
            result = result.and(
                transport::previous(&mut self.engine, &mut self.playlist)
                    .and_then(|()| transport::play(&mut self.engine, &self.playlist)),
            );
        }
        if self.controls.consume(ControlButton::Next) {
            result = result.and(
                transport::next(&mut self.engine, &mut self.playlist)
                    .and_then(|()| transport::play(&mut self.engine, &self.playlist)),
            );
        }
        if self.controls.consume(ControlButton::Play) {
            result = result.and(transport::play(&mut self.engine, &self.playlist));
        }
        if self.controls.consume(ControlButton::Pause) {
            result = result.and(transport::pause::<F, O, N>(&mut self.engine));
        }

        // Refill whichever half the hardware reported consumed. This may
        // stop the engine at end-of-stream.
        self.engine.tick();

        self.sync_button_enablement();

        let snapshot = self.snapshot();
        self.renderer.wait_frame_boundary();
        // A draw failure degrades the display, not the audio.
        let _ = self.renderer.draw(&snapshot);

        result
    }

    /// Build the per-tick renderer snapshot.
    pub fn snapshot(&self) -> NowPlaying {
        let mut snap = NowPlaying::default();
        if let Some(track) = self.playlist.current() {
            snap.set_title(track.title.as_str());
            snap.set_artist(track.artist.as_str());
        }
        snap.set_progress(self.engine.progress());
        snap.total_seconds = self
            .engine
            .metadata()
            .map_or(0, TrackMetadata::duration_seconds);
        snap.playing = self.engine.state() == PlayerState::Playing;
        snap.track_index = self.playlist.cursor();
        snap.track_count = self.playlist.len();
        snap
    }

    /// Keep play/pause mutually exclusive: exactly one of them accepts
    /// touches, driven by the transport state.
    fn sync_button_enablement(&mut self) {
        let playing = self.engine.state() == PlayerState::Playing;
        self.controls.set_enabled(ControlButton::Play, !playing);
        self.controls.set_enabled(ControlButton::Pause, playing);
    }

    /// The engine (transport state, progress).
    pub fn engine(&self) -> &AudioEngine<'a, F, O> {
        &self.engine
    }

    /// The playlist (cursor, tracks).
    pub fn playlist(&self) -> &Playlist<N> {
        &self.playlist
    }

    /// The playlist, mutably (scan at boot).
    pub fn playlist_mut(&mut self) -> &mut Playlist<N> {
        &mut self.playlist
    }

    /// The button state machines.
    pub fn controls(&self) -> &TouchControls {
        &self.controls
    }

    /// The touch panel (tests script readings through this).
    pub fn touch_mut(&mut self) -> &mut T {
        &mut self.touch
    }

    /// The renderer (tests inspect recorded snapshots through this).
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
