//! Transport — translates consumed input edges into engine operations and
//! playlist cursor moves.
//!
//! The playlist length is fixed for the session, so every cursor move is
//! modulo arithmetic on a constant. After `next` or `previous` the caller
//! issues [`play`] to start whatever the cursor now points at — that is how
//! "previous past the threshold" restarts the current track.

use library::playlist::Playlist;
use platform::error::SourceError;
use platform::frame_source::FrameSource;
use platform::audio::AudioSink;

use crate::engine::{AudioEngine, PlayerError, PlayerState};

/// `previous` restarts the current track instead of moving the cursor when
/// playback has progressed beyond this fraction.
pub const PREVIOUS_RESTART_THRESHOLD: f32 = 0.1;

/// Skip forward: stop any active session, then advance the cursor
/// (wrapping).
///
/// # Errors
///
/// Propagates engine stop failures.
pub fn next<F, O, const N: usize>(
    engine: &mut AudioEngine<'_, F, O>,
    playlist: &mut Playlist<N>,
) -> Result<(), PlayerError>
where
    F: FrameSource,
    O: AudioSink,
{
    if engine.state() != PlayerState::Stopped {
        engine.stop()?;
    }
    playlist.advance();
    Ok(())
}

/// Skip backward: stop any active session; move the cursor back (wrapping)
/// only when playback had barely begun, otherwise leave it in place so the
/// follow-up [`play`] restarts the same track.
///
/// Progress is sampled BEFORE the stop — stopping zeroes the position,
/// which would make the threshold always pass.
///
/// # Errors
///
/// Propagates engine stop failures.
pub fn previous<F, O, const N: usize>(
    engine: &mut AudioEngine<'_, F, O>,
    playlist: &mut Playlist<N>,
) -> Result<(), PlayerError>
where
    F: FrameSource,
    O: AudioSink,
{
    let progress = engine.progress();
    if engine.state() != PlayerState::Stopped {
        engine.stop()?;
    }
    if progress <= PREVIOUS_RESTART_THRESHOLD {
        playlist.retreat();
    }
    Ok(())
}

/// Play: start the track under the cursor when stopped, resume when paused,
/// no-op when already playing.
///
/// # Errors
///
/// [`PlayerError::Source`] with [`SourceError::NotFound`] on an empty
/// playlist; otherwise whatever [`AudioEngine::start`]/`resume` surface.
pub fn play<F, O, const N: usize>(
    engine: &mut AudioEngine<'_, F, O>,
    playlist: &Playlist<N>,
) -> Result<(), PlayerError>
where
    F: FrameSource,
    O: AudioSink,
{
    match engine.state() {
        PlayerState::Stopped => {
            let Some(track) = playlist.current() else {
                return Err(PlayerError::Source(SourceError::NotFound));
            };
            engine.start(track.path.as_str())
        }
        PlayerState::Paused => engine.resume(),
        PlayerState::Playing => Ok(()),
    }
}

/// Pause when playing; no-op otherwise.
///
/// # Errors
///
/// Propagates engine pause failures.
pub fn pause<F, O, const N: usize>(
    engine: &mut AudioEngine<'_, F, O>,
) -> Result<(), PlayerError>
where
    F: FrameSource,
    O: AudioSink,
{
    if engine.state() == PlayerState::Playing {
        engine.pause()
    } else {
        Ok(())
    }
}
