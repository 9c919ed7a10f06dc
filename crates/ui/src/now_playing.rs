//! Now-playing snapshot — what the renderer is handed once per tick.

use heapless::String;

/// Per-tick view of the player for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    /// Track title (file name without extension; up to 64 UTF-8 bytes).
    pub title: String<64>,
    /// Artist name (containing directory; up to 64 UTF-8 bytes).
    pub artist: String<64>,
    /// Playback progress in `0.0..=1.0`.
    pub progress: f32,
    /// Total track duration in whole seconds (0 when unknown).
    pub total_seconds: u32,
    /// `true` while audio is streaming (not paused, not stopped).
    pub playing: bool,
    /// Cursor position for "track m of n" displays.
    pub track_index: usize,
    /// Playlist length.
    pub track_count: usize,
}

impl NowPlaying {
    /// Set the title, truncating at the field width on UTF-8 boundaries.
    pub fn set_title(&mut self, title: &str) {
        self.title = truncated(title);
    }

    /// Set the artist, truncating at the field width.
    pub fn set_artist(&mut self, artist: &str) {
        self.artist = truncated(artist);
    }

    /// Set progress, clamped to `[0.0, 1.0]`.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}

impl Default for NowPlaying {
    fn default() -> Self {
        NowPlaying {
            title: String::new(),
            artist: String::new(),
            progress: 0.0,
            total_seconds: 0,
            playing: false,
            track_index: 0,
            track_count: 0,
        }
    }
}

/// Copy `s` into a bounded string, dropping a partial trailing character.
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let snap = NowPlaying::default();
        assert!(!snap.playing);
        assert_eq!(snap.progress, 0.0);
        assert_eq!(snap.title.as_str(), "");
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut snap = NowPlaying::default();
        snap.set_progress(1.7);
        assert_eq!(snap.progress, 1.0);
        snap.set_progress(-0.3);
        assert_eq!(snap.progress, 0.0);
    }

    #[test]
    fn test_overlong_title_is_truncated_not_dropped() {
        let mut snap = NowPlaying::default();
        let long: std::string::String = core::iter::repeat('x').take(80).collect();
        snap.set_title(&long);
        assert_eq!(snap.title.len(), 64);
    }

    #[test]
    fn test_truncation_respects_utf8_boundaries() {
        let mut snap = NowPlaying::default();
        // 'é' is 2 bytes; 40 of them = 80 bytes, truncates to 32 chars = 64 bytes.
        let long: std::string::String = core::iter::repeat('é').take(40).collect();
        snap.set_title(&long);
        assert!(snap.title.len() <= 64);
        assert!(snap.title.chars().all(|c| c == 'é'));
    }
}
