//! Scanner — bounded recursive walk of the volume, collecting `.flac` files.
//!
//! The walk visits directories in volume order, follows nesting up to
//! [`MAX_SCAN_DEPTH`](platform::config::MAX_SCAN_DEPTH), and aborts the
//! ENTIRE scan on any storage error — a half-scanned playlist is worse than
//! none, because the missing half is silent.

use heapless::{String, Vec};
use platform::config::{MAX_PATH_BYTES, MAX_SCAN_DEPTH, SCAN_EXTENSION};
use platform::error::ScanError;
use platform::storage::{DirEntry, EntryKind, Volume, MAX_DIR_ENTRIES};

use crate::playlist::{Playlist, PushOutcome, TrackEntry};

/// Walk `volume` from the root and collect every `.flac` file into
/// `playlist`, in traversal order.
///
/// Under [`OverflowPolicy::Truncate`](crate::playlist::OverflowPolicy) the
/// walk stops quietly once the playlist is full; under `Fail` a full
/// playlist aborts with [`ScanError::CapacityExceeded`].
///
/// # Errors
///
/// Any storage failure, over-deep nesting, or (policy-dependent) overflow
/// aborts with no partial result: the playlist is cleared on error.
pub fn scan<V: Volume, const N: usize>(
    volume: &mut V,
    playlist: &mut Playlist<N>,
) -> Result<(), ScanError> {
    match scan_dir(volume, "", playlist, 0) {
        Ok(_) => Ok(()),
        Err(e) => {
            *playlist = Playlist::new(playlist.policy());
            Err(e)
        }
    }
}

/// Whether the walk should continue or the playlist filled up (Truncate).
enum ScanFlow {
    Continue,
    Full,
}

fn scan_dir<V: Volume, const N: usize>(
    volume: &mut V,
    path: &str,
    playlist: &mut Playlist<N>,
    depth: usize,
) -> Result<ScanFlow, ScanError> {
    if depth > MAX_SCAN_DEPTH {
        return Err(ScanError::DepthExceeded);
    }

    let mut entries: Vec<DirEntry, MAX_DIR_ENTRIES> = Vec::new();
    volume
        .list_dir(path, &mut entries)
        .map_err(|_| ScanError::Storage)?;

    for entry in &entries {
        match entry.kind {
            EntryKind::Directory => {
                let child = join(path, &entry.name)?;
                if let ScanFlow::Full =
                    scan_dir(volume, &child, playlist, depth.saturating_add(1))?
                {
                    return Ok(ScanFlow::Full);
                }
            }
            EntryKind::File => {
                if !has_scan_extension(&entry.name) {
                    continue;
                }
                let file_path = join(path, &entry.name)?;
                let track = TrackEntry::new(&file_path, title_of(&entry.name), artist_of(path))
                    .map_err(|_| ScanError::Storage)?;
                match playlist.push(track) {
                    Ok(PushOutcome::Added) => {}
                    Ok(PushOutcome::Truncated) => return Ok(ScanFlow::Full),
                    Err(_) => return Err(ScanError::CapacityExceeded),
                }
            }
        }
    }
    Ok(ScanFlow::Continue)
}

/// `true` when `name` ends in the one extension the player collects.
///
/// The comparison is ASCII case-insensitive and does not allocate.
pub fn has_scan_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case(SCAN_EXTENSION),
        None => false,
    }
}

/// Display title: the file name without its extension.
fn title_of(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Display artist: the name of the containing directory, empty at the root.
fn artist_of(dir_path: &str) -> &str {
    match dir_path.rsplit_once('/') {
        Some((_, last)) => last,
        None => dir_path,
    }
}

/// `parent "/" name`, bounded by the playlist path width.
fn join(parent: &str, name: &str) -> Result<String<MAX_PATH_BYTES>, ScanError> {
    let mut out: String<MAX_PATH_BYTES> = String::new();
    // A path that overflows the fixed field is a storage-shaped limit; the
    // scan aborts rather than guessing at truncation.
    out.push_str(parent).map_err(|_| ScanError::Storage)?;
    out.push('/').map_err(|_| ScanError::Storage)?;
    out.push_str(name).map_err(|_| ScanError::Storage)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::OverflowPolicy;
    use platform::mocks::MockVolume;

    fn volume_with_tree() -> MockVolume {
        let mut vol = MockVolume::new();
        vol.add_file("", "intro.flac");
        vol.add_file("", "README.txt");
        vol.add_dir("", "Daft Punk");
        vol.add_file("/Daft Punk", "One More Time.FLAC");
        vol.add_dir("/Daft Punk", "Discovery");
        vol.add_file("/Daft Punk/Discovery", "Aerodynamic.flac");
        vol
    }

    #[test]
    fn test_scan_collects_only_flac_in_traversal_order() {
        let mut vol = volume_with_tree();
        let mut playlist: Playlist<8> = Playlist::new(OverflowPolicy::Truncate);
        scan(&mut vol, &mut playlist).expect("scan");

        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.get(0).expect("0").path.as_str(), "/intro.flac");
        assert_eq!(
            playlist.get(1).expect("1").path.as_str(),
            "/Daft Punk/One More Time.FLAC"
        );
        assert_eq!(
            playlist.get(2).expect("2").path.as_str(),
            "/Daft Punk/Discovery/Aerodynamic.flac"
        );
    }

    #[test]
    fn test_scan_derives_title_and_artist() {
        let mut vol = volume_with_tree();
        let mut playlist: Playlist<8> = Playlist::new(OverflowPolicy::Truncate);
        scan(&mut vol, &mut playlist).expect("scan");

        let track = playlist.get(1).expect("1");
        assert_eq!(track.title.as_str(), "One More Time");
        assert_eq!(track.artist.as_str(), "Daft Punk");
        let root_track = playlist.get(0).expect("0");
        assert_eq!(root_track.artist.as_str(), "");
    }

    #[test]
    fn test_scan_error_aborts_with_no_partial_result() {
        let mut vol = volume_with_tree();
        vol.fail_path = Some("/Daft Punk".into());
        let mut playlist: Playlist<8> = Playlist::new(OverflowPolicy::Truncate);
        assert_eq!(scan(&mut vol, &mut playlist), Err(ScanError::Storage));
        assert!(playlist.is_empty(), "no partial result on error");
    }

    #[test]
    fn test_scan_truncate_policy_stops_quietly_when_full() {
        let mut vol = volume_with_tree();
        let mut playlist: Playlist<2> = Playlist::new(OverflowPolicy::Truncate);
        scan(&mut vol, &mut playlist).expect("scan");
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn test_scan_fail_policy_propagates_overflow() {
        let mut vol = volume_with_tree();
        let mut playlist: Playlist<2> = Playlist::new(OverflowPolicy::Fail);
        assert_eq!(
            scan(&mut vol, &mut playlist),
            Err(ScanError::CapacityExceeded)
        );
        assert!(playlist.is_empty());
    }

    #[test]
    fn test_over_deep_nesting_aborts() {
        let mut vol = MockVolume::new();
        vol.add_dir("", "a");
        vol.add_dir("/a", "b");
        vol.add_dir("/a/b", "c");
        vol.add_dir("/a/b/c", "d");
        vol.add_dir("/a/b/c/d", "e");
        vol.add_file("/a/b/c/d/e", "deep.flac");
        let mut playlist: Playlist<4> = Playlist::new(OverflowPolicy::Truncate);
        assert_eq!(
            scan(&mut vol, &mut playlist),
            Err(ScanError::DepthExceeded)
        );
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(has_scan_extension("x.flac"));
        assert!(has_scan_extension("x.FLAC"));
        assert!(has_scan_extension("x.FlAc"));
        assert!(!has_scan_extension("x.mp3"));
        assert!(!has_scan_extension("flac"));
        assert!(!has_scan_extension(".flac"));
        assert!(!has_scan_extension("noext"));
    }
}
