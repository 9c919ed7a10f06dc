//! Storage abstraction — removable volume directory listing.
//!
//! The FAT mechanics live in the storage collaborator; the seam here is a
//! flat per-directory listing that the library crate's bounded recursive
//! walk composes into a full scan.

use heapless::{String, Vec};

/// Longest directory-entry name the contract carries, in bytes.
pub const MAX_NAME_BYTES: usize = 64;

/// Most entries a single directory listing may return.
///
/// Directories beyond this bound fail the listing rather than silently
/// dropping entries; a music tree that wide needs restructuring, not
/// guesswork about which half of it was scanned.
pub const MAX_DIR_ENTRIES: usize = 32;

/// Classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    /// A subdirectory.
    Directory,
    /// A regular file.
    File,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not a full path).
    pub name: String<MAX_NAME_BYTES>,
    /// Directory or regular file.
    pub kind: EntryKind,
}

/// A mounted removable volume.
pub trait Volume {
    /// Error type for listing failures.
    type Error: core::fmt::Debug;

    /// `true` once the medium is inserted and mounted.
    fn ready(&mut self) -> bool;

    /// List the entries of the directory at `path` (`""` is the root) into
    /// `out`, in volume order.
    ///
    /// # Errors
    ///
    /// Any failure — including more than [`MAX_DIR_ENTRIES`] entries —
    /// must error rather than return a partial listing.
    fn list_dir(
        &mut self,
        path: &str,
        out: &mut Vec<DirEntry, MAX_DIR_ENTRIES>,
    ) -> Result<(), Self::Error>;
}
