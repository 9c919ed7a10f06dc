//! Hardware Abstraction Layer (HAL) for the Tonewheel player
//!
//! This crate provides trait-based contracts for every hardware collaborator
//! the player core consumes, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layers (playback, ui, library)
//!         ↓
//! Platform HAL (this crate - trait contracts)
//!         ↓
//! Hardware Layer (Embassy HAL + BSP drivers)
//! ```
//!
//! # Contracts
//!
//! - [`FrameSource`] / [`FrameStream`] - frame-oriented FLAC decode
//! - [`AudioSink`] - codec + DMA audio output
//! - [`TouchPanel`] - single-point touch input
//! - [`Volume`] - removable-storage directory listing
//!
//! # Features
//!
//! - `std`: expose the mock collaborators to downstream test suites
//! - `hardware`: physical hardware target marker
//! - `defmt`: enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::missing_errors_doc)]

// Mocks use std collections; pull in std only where they are compiled.
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod audio;
pub mod audio_types;
pub mod config;
pub mod error;
pub mod frame_source;
pub mod mocks;
pub mod storage;
pub mod touch;

// Re-export main trait contracts
pub use audio::AudioSink;
pub use audio_types::{OutOfRangeError, SampleRateHz, VolumePercent};
pub use error::{ScanError, SourceError};
pub use frame_source::{Frame, FrameRead, FrameSource, FrameStream, TrackMetadata};
pub use storage::{DirEntry, EntryKind, Volume};
pub use touch::TouchPanel;
