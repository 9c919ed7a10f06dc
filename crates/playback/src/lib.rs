//! Real-time playback pipeline — stream reader, refill latch, double-buffer
//! engine, transport.
//!
//! Everything here is a pure, `no_std`, allocation-free state machine over
//! the platform trait contracts. No I/O happens outside a collaborator
//! call, which makes the whole pipeline testable on the host with the
//! platform mocks.
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]

pub mod engine;
pub mod latch;
pub mod reader;
pub mod transport;

pub use engine::{AudioEngine, PlayerError, PlayerState};
pub use latch::{BufferHalf, RefillLatch};
pub use reader::StreamReader;
