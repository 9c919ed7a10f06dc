//! Tonewheel firmware
//!
//! Touchscreen FLAC player for STM32F746-class hardware.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs, player_task)
//!         ↓
//! Feature Layers (playback, ui, library)
//!         ↓
//! Platform HAL (trait contracts)
//!         ↓
//! Hardware Layer (hw module: Embassy + PAC + BSP drivers)
//! ```
//!
//! The control loop ([`player_task::Player`]) is generic over the platform
//! contracts and fully host-testable; the `hw` module binds it to the real
//! peripherals.
//!
//! # Features
//!
//! - `hardware` - Build for the STM32F746 target (embassy, defmt)
//! - `std` - Enable standard library (for host testing)
//!
//! # Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::new_without_default)]

pub mod boot;
pub mod player_task;
pub mod touch_screen;

#[cfg(feature = "hardware")]
pub mod hw;

// Re-export key types
pub use player_task::Player;
pub use touch_screen::Ft5336;

#[cfg(feature = "hardware")]
pub use hw::{FlacCodec, LtdcRenderer, SaiAudioOut, SdVolume, REFILL_LATCH};
