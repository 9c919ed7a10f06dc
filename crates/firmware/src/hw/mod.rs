//! Hardware integration points — STM32F746 target only.
//!
//! Everything behind the platform trait seams that touches real registers
//! lives here. The player core never imports from this module; `main.rs`
//! assembles it.

pub mod audio_out;
pub mod flac_source;
pub mod lcd_renderer;
pub mod sd_volume;

pub use audio_out::{SaiAudioOut, REFILL_LATCH};
pub use flac_source::FlacCodec;
pub use lcd_renderer::LtdcRenderer;
pub use sd_volume::SdVolume;
