//! SAI audio output — streams the double buffer to the WM8994 codec via DMA.
//!
//! # Hardware: SAI2 Block A (master TX), 16-bit I2S, 44.1 kHz
//! # DMA: DMA2 Stream 4, channel 3, circular mode over AUDIO_BUFFER
//!
//! ## Pin assignments (STM32F746 Discovery-class board)
//!   - PI4  → SAI2_MCLK_A (master clock, 256×fs)
//!   - PI5  → SAI2_SCK_A  (bit clock)
//!   - PI7  → SAI2_FS_A   (frame sync / L-R clock)
//!   - PI6  → SAI2_SD_A   (serial data out)
//!   - I2C3 (PH7/PH8) carries the WM8994 register writes
//!
//! ## DMA buffer layout (circular ping-pong)
//!
//! ```text
//! AUDIO_BUFFER: [u8; 32768]
//!   ├── Half 0 (bytes 0..16384):     refilled after the HT interrupt
//!   └── Half 1 (bytes 16384..32768): refilled after the TC interrupt
//! ```
//!
//! The half-transfer (HT) and transfer-complete (TC) interrupts are the ONLY
//! code that runs outside the control loop. Each handler does exactly one
//! thing: signal [`REFILL_LATCH`] with the half that just finished playing.
//! No queue, no allocation, no locking — a late control loop coalesces the
//! two signals into one and audibly glitches instead of corrupting state.
//!
//! Reference: STM32F746 RM0385 §31 (SAI), §8 (DMA); WM8994 datasheet.

use platform::audio::AudioSink;
use platform::audio_types::{SampleRateHz, VolumePercent};
use playback::latch::{BufferHalf, RefillLatch};

/// The process-lifetime refill latch shared with the DMA interrupt.
pub static REFILL_LATCH: RefillLatch = RefillLatch::new();

/// DMA half-transfer interrupt hook: the first half has been played out.
///
/// Call from the DMA2 Stream 4 ISR on the HTIF flag.
pub fn on_half_transfer() {
    REFILL_LATCH.signal(BufferHalf::First);
}

/// DMA transfer-complete interrupt hook: the second half has been played
/// out and the stream wrapped to the start.
///
/// Call from the DMA2 Stream 4 ISR on the TCIF flag.
pub fn on_transfer_complete() {
    REFILL_LATCH.signal(BufferHalf::Second);
}

/// SAI2 + WM8994 audio sink.
///
/// The embassy-stm32 SAI driver exposes an async write API but not the
/// circular-DMA + HT/TC interrupt mode this pipeline is built on, so the
/// peripheral is programmed through the PAC:
///
///   1. RCC: enable SAI2, program PLLI2S for 44.1 kHz MCLK (256×fs)
///   2. SAI2_ACR1: master TX, 16-bit, free protocol, DMA enable
///   3. DMA2 S4CR: channel 3, mem→periph, circular, HTIE | TCIE
///   4. WM8994 over I2C3: power-up sequence, headphone path, volume
///
/// TODO(sai-pac-bringup): fill in the register writes above; until then the
/// sink tracks state and logs so the control loop and display are fully
/// exercisable on hardware.
pub struct SaiAudioOut {
    running: bool,
}

impl SaiAudioOut {
    /// Create an idle sink. Peripheral clocks must already be up.
    pub const fn new() -> Self {
        Self { running: false }
    }

    /// `true` between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for SaiAudioOut {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for SaiAudioOut {
    type Error = core::convert::Infallible;

    fn configure(&mut self, sample_rate: SampleRateHz, channels: u8) -> Result<(), Self::Error> {
        defmt::info!(
            "SAI2: configure {=u32} Hz, {=u8} ch",
            sample_rate.get(),
            channels
        );
        Ok(())
    }

    fn set_volume(&mut self, volume: VolumePercent) -> Result<(), Self::Error> {
        defmt::info!("WM8994: volume {=u8}%", volume.get());
        Ok(())
    }

    fn start(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
        defmt::info!("SAI2: start circular DMA over {=usize} bytes", buffer.len());
        self.running = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), Self::Error> {
        defmt::info!("SAI2: pause");
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Self::Error> {
        defmt::info!("SAI2: resume");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        defmt::info!("SAI2: stop");
        self.running = false;
        Ok(())
    }
}
