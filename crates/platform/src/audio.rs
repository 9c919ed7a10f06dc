//! Hardware audio output contract.
//!
//! The sink cycles continuously through a caller-owned buffer once started,
//! raising a completion notification at the midpoint and at wraparound (the
//! refill latch carries those notifications across the interrupt boundary —
//! see the playback crate). Methods are synchronous: the control loop is
//! cooperative and every call runs to completion within one tick.

use crate::audio_types::{SampleRateHz, VolumePercent};

/// Hardware audio output (codec + DMA streaming).
pub trait AudioSink {
    /// Error type. Failures are reported, not retried; the player continues
    /// in a degraded state.
    type Error: core::fmt::Debug;

    /// Program the codec for the given stream format.
    fn configure(&mut self, sample_rate: SampleRateHz, channels: u8) -> Result<(), Self::Error>;

    /// Set the output volume.
    fn set_volume(&mut self, volume: VolumePercent) -> Result<(), Self::Error>;

    /// Begin continuous cycling through `buffer`.
    ///
    /// Completion notifications fire at the buffer midpoint and at
    /// wraparound until [`stop`] is called.
    ///
    /// [`stop`]: AudioSink::stop
    fn start(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

    /// Suspend output. Buffered content is left untouched.
    fn pause(&mut self) -> Result<(), Self::Error>;

    /// Resume output after [`pause`].
    ///
    /// [`pause`]: AudioSink::pause
    fn resume(&mut self) -> Result<(), Self::Error>;

    /// Halt output and stop raising completion notifications.
    fn stop(&mut self) -> Result<(), Self::Error>;
}
