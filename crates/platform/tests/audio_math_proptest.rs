//! Property-based tests for audio domain math.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.

use platform::audio_types::{SampleRateHz, VolumePercent, SAMPLE_RATE_MAX_HZ, SAMPLE_RATE_MIN_HZ};
use platform::frame_source::TrackMetadata;

proptest::proptest! {
    /// VolumePercent::new never panics for any u8 input (clamps to 100).
    #[test]
    fn volume_percent_new_never_panics(pct in 0u8..=255u8) {
        let v = VolumePercent::new(pct);
        // After clamping, value must be in 0..=100
        assert!(v.get() <= 100);
    }

    /// The const constructor agrees with the runtime one everywhere.
    #[test]
    fn volume_percent_const_matches_runtime(pct in 0u8..=255u8) {
        assert_eq!(VolumePercent::new_const(pct), VolumePercent::new(pct));
    }

    /// SampleRateHz::new never panics for any u32 input.
    #[test]
    fn sample_rate_hz_new_never_panics(hz in 0u32..=u32::MAX) {
        // May return Err but must not panic
        let _ = SampleRateHz::new(hz);
    }

    /// SampleRateHz valid range [8000, 96000] always succeeds.
    #[test]
    fn sample_rate_hz_valid_range_always_ok(hz in SAMPLE_RATE_MIN_HZ..=SAMPLE_RATE_MAX_HZ) {
        assert!(SampleRateHz::new(hz).is_ok(),
            "SampleRateHz::new({}) should be Ok within the codec range", hz);
    }

    /// SampleRateHz out of range always fails.
    #[test]
    fn sample_rate_hz_out_of_range_always_err(hz in (SAMPLE_RATE_MAX_HZ + 1)..=u32::MAX) {
        assert!(SampleRateHz::new(hz).is_err(),
            "SampleRateHz::new({}) should be Err above {}", hz, SAMPLE_RATE_MAX_HZ);
    }

    /// bytes_per_sample_frame never panics and never returns zero.
    #[test]
    fn bytes_per_sample_frame_never_zero(
        channels in 0u8..=8u8,
        bits in 0u8..=32u8,
    ) {
        let md = TrackMetadata {
            total_samples: 0,
            sample_rate: 44_100,
            bits_per_sample: bits,
            channels,
        };
        if let Some(n) = md.bytes_per_sample_frame() {
            assert!(n > 0);
        }
    }

    /// duration_seconds never exceeds total_samples / rate and never panics.
    #[test]
    fn duration_seconds_is_floor_division(
        total in 0u64..=u64::from(u32::MAX) * 8_000,
        rate in SAMPLE_RATE_MIN_HZ..=SAMPLE_RATE_MAX_HZ,
    ) {
        let md = TrackMetadata {
            total_samples: total,
            sample_rate: rate,
            bits_per_sample: 16,
            channels: 2,
        };
        assert_eq!(u64::from(md.duration_seconds()), total / u64::from(rate));
    }
}
