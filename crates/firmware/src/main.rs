//! Tonewheel firmware - Main Entry Point
//!
//! Hardware-only entry point for the STM32F746 player board.

#![no_std]
#![no_main]

use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_time::{Instant, Timer};
use library::playlist::{OverflowPolicy, Playlist};
use platform::audio::AudioSink;
use platform::audio_types::SampleRateHz;
use platform::config::{AUDIO_BUFFER_BYTES, INITIAL_VOLUME, PLAYLIST_CAPACITY, TICK_INTERVAL_MS};
use playback::engine::AudioEngine;
use static_cell::StaticCell;
use ui::touch::TouchControls;

use firmware::boot;
use firmware::hw::{FlacCodec, LtdcRenderer, SaiAudioOut, SdVolume, REFILL_LATCH};
use firmware::player_task::Player;
use firmware::touch_screen::Ft5336;

// Panic handler
use panic_probe as _;
// defmt RTT transport
use defmt_rtt as _;

/// The audio DMA double buffer. Lives in SRAM1 (DMA2-reachable on the F746);
/// allocated once for the process lifetime.
static AUDIO_BUFFER: StaticCell<[u8; AUDIO_BUFFER_BYTES]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: embassy_executor::Spawner) {
    defmt::info!("Tonewheel firmware v{=str}", platform::config::APP_VERSION);
    for step in boot::BOOT_SEQUENCE_STEPS.iter().copied() {
        defmt::info!("boot: {=str}", step);
    }

    let p = embassy_stm32::init(Default::default());

    // ── Step 1: peripherals ─────────────────────────────────────────────
    // Touch: FT5336 on I2C3 (PH7 = SCL, PH8 = SDA), 100 kHz polled mode.
    let i2c = I2c::new_blocking(p.I2C3, p.PH7, p.PH8, Hertz(100_000), Default::default());
    let touch = Ft5336::new(i2c);
    defmt::info!("FT5336 touch controller on I2C3 @ 100 kHz");

    // Display: the LTDC layers are brought up by the board support below
    // the Renderer seam; the control loop only sees the seam.
    let renderer = LtdcRenderer::new();

    // Audio out: SAI2 + WM8994. The DMA HT/TC interrupts signal
    // REFILL_LATCH — the only state shared with the interrupt context.
    let mut sink = SaiAudioOut::new();

    // ── Step 2: codec init — report failure, continue degraded ──────────
    // 44.1 kHz stereo headphone path at the boot volume; per-track rates
    // are programmed again on start().
    if let Ok(boot_rate) = SampleRateHz::new(44_100) {
        if sink.configure(boot_rate, 2).is_err() {
            defmt::error!("audio codec init failed — continuing without output");
        }
    }
    if sink.set_volume(INITIAL_VOLUME).is_err() {
        defmt::error!("codec volume programming failed");
    }

    // ── Step 3: storage ─────────────────────────────────────────────────
    let mut volume = SdVolume::new();
    defmt::info!("waiting for removable volume...");
    boot::wait_for_volume(&mut volume).await;
    defmt::info!("volume mounted");

    // ── Step 4: scan ────────────────────────────────────────────────────
    let mut playlist: Playlist<PLAYLIST_CAPACITY> = Playlist::new(OverflowPolicy::Truncate);
    match boot::scan_volume(&mut volume, &mut playlist) {
        Ok(count) => defmt::info!("scan: {=usize} tracks", count),
        // Hard failure, no partial result; the player idles with an empty
        // list rather than guessing at what half a scan found.
        Err(_) => defmt::error!("scan failed — playlist empty"),
    }

    // ── Step 5: assemble and run ────────────────────────────────────────
    let buffer = AUDIO_BUFFER.init([0u8; AUDIO_BUFFER_BYTES]);
    let engine = AudioEngine::new(FlacCodec::new(), sink, &REFILL_LATCH, buffer);
    let mut player = Player::new(
        engine,
        playlist,
        TouchControls::standard_layout(),
        touch,
        renderer,
    );

    if let Err(e) = player.play_current() {
        defmt::warn!("first track did not start: {}", defmt::Debug2Format(&e));
    }

    defmt::info!("entering control loop ({=u64} ms tick)", TICK_INTERVAL_MS);
    loop {
        if let Err(e) = player.tick(Instant::now()) {
            defmt::warn!("transport error: {}", defmt::Debug2Format(&e));
        }
        Timer::after_millis(TICK_INTERVAL_MS).await;
    }
}
