//! Type system enforcement tests for the volume newtypes.
//! These newtypes keep every volume command inside what the MP3 module accepts.

// Test files legitimately use unwrap()/expect() for readable assertions.
#![allow(clippy::unwrap_used, clippy::expect_used)]

// ── Volume ───────────────────────────────────────────────────────────────────

#[test]
fn volume_new_clamps_over_ceiling() {
    use platform::audio_types::Volume;
    let v = Volume::new(40);
    assert_eq!(v.get(), 30, "Volume::new(40) should clamp to 30");
}

#[test]
fn volume_try_new_rejects_over_ceiling() {
    use platform::audio_types::Volume;
    assert!(Volume::try_new(31).is_err());
    assert!(Volume::try_new(255).is_err());
}

#[test]
fn volume_try_new_accepts_valid_range() {
    use platform::audio_types::Volume;
    assert!(Volume::try_new(0).is_ok());
    assert!(Volume::try_new(15).is_ok());
    assert!(Volume::try_new(30).is_ok());
}

#[test]
fn volume_is_one_byte() {
    use platform::audio_types::Volume;
    assert_eq!(core::mem::size_of::<Volume>(), 1);
}

// ── VolumeLimits ─────────────────────────────────────────────────────────────

#[test]
fn default_limits_are_zero_to_twenty_five() {
    use platform::audio_types::VolumeLimits;
    let limits = VolumeLimits::default();
    assert_eq!(limits.min().get(), 0);
    assert_eq!(limits.max().get(), 25);
}

#[test]
fn twenty_steps_up_from_fifteen_stop_at_max() {
    use platform::audio_types::{Volume, VolumeLimits};
    let limits = VolumeLimits::DEFAULT;
    let mut volume = Volume::new(15);
    for _ in 0..20 {
        volume = limits.step(volume, 1);
    }
    assert_eq!(volume.get(), 25);
}

#[test]
fn step_down_from_min_stays_at_min() {
    use platform::audio_types::{Volume, VolumeLimits};
    let limits = VolumeLimits::DEFAULT;
    assert_eq!(limits.step(Volume::new(0), -1).get(), 0);
}

#[test]
fn limits_equal_bounds_allowed() {
    use platform::audio_types::VolumeLimits;
    let limits = VolumeLimits::new(10, 10).expect("min == max is a valid fixed volume");
    assert_eq!(limits.min(), limits.max());
}

// ── Peripheral presets ───────────────────────────────────────────────────────

#[test]
fn dfplayer_uart_is_9600_8n1() {
    use platform::{DataBits, Parity, StopBits, UartConfig};
    let config = UartConfig::dfplayer();
    assert_eq!(config.baud_rate, 9600);
    assert_eq!(config.data_bits, DataBits::Eight);
    assert_eq!(config.parity, Parity::None);
    assert_eq!(config.stop_bits, StopBits::One);
}

#[test]
fn mfrc522_spi_is_mode0_msb_first() {
    use platform::{BitOrder, SpiConfig, SpiMode};
    let config = SpiConfig::mfrc522();
    assert_eq!(config.mode, SpiMode::Mode0);
    assert_eq!(config.bit_order, BitOrder::MsbFirst);
    assert!(config.frequency <= 10_000_000, "MFRC522 SPI max is 10 MHz");
}
