//! Hardware boot sequence for the Tag Jukebox.
//!
//! Initialization order:
//!   1. Clocks: HSI + PLL1 via [`build_embassy_config`]
//!   2. Buses: SPI1 for the card reader, USART2 TX for the MP3 module
//!   3. Input: EXTI buttons and the input task
//!   4. Player: reset, settle, initial volume ([`crate::app::CardPlayer::boot`])
//!   5. Event loop
//!
//! The pure-data helpers in this module are host-testable; the HAL
//! conversions are `hardware`-only.

use embassy_time::Duration;
use platform::PlayerConfig;

/// Ordered list of boot steps, mirrored by `main.rs`.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Clocks: HSI 64 MHz -> PLL1 400 MHz system clock",
    "2. Buses: SPI1 (MFRC522, 1 MHz mode 0) + USART2 TX (DFPlayer, 9600 8N1)",
    "3. Input: EXTI buttons PA0-PA2, input task spawned",
    "4. Player: reset, settle, initial volume",
    "5. Event loop: immediate scan, then ticker + clicks",
];

/// Scan ticker period for `config`.
pub fn scan_interval(config: &PlayerConfig) -> Duration {
    Duration::from_millis(u64::from(config.scan_interval_ms))
}

/// Delay between player reset and the first volume command.
pub fn reset_settle(config: &PlayerConfig) -> Duration {
    Duration::from_millis(u64::from(config.reset_settle_ms))
}

/// Build the Embassy STM32 configuration.
///
/// Only the system clock is raised; the two serial peripherals run from the
/// APB clocks and need nothing special.
#[cfg(feature = "hardware")]
pub fn build_embassy_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;

    let mut config = embassy_stm32::Config::default();

    // HSI (64 MHz) / prediv(4) = 16 MHz → × mul(50) = 800 MHz VCO
    // PLL1_P = VCO / divp(2) = 400 MHz → system clock
    config.rcc.hsi = Some(HSIPrescaler::DIV1);
    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL50,
        divp: Some(PllDiv::DIV2),
        divq: None,
        divr: None,
    });

    config.rcc.sys = Sysclk::PLL1_P; // 400 MHz
    config.rcc.ahb_pre = AHBPrescaler::DIV2; // 200 MHz
    config.rcc.apb1_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb2_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb3_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb4_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.voltage_scale = VoltageScale::Scale1;

    config
}

/// HAL conversions of the [`platform::peripheral`] presets.
#[cfg(feature = "hardware")]
pub mod hardware {
    use embassy_stm32::time::Hertz;
    use embassy_stm32::{spi, usart};
    use platform::{BitOrder, DataBits, Parity, SpiConfig, SpiMode, StopBits, UartConfig};

    /// SPI settings for the HAL.
    pub fn spi_config(preset: &SpiConfig) -> spi::Config {
        let mut config = spi::Config::default();
        config.frequency = Hertz(preset.frequency);
        config.mode = match preset.mode {
            SpiMode::Mode0 => spi::MODE_0,
            SpiMode::Mode1 => spi::MODE_1,
            SpiMode::Mode2 => spi::MODE_2,
            SpiMode::Mode3 => spi::MODE_3,
        };
        config.bit_order = match preset.bit_order {
            BitOrder::MsbFirst => spi::BitOrder::MsbFirst,
            BitOrder::LsbFirst => spi::BitOrder::LsbFirst,
        };
        config
    }

    /// UART settings for the HAL.
    pub fn uart_config(preset: &UartConfig) -> usart::Config {
        let mut config = usart::Config::default();
        config.baudrate = preset.baud_rate;
        config.data_bits = match preset.data_bits {
            DataBits::Eight => usart::DataBits::DataBits8,
            DataBits::Nine => usart::DataBits::DataBits9,
        };
        config.parity = match preset.parity {
            Parity::None => usart::Parity::ParityNone,
            Parity::Even => usart::Parity::ParityEven,
            Parity::Odd => usart::Parity::ParityOdd,
        };
        config.stop_bits = match preset.stop_bits {
            StopBits::One => usart::StopBits::STOP1,
            StopBits::Two => usart::StopBits::STOP2,
        };
        config
    }
}
