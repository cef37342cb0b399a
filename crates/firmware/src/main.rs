//! Tag Jukebox Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.

#![no_std]
#![no_main]

use core::convert::Infallible;

use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use embassy_stm32::spi::Spi;
use embassy_stm32::usart::UartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use mfrc522::comm::blocking::spi::SpiInterface;
use mfrc522::Mfrc522;
use platform::config::{APP_NAME, APP_VERSION};
use platform::{PlayerConfig, SpiConfig, UartConfig};
use playback::PlaybackController;

use firmware::boot::{self, hardware as hal_config};
use firmware::input::hardware::{spawn_input_task, HardwareInput};
use firmware::{load_catalog, CardPlayer, DfPlayer, Rc522Scanner, ScanScheduler};

use {defmt_rtt as _, panic_probe as _};

/// Never signalled on the device; the event loop runs until power-off.
static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Log `what` and park the executor. There is nothing useful to do without
/// the failed peripheral.
async fn halt(what: &str) -> Infallible {
    defmt::error!("Boot failed: {=str}", what);
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("{=str} v{=str}", APP_NAME, APP_VERSION);
    for step in boot::BOOT_SEQUENCE_STEPS {
        defmt::debug!("Boot: {=str}", *step);
    }

    let p = embassy_stm32::init(boot::build_embassy_config());

    let config = PlayerConfig::DEFAULT;
    if let Err(e) = config.validate() {
        defmt::error!("Invalid player config: {}", defmt::Display2Format(&e));
        match halt("config").await {}
    }

    let catalog = match load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            defmt::error!("Track table rejected: {}", defmt::Display2Format(&e));
            match halt("catalog").await {}
        }
    };
    defmt::info!("Catalog: {=usize} cards", catalog.len());

    // SPI1 for the MFRC522: PA5 SCK, PB5 MOSI, PA6 MISO, PD14 NSS
    let spi = Spi::new_blocking(
        p.SPI1,
        p.PA5,
        p.PB5,
        p.PA6,
        hal_config::spi_config(&SpiConfig::mfrc522()),
    );
    let nss = Output::new(p.PD14, Level::High, Speed::VeryHigh);
    let Ok(spi_device) = ExclusiveDevice::new(spi, nss, Delay) else {
        match halt("MFRC522 chip select").await {}
    };
    let reader = match Mfrc522::new(SpiInterface::new(spi_device)).init() {
        Ok(reader) => reader,
        Err(_) => match halt("MFRC522 init").await {},
    };
    defmt::info!("MFRC522 ready");

    // USART2 TX (PD5) for the DFPlayer; its replies are not read.
    let uart = match UartTx::new(
        p.USART2,
        p.PD5,
        p.DMA1_CH0,
        hal_config::uart_config(&UartConfig::dfplayer()),
    ) {
        Ok(uart) => uart,
        Err(_) => match halt("DFPlayer UART").await {},
    };

    let btn_play: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PA0, Pull::Up).degrade(), p.EXTI0.degrade());
    let btn_vol_up: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PA1, Pull::Up).degrade(), p.EXTI1.degrade());
    let btn_vol_down: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PA2, Pull::Up).degrade(), p.EXTI2.degrade());
    if spawn_input_task(&spawner, btn_play, btn_vol_up, btn_vol_down).is_err() {
        match halt("input task").await {}
    }
    defmt::info!("Input task spawned");

    let controller = PlaybackController::new(DfPlayer::new(uart), catalog, &config);
    let scheduler = ScanScheduler::new(Rc522Scanner::new(reader), boot::scan_interval(&config));
    let mut app = CardPlayer::new(controller, scheduler);

    app.boot(boot::reset_settle(&config)).await;

    defmt::info!("Entering event loop");
    let mut input = HardwareInput::new();
    app.run(&mut input, &SHUTDOWN).await;

    // Only reachable if SHUTDOWN is ever wired to something.
    match halt("event loop exited").await {}
}
