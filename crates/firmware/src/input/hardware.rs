//! Hardware GPIO input driver: three debounced push buttons.
//!
//! # Pin assignments
//!
//! | Signal      | MCU pin | Notes                        |
//! |-------------|---------|------------------------------|
//! | Play/Pause  | PA0     | Active-low, internal pull-up |
//! | Volume up   | PA1     | Active-low, internal pull-up |
//! | Volume down | PA2     | Active-low, internal pull-up |
//!
//! # Architecture
//!
//! A static [`Channel`] carries clicks from the GPIO task to the event loop.
//! [`HardwareInput`] wraps the receiver and implements
//! [`platform::InputDevice`]. A click that arrives while the event loop is
//! busy waits in the channel; if the channel is full it is dropped rather
//! than stalling the GPIO task.

use embassy_executor::{SpawnError, Spawner};
use embassy_futures::join::join3;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::AnyPin;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Timer;

use platform::config::BUTTON_DEBOUNCE_MS;
use platform::{Button, InputDevice, InputEvent};

use super::try_send_event;

/// Depth of the static event channel.
pub(crate) const CHANNEL_DEPTH: usize = 16;

type ClickSender = Sender<'static, CriticalSectionRawMutex, InputEvent, CHANNEL_DEPTH>;

/// Global event channel shared between the GPIO task and the event loop.
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, CHANNEL_DEPTH> =
    Channel::new();

/// Hardware input driver backed by [`INPUT_CHANNEL`].
pub struct HardwareInput {
    rx: Receiver<'static, CriticalSectionRawMutex, InputEvent, CHANNEL_DEPTH>,
}

impl HardwareInput {
    /// Create a driver reading from the static channel.
    pub fn new() -> Self {
        Self {
            rx: INPUT_CHANNEL.receiver(),
        }
    }
}

impl Default for HardwareInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for HardwareInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        self.rx.receive().await
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.rx.try_receive().ok() // ok: Empty is the only error; the channel never closes
    }
}

/// Spawn the button task. Call once from `main`.
pub fn spawn_input_task(
    spawner: &Spawner,
    btn_play: ExtiInput<'static, AnyPin>,
    btn_vol_up: ExtiInput<'static, AnyPin>,
    btn_vol_down: ExtiInput<'static, AnyPin>,
) -> Result<(), SpawnError> {
    spawner.spawn(input_task(btn_play, btn_vol_up, btn_vol_down))
}

/// Embassy task that owns the button GPIO and forwards clicks to
/// [`INPUT_CHANNEL`].
#[embassy_executor::task]
async fn input_task(
    mut btn_play: ExtiInput<'static, AnyPin>,
    mut btn_vol_up: ExtiInput<'static, AnyPin>,
    mut btn_vol_down: ExtiInput<'static, AnyPin>,
) {
    let tx = INPUT_CHANNEL.sender();
    join3(
        button_loop(&mut btn_play, Button::PlayPause, tx),
        button_loop(&mut btn_vol_up, Button::VolumeUp, tx),
        button_loop(&mut btn_vol_down, Button::VolumeDown, tx),
    )
    .await;
}

/// Debounced click loop (active-low, internal pull-up).
///
/// Falling edge, debounce, confirm the level is still low, post a click,
/// then wait for release so a held button yields a single click.
async fn button_loop(pin: &mut ExtiInput<'static, AnyPin>, btn: Button, tx: ClickSender) {
    loop {
        pin.wait_for_falling_edge().await;
        Timer::after_millis(u64::from(BUTTON_DEBOUNCE_MS)).await;
        if pin.is_low() {
            debug!("Button click: {}", btn.label());
            if !try_send_event(&tx, InputEvent::Click(btn)) {
                warn!("input channel full, dropped click {}", btn.label());
            }
            pin.wait_for_rising_edge().await;
            Timer::after_millis(u64::from(BUTTON_DEBOUNCE_MS)).await; // release bounce
        }
    }
}
