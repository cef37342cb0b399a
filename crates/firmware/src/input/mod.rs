//! Front-panel buttons.
//!
//! | Feature    | Driver            | Source            |
//! |------------|-------------------|-------------------|
//! | `hardware` | [`HardwareInput`] | EXTI GPIO buttons |
//! | host/tests | [`platform::mocks::MockInput`] | scripted |
//!
//! Both implement [`platform::InputDevice`], so the event loop is identical
//! across targets.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

// Re-export the trait and event types so callers only need `firmware::input`.
pub use platform::{Button, InputDevice, InputEvent};

/// Hardware GPIO driver (three debounced buttons).
#[cfg(feature = "hardware")]
pub mod hardware;
#[cfg(feature = "hardware")]
pub use hardware::HardwareInput;

/// Queue `event` without waiting. Returns `false` if the channel was full.
///
/// The button task never blocks on a slow consumer; a full queue drops the
/// click.
#[cfg_attr(not(feature = "hardware"), allow(dead_code))]
pub(crate) fn try_send_event<M: RawMutex, const N: usize>(
    tx: &Sender<'_, M, InputEvent, N>,
    event: InputEvent,
) -> bool {
    tx.try_send(event).is_ok()
}
