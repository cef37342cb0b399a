//! Application event loop.
//!
//! A single task owns the [`PlaybackController`] and the [`ScanScheduler`].
//! Scan ticks and button clicks are merged with `select3` and handled one at
//! a time, so every controller operation runs to completion before the next
//! event is looked at. Clicks that arrive during a tick wait in the input
//! channel.
//!
//! ```text
//!  Ticker ──┐
//!           ├─► CardPlayer::handle_event ─► PlaybackController ─► Mp3Player
//!  Input  ──┘
//! ```

use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker, Timer};
use platform::{Button, CardScanner, InputDevice, InputEvent, Mp3Player};
use playback::{Catalog, PlaybackController};

use crate::scan::{ScanOutcome, ScanScheduler};

/// Work items handled by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppEvent {
    /// A debounced button click.
    Click(Button),
    /// The scan interval elapsed.
    ScanTick,
}

impl From<InputEvent> for AppEvent {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::Click(button) => Self::Click(button),
        }
    }
}

/// The whole device: controller plus card scanner.
pub struct CardPlayer<P, C, S> {
    controller: PlaybackController<P, C>,
    scheduler: ScanScheduler<S>,
}

impl<P, C, S> CardPlayer<P, C, S>
where
    P: Mp3Player,
    C: Catalog,
    S: CardScanner,
{
    /// Assemble the device from its parts.
    pub fn new(controller: PlaybackController<P, C>, scheduler: ScanScheduler<S>) -> Self {
        Self {
            controller,
            scheduler,
        }
    }

    /// The playback controller.
    pub fn controller(&self) -> &PlaybackController<P, C> {
        &self.controller
    }

    /// The playback controller, mutably.
    pub fn controller_mut(&mut self) -> &mut PlaybackController<P, C> {
        &mut self.controller
    }

    /// The scan scheduler.
    pub fn scheduler(&self) -> &ScanScheduler<S> {
        &self.scheduler
    }

    /// Power-on sequence: reset the MP3 module, give it `settle` to come
    /// back, then send the initial volume.
    pub async fn boot(&mut self, settle: Duration) {
        self.controller.power_on().await;
        Timer::after(settle).await;
        self.controller.apply_volume().await;
    }

    /// Map a button to its controller operation.
    pub async fn handle_click(&mut self, button: Button) {
        debug!("Click: {}", button.label());
        match button {
            Button::PlayPause => {
                self.controller.toggle_play_pause().await;
            }
            Button::VolumeUp => {
                self.controller.adjust_volume(1).await;
            }
            Button::VolumeDown => {
                self.controller.adjust_volume(-1).await;
            }
        }
    }

    /// Handle one event. Returns the scan result for [`AppEvent::ScanTick`].
    pub async fn handle_event(&mut self, event: AppEvent) -> Option<ScanOutcome> {
        match event {
            AppEvent::Click(button) => {
                self.handle_click(button).await;
                None
            }
            AppEvent::ScanTick => Some(self.scheduler.tick(&mut self.controller).await),
        }
    }

    /// Run the event loop until `cancel` is signalled.
    ///
    /// The first scan happens immediately, later ones every scan interval.
    /// Call [`boot`](Self::boot) first.
    pub async fn run<I, M>(&mut self, input: &mut I, cancel: &Signal<M, ()>)
    where
        I: InputDevice,
        M: RawMutex,
    {
        let mut ticker = Ticker::every(self.scheduler.interval());
        self.handle_event(AppEvent::ScanTick).await;

        loop {
            let event = match select3(cancel.wait(), ticker.next(), input.wait_for_event()).await
            {
                Either3::First(()) => {
                    info!("Event loop stopped");
                    return;
                }
                Either3::Second(()) => AppEvent::ScanTick,
                Either3::Third(event) => AppEvent::from(event),
            };
            self.handle_event(event).await;
        }
    }
}
