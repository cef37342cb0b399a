//! Card Player Simulator - the real event loop on the desktop
//!
//! Demonstrates:
//! - Catalog loading from `tracks.json`
//! - Scripted card scans (known, unknown, unreadable, re-scan)
//! - Scripted button clicks
//! - DFPlayer frames as they would go out on the UART
//!
//! ```bash
//! cargo run --example card_player_sim --features emulator
//! cargo run --example card_player_sim --features emulator -- path/to/tracks.json
//! RUST_LOG=debug cargo run --example card_player_sim --features emulator
//! ```

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use firmware::{boot, CardPlayer, DfPlayer, ScanScheduler};
use platform::mocks::{MockScanner, ScanScript};
use platform::{Button, InputDevice, InputEvent, PlayerConfig};
use playback::{PlaybackController, TrackCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BUNDLED_TRACKS: &str = include_str!("tracks.json");

/// Scan interval for the simulation; shorter than on the device so the
/// script finishes quickly.
const SIM_SCAN_INTERVAL_MS: u32 = 200;

/// UART stand-in: logs every frame in hex.
struct FrameLog;

impl embedded_io_async::ErrorType for FrameLog {
    type Error = core::convert::Infallible;
}

impl embedded_io_async::Write for FrameLog {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let hex: Vec<String> = buf.iter().map(|b| format!("{b:02X}")).collect();
        tracing::debug!("uart tx: {}", hex.join(" "));
        Ok(buf.len())
    }
}

/// Clicks delivered at fixed offsets from start.
struct ScriptedButtons {
    script: std::collections::VecDeque<(u64, Button)>,
    elapsed_ms: u64,
}

impl ScriptedButtons {
    fn new(script: &[(u64, Button)]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            elapsed_ms: 0,
        }
    }
}

impl InputDevice for ScriptedButtons {
    async fn wait_for_event(&mut self) -> InputEvent {
        loop {
            match self.script.front().copied() {
                Some((at, button)) if at <= self.elapsed_ms => {
                    self.script.pop_front();
                    return InputEvent::Click(button);
                }
                _ => {
                    Timer::after_millis(10).await;
                    self.elapsed_ms = self.elapsed_ms.saturating_add(10);
                }
            }
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        None
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUNDLED_TRACKS.to_owned(),
    };
    let catalog: TrackCatalog<64> = TrackCatalog::from_json(&json).map_err(|e| e.to_string())?;
    tracing::info!("Loaded {} cards", catalog.len());

    let config = PlayerConfig {
        scan_interval_ms: SIM_SCAN_INTERVAL_MS,
        ..PlayerConfig::DEFAULT
    };
    config.validate().map_err(|e| e.to_string())?;

    let scanner = MockScanner::with_script(&[
        ScanScript::NoCard,
        ScanScript::Uid([136, 4, 201, 77]),
        ScanScript::Uid([136, 4, 201, 77]),
        ScanScript::ReadError,
        ScanScript::Uid([1, 1, 1, 1]),
        ScanScript::NoCard,
        ScanScript::Uid([211, 9, 44, 160]),
    ]);
    let mut buttons = ScriptedButtons::new(&[
        (300, Button::VolumeUp),
        (350, Button::VolumeUp),
        (700, Button::PlayPause),
        (900, Button::PlayPause),
        (1500, Button::VolumeDown),
    ]);

    let controller = PlaybackController::new(DfPlayer::new(FrameLog), catalog, &config);
    let scheduler = ScanScheduler::new(scanner, boot::scan_interval(&config));
    let mut app = CardPlayer::new(controller, scheduler);

    app.boot(boot::reset_settle(&config)).await;

    let cancel = Signal::<NoopRawMutex, ()>::new();
    let stop = async {
        Timer::after(Duration::from_millis(2000)).await;
        cancel.signal(());
    };
    join(app.run(&mut buttons, &cancel), stop).await;

    let state = app.controller().state();
    tracing::info!(
        "Final state: playing={} volume={}",
        state.is_playing(),
        state.volume().get()
    );
    Ok(())
}
