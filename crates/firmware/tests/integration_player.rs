//! End-to-end tests: the real event loop over mock peripherals.
// Integration test file: expect/unwrap are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Runs `CardPlayer::run` on tokio with the embassy-time std driver, feeds it
//! scripted scans and clicks, and checks the commands the MP3 module sees.
//!
//! Run with: cargo test -p firmware --test integration_player

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use firmware::{AppEvent, CardPlayer, ScanOutcome, ScanScheduler};
use platform::mocks::{MockInput, MockPlayer, MockScanner, ScanScript};
use platform::{Button, PlayerCommand, PlayerConfig, Volume};
use playback::{CardId, PlaybackController, SelectOutcome, TrackCatalog};

type TestPlayer = CardPlayer<MockPlayer, TrackCatalog<8>, MockScanner>;

const TRACKS_JSON: &str = r#"{
    "1:2:3:4": { "file": 3, "folder": 1, "name": "Song" },
    "5:6:7:8": { "file": 1, "folder": 2, "name": "Story" }
}"#;

fn card_player(script: &[ScanScript], interval_ms: u64) -> TestPlayer {
    let catalog = TrackCatalog::from_json(TRACKS_JSON).unwrap();
    CardPlayer::new(
        PlaybackController::new(MockPlayer::new(), catalog, &PlayerConfig::DEFAULT),
        ScanScheduler::new(
            MockScanner::with_script(script),
            Duration::from_millis(interval_ms),
        ),
    )
}

/// Run the event loop for `ms`, then cancel it.
async fn run_for(app: &mut TestPlayer, input: &mut MockInput, ms: u64) {
    let cancel = Signal::<NoopRawMutex, ()>::new();
    let stopper = async {
        Timer::after_millis(ms).await;
        cancel.signal(());
    };
    join(app.run(input, &cancel), stopper).await;
}

#[tokio::test]
async fn test_card_scenario_from_cold_start() {
    let mut app = card_player(&[ScanScript::Uid([1, 2, 3, 4])], 1000);
    let mut input = MockInput::new();

    run_for(&mut app, &mut input, 50).await;

    let c = app.controller();
    assert_eq!(
        c.player().commands(),
        &[
            PlayerCommand::Pause,
            PlayerCommand::PlayFolder { folder: 1, file: 3 },
            PlayerCommand::Play,
        ]
    );
    assert!(c.state().is_playing());
    assert_eq!(c.state().current_card(), Some(CardId::from_bytes([1, 2, 3, 4])));
}

#[tokio::test]
async fn test_clicks_are_handled_after_the_first_scan() {
    let mut app = card_player(&[ScanScript::Uid([5, 6, 7, 8])], 1000);
    let mut input = MockInput::new();
    input.click(Button::VolumeUp).unwrap();
    input.click(Button::PlayPause).unwrap();

    run_for(&mut app, &mut input, 80).await;

    assert_eq!(
        app.controller().player().commands(),
        &[
            PlayerCommand::Pause,
            PlayerCommand::PlayFolder { folder: 2, file: 1 },
            PlayerCommand::Play,
            PlayerCommand::SetVolume(Volume::new(16)),
            PlayerCommand::Pause,
        ]
    );
    assert!(!app.controller().state().is_playing());
}

#[tokio::test]
async fn test_scanning_continues_after_uid_read_error() {
    let mut app = card_player(&[ScanScript::ReadError, ScanScript::Uid([1, 2, 3, 4])], 20);
    let mut input = MockInput::new();

    run_for(&mut app, &mut input, 150).await;

    assert!(app.controller().state().is_playing());
    assert_eq!(app.scheduler().scanner().remaining(), 0);
}

#[tokio::test]
async fn test_card_left_on_reader_is_not_restarted() {
    let script = [ScanScript::Uid([1, 2, 3, 4]); 5];
    let mut app = card_player(&script, 10);
    let mut input = MockInput::new();

    run_for(&mut app, &mut input, 120).await;

    assert_eq!(app.scheduler().scanner().remaining(), 0, "all scans consumed");
    assert_eq!(app.controller().player().commands().len(), 3);
}

#[tokio::test]
async fn test_boot_then_unknown_card() {
    let mut app = card_player(&[], 1000);
    app.boot(Duration::from_millis(5)).await;
    let outcome = app
        .controller_mut()
        .select_card(CardId::from_bytes([9, 9, 9, 9]))
        .await;
    assert_eq!(outcome, SelectOutcome::UnknownCard);
    assert_eq!(
        app.controller().player().commands(),
        &[
            PlayerCommand::Reset,
            PlayerCommand::SetVolume(Volume::new(15)),
        ]
    );
}

#[tokio::test]
async fn test_tick_event_without_card() {
    let mut app = card_player(&[ScanScript::NoCard], 1000);
    assert_eq!(
        app.handle_event(AppEvent::ScanTick).await,
        Some(ScanOutcome::NoCardPresent)
    );
    assert!(app.controller().player().commands().is_empty());
}

#[tokio::test]
async fn test_long_track_name_does_not_drop_catalog() {
    let json = r#"{
        "1:2:3:4": { "file": 3, "folder": 1, "name": "Song" },
        "5:6:7:8": { "file": 1, "folder": 2, "name": "The Very Hungry Caterpillar (read aloud)" }
    }"#;
    let catalog: TrackCatalog<8> = TrackCatalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 2);

    let mut c = PlaybackController::new(MockPlayer::new(), catalog, &PlayerConfig::DEFAULT);
    assert_eq!(
        c.select_card(CardId::from_bytes([5, 6, 7, 8])).await,
        SelectOutcome::Loaded
    );
    assert_eq!(
        c.player().commands(),
        &[
            PlayerCommand::Pause,
            PlayerCommand::PlayFolder { folder: 2, file: 1 },
            PlayerCommand::Play,
        ]
    );
}
