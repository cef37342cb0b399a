//! Periodic card scan.
//!
//! One tick: reset the reader, check for a card, read its UID and hand the
//! card to the controller. The scheduler never stops on a tick result; a
//! failed UID read is logged and the next tick runs on schedule.

use embassy_time::Duration;
use platform::{CardScanner, Mp3Player};
use playback::{CardId, Catalog, PlaybackController};

/// Result of one scan tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanOutcome {
    /// No card in the field.
    NoCardPresent,
    /// A card answered but its UID could not be read.
    UidReadError,
    /// A card was read and passed to the controller.
    UidFound(CardId),
}

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Waiting for the next tick.
    Idle,
    /// Executing a tick.
    Scanning,
}

/// Owns the card reader and drives it at a fixed interval.
pub struct ScanScheduler<S> {
    scanner: S,
    interval: Duration,
    state: SchedulerState,
}

impl<S: CardScanner> ScanScheduler<S> {
    /// Create an idle scheduler ticking every `interval`.
    pub fn new(scanner: S, interval: Duration) -> Self {
        Self {
            scanner,
            interval,
            state: SchedulerState::Idle,
        }
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current phase. Always `Idle` between calls to [`tick`](Self::tick).
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The card reader.
    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    /// Run one tick against `controller`.
    pub async fn tick<P, C>(&mut self, controller: &mut PlaybackController<P, C>) -> ScanOutcome
    where
        P: Mp3Player,
        C: Catalog,
    {
        self.state = SchedulerState::Scanning;
        let outcome = self.scan(controller).await;
        self.state = SchedulerState::Idle;
        outcome
    }

    async fn scan<P, C>(&mut self, controller: &mut PlaybackController<P, C>) -> ScanOutcome
    where
        P: Mp3Player,
        C: Catalog,
    {
        if self.scanner.reset().await.is_err() {
            // A reader that failed to reset may still answer; carry on.
            warn!("Scanner reset failed");
        }

        if !self.scanner.find_card().await {
            return ScanOutcome::NoCardPresent;
        }

        match self.scanner.read_uid().await {
            Ok(uid) => {
                let card = CardId::from_bytes(uid);
                controller.select_card(card).await;
                ScanOutcome::UidFound(card)
            }
            Err(_) => {
                error!("UID Scan Error");
                ScanOutcome::UidReadError
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{MockPlayer, MockScanner, ScanScript};
    use platform::{PlayerCommand, PlayerConfig};
    use playback::{TrackCatalog, TrackEntry};

    fn controller() -> PlaybackController<MockPlayer, TrackCatalog<2>> {
        let catalog = TrackCatalog::from_entries(&[TrackEntry {
            key: "1:2:3:4",
            folder: 1,
            file: 3,
            name: "Song",
        }])
        .unwrap();
        PlaybackController::new(MockPlayer::new(), catalog, &PlayerConfig::DEFAULT)
    }

    fn scheduler(script: &[ScanScript]) -> ScanScheduler<MockScanner> {
        ScanScheduler::new(MockScanner::with_script(script), Duration::from_millis(1000))
    }

    #[tokio::test]
    async fn test_empty_field_sends_nothing() {
        let mut c = controller();
        let mut s = scheduler(&[ScanScript::NoCard]);
        assert_eq!(s.tick(&mut c).await, ScanOutcome::NoCardPresent);
        assert!(c.player().commands().is_empty());
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[tokio::test]
    async fn test_every_tick_resets_reader() {
        let mut c = controller();
        let mut s = scheduler(&[ScanScript::NoCard, ScanScript::NoCard]);
        s.tick(&mut c).await;
        s.tick(&mut c).await;
        assert_eq!(s.scanner().reset_count(), 2);
    }

    #[tokio::test]
    async fn test_known_card_starts_track() {
        let mut c = controller();
        let mut s = scheduler(&[ScanScript::Uid([1, 2, 3, 4])]);
        let card = CardId::from_bytes([1, 2, 3, 4]);
        assert_eq!(s.tick(&mut c).await, ScanOutcome::UidFound(card));
        assert_eq!(
            c.player().commands(),
            &[
                PlayerCommand::Pause,
                PlayerCommand::PlayFolder { folder: 1, file: 3 },
                PlayerCommand::Play,
            ]
        );
        assert_eq!(c.state().current_card(), Some(card));
    }

    #[tokio::test]
    async fn test_read_error_leaves_state_and_next_tick_still_scans() {
        let mut c = controller();
        let mut s = scheduler(&[ScanScript::ReadError, ScanScript::Uid([1, 2, 3, 4])]);
        assert_eq!(s.tick(&mut c).await, ScanOutcome::UidReadError);
        assert!(c.player().commands().is_empty());
        assert!(!c.state().is_playing());
        assert_eq!(s.state(), SchedulerState::Idle);

        assert!(matches!(s.tick(&mut c).await, ScanOutcome::UidFound(_)));
        assert!(c.state().is_playing());
    }

    #[tokio::test]
    async fn test_unknown_card_is_reported_but_ignored() {
        let mut c = controller();
        let mut s = scheduler(&[ScanScript::Uid([4, 3, 2, 1])]);
        assert_eq!(
            s.tick(&mut c).await,
            ScanOutcome::UidFound(CardId::from_bytes([4, 3, 2, 1]))
        );
        assert_eq!(c.state().current_card(), None);
        assert!(c.player().commands().is_empty());
    }

    #[test]
    fn test_interval_is_kept() {
        let s = scheduler(&[]);
        assert_eq!(s.interval(), Duration::from_millis(1000));
    }
}
