//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::*;

/// Error returned by mocks that were told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Mock MP3 module: records every command for assertions.
pub struct MockPlayer {
    commands: heapless::Vec<PlayerCommand, 128>,
    fail: bool,
}

impl MockPlayer {
    /// Create new mock player
    pub fn new() -> Self {
        Self {
            commands: heapless::Vec::new(),
            fail: false,
        }
    }

    /// Make every following command return [`MockError`] (still recorded).
    pub fn fail_commands(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Commands issued so far, oldest first
    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    /// Forget recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn record(&mut self, command: PlayerCommand) -> Result<(), MockError> {
        // Full log: keep the oldest entries, tests never issue this many.
        let _ = self.commands.push(command);
        if self.fail {
            Err(MockError)
        } else {
            Ok(())
        }
    }
}

impl Default for MockPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mp3Player for MockPlayer {
    type Error = MockError;

    async fn reset(&mut self) -> Result<(), Self::Error> {
        self.record(PlayerCommand::Reset)
    }

    async fn set_volume(&mut self, volume: Volume) -> Result<(), Self::Error> {
        self.record(PlayerCommand::SetVolume(volume))
    }

    async fn play(&mut self) -> Result<(), Self::Error> {
        self.record(PlayerCommand::Play)
    }

    async fn pause(&mut self) -> Result<(), Self::Error> {
        self.record(PlayerCommand::Pause)
    }

    async fn play_folder(&mut self, folder: u8, file: u8) -> Result<(), Self::Error> {
        self.record(PlayerCommand::PlayFolder { folder, file })
    }
}

/// One scripted scan result for [`MockScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanScript {
    /// No card in the field.
    NoCard,
    /// Card present but the UID read fails.
    ReadError,
    /// Card present with this UID.
    Uid([u8; UID_LEN]),
}

/// Mock card reader: replays a script, one entry per scan.
///
/// An exhausted script behaves like an empty field.
pub struct MockScanner {
    script: heapless::Deque<ScanScript, 32>,
    reset_count: usize,
}

impl MockScanner {
    /// Create new mock scanner with an empty script
    pub fn new() -> Self {
        Self {
            script: heapless::Deque::new(),
            reset_count: 0,
        }
    }

    /// Create a scanner that replays `steps` in order
    pub fn with_script(steps: &[ScanScript]) -> Self {
        let mut scanner = Self::new();
        for step in steps {
            // Silently truncated past capacity; scripts are short.
            let _ = scanner.push(*step);
        }
        scanner
    }

    /// Append a scan result
    pub fn push(&mut self, step: ScanScript) -> Result<(), ScanScript> {
        self.script.push_back(step)
    }

    /// Number of `reset` calls so far
    pub fn reset_count(&self) -> usize {
        self.reset_count
    }

    /// Script entries not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl CardScanner for MockScanner {
    type Error = MockError;

    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    async fn reset(&mut self) -> Result<(), Self::Error> {
        self.reset_count += 1;
        Ok(())
    }

    async fn find_card(&mut self) -> bool {
        match self.script.front() {
            None => false,
            Some(ScanScript::NoCard) => {
                self.script.pop_front();
                false
            }
            Some(_) => true,
        }
    }

    async fn read_uid(&mut self) -> Result<[u8; UID_LEN], Self::Error> {
        match self.script.pop_front() {
            Some(ScanScript::Uid(uid)) => Ok(uid),
            _ => Err(MockError),
        }
    }
}

/// Mock input device
pub struct MockInput {
    events: heapless::Deque<InputEvent, 16>,
}

impl MockInput {
    /// Create new mock input
    pub fn new() -> Self {
        Self {
            events: heapless::Deque::new(),
        }
    }

    /// Add event to queue
    pub fn add_event(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.events.push_back(event)
    }

    /// Queue a click of `button`
    pub fn click(&mut self, button: Button) -> Result<(), InputEvent> {
        self.add_event(InputEvent::Click(button))
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for MockInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        loop {
            if let Some(event) = self.events.pop_front() {
                return event;
            }
            embassy_time::Timer::after_millis(10).await;
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_player_records_in_order() {
        let mut player = MockPlayer::new();
        player.pause().await.unwrap();
        player.play_folder(2, 7).await.unwrap();
        player.play().await.unwrap();
        assert_eq!(
            player.commands(),
            &[
                PlayerCommand::Pause,
                PlayerCommand::PlayFolder { folder: 2, file: 7 },
                PlayerCommand::Play,
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_player_failure_still_records() {
        let mut player = MockPlayer::new();
        player.fail_commands(true);
        assert_eq!(player.execute(PlayerCommand::Play).await, Err(MockError));
        assert_eq!(player.commands(), &[PlayerCommand::Play]);
    }

    #[tokio::test]
    async fn test_mock_scanner_replays_script() {
        let mut scanner = MockScanner::with_script(&[
            ScanScript::NoCard,
            ScanScript::ReadError,
            ScanScript::Uid([9, 8, 7, 6]),
        ]);
        assert!(!scanner.find_card().await);
        assert!(scanner.find_card().await);
        assert_eq!(scanner.read_uid().await, Err(MockError));
        assert!(scanner.find_card().await);
        assert_eq!(scanner.read_uid().await, Ok([9, 8, 7, 6]));
        assert!(!scanner.find_card().await, "exhausted script is an empty field");
    }

    #[test]
    fn test_mock_input_poll_is_fifo() {
        let mut input = MockInput::new();
        input.click(Button::VolumeUp).unwrap();
        input.click(Button::PlayPause).unwrap();
        assert_eq!(input.poll_event(), Some(InputEvent::Click(Button::VolumeUp)));
        assert_eq!(input.poll_event(), Some(InputEvent::Click(Button::PlayPause)));
        assert_eq!(input.poll_event(), None);
    }
}
