//! Serial MP3 module abstraction
//!
//! The module is a fire-and-forget device: commands go out over the wire and
//! nothing comes back that the controller acts on. Implementations still
//! surface transport errors so callers can log them.

use crate::audio_types::Volume;

/// A single command for the MP3 module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerCommand {
    /// Reset the module (it needs a short settle time afterwards).
    Reset,
    /// Set the output volume.
    SetVolume(Volume),
    /// Resume or start playback of the selected track.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Select `file` inside numbered `folder` on the module's storage.
    PlayFolder {
        /// Folder number (`01`–`99` on the card).
        folder: u8,
        /// File number inside the folder.
        file: u8,
    },
}

impl PlayerCommand {
    /// Short human-readable name for log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::SetVolume(_) => "set-volume",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::PlayFolder { .. } => "play-folder",
        }
    }
}

/// MP3 playback module trait
pub trait Mp3Player {
    /// Error type
    type Error;

    /// Reset the module
    fn reset(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Set output volume
    fn set_volume(
        &mut self,
        volume: Volume,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Start or resume playback
    fn play(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Pause playback
    fn pause(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Select a track by folder and file number
    fn play_folder(
        &mut self,
        folder: u8,
        file: u8,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Dispatch a [`PlayerCommand`] to the matching method.
    fn execute(
        &mut self,
        command: PlayerCommand,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>> {
        async move {
            match command {
                PlayerCommand::Reset => self.reset().await,
                PlayerCommand::SetVolume(volume) => self.set_volume(volume).await,
                PlayerCommand::Play => self.play().await,
                PlayerCommand::Pause => self.pause().await,
                PlayerCommand::PlayFolder { folder, file } => {
                    self.play_folder(folder, file).await
                }
            }
        }
    }
}
