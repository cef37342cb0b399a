//! Playback controller.
//!
//! `PlaybackController` owns the single playback state of the device and is
//! the only code that talks to the MP3 module. The scan scheduler and the
//! button handlers call into it; neither touches the player directly.
//!
//! Every operation runs to completion before the next is dispatched (one
//! owning task, no preemption), so the state needs no locking.

use platform::{Mp3Player, PlayerCommand, PlayerConfig, Volume, VolumeLimits};

use crate::catalog::{Catalog, CardId};

/// Snapshot of the playback state.
///
/// Invariants:
/// - `volume` always lies inside the controller's [`VolumeLimits`].
/// - `is_playing()` implies `current_card().is_some()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    is_playing: bool,
    current_card: Option<CardId>,
    volume: Volume,
}

impl PlaybackState {
    const fn idle(volume: Volume) -> Self {
        Self {
            is_playing: false,
            current_card: None,
            volume,
        }
    }

    /// Returns `true` while a track is playing.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Card whose track is loaded, if any.
    pub fn current_card(&self) -> Option<CardId> {
        self.current_card
    }

    /// Current volume.
    pub fn volume(&self) -> Volume {
        self.volume
    }
}

/// Result of presenting a card to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectOutcome {
    /// The card's track is already playing; nothing was sent.
    AlreadyPlaying,
    /// The card is not in the catalog; state is unchanged.
    UnknownCard,
    /// The card's track was loaded and started.
    Loaded,
}

/// Coordinates card selections and button presses into player commands.
pub struct PlaybackController<P, C> {
    player: P,
    catalog: C,
    limits: VolumeLimits,
    state: PlaybackState,
}

impl<P: Mp3Player, C: Catalog> PlaybackController<P, C> {
    /// Create a controller in the idle state.
    ///
    /// The initial volume is clamped into `config.limits`; run
    /// [`PlayerConfig::validate`] at boot to catch a misconfiguration.
    pub fn new(player: P, catalog: C, config: &PlayerConfig) -> Self {
        Self {
            player,
            catalog,
            limits: config.limits,
            state: PlaybackState::idle(config.limits.clamp(config.initial_volume)),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Volume bounds enforced by [`adjust_volume`](Self::adjust_volume).
    pub fn limits(&self) -> VolumeLimits {
        self.limits
    }

    /// The player driver.
    pub fn player(&self) -> &P {
        &self.player
    }

    /// The player driver, mutably.
    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// The track catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Reset the MP3 module. The module ignores commands for a while
    /// afterwards; follow up with [`apply_volume`](Self::apply_volume) once
    /// it has settled.
    pub async fn power_on(&mut self) {
        info!("Resetting player");
        self.send(PlayerCommand::Reset).await;
    }

    /// Send the current volume to the module.
    pub async fn apply_volume(&mut self) {
        let volume = self.state.volume;
        self.send(PlayerCommand::SetVolume(volume)).await;
        info!("Volume: {}", volume.get());
    }

    /// Flip between playing and paused.
    ///
    /// Does nothing without a loaded card. Returns the new playing flag, or
    /// `None` when nothing was loaded.
    pub async fn toggle_play_pause(&mut self) -> Option<bool> {
        self.state.current_card?;

        let playing = !self.state.is_playing;
        self.state.is_playing = playing;
        if playing {
            self.send(PlayerCommand::Play).await;
            info!("Play");
        } else {
            self.send(PlayerCommand::Pause).await;
            info!("Pause");
        }
        Some(playing)
    }

    /// Change the volume by `delta` steps, clamped to the limits.
    ///
    /// The command is sent even when clamping leaves the level unchanged.
    pub async fn adjust_volume(&mut self, delta: i32) -> Volume {
        let volume = self.limits.step(self.state.volume, delta);
        self.send(PlayerCommand::SetVolume(volume)).await;
        self.state.volume = volume;
        info!("Volume: {}", volume.get());
        volume
    }

    /// Handle a card seen by the scanner.
    ///
    /// Re-scans of the card that is already playing are ignored. Unknown
    /// cards never evict the loaded track. A known card is started with
    /// `pause`, `play-folder`, `play`, in that order: switching tracks while
    /// the module is still playing produces an audible click.
    pub async fn select_card(&mut self, card: CardId) -> SelectOutcome {
        if self.state.is_playing && self.state.current_card == Some(card) {
            debug!("Card already playing");
            return SelectOutcome::AlreadyPlaying;
        }

        info!("New card: {}", card);

        let Some(track) = self.catalog.lookup(&card) else {
            info!("No track found");
            return SelectOutcome::UnknownCard;
        };
        let (folder, file) = (track.folder(), track.file());
        info!("Playing: {} folder={} file={}", track.name(), folder, file);

        self.state.current_card = Some(card);
        self.state.is_playing = true;

        self.send(PlayerCommand::Pause).await;
        self.send(PlayerCommand::PlayFolder { folder, file }).await;
        self.send(PlayerCommand::Play).await;
        SelectOutcome::Loaded
    }

    /// Commands are best-effort: a failure is logged and the state stays
    /// as the operation left it.
    async fn send(&mut self, command: PlayerCommand) {
        if self.player.execute(command).await.is_err() {
            warn!("Player command {} failed", command.name());
        }
    }
}
