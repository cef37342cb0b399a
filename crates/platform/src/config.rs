//! Application configuration and constants
//!
//! Central configuration values used across the application. Tuning the
//! device (volume range, scan rate) means editing these constants, not
//! hunting for literals in the firmware.

use thiserror_no_std::Error;

use crate::audio_types::{Volume, VolumeLimits};

/// The application name
pub const APP_NAME: &str = "Tag Jukebox";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Volume applied once the MP3 module has settled after reset.
pub const DEFAULT_INITIAL_VOLUME: u8 = 15;

/// Upper volume bound reachable with the buttons (module maximum is 30).
pub const DEFAULT_MAX_VOLUME: u8 = 25;

/// Lower volume bound reachable with the buttons.
pub const DEFAULT_MIN_VOLUME: u8 = 0;

/// Period of the card scan ticker.
pub const DEFAULT_SCAN_INTERVAL_MS: u32 = 1000;

/// Time the MP3 module needs after a reset before it accepts commands.
pub const PLAYER_RESET_SETTLE_MS: u32 = 500;

/// Button debounce window.
pub const BUTTON_DEBOUNCE_MS: u32 = 20;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Initial volume lies outside the configured limits.
    #[error("initial volume {initial} outside {min}..={max}")]
    InitialVolumeOutOfRange {
        /// Configured initial level.
        initial: u8,
        /// Lower limit.
        min: u8,
        /// Upper limit.
        max: u8,
    },
    /// A zero scan interval would spin the scan loop.
    #[error("scan interval must be non-zero")]
    ZeroScanInterval,
}

/// Runtime behaviour of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerConfig {
    /// Volume sent after boot.
    pub initial_volume: Volume,
    /// Bounds enforced on every volume change.
    pub limits: VolumeLimits,
    /// Card scan period in milliseconds.
    pub scan_interval_ms: u32,
    /// Delay between player reset and the first volume command.
    pub reset_settle_ms: u32,
}

impl PlayerConfig {
    /// Factory defaults.
    pub const DEFAULT: Self = Self {
        initial_volume: Volume::new(DEFAULT_INITIAL_VOLUME),
        limits: VolumeLimits::DEFAULT,
        scan_interval_ms: DEFAULT_SCAN_INTERVAL_MS,
        reset_settle_ms: PLAYER_RESET_SETTLE_MS,
    };

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.limits.contains(self.initial_volume) {
            return Err(ConfigError::InitialVolumeOutOfRange {
                initial: self.initial_volume.get(),
                min: self.limits.min().get(),
                max: self.limits.max().get(),
            });
        }
        if self.scan_interval_ms == 0 {
            return Err(ConfigError::ZeroScanInterval);
        }
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(PlayerConfig::DEFAULT.validate(), Ok(()));
        assert_eq!(PlayerConfig::DEFAULT.limits.min().get(), DEFAULT_MIN_VOLUME);
        assert_eq!(PlayerConfig::DEFAULT.limits.max().get(), DEFAULT_MAX_VOLUME);
    }

    #[test]
    fn test_initial_volume_above_limit_rejected() {
        let config = PlayerConfig {
            initial_volume: Volume::new(28),
            ..PlayerConfig::DEFAULT
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialVolumeOutOfRange {
                initial: 28,
                min: 0,
                max: 25
            })
        );
    }

    #[test]
    fn test_zero_scan_interval_rejected() {
        let config = PlayerConfig {
            scan_interval_ms: 0,
            ..PlayerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroScanInterval));
    }
}
