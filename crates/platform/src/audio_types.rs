//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `Volume`: clamps to the MP3 module's 0–30 range, prevents command overflow
//! - `VolumeLimits`: configurable user-facing bounds inside that range

use thiserror_no_std::Error;

/// Highest volume level the MP3 module accepts.
pub const PLAYER_VOLUME_CEILING: u8 = 30;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── Volume ───────────────────────────────────────────────────────────────────

/// Player volume level, clamped to `0..=PLAYER_VOLUME_CEILING`.
///
/// Construct with [`Volume::new`] (clamping) or [`Volume::try_new`]
/// (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Volume(u8);

impl Volume {
    /// Silent.
    pub const MIN: Self = Self(0);

    /// Loudest level the module supports.
    pub const MAX: Self = Self(PLAYER_VOLUME_CEILING);

    /// Create a `Volume`, clamping values above the ceiling.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > PLAYER_VOLUME_CEILING {
            Self(PLAYER_VOLUME_CEILING)
        } else {
            Self(value)
        }
    }

    /// Create a `Volume`, returning an error if `value` exceeds the ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 30`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > PLAYER_VOLUME_CEILING {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(PLAYER_VOLUME_CEILING),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the raw level (0–30).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for Volume {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── VolumeLimits ─────────────────────────────────────────────────────────────

/// Inclusive user-facing volume bounds.
///
/// Invariant: `min <= max <= PLAYER_VOLUME_CEILING`. The buttons can never
/// push the volume outside these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeLimits {
    min: Volume,
    max: Volume,
}

impl VolumeLimits {
    /// Limits used when nothing else is configured: 0 to 25.
    pub const DEFAULT: Self = Self {
        min: Volume::new(0),
        max: Volume::new(25),
    };

    /// Create limits from raw levels.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `max` exceeds the ceiling or
    /// `min > max` (reported against the `0..=max` range).
    pub fn new(min: u8, max: u8) -> Result<Self, OutOfRangeError> {
        let max = Volume::try_new(max)?;
        if min > max.get() {
            return Err(OutOfRangeError {
                value: u32::from(min),
                min: 0,
                max: u32::from(max.get()),
            });
        }
        Ok(Self {
            min: Volume(min),
            max,
        })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(self) -> Volume {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(self) -> Volume {
        self.max
    }

    /// Returns `true` if `volume` lies inside the bounds.
    #[must_use]
    pub fn contains(self, volume: Volume) -> bool {
        volume >= self.min && volume <= self.max
    }

    /// Force `volume` into the bounds.
    #[must_use]
    pub fn clamp(self, volume: Volume) -> Volume {
        volume.clamp(self.min, self.max)
    }

    /// Apply a signed step to `current` and clamp the result.
    ///
    /// Accepts any `i32` delta; the sum is computed in `i64` so extreme
    /// deltas saturate at the bounds instead of wrapping.
    #[must_use]
    pub fn step(self, current: Volume, delta: i32) -> Volume {
        let target = i64::from(current.get()).saturating_add(i64::from(delta));
        let lo = i64::from(self.min.get());
        let hi = i64::from(self.max.get());
        // clamped into min..=max, which always fits a u8
        let level = u8::try_from(target.clamp(lo, hi)).unwrap_or(self.max.get());
        Volume(level)
    }
}

impl Default for VolumeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_new_clamps_to_ceiling() {
        assert_eq!(Volume::new(31).get(), 30);
        assert_eq!(Volume::new(255).get(), 30);
        assert_eq!(Volume::new(12).get(), 12);
    }

    #[test]
    fn test_volume_display_is_bare_number() {
        assert_eq!(format!("{}", Volume::new(7)), "7");
    }

    #[test]
    fn test_limits_reject_inverted_bounds() {
        assert!(VolumeLimits::new(20, 10).is_err());
    }

    #[test]
    fn test_limits_reject_max_above_ceiling() {
        let err = VolumeLimits::new(0, 31).unwrap_err();
        assert_eq!(err.value, 31);
        assert_eq!(err.max, 30);
    }

    #[test]
    fn test_step_saturates_at_extremes() {
        let limits = VolumeLimits::DEFAULT;
        assert_eq!(limits.step(Volume::new(15), i32::MAX), Volume::new(25));
        assert_eq!(limits.step(Volume::new(15), i32::MIN), Volume::new(0));
    }

    #[test]
    fn test_clamp_pulls_out_of_range_value_in() {
        let limits = VolumeLimits::new(5, 20).unwrap();
        assert_eq!(limits.clamp(Volume::new(30)), Volume::new(20));
        assert_eq!(limits.clamp(Volume::new(1)), Volume::new(5));
        assert!(limits.contains(Volume::new(10)));
    }
}
