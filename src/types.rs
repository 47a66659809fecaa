//! Core value types and errors shared across the crate.

/// How long an output stays active after an assignment.
///
/// While active the output follows its cadence. Once the countdown reaches
/// zero the output is forced off until it is reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveFor {
    /// Active for this many milliseconds. `Millis(0)` forces the output off.
    Millis(u32),

    /// Active until reassigned. Never counts down.
    Indefinite,
}

impl ActiveFor {
    /// Forced off, regardless of the assigned cadence.
    pub const OFF: Self = ActiveFor::Millis(0);

    /// Converts the raw integer convention used by C-style callers.
    ///
    /// `0` forces off, a positive value counts down, and any negative value
    /// (canonically `-1`) means indefinite.
    pub const fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            ActiveFor::Indefinite
        } else {
            ActiveFor::Millis(raw as u32)
        }
    }

    /// Returns true when this duration forces the output off.
    #[inline]
    pub const fn is_off(&self) -> bool {
        matches!(self, ActiveFor::Millis(0))
    }

    /// Counts down by one tick, flooring at zero. `Indefinite` is unchanged.
    #[inline]
    pub(crate) const fn countdown(self, elapsed_ms: u32) -> Self {
        match self {
            ActiveFor::Millis(ms) => ActiveFor::Millis(ms.saturating_sub(elapsed_ms)),
            ActiveFor::Indefinite => ActiveFor::Indefinite,
        }
    }
}

impl Default for ActiveFor {
    fn default() -> Self {
        ActiveFor::OFF
    }
}

impl From<i32> for ActiveFor {
    fn from(raw: i32) -> Self {
        ActiveFor::from_raw(raw)
    }
}

/// Errors returned by the assignment and registration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// No output with the given name exists.
    NotFound,

    /// Built-in cadence identifier is outside the built-in table.
    Unsupported,

    /// The registry has no room for another cadence.
    RegistryFull,
}

impl core::fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IndicatorError::NotFound => write!(f, "no output with that name"),
            IndicatorError::Unsupported => write!(f, "unsupported built-in cadence identifier"),
            IndicatorError::RegistryFull => write!(f, "cadence registry is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IndicatorError {}

/// Pattern validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// No steps before the end marker.
    EmptyPattern,

    /// The last word is not the end marker.
    MissingEndMarker,

    /// An end marker appears before the last word.
    EndMarkerInBody {
        /// Position of the stray end marker.
        index: usize,
    },

    /// Step would encode to the reserved end-marker word, or its duration
    /// does not fit in 15 bits.
    ReservedEncoding,
}

impl core::fmt::Display for PatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PatternError::EmptyPattern => {
                write!(f, "pattern must have at least one step")
            }
            PatternError::MissingEndMarker => {
                write!(f, "pattern must be terminated by the end marker")
            }
            PatternError::EndMarkerInBody { index } => {
                write!(f, "end marker found inside pattern at step {}", index)
            }
            PatternError::ReservedEncoding => {
                write!(
                    f,
                    "step duration must fit in 15 bits and must not encode to the end marker"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_durations_follow_c_convention() {
        assert_eq!(ActiveFor::from_raw(0), ActiveFor::OFF);
        assert_eq!(ActiveFor::from_raw(1200), ActiveFor::Millis(1200));
        assert_eq!(ActiveFor::from_raw(-1), ActiveFor::Indefinite);
        assert_eq!(ActiveFor::from(-42), ActiveFor::Indefinite);
    }

    #[test]
    fn countdown_floors_at_zero() {
        assert_eq!(ActiveFor::Millis(30).countdown(20), ActiveFor::Millis(10));
        assert_eq!(ActiveFor::Millis(10).countdown(20), ActiveFor::OFF);
        assert_eq!(ActiveFor::OFF.countdown(20), ActiveFor::OFF);
    }

    #[test]
    fn indefinite_never_counts_down() {
        assert_eq!(ActiveFor::Indefinite.countdown(20), ActiveFor::Indefinite);
        assert!(!ActiveFor::Indefinite.is_off());
    }

    #[test]
    fn default_is_forced_off() {
        assert!(ActiveFor::default().is_off());
    }
}
