//! Bit-packed on/off steps and the patterns built from them.
//!
//! A [`Step`] is a single 16-bit word. Bit 15 carries the on flag and bits
//! 0..=14 hold the step duration in milliseconds. The all-ones word is
//! reserved as [`Step::END`], which terminates every [`Pattern`] and wraps
//! playback back to the first step.

use crate::types::PatternError;

const FLAG_ON: u16 = 0x8000;
const TIME_MASK: u16 = 0x7FFF;
const END_WORD: u16 = 0xFFFF;

/// Longest duration a step can encode, in milliseconds.
///
/// An on-step may only use up to `MAX_STEP_MS - 1`, since an on-step of
/// `MAX_STEP_MS` encodes to the end marker.
pub const MAX_STEP_MS: u16 = TIME_MASK;

/// One timed on/off step of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Step(u16);

impl Step {
    /// End-of-pattern marker.
    pub const END: Step = Step(END_WORD);

    /// Creates an on-step lasting `ms` milliseconds.
    ///
    /// # Panics
    /// Panics if the step cannot be encoded (see [`Step::try_on`]). In a
    /// `const` or `static` initializer this is a compile error.
    pub const fn on(ms: u16) -> Self {
        match Self::try_on(ms) {
            Ok(step) => step,
            Err(_) => panic!("on-step duration must be below 32767 ms"),
        }
    }

    /// Creates an off-step lasting `ms` milliseconds.
    ///
    /// # Panics
    /// Panics if `ms` does not fit in 15 bits.
    pub const fn off(ms: u16) -> Self {
        match Self::try_off(ms) {
            Ok(step) => step,
            Err(_) => panic!("off-step duration must fit in 15 bits"),
        }
    }

    /// Creates an on-step, rejecting durations that collide with the end marker.
    pub const fn try_on(ms: u16) -> Result<Self, PatternError> {
        if ms >= MAX_STEP_MS {
            return Err(PatternError::ReservedEncoding);
        }
        Ok(Step(ms | FLAG_ON))
    }

    /// Creates an off-step, rejecting durations wider than 15 bits.
    pub const fn try_off(ms: u16) -> Result<Self, PatternError> {
        if ms > MAX_STEP_MS {
            return Err(PatternError::ReservedEncoding);
        }
        Ok(Step(ms))
    }

    /// Wraps a raw encoded word. `0xFFFF` yields [`Step::END`].
    #[inline]
    pub const fn from_word(word: u16) -> Self {
        Step(word)
    }

    /// Returns the raw encoded word.
    #[inline]
    pub const fn word(self) -> u16 {
        self.0
    }

    /// Returns true for the end marker.
    #[inline]
    pub const fn is_end(self) -> bool {
        self.0 == END_WORD
    }

    /// Returns the on flag.
    #[inline]
    pub const fn is_on(self) -> bool {
        self.0 & FLAG_ON != 0
    }

    /// Returns the step duration in milliseconds.
    #[inline]
    pub const fn duration_ms(self) -> u16 {
        self.0 & TIME_MASK
    }
}

/// An immutable, cyclic sequence of steps closed by [`Step::END`].
///
/// Patterns borrow their steps; built-in patterns live in static storage and
/// caller patterns must outlive every context they are registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern<'a> {
    words: &'a [Step],
}

impl<'a> Pattern<'a> {
    /// Validates and wraps a terminated step slice.
    ///
    /// # Errors
    /// * `EmptyPattern` - no steps before the end marker
    /// * `MissingEndMarker` - the last word is not [`Step::END`]
    /// * `EndMarkerInBody` - an end marker appears before the last word
    pub const fn new(words: &'a [Step]) -> Result<Self, PatternError> {
        let len = words.len();
        if len == 0 || !words[len - 1].is_end() {
            return Err(PatternError::MissingEndMarker);
        }
        if len == 1 {
            return Err(PatternError::EmptyPattern);
        }

        let mut index = 0;
        while index < len - 1 {
            if words[index].is_end() {
                return Err(PatternError::EndMarkerInBody { index });
            }
            index += 1;
        }

        Ok(Pattern { words })
    }

    /// Returns the word at `index`, or the end marker past the slice.
    #[inline]
    pub fn word(&self, index: usize) -> Step {
        self.words.get(index).copied().unwrap_or(Step::END)
    }

    /// Returns the playable steps, without the end marker.
    pub fn steps(&self) -> &'a [Step] {
        &self.words[..self.words.len() - 1]
    }

    /// Returns the number of playable steps.
    pub fn step_count(&self) -> usize {
        self.words.len() - 1
    }

    /// Sum of all step durations in milliseconds.
    pub fn total_ms(&self) -> u32 {
        self.steps().iter().map(|s| s.duration_ms() as u32).sum()
    }

    /// Number of ticks one full cycle occupies at the given quantum.
    ///
    /// Each step is held while its timer counts down to zero and for one
    /// further tick in which the next step is loaded.
    pub fn period_ticks(&self, quantum_ms: u16) -> u32 {
        let quantum = quantum_ms.max(1) as u32;
        self.steps()
            .iter()
            .map(|s| (s.duration_ms() as u32).div_ceil(quantum) + 1)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_flag_lives_in_top_bit() {
        assert_eq!(Step::on(500).word(), 0x8000 | 500);
        assert_eq!(Step::off(500).word(), 500);
        assert!(Step::on(20).is_on());
        assert!(!Step::off(20).is_on());
        assert_eq!(Step::on(980).duration_ms(), 980);
    }

    #[test]
    fn end_marker_is_never_a_legal_step() {
        assert_eq!(Step::try_on(MAX_STEP_MS), Err(PatternError::ReservedEncoding));
        assert_eq!(Step::try_off(MAX_STEP_MS + 1), Err(PatternError::ReservedEncoding));
        assert!(Step::try_off(MAX_STEP_MS).is_ok());
        assert!(!Step::try_on(MAX_STEP_MS - 1).unwrap().is_end());
        assert!(Step::from_word(0xFFFF).is_end());
    }

    #[test]
    fn pattern_requires_terminator() {
        static UNTERMINATED: [Step; 2] = [Step::on(20), Step::off(20)];
        assert_eq!(Pattern::new(&UNTERMINATED), Err(PatternError::MissingEndMarker));
        assert_eq!(Pattern::new(&[]), Err(PatternError::MissingEndMarker));
    }

    #[test]
    fn pattern_requires_a_step() {
        static ONLY_END: [Step; 1] = [Step::END];
        assert_eq!(Pattern::new(&ONLY_END), Err(PatternError::EmptyPattern));
    }

    #[test]
    fn pattern_rejects_early_end_marker() {
        static EARLY: [Step; 3] = [Step::on(20), Step::END, Step::END];
        assert_eq!(
            Pattern::new(&EARLY),
            Err(PatternError::EndMarkerInBody { index: 1 })
        );
    }

    #[test]
    fn word_past_the_slice_reads_as_end() {
        static SINGLE: [Step; 2] = [Step::on(100), Step::END];
        let pattern = Pattern::new(&SINGLE).unwrap();
        assert_eq!(pattern.word(0), Step::on(100));
        assert!(pattern.word(1).is_end());
        assert!(pattern.word(7).is_end());
    }

    #[test]
    fn period_counts_reload_tick_per_step() {
        static BLINK: [Step; 3] = [Step::on(500), Step::off(500), Step::END];
        let pattern = Pattern::new(&BLINK).unwrap();
        assert_eq!(pattern.step_count(), 2);
        assert_eq!(pattern.total_ms(), 1000);
        assert_eq!(pattern.period_ticks(20), 52);
    }
}
