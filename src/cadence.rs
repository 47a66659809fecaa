//! Run-time playback state for a pattern.

use crate::pattern::Pattern;

/// A stateful player of one [`Pattern`].
///
/// Tracks the current step, the milliseconds left before the next step is
/// loaded, and the on/off value of the current step. A cadence starts primed
/// on its first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cadence<'a> {
    pattern: Pattern<'a>,
    index: usize,
    timer_ms: u16,
    on: bool,
}

impl<'a> Cadence<'a> {
    /// Creates a cadence positioned on the first step of `pattern`.
    pub fn new(pattern: Pattern<'a>) -> Self {
        let first = pattern.word(0);
        Self {
            pattern,
            index: 0,
            timer_ms: first.duration_ms(),
            on: first.is_on(),
        }
    }

    /// Advances playback by one tick of `elapsed_ms`.
    ///
    /// A running timer is counted down, flooring at zero. An expired timer
    /// loads the next step instead, wrapping to the first step at the end
    /// marker. The two never happen in the same call, so every step is held
    /// for one extra tick.
    pub fn advance(&mut self, elapsed_ms: u16) {
        if self.timer_ms != 0 {
            self.timer_ms = self.timer_ms.saturating_sub(elapsed_ms);
            return;
        }

        self.index += 1;
        if self.pattern.word(self.index).is_end() {
            self.index = 0;
        }

        let step = self.pattern.word(self.index);
        self.timer_ms = step.duration_ms();
        self.on = step.is_on();
    }

    /// Current on/off value.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Index of the current step.
    #[inline]
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// Milliseconds left before the next step is loaded.
    #[inline]
    pub fn timer_ms(&self) -> u16 {
        self.timer_ms
    }

    /// The pattern being played.
    pub fn pattern(&self) -> Pattern<'a> {
        self.pattern
    }
}
