//! The built-in cadence table.
//!
//! Patterns are checked when the crate is compiled: a malformed table entry
//! fails `const` evaluation instead of surfacing at run time.

use crate::pattern::{Pattern, Step};
use crate::registry::CadenceHandle;
use crate::types::IndicatorError;

/// Identifiers for the built-in cadences.
///
/// The discriminant is the index into the built-in table and the handle of
/// the shared instance every context registers at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BuiltinCadence {
    /// Steady off.
    Off = 0,
    /// Steady on.
    On,
    /// Mostly on with a short dark blip each second.
    Wink,
    /// Even 1 Hz blink.
    Blink,
    /// 25 Hz flicker.
    Flicker,
    /// Short pulse each second.
    Flash,
    /// Two short pulses each second.
    DoubleFlash,
    /// Quarter-second pulse every five seconds.
    Lighthouse,
    /// Even 2 Hz blink.
    FastBlink,
}

/// Number of built-in cadences.
pub const BUILTIN_COUNT: usize = BuiltinCadence::ALL.len();

const OFF: [Step; 2] = [Step::off(100), Step::END];
const ON: [Step; 2] = [Step::on(100), Step::END];
const WINK: [Step; 3] = [Step::on(980), Step::off(20), Step::END];
const BLINK: [Step; 3] = [Step::on(500), Step::off(500), Step::END];
const FLICKER: [Step; 3] = [Step::on(20), Step::off(20), Step::END];
const FLASH: [Step; 3] = [Step::on(20), Step::off(980), Step::END];
const DOUBLE_FLASH: [Step; 5] = [
    Step::on(20),
    Step::off(20),
    Step::on(20),
    Step::off(940),
    Step::END,
];
const LIGHTHOUSE: [Step; 3] = [Step::on(250), Step::off(5000), Step::END];
const FAST_BLINK: [Step; 3] = [Step::on(250), Step::off(250), Step::END];

const fn checked(words: &'static [Step]) -> Pattern<'static> {
    match Pattern::new(words) {
        Ok(pattern) => pattern,
        Err(_) => panic!("malformed built-in pattern"),
    }
}

/// Built-in patterns, indexed by [`BuiltinCadence`].
pub static PATTERNS: [Pattern<'static>; BUILTIN_COUNT] = [
    checked(&OFF),
    checked(&ON),
    checked(&WINK),
    checked(&BLINK),
    checked(&FLICKER),
    checked(&FLASH),
    checked(&DOUBLE_FLASH),
    checked(&LIGHTHOUSE),
    checked(&FAST_BLINK),
];

impl BuiltinCadence {
    /// Every built-in cadence in table order.
    pub const ALL: [BuiltinCadence; 9] = [
        BuiltinCadence::Off,
        BuiltinCadence::On,
        BuiltinCadence::Wink,
        BuiltinCadence::Blink,
        BuiltinCadence::Flicker,
        BuiltinCadence::Flash,
        BuiltinCadence::DoubleFlash,
        BuiltinCadence::Lighthouse,
        BuiltinCadence::FastBlink,
    ];

    /// Index into the built-in table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Handle of the shared instance for this cadence.
    #[inline]
    pub const fn handle(self) -> CadenceHandle {
        CadenceHandle::new(self.index())
    }

    /// The pattern this cadence plays.
    pub fn pattern(self) -> Pattern<'static> {
        PATTERNS[self.index()]
    }

    /// Stable display label.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinCadence::Off => "off",
            BuiltinCadence::On => "on",
            BuiltinCadence::Wink => "wink",
            BuiltinCadence::Blink => "blink",
            BuiltinCadence::Flicker => "flicker",
            BuiltinCadence::Flash => "flash",
            BuiltinCadence::DoubleFlash => "double-flash",
            BuiltinCadence::Lighthouse => "lighthouse",
            BuiltinCadence::FastBlink => "fast-blink",
        }
    }
}

impl TryFrom<i32> for BuiltinCadence {
    type Error = IndicatorError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        usize::try_from(id)
            .ok()
            .and_then(|index| BuiltinCadence::ALL.get(index).copied())
            .ok_or(IndicatorError::Unsupported)
    }
}

impl core::fmt::Display for BuiltinCadence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
