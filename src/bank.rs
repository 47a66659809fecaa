//! Named outputs and their per-tick state resolution.
//!
//! Defines the [`OutputDriver`] trait for hardware abstraction and the
//! [`OutputBank`] that decides, once per tick, whether each output should be
//! lit and writes only the outputs whose state changed.

use crate::registry::{CadenceHandle, CadenceRegistry};
use crate::types::{ActiveFor, IndicatorError};

/// Trait for abstracting binary indicator hardware.
///
/// Implement this for your GPIO pins, LED controller, or shift register.
/// It is called from inside the locked tick, so it must not block for long
/// and cannot fail. Handle hardware errors internally. It must not call back
/// into the owning [`Indicators`](crate::Indicators): a nested tick is
/// skipped and any other call panics.
pub trait OutputDriver {
    /// Drives output `index` (position in the name list) on or off.
    fn write_output(&mut self, index: usize, on: bool);
}

impl<T: OutputDriver + ?Sized> OutputDriver for &mut T {
    fn write_output(&mut self, index: usize, on: bool) {
        (**self).write_output(index, on);
    }
}

/// State kept for one named output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputSlot<'a> {
    name: &'a str,
    cadence: Option<CadenceHandle>,
    remaining: ActiveFor,
    lit: bool,
}

impl<'a> OutputSlot<'a> {
    const fn new(name: &'a str) -> Self {
        Self {
            name,
            cadence: None,
            remaining: ActiveFor::OFF,
            lit: false,
        }
    }

    /// Output name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Assigned cadence, if any.
    pub fn cadence(&self) -> Option<CadenceHandle> {
        self.cadence
    }

    /// Remaining active time.
    pub fn remaining(&self) -> ActiveFor {
        self.remaining
    }

    /// Last state written to the hardware.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn resolve<W, const EXTRA: usize>(
        &mut self,
        index: usize,
        registry: &CadenceRegistry<'_, EXTRA>,
        driver: &mut W,
        elapsed_ms: u16,
    ) where
        W: OutputDriver,
    {
        let target = if self.remaining.is_off() {
            false
        } else {
            self.cadence
                .and_then(|handle| registry.get(handle))
                .is_some_and(|cadence| cadence.is_on())
        };

        if target != self.lit {
            driver.write_output(index, target);
            self.lit = target;
        }

        // Counted down after resolving, so expiry is visible on the next tick.
        self.remaining = self.remaining.countdown(u32::from(elapsed_ms));
    }
}

/// The fixed set of named outputs.
///
/// Names are supplied once at construction. Lookup is a linear scan that
/// returns the first match, so a duplicated name shadows later entries.
#[derive(Debug)]
pub struct OutputBank<'a, const OUTPUTS: usize> {
    slots: [OutputSlot<'a>; OUTPUTS],
}

impl<'a, const OUTPUTS: usize> OutputBank<'a, OUTPUTS> {
    /// Creates a bank with every output unassigned and dark.
    pub fn new(names: [&'a str; OUTPUTS]) -> Self {
        Self {
            slots: names.map(OutputSlot::new),
        }
    }

    /// Index of the first output called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }

    /// Returns the slot called `name`.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name
    pub fn get(&self, name: &str) -> Result<&OutputSlot<'a>, IndicatorError> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .ok_or(IndicatorError::NotFound)
    }

    /// Points output `name` at a cadence and resets its active time.
    ///
    /// The previously assigned cadence keeps its phase.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name; nothing is changed
    pub fn assign(
        &mut self,
        name: &str,
        cadence: CadenceHandle,
        active_for: ActiveFor,
    ) -> Result<(), IndicatorError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .ok_or(IndicatorError::NotFound)?;

        slot.cadence = Some(cadence);
        slot.remaining = active_for;
        Ok(())
    }

    /// Resolves every output against the current cadence state.
    pub fn resolve_all<W, const EXTRA: usize>(
        &mut self,
        registry: &CadenceRegistry<'_, EXTRA>,
        driver: &mut W,
        elapsed_ms: u16,
    ) where
        W: OutputDriver,
    {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.resolve(index, registry, driver, elapsed_ms);
        }
    }

    /// Iterates over the slots in name-list order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputSlot<'a>> {
        self.slots.iter()
    }

    /// Number of outputs.
    pub const fn len(&self) -> usize {
        OUTPUTS
    }

    /// Returns true if the bank has no outputs.
    pub const fn is_empty(&self) -> bool {
        OUTPUTS == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::BuiltinCadence;
    use heapless::Vec;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<(usize, bool), 16>,
    }

    impl OutputDriver for Recorder {
        fn write_output(&mut self, index: usize, on: bool) {
            let _ = self.writes.push((index, on));
        }
    }

    #[test]
    fn unassigned_output_stays_dark() {
        let registry = CadenceRegistry::<0>::new();
        let mut bank = OutputBank::new(["a"]);
        let mut driver = Recorder::default();

        bank.resolve_all(&registry, &mut driver, 20);
        assert!(driver.writes.is_empty());
        assert!(!bank.get("a").unwrap().is_lit());
    }

    #[test]
    fn unassigned_output_with_active_time_stays_dark() {
        let registry = CadenceRegistry::<0>::new();
        let mut bank = OutputBank::new(["a"]);
        bank.slots[0].remaining = ActiveFor::Indefinite;
        let mut driver = Recorder::default();

        bank.resolve_all(&registry, &mut driver, 20);
        assert!(driver.writes.is_empty());
    }

    #[test]
    fn only_changes_are_written() {
        let registry = CadenceRegistry::<0>::new();
        let mut bank = OutputBank::new(["a", "b"]);
        let mut driver = Recorder::default();
        bank.assign("b", BuiltinCadence::On.handle(), ActiveFor::Indefinite)
            .unwrap();

        bank.resolve_all(&registry, &mut driver, 20);
        bank.resolve_all(&registry, &mut driver, 20);
        assert_eq!(driver.writes.as_slice(), &[(1, true)]);
    }

    #[test]
    fn zero_active_time_overrides_cadence() {
        let registry = CadenceRegistry::<0>::new();
        let mut bank = OutputBank::new(["a"]);
        let mut driver = Recorder::default();
        bank.assign("a", BuiltinCadence::On.handle(), ActiveFor::OFF)
            .unwrap();

        bank.resolve_all(&registry, &mut driver, 20);
        assert!(driver.writes.is_empty());
        assert_eq!(bank.get("a").unwrap().remaining(), ActiveFor::OFF);
    }

    #[test]
    fn active_time_counts_down_after_resolving() {
        let registry = CadenceRegistry::<0>::new();
        let mut bank = OutputBank::new(["a"]);
        let mut driver = Recorder::default();
        bank.assign("a", BuiltinCadence::On.handle(), ActiveFor::Millis(30))
            .unwrap();

        bank.resolve_all(&registry, &mut driver, 20);
        assert_eq!(bank.get("a").unwrap().remaining(), ActiveFor::Millis(10));
        bank.resolve_all(&registry, &mut driver, 20);
        assert_eq!(bank.get("a").unwrap().remaining(), ActiveFor::OFF);
        assert!(bank.get("a").unwrap().is_lit());

        bank.resolve_all(&registry, &mut driver, 20);
        assert!(!bank.get("a").unwrap().is_lit());
        assert_eq!(driver.writes.as_slice(), &[(0, true), (0, false)]);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let mut bank = OutputBank::new(["a"]);
        let result = bank.assign("z", BuiltinCadence::Blink.handle(), ActiveFor::Indefinite);
        assert_eq!(result, Err(IndicatorError::NotFound));
        assert_eq!(bank.get("a").unwrap().cadence(), None);
    }

    #[test]
    fn first_matching_name_wins() {
        let mut bank = OutputBank::new(["dup", "dup"]);
        bank.assign("dup", BuiltinCadence::On.handle(), ActiveFor::Indefinite)
            .unwrap();
        assert_eq!(bank.position("dup"), Some(0));
        assert!(bank.slots[0].cadence().is_some());
        assert!(bank.slots[1].cadence().is_none());
    }
}
