//! The set of cadences advanced on every tick.

use crate::builtin::{BUILTIN_COUNT, PATTERNS};
use crate::cadence::Cadence;
use crate::types::IndicatorError;
use heapless::Vec;
use portable_atomic::{AtomicU32, Ordering};

/// Registry id carried by built-in handles, valid in every registry.
const SHARED_BUILTINS: u32 = 0;

static NEXT_REGISTRY_ID: AtomicU32 = AtomicU32::new(SHARED_BUILTINS + 1);

/// Identifies a registered cadence within one registry.
///
/// Handles `0..BUILTIN_COUNT` name the built-in instances, which every
/// registry holds from construction, and resolve in any registry. Later
/// handles are issued by [`CadenceRegistry::register`] in insertion order
/// and only resolve in the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CadenceHandle {
    registry: u32,
    index: usize,
}

impl CadenceHandle {
    pub(crate) const fn new(index: usize) -> Self {
        CadenceHandle {
            registry: SHARED_BUILTINS,
            index,
        }
    }

    /// Position of the cadence within its registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Insert-only storage for every cadence eligible for advancement.
///
/// The built-in cadences live in a fixed array; caller cadences go into a
/// bounded vector of `EXTRA` slots. Nothing is ever removed, so handles stay
/// valid for the life of the registry.
#[derive(Debug)]
pub struct CadenceRegistry<'a, const EXTRA: usize> {
    id: u32,
    builtin: [Cadence<'a>; BUILTIN_COUNT],
    extra: Vec<Cadence<'a>, EXTRA>,
}

impl<'a, const EXTRA: usize> CadenceRegistry<'a, EXTRA> {
    /// Creates a registry holding one shared instance of every built-in cadence.
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            builtin: core::array::from_fn(|index| Cadence::new(PATTERNS[index])),
            extra: Vec::new(),
        }
    }

    /// Inserts a cadence and returns its handle.
    ///
    /// Registering the same pattern twice yields two independent cadences.
    ///
    /// # Errors
    /// * `RegistryFull` - all `EXTRA` slots are taken
    pub fn register(&mut self, cadence: Cadence<'a>) -> Result<CadenceHandle, IndicatorError> {
        self.extra
            .push(cadence)
            .map_err(|_| IndicatorError::RegistryFull)?;
        Ok(CadenceHandle {
            registry: self.id,
            index: BUILTIN_COUNT + self.extra.len() - 1,
        })
    }

    /// Returns the cadence behind `handle`, if this registry issued it.
    pub fn get(&self, handle: CadenceHandle) -> Option<&Cadence<'a>> {
        if handle.registry == SHARED_BUILTINS {
            return self.builtin.get(handle.index);
        }
        if handle.registry != self.id {
            return None;
        }
        handle
            .index
            .checked_sub(BUILTIN_COUNT)
            .and_then(|offset| self.extra.get(offset))
    }

    /// Advances every registered cadence by one tick.
    pub fn advance_all(&mut self, elapsed_ms: u16) {
        self.builtin
            .iter_mut()
            .chain(self.extra.iter_mut())
            .for_each(|cadence| cadence.advance(elapsed_ms));
    }

    /// Number of registered cadences, built-ins included.
    pub fn len(&self) -> usize {
        BUILTIN_COUNT + self.extra.len()
    }

    /// Always false: the built-ins are registered from construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Remaining room for caller cadences.
    pub fn free_slots(&self) -> usize {
        EXTRA - self.extra.len()
    }
}

impl<'a, const EXTRA: usize> Default for CadenceRegistry<'a, EXTRA> {
    fn default() -> Self {
        Self::new()
    }
}
