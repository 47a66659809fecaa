//! Shared indicator context: assignment API and tick driver.
//!
//! Provides [`Indicators`], which owns the output bank, the cadence registry
//! and the output driver behind a single blocking mutex. Assignment calls
//! and the periodic tick each run as one critical section, so the context can
//! be shared between the tick task and any number of caller tasks.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::bank::{OutputBank, OutputDriver};
use crate::builtin::BuiltinCadence;
use crate::cadence::Cadence;
use crate::command::{CadenceTarget, IndicatorCommand};
use crate::registry::{CadenceHandle, CadenceRegistry};
use crate::time::{TICK_QUANTUM_MS, TickSource};
use crate::types::{ActiveFor, IndicatorError};

struct State<'a, W, const OUTPUTS: usize, const EXTRA: usize> {
    bank: OutputBank<'a, OUTPUTS>,
    registry: CadenceRegistry<'a, EXTRA>,
    driver: W,
}

/// Drives a fixed set of named outputs through shared blink cadences.
///
/// # Type Parameters
/// * `'a` - Lifetime of output names and caller patterns
/// * `M` - Raw mutex guarding all state (e.g. `CriticalSectionRawMutex`)
/// * `W` - Output driver implementation
/// * `OUTPUTS` - Number of named outputs
/// * `EXTRA` - Capacity for caller cadences beyond the built-ins
pub struct Indicators<'a, M: RawMutex, W: OutputDriver, const OUTPUTS: usize, const EXTRA: usize> {
    state: Mutex<M, RefCell<State<'a, W, OUTPUTS, EXTRA>>>,
}

impl<'a, M, W, const OUTPUTS: usize, const EXTRA: usize> Indicators<'a, M, W, OUTPUTS, EXTRA>
where
    M: RawMutex,
    W: OutputDriver,
{
    /// Creates a context with every output dark and unassigned.
    ///
    /// The built-in cadences are registered before this returns, so they are
    /// advancing from the very first tick.
    ///
    /// # Arguments
    /// * `names` - Stable output names; index `i` is passed to the driver as output `i`
    /// * `driver` - The hardware the outputs are written to
    pub fn new(names: [&'a str; OUTPUTS], driver: W) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("indicators: {} outputs, {} extra cadence slots", OUTPUTS, EXTRA);

        Self {
            state: Mutex::new(RefCell::new(State {
                bank: OutputBank::new(names),
                registry: CadenceRegistry::new(),
                driver,
            })),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State<'a, W, OUTPUTS, EXTRA>) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Registers a caller cadence so it advances on every tick.
    ///
    /// Each call inserts a new, independent instance; the same pattern may
    /// be registered more than once.
    ///
    /// # Errors
    /// * `RegistryFull` - all `EXTRA` slots are taken
    pub fn register(&self, cadence: Cadence<'a>) -> Result<CadenceHandle, IndicatorError> {
        let handle = self.with_state(|state| state.registry.register(cadence))?;

        #[cfg(feature = "defmt")]
        defmt::trace!("registered cadence {}", handle.index());

        Ok(handle)
    }

    /// Assigns output `name` to a registered cadence.
    ///
    /// Replaces any earlier assignment. The replaced cadence keeps playing
    /// for whoever else uses it. A handle registered with another context
    /// resolves to off, even when its index exists here.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name; nothing is changed
    pub fn assign(
        &self,
        name: &str,
        cadence: CadenceHandle,
        active_for: ActiveFor,
    ) -> Result<(), IndicatorError> {
        self.with_state(|state| state.bank.assign(name, cadence, active_for))
    }

    /// Assigns output `name` to the shared instance of a built-in cadence.
    ///
    /// Outputs assigned the same built-in change state on the same tick.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name
    pub fn assign_builtin(
        &self,
        name: &str,
        cadence: BuiltinCadence,
        active_for: ActiveFor,
    ) -> Result<(), IndicatorError> {
        self.assign(name, cadence.handle(), active_for)
    }

    /// Assigns output `name` to a built-in cadence given by raw identifier.
    ///
    /// # Errors
    /// * `Unsupported` - `id` is outside the built-in table; nothing is changed
    /// * `NotFound` - no output has this name
    pub fn assign_by_id(
        &self,
        name: &str,
        id: i32,
        active_for: ActiveFor,
    ) -> Result<(), IndicatorError> {
        let cadence = BuiltinCadence::try_from(id)?;
        self.assign_builtin(name, cadence, active_for)
    }

    /// Dispatches a command to the matching assignment call.
    pub fn handle_command(&self, command: IndicatorCommand<'_>) -> Result<(), IndicatorError> {
        match command.target {
            CadenceTarget::Builtin(cadence) => {
                self.assign_builtin(command.output, cadence, command.active_for)
            }
            CadenceTarget::BuiltinId(id) => {
                self.assign_by_id(command.output, id, command.active_for)
            }
            CadenceTarget::Handle(handle) => {
                self.assign(command.output, handle, command.active_for)
            }
        }
    }

    /// Runs one tick of [`TICK_QUANTUM_MS`].
    ///
    /// Every output is resolved against the cadence state left by the
    /// previous tick before any cadence advances. A tick started from inside
    /// [`Indicators::with_driver`] or the driver itself is skipped.
    pub fn tick(&self) {
        self.state.lock(|cell| {
            let Ok(mut state) = cell.try_borrow_mut() else {
                #[cfg(feature = "defmt")]
                defmt::warn!("re-entrant tick skipped");
                return;
            };
            let State {
                bank,
                registry,
                driver,
            } = &mut *state;

            bank.resolve_all(registry, driver, TICK_QUANTUM_MS);
            registry.advance_all(TICK_QUANTUM_MS);
        });
    }

    /// Ticks forever, waiting on `ticker` between ticks.
    ///
    /// Run this from one dedicated task.
    pub async fn run<T: TickSource>(&self, ticker: &mut T) {
        #[cfg(feature = "defmt")]
        defmt::debug!("indicator tick loop started");

        loop {
            self.tick();
            ticker.next_tick().await;
        }
    }

    /// Last state written to output `name`.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name
    pub fn is_on(&self, name: &str) -> Result<bool, IndicatorError> {
        self.with_state(|state| state.bank.get(name).map(|slot| slot.is_lit()))
    }

    /// Remaining active time of output `name`.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name
    pub fn remaining(&self, name: &str) -> Result<ActiveFor, IndicatorError> {
        self.with_state(|state| state.bank.get(name).map(|slot| slot.remaining()))
    }

    /// Cadence currently assigned to output `name`.
    ///
    /// # Errors
    /// * `NotFound` - no output has this name
    pub fn assigned(&self, name: &str) -> Result<Option<CadenceHandle>, IndicatorError> {
        self.with_state(|state| state.bank.get(name).map(|slot| slot.cadence()))
    }

    /// Current value of a registered cadence, or `None` for a foreign handle.
    pub fn cadence_is_on(&self, handle: CadenceHandle) -> Option<bool> {
        self.with_state(|state| state.registry.get(handle).map(Cadence::is_on))
    }

    /// Snapshot of a registered cadence, or `None` for a foreign handle.
    pub fn cadence(&self, handle: CadenceHandle) -> Option<Cadence<'a>> {
        self.with_state(|state| state.registry.get(handle).copied())
    }

    /// Output names in driver-index order.
    pub fn output_names(&self) -> [&'a str; OUTPUTS] {
        self.with_state(|state| {
            let mut names = [""; OUTPUTS];
            for (name, slot) in names.iter_mut().zip(state.bank.iter()) {
                *name = slot.name();
            }
            names
        })
    }

    /// Number of outputs.
    pub const fn output_count(&self) -> usize {
        OUTPUTS
    }

    /// Number of registered cadences, built-ins included.
    pub fn cadence_count(&self) -> usize {
        self.with_state(|state| state.registry.len())
    }

    /// Calls `f` with exclusive access to the output driver.
    ///
    /// `f` runs under the context lock and must not call back into this
    /// `Indicators`. Only [`Indicators::tick`] tolerates that, by skipping.
    ///
    /// # Panics
    /// Panics if `f` calls any other method of this context.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        self.with_state(|state| f(&mut state.driver))
    }
}
