//! Command-based control for indicator contexts.

use crate::builtin::BuiltinCadence;
use crate::registry::CadenceHandle;
use crate::types::ActiveFor;

/// The cadence an assignment points an output at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CadenceTarget {
    /// A built-in cadence.
    Builtin(BuiltinCadence),
    /// A built-in cadence by raw identifier, checked on dispatch.
    BuiltinId(i32),
    /// A previously registered cadence.
    Handle(CadenceHandle),
}

impl From<BuiltinCadence> for CadenceTarget {
    fn from(cadence: BuiltinCadence) -> Self {
        CadenceTarget::Builtin(cadence)
    }
}

impl From<CadenceHandle> for CadenceTarget {
    fn from(handle: CadenceHandle) -> Self {
        CadenceTarget::Handle(handle)
    }
}

/// Assignment targeting a named output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorCommand<'n> {
    pub output: &'n str,
    pub target: CadenceTarget,
    pub active_for: ActiveFor,
}

impl<'n> IndicatorCommand<'n> {
    /// Creates command.
    pub fn new(output: &'n str, target: impl Into<CadenceTarget>, active_for: ActiveFor) -> Self {
        Self {
            output,
            target: target.into(),
            active_for,
        }
    }
}
