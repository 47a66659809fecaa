#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Step`**: One 16-bit on/off step (bit 15 = on, bits 0..=14 = milliseconds)
//! - **`Pattern`**: An immutable, cyclic sequence of steps closed by `Step::END`
//! - **`BuiltinCadence`**: The nine built-in patterns, each with one shared instance
//! - **`Cadence`**: A stateful player of a pattern, advanced once per tick
//! - **`CadenceRegistry`**: Every cadence that advances on the tick
//! - **`OutputBank`**: The fixed set of named outputs and their active time
//! - **`Indicators`**: The locked context tying it together: assignment API and tick driver
//! - **`OutputDriver`**: Trait to implement for your indicator hardware
//! - **`TickSource`**: Trait to implement for your periodic timer
//!
//! All timing is quantized to [`TICK_QUANTUM_MS`].

pub mod types;
pub mod pattern;
pub mod builtin;
pub mod cadence;
pub mod registry;
pub mod bank;
pub mod time;
pub mod indicators;
pub mod command;

pub use bank::{OutputBank, OutputDriver, OutputSlot};
pub use builtin::{BUILTIN_COUNT, BuiltinCadence};
pub use cadence::Cadence;
pub use command::{CadenceTarget, IndicatorCommand};
pub use indicators::Indicators;
pub use pattern::{MAX_STEP_MS, Pattern, Step};
pub use registry::{CadenceHandle, CadenceRegistry};
pub use time::{TICK_QUANTUM_MS, TickSource};
pub use types::{ActiveFor, IndicatorError, PatternError};

#[cfg(feature = "embassy")]
pub use time::quantum_ticker;
