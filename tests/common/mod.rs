//! Shared test infrastructure for led-cadence integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use heapless::Vec;
use led_cadence::{Indicators, OutputDriver};

// ============================================================================
// Mock Output Driver
// ============================================================================

/// Mock driver that records every write for testing
#[derive(Default)]
pub struct MockOutputs {
    writes: Vec<(usize, bool), 64>,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(usize, bool)] {
        &self.writes
    }

    pub fn writes_for(&self, index: usize) -> Vec<bool, 64> {
        self.writes
            .iter()
            .filter(|(i, _)| *i == index)
            .map(|(_, on)| *on)
            .collect()
    }
}

impl OutputDriver for MockOutputs {
    fn write_output(&mut self, index: usize, on: bool) {
        let _ = self.writes.push((index, on));
    }
}

// ============================================================================
// Context Helpers
// ============================================================================

pub type TestIndicators<const OUTPUTS: usize, const EXTRA: usize> =
    Indicators<'static, NoopRawMutex, MockOutputs, OUTPUTS, EXTRA>;

/// Ticks `ticks` times and returns the state of `name` after each tick
pub fn timeline<const OUTPUTS: usize, const EXTRA: usize>(
    indicators: &TestIndicators<OUTPUTS, EXTRA>,
    name: &str,
    ticks: usize,
) -> Vec<bool, 512> {
    let mut states = Vec::new();
    for _ in 0..ticks {
        indicators.tick();
        states.push(indicators.is_on(name).unwrap()).unwrap();
    }
    states
}

/// Tick indices at which a timeline changes, with the new state
pub fn transitions(states: &[bool]) -> Vec<(usize, bool), 64> {
    let mut previous = false;
    let mut changes = Vec::new();
    for (tick, &state) in states.iter().enumerate() {
        if state != previous {
            changes.push((tick, state)).unwrap();
            previous = state;
        }
    }
    changes
}

/// Runs `ticks` ticks without observing
pub fn tick_n<const OUTPUTS: usize, const EXTRA: usize>(
    indicators: &TestIndicators<OUTPUTS, EXTRA>,
    ticks: usize,
) {
    for _ in 0..ticks {
        indicators.tick();
    }
}
