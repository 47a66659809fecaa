#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use led_cadence::{ActiveFor, BuiltinCadence, Cadence, Indicators, OutputDriver, Pattern, Step};
use panic_halt as _;

// ============================================================================
// Minimal Output Driver
// ============================================================================

/// Zero-size driver for measuring library overhead
pub struct MinimalOutputs;

impl OutputDriver for MinimalOutputs {
    fn write_output(&mut self, index: usize, on: bool) {
        core::hint::black_box((index, on));
    }
}

// ============================================================================
// Test Pattern
// ============================================================================

static SOS: [Step; 19] = [
    Step::on(100),
    Step::off(100),
    Step::on(100),
    Step::off(100),
    Step::on(100),
    Step::off(300),
    Step::on(300),
    Step::off(100),
    Step::on(300),
    Step::off(100),
    Step::on(300),
    Step::off(300),
    Step::on(100),
    Step::off(100),
    Step::on(100),
    Step::off(100),
    Step::on(100),
    Step::off(1000),
    Step::END,
];

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_indicators() {
    let indicators: Indicators<'static, NoopRawMutex, MinimalOutputs, 3, 2> =
        Indicators::new(["status", "link", "error"], MinimalOutputs);

    let _ = indicators.assign_builtin("status", BuiltinCadence::Blink, ActiveFor::Indefinite);
    let _ = indicators.assign_by_id("link", 6, ActiveFor::Millis(5_000));

    if let Ok(pattern) = Pattern::new(&SOS) {
        if let Ok(handle) = indicators.register(Cadence::new(pattern)) {
            let _ = indicators.assign("error", handle, ActiveFor::from_raw(-1));
        }
    }

    for _ in 0..500 {
        indicators.tick();
    }

    core::hint::black_box(indicators);
}

#[entry]
fn main() -> ! {
    // Call test function to ensure all code is included
    exercise_indicators();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
