//! Tick quantum and the periodic tick abstraction.

use core::future::Future;

/// Period of one tick in milliseconds. All durations are quantized to it.
pub const TICK_QUANTUM_MS: u16 = 20;

/// Trait for abstracting the periodic scheduling primitive.
///
/// Each call returns a future that completes at the next tick boundary.
pub trait TickSource {
    /// Waits for the next tick.
    fn next_tick(&mut self) -> impl Future<Output = ()>;
}

#[cfg(feature = "embassy")]
impl TickSource for embassy_time::Ticker {
    fn next_tick(&mut self) -> impl Future<Output = ()> {
        self.next()
    }
}

/// Creates an embassy ticker firing every [`TICK_QUANTUM_MS`].
#[cfg(feature = "embassy")]
pub fn quantum_ticker() -> embassy_time::Ticker {
    embassy_time::Ticker::every(embassy_time::Duration::from_millis(u64::from(
        TICK_QUANTUM_MS,
    )))
}
