//! Tick clock contract
//!
//! The tick sleep is the only suspension point in the turn loop. It is a
//! cooperative wait behind a trait so a host harness can advance simulated
//! time deterministically instead of sleeping for real.

use core::cell::Cell;

/// Cooperative time source for the fixed-period tick loop.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch (system or simulation start).
    fn now_ms(&self) -> u64;

    /// Waits until roughly `ms` milliseconds have elapsed.
    ///
    /// Real implementations block or yield; simulated ones just advance
    /// their counter.
    fn sleep_ms(&self, ms: u64);
}

/// Simulated clock for host tests.
///
/// Time only moves when [`sleep_ms`](Clock::sleep_ms) or
/// [`advance`](MockClock::advance) is called, so tick counts map to exact
/// timestamps.
#[derive(Default)]
pub struct MockClock {
    current_ms: Cell<u64>,
}

impl MockClock {
    /// Clock starting at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward without a sleep call.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance(ms);
    }
}
