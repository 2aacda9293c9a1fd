//! Simulated and wall-clock time sources
//!
//! [`SimClock`] backs the tick sleep with a shared atomic counter so a
//! whole tuning sweep finishes in microseconds of real time; it can also
//! drive the plant dynamics forward on every sleep. [`WallClock`] is the
//! real thing for demos that should feel like a robot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pivot_core::traits::Clock;

use crate::plant::TurnPlant;

/// Simulated clock backed by a shared atomic counter.
///
/// Clones share the same counter. With [`driving`](SimClock::driving) the
/// clock also integrates the plant by the slept duration, which is what
/// closes the simulation loop: command, sleep, the heading moves.
#[derive(Clone, Default)]
pub struct SimClock {
    time_ms: Arc<AtomicU64>,
    plant: Option<TurnPlant>,
}

impl SimClock {
    /// Clock starting at time 0, driving nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every sleep also step the plant dynamics.
    pub fn driving(mut self, plant: TurnPlant) -> Self {
        self.plant = Some(plant);
        self
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.time_ms.load(Ordering::Relaxed)
    }

    fn sleep_ms(&self, ms: u64) {
        if let Some(plant) = &self.plant {
            plant.step(ms);
        }
        self.time_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

/// Real time for demos: blocking sleeps and a monotonic epoch.
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
