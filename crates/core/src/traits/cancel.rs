//! Cooperative cancellation contract
//!
//! The tuning loop polls a cancellation source once per tick boundary, right
//! after the tick sleep. Polling is side-effect free and never preemptive: a
//! command already dispatched this tick is not retracted.

use alloc::sync::Arc;
use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

/// Polled abort predicate.
pub trait CancellationSource {
    /// Returns true once the caller wants the loop to stop.
    fn is_requested(&self) -> bool;
}

/// Cancellation source that never fires. Used by the plain `run` loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl CancellationSource for Never {
    fn is_requested(&self) -> bool {
        false
    }
}

/// Shared abort flag, the programmatic equivalent of the touchscreen
/// "terminate" button.
///
/// Clones share the same underlying flag, so a UI task can hold one handle
/// and request cancellation while the control loop polls another.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag {
    requested: Arc<AtomicBool>,
}

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Takes effect at the next tick boundary.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    /// Re-arms the flag for the next run.
    pub fn clear(&self) {
        self.requested.store(false, Ordering::Relaxed);
    }
}

impl CancellationSource for AbortFlag {
    fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Test cancellation source that fires on the nth poll.
///
/// The loop polls once per tick, so `CancelAfter::ticks(7)` stops the loop
/// at the end of tick 7 exactly.
pub struct CancelAfter {
    remaining: Cell<u32>,
}

impl CancelAfter {
    /// Fires on poll number `ticks` (1-based).
    pub fn ticks(ticks: u32) -> Self {
        Self {
            remaining: Cell::new(ticks),
        }
    }
}

impl CancellationSource for CancelAfter {
    fn is_requested(&self) -> bool {
        let left = self.remaining.get();
        if left <= 1 {
            true
        } else {
            self.remaining.set(left - 1);
            false
        }
    }
}
