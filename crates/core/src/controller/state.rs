//! Per-invocation control state
//!
//! Created fresh at the start of every `run`/`tune` call and discarded at
//! return. Holds the integral accumulator, the previous error for the
//! derivative term, and the bounded sliding window of recent errors that
//! backs the convergence test.

use alloc::collections::VecDeque;

/// Window capacity for a settling duration at a given tick period.
///
/// Always at least 1: a settle shorter than one tick still needs one
/// in-tolerance sample.
pub fn window_capacity(settle_ms: u64, tick_ms: u64) -> usize {
    let cap = settle_ms.div_ceil(tick_ms.max(1));
    cap.max(1) as usize
}

/// Mutable accumulators for one turn invocation.
pub struct ControlState {
    accumulated_error: f32,
    previous_error: Option<f32>,
    window: VecDeque<f32>,
    capacity: usize,
}

impl ControlState {
    /// Fresh state with an empty error window of the given capacity.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            accumulated_error: 0.0,
            previous_error: None,
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Integral accumulator (sum of all errors seen this invocation).
    pub fn accumulated_error(&self) -> f32 {
        self.accumulated_error
    }

    /// The error recorded last tick. `None` before the first tick, which is
    /// what makes the first derivative term zero.
    pub fn previous_error(&self) -> Option<f32> {
        self.previous_error
    }

    /// Adds this tick's error to the integral accumulator.
    pub fn accumulate(&mut self, error: f32) {
        self.accumulated_error += error;
    }

    /// End-of-tick bookkeeping: remember the error for the next derivative
    /// and push it into the window, evicting the oldest sample at capacity.
    pub fn record(&mut self, error: f32) {
        self.previous_error = Some(error);
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(error);
    }

    /// Windowed convergence test.
    ///
    /// True only when the window has reached capacity *and* every sample in
    /// it is within tolerance. Requiring a full window means the loop runs
    /// for at least the settling duration no matter how fast the raw error
    /// drops, so a single lucky sample on a noisy gyro never ends the turn.
    pub fn converged(&self, tolerance: f32) -> bool {
        self.window.len() == self.capacity
            && self.window.iter().all(|e| libm::fabsf(*e) <= tolerance)
    }
}
