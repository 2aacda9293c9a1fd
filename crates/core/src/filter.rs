//! Heading exponential moving average (EMA) filter
//!
//! Optional smoothing for raw gyro readings before they reach the turn
//! controller. Interpolation follows the shortest angular path, so a noisy
//! reading near the 0°/360° seam does not produce a spurious full-circle
//! jump.
//!
//! `alpha = 1.0` is pass-through, `alpha = 0.3` is moderate smoothing,
//! `alpha = 0.0` holds the first heading forever.

use crate::angle::{wrap_180, wrap_360};

/// Angle-aware exponential moving average over heading readings.
pub struct HeadingFilter {
    alpha: f32,
    prev_heading: Option<f32>,
}

impl HeadingFilter {
    /// Creates a filter with the given smoothing factor, clamped to
    /// `[0.0, 1.0]`. Lower alpha means more smoothing.
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            prev_heading: None,
        }
    }

    /// Smooths one raw heading reading in degrees `[0, 360)`.
    ///
    /// The first call after construction or [`reset`](Self::reset) returns
    /// the raw reading unchanged.
    pub fn apply(&mut self, heading: f32) -> f32 {
        match self.prev_heading {
            None => {
                self.prev_heading = Some(heading);
                heading
            }
            Some(prev) => {
                let diff = wrap_180(heading - prev);
                let smoothed = wrap_360(prev + self.alpha * diff);
                self.prev_heading = Some(smoothed);
                smoothed
            }
        }
    }

    /// Clears the previous-heading state.
    ///
    /// Called at the start of every turn invocation so one turn's tail
    /// never bleeds into the next.
    pub fn reset(&mut self) {
        self.prev_heading = None;
    }
}
