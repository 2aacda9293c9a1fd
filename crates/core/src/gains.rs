//! PID gains and output saturation
//!
//! Gains are immutable for the duration of a turn; retuning between
//! invocations is fine, retuning while a loop is running is not possible
//! because the controller holds them by value behind `&mut self`.

/// PID gain set plus the symmetric output saturation bound.
///
/// The output cap is a magnitude bound in velocity percent: computed
/// commands are clamped into `[-output_cap, +output_cap]` with their sign
/// preserved, so a large negative command saturates to `-output_cap` and is
/// never inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    /// Proportional gain. Start tuning here.
    pub kp: f32,
    /// Integral gain. Leave at 0 unless the turn consistently undershoots.
    pub ki: f32,
    /// Derivative gain. Dampens oscillation once kp is close.
    pub kd: f32,
    /// Symmetric saturation bound for the commanded velocity, in percent.
    pub output_cap: f32,
}

impl Gains {
    /// Creates a gain set. The cap is taken as a magnitude.
    pub fn new(kp: f32, ki: f32, kd: f32, output_cap: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            output_cap: libm::fabsf(output_cap),
        }
    }

    /// Clamps a raw PID output to the saturation bound, preserving sign.
    pub fn saturate(&self, raw: f32) -> f32 {
        raw.clamp(-self.output_cap, self.output_cap)
    }
}

impl Default for Gains {
    /// The gain set the robot currently turns with, found by sweeping
    /// `tune` logs through the plotter.
    fn default() -> Self {
        Self {
            kp: 0.2,
            ki: 0.000_000_07,
            kd: 0.02,
            output_cap: 100.0,
        }
    }
}
