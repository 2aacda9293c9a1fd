//! Actuation strategies
//!
//! One controller covers both use modes by being parameterized over an
//! [`Actuation`] strategy. [`DifferentialTurn`] dispatches to the two
//! drivetrain sides with opposite signs (rotation in place);
//! [`NullActuation`] applies nothing and just keeps the last output
//! inspectable (bare PID).

use crate::traits::{ActuatorError, ActuatorOutput};

/// How a computed, saturated output reaches the world each tick.
pub trait Actuation {
    /// Applies one tick's output.
    fn apply(&mut self, output: f32) -> Result<(), ActuatorError>;
}

/// Dual-actuator dispatch for turning in place: `+output` to the left side,
/// `-output` to the right side, equal magnitude.
pub struct DifferentialTurn<L, R> {
    left: L,
    right: R,
}

impl<L, R> DifferentialTurn<L, R>
where
    L: ActuatorOutput,
    R: ActuatorOutput,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    /// Gives the drivetrain sides back to the caller, e.g. for the explicit
    /// stop/hold command after a turn.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Actuation for DifferentialTurn<L, R>
where
    L: ActuatorOutput,
    R: ActuatorOutput,
{
    fn apply(&mut self, output: f32) -> Result<(), ActuatorError> {
        self.left.set_velocity(output)?;
        self.right.set_velocity(-output)?;
        Ok(())
    }
}

/// No-op strategy: the PID runs and its output can be inspected, but
/// nothing is driven.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActuation {
    last_output: Option<f32>,
}

impl NullActuation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently computed output, if a tick has run.
    pub fn last_output(&self) -> Option<f32> {
        self.last_output
    }
}

impl Actuation for NullActuation {
    fn apply(&mut self, output: f32) -> Result<(), ActuatorError> {
        self.last_output = Some(output);
        Ok(())
    }
}
