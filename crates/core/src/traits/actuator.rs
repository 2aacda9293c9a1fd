//! Actuator output contract
//!
//! One instance per drivetrain side. Commands are velocity percentages in
//! `[-100, +100]`; a rejected command propagates to the caller and is never
//! retried by the controller.

use alloc::vec::Vec;
use core::fmt;

/// Errors from commanding an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Velocity outside the `[-100, +100]` percent range
    InvalidVelocity,
    /// Motor controller rejected the command
    HardwareFault,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorError::InvalidVelocity => {
                write!(f, "velocity outside [-100, +100] percent")
            }
            ActuatorError::HardwareFault => write!(f, "actuator rejected the command"),
        }
    }
}

impl core::error::Error for ActuatorError {}

/// Velocity-commanded output, one per drivetrain side.
pub trait ActuatorOutput {
    /// Commands a velocity in percent, `-100.0` to `+100.0`.
    fn set_velocity(&mut self, percent: f32) -> Result<(), ActuatorError>;
}

/// Recording actuator for host tests.
///
/// Keeps every commanded velocity in order so tests can assert on the exact
/// dispatch sequence, and can be switched to reject all commands.
#[derive(Default)]
pub struct MockActuator {
    commands: Vec<f32>,
    fail: Option<ActuatorError>,
}

impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actuator whose every command fails with `error`.
    pub fn failing(error: ActuatorError) -> Self {
        Self {
            commands: Vec::new(),
            fail: Some(error),
        }
    }

    /// All velocities commanded so far, oldest first.
    pub fn commands(&self) -> &[f32] {
        &self.commands
    }

    /// The most recent commanded velocity, if any.
    pub fn last_command(&self) -> Option<f32> {
        self.commands.last().copied()
    }
}

impl ActuatorOutput for MockActuator {
    fn set_velocity(&mut self, percent: f32) -> Result<(), ActuatorError> {
        if let Some(e) = self.fail {
            return Err(e);
        }
        self.commands.push(percent);
        Ok(())
    }
}
