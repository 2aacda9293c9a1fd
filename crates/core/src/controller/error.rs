//! Turn loop error type
//!
//! Wraps the collaborator errors that can abort an invocation. None of these
//! are used for ordinary control flow: wrap correction, saturation and the
//! convergence test are pure arithmetic and never fail.

use core::fmt;

use crate::traits::{ActuatorError, SensorError, StorageError};

/// Errors that can abort a `run` or `tune` invocation.
///
/// The controller never retries internally; retry policy belongs to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Heading unreadable — fatal to the current invocation
    Sensor(SensorError),
    /// Actuator rejected a command
    Actuator(ActuatorError),
    /// Tuning log flush failed at loop exit
    Storage(StorageError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::Sensor(e) => write!(f, "sensor failure: {}", e),
            ControlError::Actuator(e) => write!(f, "actuator failure: {}", e),
            ControlError::Storage(e) => write!(f, "telemetry flush failure: {}", e),
        }
    }
}

impl core::error::Error for ControlError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ControlError::Sensor(e) => Some(e),
            ControlError::Actuator(e) => Some(e),
            ControlError::Storage(e) => Some(e),
        }
    }
}

impl From<SensorError> for ControlError {
    fn from(e: SensorError) -> Self {
        ControlError::Sensor(e)
    }
}

impl From<ActuatorError> for ControlError {
    fn from(e: ActuatorError) -> Self {
        ControlError::Actuator(e)
    }
}

impl From<StorageError> for ControlError {
    fn from(e: StorageError) -> Self {
        ControlError::Storage(e)
    }
}
