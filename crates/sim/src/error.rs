//! Errors from setting up and running the simulation harness.

use pivot_core::ControlError;

/// Harness-level failures.
///
/// Collaborator failures inside the loop stay typed as
/// [`ControlError`]; this type only adds what the host side can get wrong
/// on top (filesystem access for log output, mostly).
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("turn loop failed: {0}")]
    Control(#[from] ControlError),
}
