//! The closed-loop turn controller
//!
//! A turn is a small state machine: `Idle` until `run`/`tune` is invoked,
//! `Running` while the tick loop owns the drivetrain, then `Converged` (the
//! error window is full and entirely within tolerance) or, for the tuning
//! variant only, `Cancelled`. `Idle` and `Running` are implicit in the call
//! itself; the terminal states are the [`TurnOutcome`] the loop hands back.
//! Actuators are left in their last-commanded state at exit — the calling
//! routine issues the explicit stop or hold.
//!
//! Per-invocation accumulators live in [`state::ControlState`], created
//! fresh on every invocation and discarded at return, so back-to-back turns
//! never inherit each other's integral or derivative history.

pub mod actuation;
pub mod error;
pub mod heading;
pub mod state;
pub mod telemetry;

pub use actuation::{Actuation, DifferentialTurn, NullActuation};
pub use error::ControlError;
pub use heading::{HeadingController, TurnOutcome, DEFAULT_TICK_MS};
pub use telemetry::{TelemetryRow, TuningRecorder, TELEMETRY_HEADER};
