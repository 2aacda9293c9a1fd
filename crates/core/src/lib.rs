//! pivot_core - Pure no_std heading control logic for differential drivetrains
//!
//! This crate contains the platform-agnostic closed-loop rotation controller
//! used during the autonomous period: turn the robot in place until its
//! heading settles on a target angle.
//!
//! # Design Principles
//!
//! - **No feature gates**: every module compiles the same way everywhere
//! - **Pure no_std + alloc**: no std library dependencies
//! - **Trait abstractions**: the gyro, the two drivetrain sides, the tick
//!   clock, the storage medium and the abort input are injected via traits,
//!   so the whole loop runs on host with mock collaborators
//!
//! # Modules
//!
//! - [`angle`]: circular heading arithmetic (wrap correction, shortest path)
//! - [`gains`]: PID gains and symmetric output saturation
//! - [`filter`]: optional angle-aware smoothing of raw gyro readings
//! - [`traits`]: collaborator contracts (sensor, actuator, clock, storage,
//!   cancellation) with always-available mock implementations
//! - [`controller`]: the turn loop itself, its per-invocation state and the
//!   tuning telemetry recorder

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod angle;
pub mod controller;
pub mod filter;
pub mod gains;
pub mod traits;

pub use controller::{
    ControlError, HeadingController, TelemetryRow, TuningRecorder, TurnOutcome, DEFAULT_TICK_MS,
};
pub use gains::Gains;
