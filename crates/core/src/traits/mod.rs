//! Collaborator contracts for the turn controller
//!
//! The controller never talks to hardware directly. Every external
//! dependency — the heading gyro, the two drivetrain sides, the tick clock,
//! the storage medium for tuning logs and the abort input — is injected
//! through one of these traits. Mock implementations live next to each
//! trait and are always available, so the whole loop is testable on host
//! without feature flags.
//!
//! Platform implementations (the real gyro, motor groups, SD card) belong
//! in the robot program, not here.

pub mod actuator;
pub mod cancel;
pub mod clock;
pub mod sensor;
pub mod storage;

pub use actuator::{ActuatorError, ActuatorOutput, MockActuator};
pub use cancel::{AbortFlag, CancelAfter, CancellationSource, Never};
pub use clock::{Clock, MockClock};
pub use sensor::{HeadingSensor, MockHeadingSensor, SensorError};
pub use storage::{MemorySink, StorageError, StorageSink};
