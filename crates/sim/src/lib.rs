//! pivot_sim - Host-side simulation harness for the heading controller
//!
//! Lets the full turn loop run on a development machine with no robot
//! attached: a simulated turn plant integrates the commanded differential
//! velocities into a heading, a simulated gyro reads it back (optionally
//! with seeded noise), and a simulated clock advances time instantly so
//! long settling windows cost nothing.
//!
//! # Example
//!
//! ```
//! use pivot_core::controller::DifferentialTurn;
//! use pivot_core::{Gains, HeadingController};
//! use pivot_sim::{SimClock, TurnPlant};
//!
//! let plant = TurnPlant::new(0.0, 180.0);
//! let turn = DifferentialTurn::new(plant.left(), plant.right());
//! let clock = SimClock::new().driving(plant.clone());
//!
//! let mut ctl = HeadingController::new(plant.gyro(), turn, clock, Gains::new(1.0, 0.0, 0.0, 100.0));
//! ctl.run(90.0, 2.0, 200).unwrap();
//! assert!((plant.heading() - 90.0).abs() < 2.0);
//! ```

pub mod clock;
pub mod error;
pub mod plant;
pub mod storage;

pub use clock::{SimClock, WallClock};
pub use error::SimError;
pub use plant::{SimGyro, SimMotor, TurnPlant};
pub use storage::FileStorage;
