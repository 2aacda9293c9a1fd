//! Simulated turn plant
//!
//! A deliberately simple rotation model: the robot's angular velocity is
//! proportional to the differential of the two side commands. That is
//! enough to close the loop end-to-end — P-only gains converge, saturation
//! limits the turn rate, and noise exercises the settling window — without
//! pretending to model a real drivetrain's inertia.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pivot_core::angle::wrap_360;
use pivot_core::traits::{ActuatorError, ActuatorOutput, HeadingSensor, SensorError};

struct PlantState {
    heading: f32,
    left_cmd: f32,
    right_cmd: f32,
}

/// Shared rotation model. Clones are handles onto the same state.
#[derive(Clone)]
pub struct TurnPlant {
    state: Arc<Mutex<PlantState>>,
    /// Turn rate in degrees per second at full (±100 %) differential.
    turn_rate_dps: f32,
}

impl TurnPlant {
    /// Plant at `initial_heading` degrees that rotates at `turn_rate_dps`
    /// degrees per second when commanded (+100, -100).
    pub fn new(initial_heading: f32, turn_rate_dps: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(PlantState {
                heading: wrap_360(initial_heading),
                left_cmd: 0.0,
                right_cmd: 0.0,
            })),
            turn_rate_dps,
        }
    }

    /// Current plant heading in `[0, 360)`.
    pub fn heading(&self) -> f32 {
        match self.state.lock() {
            Ok(s) => s.heading,
            Err(poisoned) => poisoned.into_inner().heading,
        }
    }

    /// Integrates the rotation model over `dt_ms` of simulated time.
    pub fn step(&self, dt_ms: u64) {
        if let Ok(mut s) = self.state.lock() {
            let differential = (s.left_cmd - s.right_cmd) / 2.0;
            let rate = self.turn_rate_dps * differential / 100.0;
            s.heading = wrap_360(s.heading + rate * dt_ms as f32 / 1000.0);
        }
    }

    /// Noise-free gyro handle.
    pub fn gyro(&self) -> SimGyro {
        SimGyro {
            plant: self.clone(),
            noise: None,
        }
    }

    /// Gyro handle with seeded uniform noise of ±`amplitude` degrees.
    pub fn noisy_gyro(&self, amplitude: f32, seed: u64) -> SimGyro {
        SimGyro {
            plant: self.clone(),
            noise: Some((amplitude, StdRng::seed_from_u64(seed))),
        }
    }

    /// Left drivetrain side.
    pub fn left(&self) -> SimMotor {
        SimMotor {
            plant: self.clone(),
            side: Side::Left,
        }
    }

    /// Right drivetrain side.
    pub fn right(&self) -> SimMotor {
        SimMotor {
            plant: self.clone(),
            side: Side::Right,
        }
    }
}

/// Simulated heading sensor reading the plant state.
pub struct SimGyro {
    plant: TurnPlant,
    noise: Option<(f32, StdRng)>,
}

impl HeadingSensor for SimGyro {
    fn read(&mut self) -> Result<f32, SensorError> {
        let heading = match self.plant.state.lock() {
            Ok(s) => s.heading,
            Err(_) => return Err(SensorError::Offline),
        };
        let heading = match self.noise.as_mut() {
            Some((amplitude, rng)) => {
                let amp = *amplitude;
                wrap_360(heading + rng.gen_range(-amp..=amp))
            }
            None => heading,
        };
        Ok(heading)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// One simulated drivetrain side.
///
/// Velocity commands follow the real motor contract: percent in
/// `[-100, +100]`, anything else is rejected.
pub struct SimMotor {
    plant: TurnPlant,
    side: Side,
}

impl ActuatorOutput for SimMotor {
    fn set_velocity(&mut self, percent: f32) -> Result<(), ActuatorError> {
        if !percent.is_finite() || percent.abs() > 100.0 {
            return Err(ActuatorError::InvalidVelocity);
        }
        let mut s = self
            .plant
            .state
            .lock()
            .map_err(|_| ActuatorError::HardwareFault)?;
        match self.side {
            Side::Left => s.left_cmd = percent,
            Side::Right => s.right_cmd = percent,
        }
        Ok(())
    }
}
