//! Minimal simulated turn: spin the plant from 0° to 90° and print the
//! telemetry the controller would log on the robot.
//!
//! Run with: cargo run --example basic_turn

use pivot_core::controller::DifferentialTurn;
use pivot_core::traits::Clock;
use pivot_core::{Gains, HeadingController};
use pivot_sim::{SimClock, SimError, TurnPlant};

fn main() -> Result<(), SimError> {
    env_logger::init();

    let plant = TurnPlant::new(0.0, 180.0);
    let turn = DifferentialTurn::new(plant.left(), plant.right());
    let clock = SimClock::new().driving(plant.clone());

    let mut ctl = HeadingController::new(plant.gyro(), turn, clock, Gains::default());

    ctl.run(90.0, 2.0, 200)?;

    println!(
        "settled at {:.2} deg after {} ms of simulated time",
        plant.heading(),
        ctl.clock().now_ms()
    );
    Ok(())
}
