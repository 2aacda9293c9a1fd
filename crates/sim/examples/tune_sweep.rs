//! Tuning sweep: turn to every 30° target in sequence, writing one
//! plot-ready CSV per leg into ./tuning-logs, exactly like the autonomous
//! tuning routine does on the robot's SD card.
//!
//! Run with: cargo run --example tune_sweep

use pivot_core::controller::DifferentialTurn;
use pivot_core::traits::AbortFlag;
use pivot_core::{Gains, HeadingController};
use pivot_sim::{FileStorage, SimClock, SimError, TurnPlant};

fn main() -> Result<(), SimError> {
    env_logger::init();

    let plant = TurnPlant::new(0.0, 180.0);
    let turn = DifferentialTurn::new(plant.left(), plant.right());
    let clock = SimClock::new().driving(plant.clone());

    let mut ctl = HeadingController::new(plant.noisy_gyro(0.3, 1), turn, clock, Gains::default())
        .with_filter(0.3);

    let mut storage = FileStorage::new("tuning-logs")?;
    // on the robot this flag is wired to the touchscreen terminate button
    let abort = AbortFlag::new();

    for target in (30..360).step_by(30) {
        let name = format!("turnPID{}.csv", target);
        let outcome = ctl.tune(target as f32, 2.0, 200, &name, &mut storage, &abort)?;
        println!(
            "{}: {:?}, plant at {:.2} deg",
            name,
            outcome,
            plant.heading()
        );
    }
    println!("logs written to {}", storage.path_for("").display());
    Ok(())
}
