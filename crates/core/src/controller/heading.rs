//! The turn loop
//!
//! Drives the two drivetrain sides with equal and opposite commands until
//! the heading has stayed within tolerance of the target for a whole
//! settling window of ticks. The tuning variant additionally records one
//! telemetry row per tick and polls a cancellation source at each tick
//! boundary.

use log::{debug, info};

use crate::angle::heading_error;
use crate::controller::actuation::Actuation;
use crate::controller::error::ControlError;
use crate::controller::state::{window_capacity, ControlState};
use crate::controller::telemetry::{TelemetryRow, TuningRecorder};
use crate::filter::HeadingFilter;
use crate::gains::Gains;
use crate::traits::{CancellationSource, Clock, HeadingSensor, Never, SensorError, StorageSink};

/// Default tick period of the control loop in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 50;

/// Terminal state of a turn invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Error window full and entirely within tolerance
    Converged,
    /// Cancellation source fired at a tick boundary (tuning variant only)
    Cancelled,
}

/// Closed-loop heading controller for a differential drivetrain.
///
/// Owns its collaborators for the duration of the loop: the heading sensor,
/// an [`Actuation`] strategy and a [`Clock`]. All tunables are explicit
/// per-instance fields — there is no shared or global gain state, and a
/// second controller on different hardware is completely independent.
///
/// Not reentrant: `run`/`tune` take `&mut self`, and per-invocation
/// accumulators are rebuilt on every call.
pub struct HeadingController<S, A, C> {
    sensor: S,
    actuation: A,
    clock: C,
    gains: Gains,
    tick_ms: u64,
    filter: Option<HeadingFilter>,
}

impl<S, A, C> HeadingController<S, A, C>
where
    S: HeadingSensor,
    A: Actuation,
    C: Clock,
{
    /// Controller with the default 50 ms tick and no input filtering.
    pub fn new(sensor: S, actuation: A, clock: C, gains: Gains) -> Self {
        Self {
            sensor,
            actuation,
            clock,
            gains,
            tick_ms: DEFAULT_TICK_MS,
            filter: None,
        }
    }

    /// Overrides the tick period. Values below 1 ms are clamped up.
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms.max(1);
        self
    }

    /// Enables angle-aware EMA smoothing of raw sensor readings.
    pub fn with_filter(mut self, alpha: f32) -> Self {
        self.filter = Some(HeadingFilter::new(alpha));
        self
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    /// Retunes the controller. Only meaningful between invocations; a
    /// running loop holds `&mut self` and cannot race this.
    pub fn set_gains(&mut self, gains: Gains) {
        self.gains = gains;
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn actuation(&self) -> &A {
        &self.actuation
    }

    /// Releases the collaborators, e.g. to issue the post-turn stop/hold.
    pub fn into_parts(self) -> (S, A, C) {
        (self.sensor, self.actuation, self.clock)
    }

    /// Turns until the heading has stayed within `tolerance` degrees of
    /// `target` for the most recent `settle_ms` of ticks.
    ///
    /// Dispatches equal-magnitude, opposite-sign commands to the two sides
    /// each tick and returns once converged. A sensor or actuator failure
    /// aborts the invocation.
    pub fn run(&mut self, target: f32, tolerance: f32, settle_ms: u64) -> Result<(), ControlError> {
        // without a cancellation source the only exit is convergence
        self.turn_loop(target, tolerance, settle_ms, None, &Never)?;
        Ok(())
    }

    /// The tuning variant: same loop as [`run`](Self::run), plus per-tick
    /// telemetry and cooperative cancellation.
    ///
    /// Both actuator outputs are zeroed before the loop so the run does not
    /// inherit a prior command. On exit — converged or cancelled — the whole
    /// log is flushed to `sink` under `name` as a single write; a run
    /// cancelled at tick k flushes exactly k rows.
    pub fn tune<K, X>(
        &mut self,
        target: f32,
        tolerance: f32,
        settle_ms: u64,
        name: &str,
        sink: &mut K,
        cancel: &X,
    ) -> Result<TurnOutcome, ControlError>
    where
        K: StorageSink,
        X: CancellationSource,
    {
        self.actuation.apply(0.0)?;
        let mut recorder = TuningRecorder::new(self.tick_ms);
        let outcome = self.turn_loop(target, tolerance, settle_ms, Some(&mut recorder), cancel)?;
        recorder.flush(sink, name)?;
        info!(
            "tuning log {} flushed: {} rows, outcome {:?}",
            name,
            recorder.len(),
            outcome
        );
        Ok(outcome)
    }

    fn read_heading(&mut self) -> Result<f32, SensorError> {
        let raw = self.sensor.read()?;
        Ok(match self.filter.as_mut() {
            Some(f) => f.apply(raw),
            None => raw,
        })
    }

    fn turn_loop<X: CancellationSource>(
        &mut self,
        target: f32,
        tolerance: f32,
        settle_ms: u64,
        mut recorder: Option<&mut TuningRecorder>,
        cancel: &X,
    ) -> Result<TurnOutcome, ControlError> {
        let capacity = window_capacity(settle_ms, self.tick_ms);
        let mut state = ControlState::new(capacity);
        if let Some(f) = self.filter.as_mut() {
            f.reset();
        }
        let dt = self.tick_ms as f32;
        let tolerance = libm::fabsf(tolerance);

        info!(
            "turn loop started: target {:.1} deg, tolerance {:.1} deg, window {} ticks",
            target, tolerance, capacity
        );

        let mut tick: u32 = 0;
        loop {
            tick += 1;

            let measured = self.read_heading()?;
            let error = heading_error(target, measured);

            let derivative = match state.previous_error() {
                Some(prev) => (error - prev) / dt,
                None => 0.0,
            };
            state.accumulate(error);

            let p_term = self.gains.kp * error;
            let d_term = self.gains.kd * derivative;
            let i_term = self.gains.ki * state.accumulated_error() * dt;
            let raw_output = p_term + d_term + i_term;
            let output = self.gains.saturate(raw_output);
            if output != raw_output {
                debug!(
                    "tick {}: output saturated ({:.1} -> {:.1})",
                    tick, raw_output, output
                );
            }

            if let Some(rec) = recorder.as_deref_mut() {
                rec.record(TelemetryRow {
                    tick_index: tick,
                    p_term,
                    d_term,
                    i_term,
                    output,
                    target,
                    measured,
                });
            }

            self.actuation.apply(output)?;
            self.clock.sleep_ms(self.tick_ms);

            // polled once per tick boundary; the command already dispatched
            // this tick stands
            if cancel.is_requested() {
                info!("turn loop cancelled at tick {}", tick);
                return Ok(TurnOutcome::Cancelled);
            }

            state.record(error);
            if state.converged(tolerance) {
                info!("turn converged after {} ticks", tick);
                return Ok(TurnOutcome::Converged);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::actuation::{DifferentialTurn, NullActuation};
    use crate::traits::{
        ActuatorError, CancelAfter, MemorySink, MockActuator, MockClock, MockHeadingSensor,
        StorageError,
    };
    use alloc::vec::Vec;

    fn p_only(kp: f32) -> Gains {
        Gains::new(kp, 0.0, 0.0, 100.0)
    }

    #[test]
    fn test_first_tick_commands_match_proportional_error() {
        // gyro pinned at 0, target 90, Kp=1: first tick error 90, output 90
        // (under the cap), actuators commanded (+90, -90)
        let turn = DifferentialTurn::new(MockActuator::new(), MockActuator::new());
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(0.0),
            turn,
            MockClock::new(),
            p_only(1.0),
        );
        let mut sink = MemorySink::new();
        let outcome = ctl
            .tune(90.0, 2.0, 50, "turnPID90.csv", &mut sink, &CancelAfter::ticks(1))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Cancelled);

        // first command is the pre-loop zero, second is tick 1
        assert_eq!(ctl.actuation().left().commands(), &[0.0, 90.0]);
        assert_eq!(ctl.actuation().right().commands(), &[-0.0, -90.0]);

        let text = core::str::from_utf8(sink.get("turnPID90.csv").unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "header plus one tick");
        assert_eq!(lines[1], "50, 90.000, 0.000, 0.000, 90.000, 90, 0.000");
    }

    #[test]
    fn test_output_saturates_with_sign_preserved() {
        // error 90 with Kp=10 wants 900; cap is 100
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(0.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(10.0),
        );
        let mut sink = MemorySink::new();
        ctl.tune(90.0, 2.0, 50, "sat.csv", &mut sink, &CancelAfter::ticks(1))
            .unwrap();
        assert_eq!(ctl.actuation().last_output(), Some(100.0));

        // opposite direction: error -90 wants -900, clamps to -100, not +100
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(90.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(10.0),
        );
        ctl.tune(0.0, 2.0, 50, "sat2.csv", &mut sink, &CancelAfter::ticks(1))
            .unwrap();
        assert_eq!(ctl.actuation().last_output(), Some(-100.0));
    }

    #[test]
    fn test_convergence_requires_full_window() {
        // gyro already at the target: every sample is in tolerance, but the
        // loop must still run settle/tick = 4 ticks before declaring done
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(90.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        ctl.run(90.0, 2.0, 200).unwrap();
        assert_eq!(
            ctl.clock().now_ms(),
            200,
            "four 50 ms ticks must elapse before convergence"
        );
    }

    #[test]
    fn test_convergence_counts_only_recent_window() {
        // approach the target: early out-of-tolerance errors must age out of
        // the window before the turn can end
        let readings = [40.0, 70.0, 86.0, 89.0, 90.0, 90.0, 90.0];
        let mut ctl = HeadingController::new(
            MockHeadingSensor::sequence(readings),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        ctl.run(90.0, 2.0, 200).unwrap();
        // errors: 50, 20, 4, 1, 0, 0, 0, ... window of 4 first fully in
        // tolerance after tick 7 ([1, 0, 0, 0])
        assert_eq!(ctl.clock().now_ms(), 7 * 50);
    }

    #[test]
    fn test_cancellation_at_tick_7_flushes_7_rows() {
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(0.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        let mut sink = MemorySink::new();
        let outcome = ctl
            .tune(90.0, 2.0, 200, "cancel.csv", &mut sink, &CancelAfter::ticks(7))
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Cancelled);
        let text = core::str::from_utf8(sink.get("cancel.csv").unwrap()).unwrap();
        assert_eq!(text.lines().count(), 8, "header plus exactly 7 data rows");
    }

    #[test]
    fn test_telemetry_rows_equal_ticks_on_convergence() {
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(90.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        let mut sink = MemorySink::new();
        let outcome = ctl
            .tune(90.0, 2.0, 200, "done.csv", &mut sink, &Never)
            .unwrap();
        assert_eq!(outcome, TurnOutcome::Converged);
        let text = core::str::from_utf8(sink.get("done.csv").unwrap()).unwrap();
        assert_eq!(text.lines().count(), 5, "header plus 4 window-filling rows");
    }

    #[test]
    fn test_reinvocation_resets_state() {
        // first call sees a moving gyro and builds up derivative/integral
        // history; the second call must start clean, so its first-tick
        // derivative term is exactly zero
        let readings = [0.0, 30.0, 60.0, 80.0];
        let mut ctl = HeadingController::new(
            MockHeadingSensor::sequence(readings),
            NullActuation::new(),
            MockClock::new(),
            Gains::new(1.0, 0.1, 5.0, 100.0),
        );
        let mut sink = MemorySink::new();
        ctl.tune(90.0, 2.0, 100, "first.csv", &mut sink, &CancelAfter::ticks(3))
            .unwrap();
        ctl.tune(90.0, 2.0, 100, "second.csv", &mut sink, &CancelAfter::ticks(2))
            .unwrap();

        let text = core::str::from_utf8(sink.get("second.csv").unwrap()).unwrap();
        let first_row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = first_row.split(", ").collect();
        assert_eq!(
            fields[2], "0.000",
            "second call's first-tick derivative must be zero, row: {}",
            first_row
        );
        // accumulator restarted: ki * error * dt = 0.1 * 10 * 50, not the
        // 950.0 a leaked first-call sum would produce
        assert_eq!(fields[3], "50.000");
    }

    #[test]
    fn test_sensor_failure_aborts_the_invocation() {
        let mut ctl = HeadingController::new(
            MockHeadingSensor::failing(SensorError::Offline),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        let err = ctl.run(90.0, 2.0, 200).unwrap_err();
        assert_eq!(err, ControlError::Sensor(SensorError::Offline));
    }

    #[test]
    fn test_actuator_rejection_propagates() {
        let turn = DifferentialTurn::new(
            MockActuator::failing(ActuatorError::HardwareFault),
            MockActuator::new(),
        );
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(0.0),
            turn,
            MockClock::new(),
            p_only(1.0),
        );
        let err = ctl.run(90.0, 2.0, 200).unwrap_err();
        assert_eq!(err, ControlError::Actuator(ActuatorError::HardwareFault));
    }

    #[test]
    fn test_storage_failure_surfaces_after_the_loop() {
        struct NoCard;
        impl StorageSink for NoCard {
            fn write(&mut self, _name: &str, _data: &[u8]) -> Result<(), StorageError> {
                Err(StorageError::NoMedium)
            }
        }
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(90.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        let err = ctl
            .tune(90.0, 2.0, 50, "gone.csv", &mut NoCard, &Never)
            .unwrap_err();
        assert_eq!(err, ControlError::Storage(StorageError::NoMedium));
    }

    #[test]
    fn test_wrap_takes_the_short_way() {
        // measured 10, target 350: the short way is -20, so the first
        // command must be negative even though 350 > 10
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(10.0),
            NullActuation::new(),
            MockClock::new(),
            p_only(1.0),
        );
        let mut sink = MemorySink::new();
        ctl.tune(350.0, 2.0, 50, "wrap.csv", &mut sink, &CancelAfter::ticks(1))
            .unwrap();
        assert_eq!(ctl.actuation().last_output(), Some(-20.0));
    }

    #[test]
    fn test_integral_term_accumulates_across_ticks() {
        // Ki only: i_term = ki * sum(errors) * dt grows tick over tick
        let mut ctl = HeadingController::new(
            MockHeadingSensor::fixed(0.0),
            NullActuation::new(),
            MockClock::new(),
            Gains::new(0.0, 0.001, 0.0, 100.0),
        );
        let mut sink = MemorySink::new();
        ctl.tune(90.0, 2.0, 50, "int.csv", &mut sink, &CancelAfter::ticks(3))
            .unwrap();
        let text = core::str::from_utf8(sink.get("int.csv").unwrap()).unwrap();
        let i_terms: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(", ").nth(3).unwrap())
            .collect();
        // 0.001 * 90 * 50 = 4.5 per accumulated error step
        assert_eq!(i_terms, ["4.500", "9.000", "13.500"]);
    }
}
