//! Tuning telemetry
//!
//! The tuning loop appends one row per tick with the decomposed P/D/I
//! contributions, then flushes the whole log as a single write at loop
//! exit — converged or cancelled. Rows are kept in strict tick order.
//!
//! The column names and order are load-bearing: the plotting tool on the
//! laptop selects columns by header name, so the header text must never
//! change.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::traits::{StorageError, StorageSink};

/// Exact header row of a tuning log.
pub const TELEMETRY_HEADER: &str =
    "time, proportional, derivative, integral, output, desiredValue, angle";

/// One tick of tuning telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRow {
    /// 1-based tick counter; the logged time column is `tick_index * tick`
    pub tick_index: u32,
    /// Proportional contribution, `kp * error`
    pub p_term: f32,
    /// Derivative contribution, `kd * derivative`
    pub d_term: f32,
    /// Integral contribution, `ki * accumulated * tick`
    pub i_term: f32,
    /// Saturated output actually dispatched
    pub output: f32,
    /// Target heading of the run
    pub target: f32,
    /// Raw measured heading this tick
    pub measured: f32,
}

/// Append-only, in-memory log of one tuning run.
///
/// Rows already recorded survive a cancellation; only an ungraceful process
/// exit mid-loop loses them, which is an accepted limitation of the flat
/// log — this is not a durable journal.
pub struct TuningRecorder {
    tick_ms: u64,
    rows: Vec<TelemetryRow>,
}

impl TuningRecorder {
    /// Empty log for a run with the given tick period.
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick_ms,
            rows: Vec::new(),
        }
    }

    /// Appends one tick's row. Rows arrive in tick order and stay that way.
    pub fn record(&mut self, row: TelemetryRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TelemetryRow] {
        &self.rows
    }

    /// Renders header plus rows as flat CSV text.
    ///
    /// `time` and `desiredValue` are written as-is; every other numeric
    /// field gets fixed 3-decimal precision.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = writeln!(out, "{}", TELEMETRY_HEADER);
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{}, {:.3}, {:.3}, {:.3}, {:.3}, {}, {:.3}",
                row.tick_index as u64 * self.tick_ms,
                row.p_term,
                row.d_term,
                row.i_term,
                row.output,
                row.target,
                row.measured,
            );
        }
        out
    }

    /// Flushes the whole log as one write to the storage sink.
    pub fn flush<S: StorageSink>(&self, sink: &mut S, name: &str) -> Result<(), StorageError> {
        sink.write(name, self.render().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MemorySink;
    use alloc::vec::Vec;

    fn row(tick_index: u32) -> TelemetryRow {
        TelemetryRow {
            tick_index,
            p_term: 18.0,
            d_term: -0.5,
            i_term: 0.0001,
            output: 17.5001,
            target: 90.0,
            measured: 0.0,
        }
    }

    #[test]
    fn test_header_text_is_exact() {
        // consumed by name in the plotting tool; any change breaks it
        assert_eq!(
            TELEMETRY_HEADER,
            "time, proportional, derivative, integral, output, desiredValue, angle"
        );
        let rec = TuningRecorder::new(50);
        assert_eq!(rec.render(), "time, proportional, derivative, integral, output, desiredValue, angle\n");
    }

    #[test]
    fn test_row_formatting() {
        let mut rec = TuningRecorder::new(50);
        rec.record(row(1));
        let text = rec.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        // time as-is, three decimals for terms/output/angle, target as-is
        assert_eq!(lines[1], "50, 18.000, -0.500, 0.000, 17.500, 90, 0.000");
    }

    #[test]
    fn test_time_column_is_tick_times_period() {
        let mut rec = TuningRecorder::new(50);
        rec.record(row(1));
        rec.record(row(2));
        rec.record(row(7));
        let text = rec.render();
        let times: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(times, ["50", "100", "350"]);
    }

    #[test]
    fn test_flush_is_a_single_named_write() {
        let mut rec = TuningRecorder::new(50);
        rec.record(row(1));
        rec.record(row(2));
        let mut sink = MemorySink::new();
        rec.flush(&mut sink, "turnPID90.csv").unwrap();
        assert_eq!(sink.len(), 1);
        let data = sink.get("turnPID90.csv").unwrap();
        assert_eq!(data, rec.render().as_bytes());
    }

    #[test]
    fn test_rows_preserve_tick_order() {
        let mut rec = TuningRecorder::new(50);
        for i in 1..=5 {
            rec.record(row(i));
        }
        let ticks: Vec<u32> = rec.rows().iter().map(|r| r.tick_index).collect();
        assert_eq!(ticks, [1, 2, 3, 4, 5]);
    }
}
