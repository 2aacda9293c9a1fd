//! Heading sensor contract
//!
//! Abstracts the gyro (or any other heading source) behind a single `read`
//! call. A failed read is fatal to the current turn invocation: the loop
//! aborts and the error propagates to the caller.

use alloc::collections::VecDeque;
use core::fmt;

/// Errors from a heading sensor read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Sensor is still calibrating and has no trustworthy heading yet
    Calibrating,
    /// Sensor is unreachable or reported a hardware fault
    Offline,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Calibrating => write!(f, "heading sensor is calibrating"),
            SensorError::Offline => write!(f, "heading sensor is offline"),
        }
    }
}

impl core::error::Error for SensorError {}

/// Live heading source.
pub trait HeadingSensor {
    /// Returns the current heading in degrees `[0, 360)`.
    fn read(&mut self) -> Result<f32, SensorError>;
}

/// Scripted heading sensor for host tests.
///
/// Replays a fixed sequence of readings and then keeps returning the last
/// one, or fails every read when constructed with
/// [`failing`](MockHeadingSensor::failing).
pub struct MockHeadingSensor {
    readings: VecDeque<f32>,
    last: f32,
    fail: Option<SensorError>,
}

impl MockHeadingSensor {
    /// Sensor that always reads the same heading.
    pub fn fixed(heading: f32) -> Self {
        Self {
            readings: VecDeque::new(),
            last: heading,
            fail: None,
        }
    }

    /// Sensor that replays `readings` in order, then repeats the final one.
    pub fn sequence<I: IntoIterator<Item = f32>>(readings: I) -> Self {
        let readings: VecDeque<f32> = readings.into_iter().collect();
        let last = readings.back().copied().unwrap_or(0.0);
        Self {
            readings,
            last,
            fail: None,
        }
    }

    /// Sensor whose every read fails with `error`.
    pub fn failing(error: SensorError) -> Self {
        Self {
            readings: VecDeque::new(),
            last: 0.0,
            fail: Some(error),
        }
    }
}

impl HeadingSensor for MockHeadingSensor {
    fn read(&mut self) -> Result<f32, SensorError> {
        if let Some(e) = self.fail {
            return Err(e);
        }
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        Ok(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_repeats_forever() {
        let mut gyro = MockHeadingSensor::fixed(42.0);
        for _ in 0..3 {
            assert!((gyro.read().unwrap() - 42.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_sequence_then_holds_last() {
        let mut gyro = MockHeadingSensor::sequence([10.0, 20.0]);
        assert!((gyro.read().unwrap() - 10.0).abs() < 0.001);
        assert!((gyro.read().unwrap() - 20.0).abs() < 0.001);
        assert!((gyro.read().unwrap() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_failing_always_errors() {
        let mut gyro = MockHeadingSensor::failing(SensorError::Offline);
        assert_eq!(gyro.read(), Err(SensorError::Offline));
        assert_eq!(gyro.read(), Err(SensorError::Offline));
    }
}
