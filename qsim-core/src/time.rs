//! Simulation time management

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Simulation time in abstract model units
///
/// SimTime represents a point in simulation time as a finite, non-negative
/// `f64` measured from the simulation start. The unit is whatever the arrival
/// and service rates are expressed in. Values are totally ordered, so
/// SimTime can key a priority queue directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    /// Create a new SimTime at the simulation start (time zero)
    pub const fn zero() -> Self {
        SimTime(0.0)
    }

    /// Create a SimTime, or `None` if `time` is negative, infinite, or NaN.
    pub fn try_new(time: f64) -> Option<Self> {
        (time.is_finite() && time >= 0.0).then_some(SimTime(time))
    }

    /// Get the raw time value
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Time elapsed since `earlier`, clamped at zero.
    pub fn duration_since(&self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;

    /// Advance by a non-negative duration.
    ///
    /// # Panics
    ///
    /// Panics if the result is not a valid SimTime.
    fn add(self, rhs: f64) -> Self::Output {
        SimTime::from(self.0 + rhs)
    }
}

impl Sub<SimTime> for SimTime {
    type Output = f64;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl Default for SimTime {
    fn default() -> Self {
        SimTime::zero()
    }
}

impl From<f64> for SimTime {
    /// Convert from model time units to SimTime
    ///
    /// # Examples
    /// ```
    /// # use qsim_core::SimTime;
    /// let time = SimTime::from(1.5);
    /// assert_eq!(time.as_f64(), 1.5);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the input is negative, infinite, or NaN.
    fn from(time: f64) -> Self {
        if !time.is_finite() {
            panic!("SimTime cannot be created from non-finite value: {time}");
        }
        if time < 0.0 {
            panic!("SimTime cannot be negative: {time}");
        }
        SimTime(time)
    }
}

impl From<SimTime> for f64 {
    fn from(time: SimTime) -> Self {
        time.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simtime_creation() {
        assert_eq!(SimTime::zero().as_f64(), 0.0);
        assert_eq!(SimTime::from(2.5).as_f64(), 2.5);
        assert_eq!(SimTime::try_new(3.0), Some(SimTime::from(3.0)));
        assert_eq!(SimTime::try_new(-0.1), None);
        assert_eq!(SimTime::try_new(f64::NAN), None);
        assert_eq!(SimTime::try_new(f64::INFINITY), None);
    }

    #[test]
    fn test_simtime_arithmetic() {
        let t1 = SimTime::from(10.0);
        let t2 = SimTime::from(4.0);

        assert_eq!(t1 + 2.5, SimTime::from(12.5));
        assert_eq!(t1 - t2, 6.0);
        // Subtraction never goes negative.
        assert_eq!(t2 - t1, 0.0);
    }

    #[test]
    fn test_simtime_ordering() {
        let t1 = SimTime::from(1.0);
        let t2 = SimTime::from(2.0);

        assert!(t1 < t2);
        assert!(t2 > t1);
        assert_eq!(t1, t1);
        assert_eq!(t1.max(t2), t2);
    }

    #[test]
    fn test_simtime_display() {
        assert_eq!(SimTime::from(1.25).to_string(), "t=1.250000");
    }

    #[test]
    #[should_panic(expected = "SimTime cannot be negative")]
    fn test_simtime_from_negative_f64() {
        let _ = SimTime::from(-1.0);
    }

    #[test]
    #[should_panic(expected = "SimTime cannot be created from non-finite value")]
    fn test_simtime_from_infinite_f64() {
        let _ = SimTime::from(f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "SimTime cannot be created from non-finite value")]
    fn test_simtime_from_nan_f64() {
        let _ = SimTime::from(f64::NAN);
    }
}
