use std::fmt;

use crate::error::ScriptError;

/// Requested runtime, rendered as `H:MM:00`
///
/// Hours are not padded. Minutes are the fractional hour truncated to whole minutes, so
/// `10.5` becomes `10:30:00` and anything finer than a minute is dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Walltime {
    hours: u64,
    minutes: u64,
}

impl Walltime {
    pub fn from_hours(hours: f64) -> Result<Walltime, ScriptError> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(ScriptError::InvalidArgument(format!("walltime must be a positive number of hours, got {hours}")));
        }
        let whole = hours.trunc();
        if whole >= u64::MAX as f64 {
            return Err(ScriptError::InvalidArgument(format!("walltime of {hours} hours is too long")));
        }
        let minutes = ((hours - whole) * 60.0) as u64;
        Ok(Walltime { hours: whole as u64, minutes })
    }
}

impl fmt::Display for Walltime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{:02}:00", self.hours, self.minutes)
    }
}
