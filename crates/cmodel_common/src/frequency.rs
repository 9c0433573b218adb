//! Clock frequencies with unit parsing, used to derive the harness clock period.

use std::fmt;
use std::str::FromStr;

/// Femtoseconds in one second; simulation time is kept in femtoseconds.
pub const FS_PER_SECOND: u64 = 1_000_000_000_000_000;

/// Unit suffixes accepted by [`Frequency::from_str`], largest first.
const UNITS: [(&str, f64); 4] = [
    ("ghz", 1_000_000_000.0),
    ("mhz", 1_000_000.0),
    ("khz", 1_000.0),
    ("hz", 1.0),
];

/// A clock frequency stored in Hertz.
///
/// Parses `"100MHz"`, `"12.5 kHz"`, `"1GHz"` or a bare number of Hertz.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Frequency(f64);

impl Frequency {
    /// Creates a frequency from a value in Hertz.
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Returns the clock period in femtoseconds, rounded to the nearest fs.
    ///
    /// Returns `None` for non-finite or non-positive frequencies and for
    /// frequencies so high that the period rounds to zero.
    pub fn period_fs(&self) -> Option<u64> {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return None;
        }
        let period = (FS_PER_SECOND as f64 / self.0).round();
        if period < 1.0 || period > u64::MAX as f64 {
            None
        } else {
            Some(period as u64)
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (suffix, scale) = match self.0 {
            hz if hz >= 1_000_000_000.0 => ("GHz", 1_000_000_000.0),
            hz if hz >= 1_000_000.0 => ("MHz", 1_000_000.0),
            hz if hz >= 1_000.0 => ("KHz", 1_000.0),
            _ => ("Hz", 1.0),
        };
        write!(f, "{}{suffix}", self.0 / scale)
    }
}

/// A string that is not a valid frequency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (number, scale) = UNITS
            .iter()
            .find_map(|(suffix, scale)| lower.strip_suffix(suffix).map(|n| (n, *scale)))
            .unwrap_or((lower.as_str(), 1.0));

        let value: f64 = number.trim().parse().map_err(|_| err())?;
        Ok(Frequency(value * scale))
    }
}
