use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeWindowError {
    #[error("missing trailing 'm' unit in time window '{0}'")]
    MissingUnit(String),
    #[error("time window '{0}' is not a whole number of minutes")]
    NotANumber(String),
    #[error("time window '{0}' must be at least one minute")]
    Zero(String),
}

/// Monitor schedule interval, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeWindow(u32);

impl TimeWindow {
    /// Builds a window from a minute count.
    ///
    /// # Errors
    ///
    /// Returns `TimeWindowError::Zero` when `minutes` is zero.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeWindowError> {
        if minutes == 0 {
            return Err(TimeWindowError::Zero(format!("{minutes}m")));
        }
        Ok(Self(minutes))
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TimeWindow {
    type Error = TimeWindowError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<TimeWindow> for u32 {
    fn from(window: TimeWindow) -> Self {
        window.0
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = TimeWindowError;

    /// Parses the textual `"<n>m"` form, e.g. `"15m"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('m')
            .ok_or_else(|| TimeWindowError::MissingUnit(s.to_string()))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeWindowError::NotANumber(s.to_string()));
        }

        let minutes: u32 = digits
            .parse()
            .map_err(|_| TimeWindowError::NotANumber(s.to_string()))?;

        if minutes == 0 {
            return Err(TimeWindowError::Zero(s.to_string()));
        }
        Ok(Self(minutes))
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}
