//! Named time periods selectable on the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HOUR_SECS: i64 = 3_600;
pub const DAY_SECS: i64 = 24 * HOUR_SECS;
pub const WEEK_SECS: i64 = 7 * DAY_SECS;
pub const MONTH_SECS: i64 = 30 * DAY_SECS;
pub const QUARTER_SECS: i64 = 90 * DAY_SECS;
pub const YEAR_SECS: i64 = 365 * DAY_SECS;

/// Trailing window size for re-aggregation.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// Error returned when a period name is not one of the known periods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown time period '{0}'. Use day, week, month, quarter, or year.")]
pub struct ParsePeriodError(pub String);

impl TimePeriod {
    pub const ALL: [TimePeriod; 5] = [
        TimePeriod::Day,
        TimePeriod::Week,
        TimePeriod::Month,
        TimePeriod::Quarter,
        TimePeriod::Year,
    ];

    /// Window length in seconds.
    pub fn duration_secs(&self) -> i64 {
        match self {
            TimePeriod::Day => DAY_SECS,
            TimePeriod::Week => WEEK_SECS,
            TimePeriod::Month => MONTH_SECS,
            TimePeriod::Quarter => QUARTER_SECS,
            TimePeriod::Year => YEAR_SECS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Quarter => "quarter",
            TimePeriod::Year => "year",
        }
    }

    /// strftime pattern for x-axis tick labels at this zoom level.
    pub fn tick_format(&self) -> &'static str {
        match self {
            TimePeriod::Day => "%H:%M",
            TimePeriod::Week => "%a %H:%M",
            TimePeriod::Month => "%d %b",
            TimePeriod::Quarter => "%b %d",
            TimePeriod::Year => "%b",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(TimePeriod::Day),
            "week" => Ok(TimePeriod::Week),
            "month" => Ok(TimePeriod::Month),
            "quarter" => Ok(TimePeriod::Quarter),
            "year" => Ok(TimePeriod::Year),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}
