use chrono::{DateTime, Utc};

use super::period::TimePeriod;

/// Convert simulation seconds to a UTC datetime (simulation epoch = Unix epoch).
pub fn to_datetime(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Tick label for a timestamp at the given period's zoom level.
pub fn format_tick(timestamp: i64, period: TimePeriod) -> String {
    to_datetime(timestamp)
        .format(period.tick_format())
        .to_string()
}

/// Convert seconds to fractional hours.
pub fn secs_to_hours(secs: f64) -> qtty::Hours {
    qtty::Hours::new(secs / 3600.0)
}
