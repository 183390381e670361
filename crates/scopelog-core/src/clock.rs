//! Wall-clock timestamps for line headers.

use chrono::{DateTime, Local, TimeZone};

/// `YYYY-MM-DD HH:MM:SS`, independent of the process locale.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `instant` in its own offset using [`TIMESTAMP_FORMAT`].
pub fn format_timestamp<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, rendered for a line header.
pub fn local_timestamp() -> String {
    format_timestamp(&Local::now())
}
