//! Shared human-output helpers

use std::fmt;

use chrono::{Local, TimeZone};

/// Longest title shown in full in list rows
pub const LIST_TITLE_WIDTH: usize = 10;

/// Shorten a title for list rows: the first ten characters plus "..."
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > LIST_TITLE_WIDTH {
        let head: String = title.chars().take(LIST_TITLE_WIDTH).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

/// Render a millisecond timestamp as a British long date in local time,
/// e.g. "Friday, 16 October 2026, 09:30"
pub fn format_timestamp(millis: i64) -> String {
    format_timestamp_in(&Local, millis)
}

/// Day and hour are zero-padded: "Monday, 05 October 2026, 09:05"
pub fn format_timestamp_in<Tz>(tz: &Tz, millis: i64) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match tz.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%A, %d %B %Y, %H:%M").to_string(),
        None => format!("@{millis}"),
    }
}
