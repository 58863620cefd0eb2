use chrono::{DateTime, NaiveDate, TimeZone};

/// This is the standard way of converting a date to a string in habitmap.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalizes a wall clock moment to the calendar date used as a series key.
/// This happens exactly once, at the cli boundary; everything past it works
/// with plain calendar dates.
pub fn normalize_to_date<Tz: TimeZone>(moment: DateTime<Tz>) -> NaiveDate {
    moment.date_naive()
}
