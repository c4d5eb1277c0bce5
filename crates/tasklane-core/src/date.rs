//! Calendar date validation for task deadlines.

use time::{Date, Month};

time::serde::format_description!(deadline_format, Date, "[year]-[month]-[day]");

/// Serde adapter for `Option<Date>` written as `YYYY-MM-DD` or `null`.
pub mod optional_deadline {
    pub use super::deadline_format::option::{deserialize, serialize};
}

/// Check that `input` is a real calendar date written as `YYYY-MM-DD`.
///
/// Dates that only exist after overflow normalization (for example
/// `2024-02-30`) are rejected.
#[must_use]
pub fn is_valid_date(input: &str) -> bool {
    parse_deadline(input).is_some()
}

/// Parse a `YYYY-MM-DD` string into a [`Date`], rejecting malformed or
/// non-existent dates.
#[must_use]
pub fn parse_deadline(input: &str) -> Option<Date> {
    let (year, month, day) = split_components(input)?;
    let month_value = u8::try_from(month).ok()?;
    let day_value = u8::try_from(day).ok()?;
    let date = Date::from_calendar_date(year, Month::try_from(month_value).ok()?, day_value).ok()?;

    let round_trips =
        date.year() == year && u32::from(u8::from(date.month())) == month && u32::from(date.day()) == day;
    round_trips.then_some(date)
}

/// Render a date in the canonical deadline format.
#[must_use]
pub fn format_deadline(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn split_components(input: &str) -> Option<(i32, u32, u32)> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year = digits(&input[0..4])?;
    let month = digits(&input[5..7])?;
    let day = digits(&input[8..10])?;
    Some((i32::try_from(year).ok()?, month, day))
}

fn digits(part: &str) -> Option<u32> {
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
