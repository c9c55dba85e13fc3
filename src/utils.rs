/// Common utility functions.
use crate::{field::FieldValue, CronError, Result};

/// Converts string of decimal digits into unsigned number.
///
/// Signs, spaces and empty input are [`CronError::NotANumber`],
/// well-formed numbers which don't fit into `u32` are [`CronError::OutOfRange`].
pub(crate) fn parse_number(input: &str) -> Result<FieldValue> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CronError::NotANumber(input.to_owned()));
    }

    input
        .parse::<u32>()
        .map(FieldValue::from)
        .map_err(|_| CronError::OutOfRange(format!("value {input} is too large")))
}

/// Returns `true` if provided year is leap.
#[inline]
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns number of days in specified month.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 0 || month > 12 {
        panic!("Invalid month: {month}");
    }

    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!(),
    }
}
