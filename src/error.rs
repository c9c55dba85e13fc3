use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Schedule expression has wrong number of fields or is empty.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
    /// Interval upper bound isn't greater than lower one, or intersection of intervals is empty.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// Part of the pattern which should be an integer can't be parsed.
    #[error("not a number: {0}")]
    NotANumber(String),
    /// Value, list or range is outside of the unit's legal interval.
    #[error("out of range: {0}")]
    OutOfRange(String),
    /// Range pattern doesn't consist of exactly two bounds and an optional positive step.
    #[error("malformed range: {0}")]
    RangeMalformed(String),
    /// Unknown time zone in the `TZ=` prefix.
    #[cfg(feature = "tz")]
    #[error("invalid time zone: {0}")]
    InvalidTimeZone(String),
}
