use crate::{field::FieldValue, CronError, Result};
use std::fmt::Display;

/// Closed numeric range `min..=max` with `max > min`.
///
/// The only way to get an instance is [`Interval::from`], which validates bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    min: FieldValue,
    max: FieldValue,
}

impl Interval {
    /// Constructs interval, returns [`CronError::InvalidRange`] if `max <= min`.
    pub fn from(min: FieldValue, max: FieldValue) -> Result<Self> {
        if max <= min {
            return Err(CronError::InvalidRange(format!("{min}-{max}")));
        }

        Ok(Self { min, max })
    }

    /// Caller is responsible to ensure that `max > min`.
    #[inline]
    pub(crate) const fn new_unchecked(min: FieldValue, max: FieldValue) -> Self {
        Self { min, max }
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn min(&self) -> FieldValue {
        self.min
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn max(&self) -> FieldValue {
        self.max
    }

    /// Returns `true` if `value` lies within the interval.
    #[inline]
    pub fn contains_value(&self, value: FieldValue) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `true` if `other` is fully nested into this interval.
    #[inline]
    pub fn contains_range(&self, other: &Interval) -> bool {
        self.min <= other.min && self.max >= other.max
    }

    /// Combines all `ranges` into the interval which is covered by each of them,
    /// i.e. `(max of mins, min of maxs)`.
    ///
    /// Despite its name this is an intersection.
    /// Returns [`CronError::InvalidRange`] if the result is empty or `ranges` is empty.
    pub fn union(ranges: &[Interval]) -> Result<Self> {
        let min = ranges.iter().map(|r| r.min).max();
        let max = ranges.iter().map(|r| r.max).min();

        match (min, max) {
            (Some(min), Some(max)) => Self::from(min, max),
            _ => Err(CronError::InvalidRange(String::from("empty set of ranges"))),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
