use crate::{field::FieldValue, utils};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt::Display;

/// Calendar reading at minute granularity: the schedule's resolved event or a reference instant.
///
/// Displayed as `YYYY-MM-DD HH:MM:00`.
///
/// Events produced by [`Schedule`](crate::Schedule) always exist in the calendar,
/// so [`to_naive()`](Occurrence::to_naive) returns `Some` for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence {
    // field order gives chronological `Ord`
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl Occurrence {
    pub(crate) fn from_fields(values: [FieldValue; 5]) -> Self {
        let [minute, hour, day, month, year] = values;
        Self {
            year: year as i32,
            month: month as u32,
            day: day as u32,
            hour: hour as u32,
            minute: minute as u32,
        }
    }

    pub(crate) fn to_fields(self) -> [FieldValue; 5] {
        [
            self.minute.into(),
            self.hour.into(),
            self.day.into(),
            self.month.into(),
            self.year.into(),
        ]
    }

    /// Year.
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, `1-12`.
    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day of month, `1-31`.
    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Hour, `0-23`.
    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute, `0-59`.
    #[inline]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Converts into [`NaiveDateTime`] with zero seconds.
    ///
    /// Returns `None` if the date doesn't exist in the calendar.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(self.hour, self.minute, 0)
    }

    /// Returns the reading one minute later.
    ///
    /// Day overflow respects the month length, so the successor of a non-existent date
    /// is the first day of the next month.
    pub fn successor(&self) -> Self {
        let mut next = *self;
        next.inc_minute();
        next
    }

    /// Returns the last minute of the same month.
    pub(crate) fn last_minute_of_month(&self) -> Self {
        Self {
            day: utils::days_in_month(self.year, self.month),
            hour: 23,
            minute: 59,
            ..*self
        }
    }

    /// Increments current minute and carries into the hour.
    fn inc_minute(&mut self) {
        if self.minute < 59 {
            self.minute += 1;
        } else {
            self.minute = 0;
            self.inc_hour();
        }
    }

    /// Increments current hour and carries into the day.
    fn inc_hour(&mut self) {
        if self.hour < 23 {
            self.hour += 1;
        } else {
            self.hour = 0;
            self.inc_day();
        }
    }

    /// Increments current day of month and carries into the month.
    fn inc_day(&mut self) {
        if self.day < utils::days_in_month(self.year, self.month) {
            self.day += 1;
        } else {
            self.day = 1;
            self.inc_month();
        }
    }

    /// Increments current month and carries into the year.
    fn inc_month(&mut self) {
        if self.month < 12 {
            self.month += 1;
        } else {
            self.month = 1;
            self.year = self.year.saturating_add(1);
        }
    }
}

impl From<&NaiveDateTime> for Occurrence {
    /// Truncates seconds and everything below.
    fn from(value: &NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
        }
    }
}

impl From<NaiveDateTime> for Occurrence {
    fn from(value: NaiveDateTime) -> Self {
        Self::from(&value)
    }
}

impl Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "-{:02}-{:02} {:02}:{:02}:00", self.month, self.day, self.hour, self.minute)
    }
}
