use crate::{
    field::{Field, FieldUnit, Matcher},
    occurrence::Occurrence,
    utils, CronError, Result,
};
use chrono::{DateTime, NaiveDateTime, TimeZone};
#[cfg(feature = "tz")]
use chrono_tz::Tz;
use std::{fmt::Display, str::FromStr};
use tracing::{debug, trace, warn};

/// Any leap year, to get the longest February.
const LEAP_YEAR: i32 = 2000;
/// Upper bound of walks per event: enough to skip eight years of non-leap Februaries.
const MAX_WALKS: usize = 12 * 8 + 1;

/// Represents a cron schedule pattern with its methods.
///
/// For cron schedule clarification and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Schedule {
    pattern: String,
    minute: Matcher,
    hour: Matcher,
    day: Matcher,
    month: Matcher,
    #[cfg(feature = "tz")]
    tz: Option<Tz>,
}

impl Schedule {
    /// Parses and validates provided `pattern` and constructs [`Schedule`] instance.
    ///
    /// Alternative way to construct [`Schedule`] is to use one of `try_from` or `from_str` methods .
    ///
    /// Returns [`CronError`] in a case provided pattern is unparsable or has format errors.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        #[cfg_attr(not(feature = "tz"), allow(unused_mut))]
        let mut elements: Vec<&str> = pattern.split_whitespace().collect();
        #[cfg(feature = "tz")]
        let mut tz = None;

        // Parse and define TZ, if present
        #[cfg(feature = "tz")]
        if elements.len() >= 2 {
            if let Some((key, tz_str)) = elements[0].split_once('=') {
                if key.to_uppercase() == "TZ" {
                    if let Ok(tz_value) = Tz::from_str(tz_str) {
                        tz = Some(tz_value);
                        elements.remove(0);
                    } else {
                        return Err(CronError::InvalidTimeZone(tz_str.to_string()));
                    }
                }
            }
        }

        // Day of week isn't supported, so the fifth field is accepted and dropped.
        if elements.len() == 5 {
            if !["*", "?"].contains(&elements[4]) {
                warn!(pattern = %pattern, day_of_week = elements[4], "day of week field is ignored");
            }
        } else if elements.len() != 4 {
            return Err(CronError::InvalidSchedule(pattern));
        }

        let schedule = Self {
            minute: Matcher::parse(FieldUnit::Minute, elements[0])?,
            hour: Matcher::parse(FieldUnit::Hour, elements[1])?,
            day: Matcher::parse(FieldUnit::Day, elements[2])?,
            month: Matcher::parse(FieldUnit::Month, elements[3])?,
            #[cfg(feature = "tz")]
            tz,
            pattern,
        };

        // Validate days and months relationship, like `30 2`.
        let fires = (1..=12u32)
            .filter(|month| schedule.month.admits((*month).into()))
            .any(|month| (1..=utils::days_in_month(LEAP_YEAR, month)).any(|day| schedule.day.admits(day.into())));
        if !fires {
            return Err(CronError::InvalidSchedule(schedule.pattern));
        }

        Ok(schedule)
    }

    /// Original pattern text the schedule was constructed from.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns time of the upcoming cron event, starting from the provided `current` value (inclusively),
    /// with minute precision: seconds of `current` are ignored.
    ///
    /// If `tz` feature isn't enabled,
    /// this method uses wall-clock reading of `current` in its own timezone.
    ///
    /// If `tz` feature is enabled and [schedule uses timezone](crate#schedule-with-timezone),
    /// then `current` is converted into the schedule's timezone first,
    /// and the result is the wall-clock reading in that timezone.
    #[inline]
    pub fn upcoming<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> Occurrence {
        self.upcoming_naive(&self.local_reading(current))
    }

    /// Returns time of the upcoming cron event, starting from the provided wall-clock `current` (inclusively).
    #[inline]
    pub fn upcoming_naive(&self, current: &NaiveDateTime) -> Occurrence {
        self.resolve(Occurrence::from(current))
    }

    /// Same as [`upcoming()`](Schedule::upcoming), formatted as `YYYY-MM-DD HH:MM:00`.
    #[inline]
    pub fn next<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> String {
        self.upcoming(current).to_string()
    }

    /// Returns iterator of events starting from `current` (inclusively).
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> impl Iterator<Item = Occurrence> {
        let next = self.upcoming(current);
        ScheduleIterator {
            schedule: self.clone(),
            next,
        }
    }

    /// Consumes [`Schedule`] and returns iterator of events starting from `current` (inclusively).
    #[inline]
    pub fn into_iter<Tz: TimeZone>(self, current: &DateTime<Tz>) -> impl Iterator<Item = Occurrence> {
        let next = self.upcoming(current);
        ScheduleIterator { schedule: self, next }
    }

    #[cfg(not(feature = "tz"))]
    #[inline]
    fn local_reading<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> NaiveDateTime {
        current.naive_local()
    }

    #[cfg(feature = "tz")]
    fn local_reading<Tz: TimeZone>(&self, current: &DateTime<Tz>) -> NaiveDateTime {
        if let Some(schedule_tz) = &self.tz {
            current.with_timezone(schedule_tz).naive_local()
        } else {
            current.naive_local()
        }
    }

    /// Finds the earliest existing date and time at or after `current` which satisfies all fields.
    ///
    /// If the walk lands on a day which is beyond the month's length,
    /// there is nothing more in that month, so the walk starts over from the next month.
    fn resolve(&self, current: Occurrence) -> Occurrence {
        let mut result = self.walk(current);
        for _ in 1..MAX_WALKS {
            if result.to_naive().is_some() {
                break;
            }
            trace!(%result, "date doesn't exist, moving to the next month");
            result = self.walk(result.last_minute_of_month().successor());
        }

        debug!(pattern = %self.pattern, %current, %result, "upcoming event resolved");
        result
    }

    /// Finds the earliest reading at or after `current` which satisfies all fields.
    ///
    /// Fields are walked from minute to month. A field which can't find its value
    /// at or after the current one wraps and forces the coarser field one unit forward,
    /// and so on up the chain. Once the chain settles on a field which moved,
    /// all finer fields are reset to their minimal values.
    /// The year field is never stepped by itself and only absorbs the carry.
    fn walk(&self, current: Occurrence) -> Occurrence {
        let year = Matcher::any(FieldUnit::Year);
        let [minute, hour, day, month, year_value] = current.to_fields();
        let mut fields = [
            Field::new(FieldUnit::Minute, &self.minute, minute),
            Field::new(FieldUnit::Hour, &self.hour, hour),
            Field::new(FieldUnit::Day, &self.day, day),
            Field::new(FieldUnit::Month, &self.month, month),
            Field::new(FieldUnit::Year, &year, year_value),
        ];

        let steppable = fields.len() - 1;
        let mut index = 0;
        while index < steppable {
            fields[index].step();

            while fields[index].overflowed() && index + 1 < fields.len() {
                index += 1;
                let start = fields[index].value() + 1;
                fields[index].step_from(start);
            }

            if fields[index].needs_reset() {
                trace!(unit = %fields[index].unit(), "resetting finer fields");
                fields[..index].iter_mut().for_each(Field::reset);
            }

            index += 1;
        }

        Occurrence::from_fields(fields.map(|field| field.value()))
    }
}

/// Contains iterator state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScheduleIterator {
    schedule: Schedule,
    next: Occurrence,
}

impl Iterator for ScheduleIterator {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next;
        self.next = self.schedule.resolve(current.successor());
        Some(current)
    }
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.to_string()
    }
}

impl From<&Schedule> for String {
    fn from(value: &Schedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Schedule {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        #[cfg(feature = "tz")]
        if let Some(tz) = self.tz {
            write!(f, "TZ={} ", tz)?;
        }

        write!(f, "{} {} {} {}", self.minute, self.hour, self.day, self.month)
    }
}
