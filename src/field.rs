use crate::{interval::Interval, utils, CronError, Result};
use std::fmt::Display;
use tracing::trace;

/// Numeric type of every field value.
pub type FieldValue = i64;

const MIN_YEAR: FieldValue = i32::MIN as FieldValue;
const MAX_YEAR: FieldValue = i32::MAX as FieldValue;

/// Position of the field in the schedule, from the finest to the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldUnit {
    /// Minute of the hour, `0-59`.
    Minute = 0,
    /// Hour of the day, `0-23`.
    Hour = 1,
    /// Day of the month, `1-31`.
    Day = 2,
    /// Month of the year, `1-12`.
    Month = 3,
    /// Calendar year, proleptic and signed; always matches.
    Year = 4,
}

impl FieldUnit {
    /// Legal interval of values for this unit.
    pub fn legal_range(&self) -> Interval {
        let (min, max) = match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::Day => (1, 31),
            Self::Month => (1, 12),
            Self::Year => (MIN_YEAR, MAX_YEAR),
        };
        Interval::new_unchecked(min, max)
    }
}

impl Display for FieldUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        };
        write!(f, "{name}")
    }
}

/// Parsed and validated pattern of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Matcher {
    Exact(FieldValue),
    // ascending, without duplicates
    List(Vec<FieldValue>),
    // wildcard is a range over the whole legal interval
    Range {
        bounds: Interval,
        wildcard: bool,
        step: Option<FieldValue>,
    },
}

impl Matcher {
    /// Classifies `input` as list, range or exact value, and validates it against the unit's legal interval.
    pub(crate) fn parse(unit: FieldUnit, input: &str) -> Result<Self> {
        let legal = unit.legal_range();

        if input.contains(',') {
            let mut values = input
                .split(',')
                .map(utils::parse_number)
                .collect::<Result<Vec<_>>>()?;
            values.sort_unstable();
            values.dedup();

            let span = Interval::from(values[0], values[values.len() - 1])?;
            if !legal.contains_range(&span) {
                return Err(CronError::OutOfRange(format!(
                    "list {input} is outside of {unit} range {legal}"
                )));
            }

            Ok(Self::List(values))
        } else if input.contains('-') || input.contains('*') {
            Self::parse_range(unit, input)
        } else {
            let value = utils::parse_number(input)?;
            if !legal.contains_value(value) {
                return Err(CronError::OutOfRange(format!(
                    "value {input} is outside of {unit} range {legal}"
                )));
            }

            Ok(Self::Exact(value))
        }
    }

    fn parse_range(unit: FieldUnit, input: &str) -> Result<Self> {
        let legal = unit.legal_range();

        let (base, step) = match input.split_once('/') {
            Some((base, step)) => (base, Some(step)),
            None => (input, None),
        };

        let step = match step {
            Some(step) if step.contains('/') => return Err(CronError::RangeMalformed(input.to_owned())),
            Some(step) => match utils::parse_number(step)? {
                0 => return Err(CronError::RangeMalformed(input.to_owned())),
                step => Some(step),
            },
            None => None,
        };

        if base == "*" {
            return Ok(Self::Range {
                bounds: legal,
                wildcard: true,
                step,
            });
        } else if base.contains('*') {
            return Err(CronError::RangeMalformed(input.to_owned()));
        }

        let bounds = base
            .split('-')
            .map(utils::parse_number)
            .collect::<Result<Vec<_>>>()?;
        let [lo, hi] = bounds.as_slice() else {
            return Err(CronError::RangeMalformed(input.to_owned()));
        };

        let declared = Interval::from(*lo, *hi)?;
        if !legal.contains_range(&declared) {
            return Err(CronError::OutOfRange(format!(
                "range {declared} is outside of {unit} range {legal}"
            )));
        }

        Ok(Self::Range {
            bounds: Interval::union(&[legal, declared])?,
            wildcard: false,
            step,
        })
    }

    /// Returns `true` if `value` satisfies the pattern.
    pub(crate) fn admits(&self, value: FieldValue) -> bool {
        match self {
            Matcher::Exact(exact) => *exact == value,
            Matcher::List(values) => values.contains(&value),
            Matcher::Range { bounds, step, .. } => {
                bounds.contains_value(value) && step.map_or(true, |step| (value - bounds.min()) % step == 0)
            }
        }
    }

    /// Wildcard over the whole legal interval of the `unit`.
    pub(crate) fn any(unit: FieldUnit) -> Self {
        Self::Range {
            bounds: unit.legal_range(),
            wildcard: true,
            step: None,
        }
    }
}

impl Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Exact(value) => write!(f, "{value}"),
            Matcher::List(values) => {
                let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
                write!(f, "{values}")
            }
            Matcher::Range { bounds, wildcard, step } => {
                if *wildcard {
                    write!(f, "*")?;
                } else {
                    write!(f, "{bounds}")?;
                }
                if let Some(step) = step {
                    write!(f, "/{step}")?;
                }
                Ok(())
            }
        }
    }
}

/// Per-call state of a single schedule field: the current value and carry signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field<'a> {
    unit: FieldUnit,
    matcher: &'a Matcher,
    value: FieldValue,
    overflowed: bool,
    needs_reset: bool,
}

impl<'a> Field<'a> {
    pub(crate) fn new(unit: FieldUnit, matcher: &'a Matcher, value: FieldValue) -> Self {
        Self {
            unit,
            matcher,
            value,
            overflowed: false,
            needs_reset: false,
        }
    }

    #[inline]
    pub(crate) fn unit(&self) -> FieldUnit {
        self.unit
    }

    #[inline]
    pub(crate) fn value(&self) -> FieldValue {
        self.value
    }

    /// The last step ran past the end of the field's domain, so the coarser field must advance.
    #[inline]
    pub(crate) fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The last step moved the value, so values of all finer fields are stale.
    #[inline]
    pub(crate) fn needs_reset(&self) -> bool {
        self.needs_reset
    }

    /// Steps to the first admissible value starting from the current one.
    #[inline]
    pub(crate) fn step(&mut self) {
        self.step_from(self.value);
    }

    /// Steps to the first admissible value at or after `start`,
    /// wrapping to the minimal one (and raising overflow) if there is none.
    pub(crate) fn step_from(&mut self, start: FieldValue) {
        match self.matcher {
            Matcher::Exact(value) => {
                let value = *value;
                if start == value {
                    self.needs_reset = self.value != value;
                    self.overflowed = false;
                } else {
                    self.needs_reset = true;
                    self.overflowed = start > value;
                }
                self.value = value;
            }
            Matcher::List(values) => {
                if start == self.value && values.contains(&start) {
                    self.needs_reset = false;
                    self.overflowed = false;
                } else if let Some(next) = values.iter().find(|v| **v >= start) {
                    self.value = *next;
                    self.needs_reset = true;
                    self.overflowed = false;
                } else {
                    self.value = values[0];
                    self.needs_reset = true;
                    self.overflowed = true;
                }
            }
            Matcher::Range { bounds, step, .. } => {
                if self.matcher.admits(start) {
                    self.needs_reset = start > self.value;
                    self.value = start;
                    self.overflowed = false;
                } else {
                    let mut next = if start < bounds.min() { bounds.min() } else { start + 1 };
                    if let Some(step) = step {
                        let shift = (next - bounds.min()) % step;
                        if shift != 0 {
                            next += step - shift;
                        }
                    }

                    self.overflowed = next > bounds.max();
                    self.value = if self.overflowed { bounds.min() } else { next };
                    self.needs_reset = true;
                }
            }
        }

        trace!(
            unit = %self.unit,
            pattern = %self.matcher,
            start,
            value = self.value,
            overflowed = self.overflowed,
            needs_reset = self.needs_reset,
            "field stepped"
        );
    }

    /// Sets the value to the pattern's minimal one, regardless of the current value.
    pub(crate) fn reset(&mut self) {
        self.value = match self.matcher {
            Matcher::Exact(value) => *value,
            Matcher::List(values) => values[0],
            Matcher::Range { bounds, .. } => bounds.min(),
        };
    }
}
