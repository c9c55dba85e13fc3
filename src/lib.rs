//! Next-occurrence calculator for cron schedule expressions.
#![deny(unsafe_code, missing_docs)]

//! This is a tiny crate, intended to:
//! - parse classic cron schedule fields: minutes, hours, days of month and months;
//! - find the earliest time, at or after a given one, which satisfies all the fields;
//! - generate series of such times.
//!
//! _This is not a cron jobs scheduler or runner._
//!
//! ## Cron schedule format
//!
//! Schedule expression consists of four whitespace-separated fields: minutes, hours, days of month and months.
//! Conventional fifth field (day of week) is accepted for compatibility and ignored.
//!
//! The table below describes valid values and patterns of each field:
//!
//! | Field        | Allowed values | Allowed special characters |
//! |--------------|----------------|----------------------------|
//! | Minutes      | 0-59           | * , - /                    |
//! | Hours        | 0-23           | * , - /                    |
//! | Day of Month | 1-31           | * , - /                    |
//! | Month        | 1-12           | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values, i.e. `1,7,12`; lists of ranges aren't supported;
//! - `-` - range of values, i.e. `0-15`;
//! - `/` - repeating values within the range, i.e. `*/12`, `30-59/2`.
//!
//! Events have minute precision and seconds of the reference time are ignored,
//! so the event may be earlier than the reference time within the same minute.
//!
//! Combinations of days and months which never happen (like `* * 30 2`) are rejected.
//!
//! ### Schedule with timezone
//! If `tz` feature is enabled, it's possible to prefix cron schedule with timezone, for example:
//! - `TZ=Europe/Paris 0 0 1 *`
//! - `TZ=EET 0 12 * *`
//!
//! ## How to use
//!
//! The main entity of the crate is a [`Schedule`] structure, which has basic methods:
//! - [new()](Schedule::new): constructor to parse and validate provided schedule;
//! - [upcoming()](Schedule::upcoming): returns [`Occurrence`] of the next schedule's event, starting from the provided timestamp;
//! - [next()](Schedule::next): the same as `upcoming`, formatted as `YYYY-MM-DD HH:MM:00`;
//! - [iter()](Schedule::iter): returns an `Iterator` which produces a series of events according to the schedule.
//!
//! ### Example with `next`
//! ```rust
//! use chrono::DateTime;
//! use cron_step::{Result, Schedule};
//!
//! fn next() -> Result<()> {
//!     let schedule = Schedule::new("0 0,12 1 */2")?;
//!     let now = DateTime::parse_from_rfc3339("2023-11-15T22:19:00Z").unwrap();
//!
//!     // Get the next event's time starting from now
//!     assert_eq!(schedule.next(&now), "2024-01-01 00:00:00");
//!
//!     Ok(())
//! }
//! # next().unwrap();
//! ```
//!
//! ### Example with `iter`
//! ```rust
//! use chrono::DateTime;
//! use cron_step::{Result, Schedule};
//!
//! fn iterator() -> Result<()> {
//!     let schedule = Schedule::new("*/8 * * *")?;
//!     let now = DateTime::parse_from_rfc3339("2023-11-15T22:19:00Z").unwrap();
//!
//!     // Get the next 10 events starting from now
//!     schedule.iter(&now).take(10).for_each(|t| println!("next: {t}"));
//!
//!     Ok(())
//! }
//! # iterator().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Schedule`] and [`Occurrence`].
//! * `tz`: enables support of cron [schedules with timezone](#schedule-with-timezone).

/// Crate specific Error implementation.
pub mod error;
mod field;
mod interval;
mod occurrence;
/// Cron schedule pattern parser and upcoming event calculator.
pub mod schedule;
mod utils;

// Re-export of public entities.
pub use error::CronError;
pub use field::{FieldUnit, FieldValue};
pub use interval::Interval;
pub use occurrence::Occurrence;
pub use schedule::Schedule;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
