//! Conversions between a continuous Julian day count and a dozen historical
//! and civil calendars.
//!
//! Every calendar converts only to and from [`DayCount`]; converting between
//! two calendars goes through the day count.
//!
//! ```
//! use calendar_hub::{CalendarDate, GregorianDate, HebrewDate, MayanLongCount};
//!
//! let day = GregorianDate::new(2000, 1, 1)?.to_day_count()?;
//! assert_eq!(day.get(), 2_451_544.5);
//!
//! let hebrew = HebrewDate::from_day_count(day)?;
//! assert_eq!((hebrew.year(), hebrew.month(), hebrew.day()), (5760, 10, 23));
//!
//! let long_count = MayanLongCount::from_day_count(day)?;
//! assert_eq!(long_count.to_string(), "12.19.6.15.2");
//! # Ok::<(), calendar_hub::CalendarError>(())
//! ```
//!
//! The French Republican and astronomical Persian calendars locate their new
//! year from the equinox; they use the built-in [`MeeusEphemeris`] unless an
//! [`EquinoxCalendar`] with another [`Ephemeris`] is supplied.

mod astro;
mod bahai;
mod consts;
mod day_count;
mod equinox;
mod french;
mod gregorian;
mod hebrew;
mod indian;
mod islamic;
mod iso;
mod julian;
mod mayan;
mod persian;
mod persian_astronomical;
mod prelude;
mod serial;
mod summary;

pub use astro::{Ephemeris, MeeusEphemeris, SeasonEvent};
pub use bahai::BahaiDate;
pub use consts::*;
pub use day_count::{DayCount, Direction, Weekday, amod, ceil_div, floor_div, floor_mod};
pub use equinox::{DayBoundary, EquinoxCalendar, EquinoxRule, EquinoxYear};
pub use french::FrenchRepublicanDate;
pub use gregorian::GregorianDate;
pub use hebrew::{HebrewDate, HebrewYearKind};
pub use indian::IndianCivilDate;
pub use islamic::IslamicDate;
pub use iso::{IsoOrdinalDate, IsoWeekDate};
pub use julian::JulianDate;
pub use mayan::{Haab, MayanLongCount, Tzolkin};
pub use persian::PersianDate;
pub use persian_astronomical::PersianAstronomicalDate;
pub use serial::SerialFormat;
pub use summary::CalendarSummary;

/// Error type for every fallible conversion in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// A date field lies outside its range for the given year.
    #[error("Invalid {calendar} {field}: {value} (must be {min}-{max})")]
    InvalidDate {
        calendar: &'static str,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The calendar numbers years ..., -1, 1, ... and has no year zero.
    #[error("The {calendar} calendar has no year 0")]
    NoYearZero { calendar: &'static str },

    /// A bounded year or month search did not settle.
    #[error("{search} search did not converge within {steps} steps")]
    ConvergenceFailure { search: &'static str, steps: u32 },

    /// A Hebrew year computed to a length outside the six legal values.
    #[error("Hebrew year {year} has invalid length {days} days")]
    InvalidYearLength { year: i32, days: i64 },

    /// A day count is not finite or lies outside the supported range.
    #[error("Day count {value} is not finite or outside ±{}", MAX_DAY_COUNT)]
    OutOfRange { value: f64 },

    /// A time of day field lies outside its range.
    #[error("Invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// An equinox rule or search setting is unusable.
    #[error("Invalid equinox calendar setting: {0}")]
    InvalidRule(String),
}

/// A date in one calendar, convertible to and from the shared day count.
pub trait CalendarDate: Sized {
    /// The midnight starting this date.
    ///
    /// # Errors
    /// Returns an error if the date cannot be placed on the day count, for
    /// example a complementary day the year does not have, or a year so
    /// distant the day count leaves its supported range.
    fn to_day_count(&self) -> Result<DayCount, CalendarError>;

    /// The date containing `day`.
    ///
    /// # Errors
    /// Returns an error when a bounded search fails to converge or the
    /// resulting year cannot be represented.
    fn from_day_count(day: DayCount) -> Result<Self, CalendarError>;
}

/// Checks `value` against the inclusive range `min..=max`.
pub(crate) fn check_field(
    calendar: &'static str,
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), CalendarError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CalendarError::InvalidDate {
            calendar,
            field,
            value,
            min,
            max,
        })
    }
}

/// Narrows a year computed in `i64` arithmetic.
pub(crate) fn year_from_i64(year: i64) -> Result<i32, CalendarError> {
    i32::try_from(year).map_err(|_| CalendarError::OutOfRange { value: year as f64 })
}
