use crate::astro::Ephemeris;
use crate::consts::MAX_MONTH;
use crate::equinox::EquinoxCalendar;
use crate::persian::{month_offset, split_year_day};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Persian astronomical";

/// A date in the astronomical Persian calendar.
///
/// Months follow the arithmetic Persian layout, but each year begins on the
/// day whose noon in Tehran is the first after the March equinox, and a year
/// is leap when it runs 366 days to the next such day. The two calendars
/// therefore disagree on some leap years.
///
/// Years before the era are numbered astronomically: year 0 precedes year 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year}-{month:02}-{day:02} AP")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct PersianAstronomicalDate {
    year: i32,
    month: u8,
    day: u8,
}

impl PersianAstronomicalDate {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` for a month or day out of range
    /// and any error of locating the year's equinoxes.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::new_with(year, month, day, &EquinoxCalendar::persian())
    }

    /// # Errors
    /// As [`Self::new`], with the length of Esfand decided by `calendar`.
    pub fn new_with<E: Ephemeris>(
        year: i32,
        month: u8,
        day: u8,
        calendar: &EquinoxCalendar<E>,
    ) -> Result<Self, CalendarError> {
        check_field(CALENDAR, "month", month.into(), 1, MAX_MONTH.into())?;
        let days = match month {
            1..=6 => 31,
            7..=11 => 30,
            _ => calendar.year_length(year)? - 336,
        };
        check_field(CALENDAR, "day", day.into(), 1, days)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Whether `year` runs 366 days between consecutive new years.
    ///
    /// # Errors
    /// Returns an error if the year's equinoxes cannot be located.
    pub fn is_leap_year(year: i32) -> Result<bool, CalendarError> {
        Self::is_leap_year_with(year, &EquinoxCalendar::persian())
    }

    /// # Errors
    /// As [`Self::is_leap_year`].
    pub fn is_leap_year_with<E: Ephemeris>(
        year: i32,
        calendar: &EquinoxCalendar<E>,
    ) -> Result<bool, CalendarError> {
        Ok(calendar.year_length(year)? > 365)
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` for 30 Esfand in a year that
    /// `calendar` makes common.
    pub fn to_day_count_with<E: Ephemeris>(
        &self,
        calendar: &EquinoxCalendar<E>,
    ) -> Result<DayCount, CalendarError> {
        let year = calendar.year(self.year)?;
        let offset = month_offset(self.month) + i64::from(self.day) - 1;
        if offset >= year.length() {
            return Err(CalendarError::InvalidDate {
                calendar: CALENDAR,
                field: "day",
                value: self.day.into(),
                min: 1,
                max: year.length() - 336,
            });
        }
        DayCount::from_day_number(year.start.day_number() + offset)
    }

    /// # Errors
    /// Returns `CalendarError::ConvergenceFailure` if the year cannot be
    /// bracketed within the calendar's step bound.
    pub fn from_day_count_with<E: Ephemeris>(
        day: DayCount,
        calendar: &EquinoxCalendar<E>,
    ) -> Result<Self, CalendarError> {
        let year = calendar.bracket(day)?;
        let (month, day) = split_year_day(day.day_number() - year.start.day_number() + 1);
        Ok(Self {
            year: year.year,
            month,
            day,
        })
    }
}

impl CalendarDate for PersianAstronomicalDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        self.to_day_count_with(&EquinoxCalendar::persian())
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        Self::from_day_count_with(day, &EquinoxCalendar::persian())
    }
}

impl TryFrom<(i32, u8, u8)> for PersianAstronomicalDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<PersianAstronomicalDate> for (i32, u8, u8) {
    fn from(date: PersianAstronomicalDate) -> Self {
        (date.year, date.month, date.day)
    }
}
