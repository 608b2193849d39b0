use crate::consts::{ISLAMIC_EPOCH, MAX_MONTH};
use crate::day_count::{ceil_div, floor_div, floor_mod};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Islamic";

/// A date in the arithmetic (tabular) Islamic calendar.
///
/// Odd months have 30 days and even months 29; Dhu al-Hijja gains a 30th
/// day in 11 of every 30 years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year}-{month:02}-{day:02} AH")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct IslamicDate {
    year: i32,
    month: u8,
    day: u8,
}

impl IslamicDate {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-12 or the
    /// day is past the end of the month.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let days = Self::days_in_month(year, month)?;
        check_field(CALENDAR, "day", day.into(), 1, days.into())?;
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

    pub const fn is_leap_year(year: i32) -> bool {
        floor_mod(11 * year as i64 + 14, 30) < 11
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-12.
    pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
        check_field(CALENDAR, "month", month.into(), 1, MAX_MONTH.into())?;
        if month % 2 == 1 || (month == MAX_MONTH && Self::is_leap_year(year)) {
            Ok(30)
        } else {
            Ok(29)
        }
    }
}

fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year);
    i64::from(day)
        + ceil_div(59 * (i64::from(month) - 1), 2)
        + (y - 1) * 354
        + floor_div(3 + 11 * y, 30)
        + ISLAMIC_EPOCH.day_number()
        - 1
}

impl CalendarDate for IslamicDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(to_day_number(self.year, self.month, self.day))
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        let year = crate::year_from_i64(floor_div(
            30 * (n - ISLAMIC_EPOCH.day_number()) + 10_646,
            10_631,
        ))?;
        let year_start = to_day_number(year, 1, 1);
        // Months average 29.5 days
        let month = (ceil_div(2 * (n - 29 - year_start), 59) + 1).min(MAX_MONTH.into()) as u8;
        let day_of_month = n - to_day_number(year, month, 1) + 1;
        Ok(Self {
            year,
            month,
            day: day_of_month as u8,
        })
    }
}

impl TryFrom<(i32, u8, u8)> for IslamicDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<IslamicDate> for (i32, u8, u8) {
    fn from(date: IslamicDate) -> Self {
        (date.year, date.month, date.day)
    }
}
