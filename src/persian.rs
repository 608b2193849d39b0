use crate::consts::{MAX_MONTH, PERSIAN_CYCLE_DAYS, PERSIAN_CYCLE_YEARS, PERSIAN_EPOCH};
use crate::day_count::{ceil_div, floor_div, floor_mod};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Persian";

/// Year from which the 2820-year grand cycles are counted
const CYCLE_BASE_YEAR: i64 = 474;

/// A date in the arithmetic Persian (Solar Hijri) calendar, whose leap years
/// follow a 2820-year grand cycle.
///
/// Years are numbered ..., -1, 1, ...; there is no year 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year}-{month:02}-{day:02} AP")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct PersianDate {
    year: i32,
    month: u8,
    day: u8,
}

impl PersianDate {
    /// # Errors
    /// Returns `CalendarError::NoYearZero` for year 0 and
    /// `CalendarError::InvalidDate` for a month or day out of range.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if year == 0 {
            return Err(CalendarError::NoYearZero { calendar: CALENDAR });
        }
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
        is_leap(year as i64)
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-12.
    pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
        check_field(CALENDAR, "month", month.into(), 1, MAX_MONTH.into())?;
        Ok(match month {
            1..=6 => 31,
            7..=11 => 30,
            _ if Self::is_leap_year(year) => 30,
            _ => 29,
        })
    }
}

/// Leap rule over a widened year number.
pub(crate) const fn is_leap(year: i64) -> bool {
    let (_, cycle_year) = cycle_position(year);
    floor_mod((cycle_year + 38) * 682, 2816) < 682
}

/// Years since the cycle base and the year's place in its grand cycle,
/// numbered 474 to 3293.
const fn cycle_position(year: i64) -> (i64, i64) {
    let since_base = year - if year >= 0 { CYCLE_BASE_YEAR } else { CYCLE_BASE_YEAR - 1 };
    (
        since_base,
        CYCLE_BASE_YEAR + floor_mod(since_base, PERSIAN_CYCLE_YEARS),
    )
}

/// Days from 1 Farvardin to the first of `month`: six months of 31 days,
/// then months of 30.
pub(crate) const fn month_offset(month: u8) -> i64 {
    let month = month as i64;
    if month <= 7 {
        (month - 1) * 31
    } else {
        (month - 1) * 30 + 6
    }
}

/// Month and day for a one-based day of the year.
pub(crate) const fn split_year_day(year_day: i64) -> (u8, u8) {
    let month = if year_day <= 186 {
        ceil_div(year_day, 31)
    } else {
        ceil_div(year_day - 6, 30)
    };
    (month as u8, (year_day - month_offset(month as u8)) as u8)
}

fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    let (since_base, cycle_year) = cycle_position(i64::from(year));
    i64::from(day)
        + month_offset(month)
        + floor_div(cycle_year * 682 - 110, 2816)
        + (cycle_year - 1) * 365
        + floor_div(since_base, PERSIAN_CYCLE_YEARS) * PERSIAN_CYCLE_DAYS
        + PERSIAN_EPOCH.day_number()
        - 1
}

impl CalendarDate for PersianDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(to_day_number(self.year, self.month, self.day))
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        let since_cycle_base = n - to_day_number(475, 1, 1);
        let cycle = floor_div(since_cycle_base, PERSIAN_CYCLE_DAYS);
        let cycle_day = floor_mod(since_cycle_base, PERSIAN_CYCLE_DAYS);

        let year_in_cycle = if cycle_day == PERSIAN_CYCLE_DAYS - 1 {
            // The formula below is one short on the last day of a grand cycle
            PERSIAN_CYCLE_YEARS
        } else {
            let blocks = cycle_day / 366;
            let rest = cycle_day % 366;
            floor_div(2134 * blocks + 2816 * rest + 2815, 1_028_522) + blocks + 1
        };

        let mut year = year_in_cycle + PERSIAN_CYCLE_YEARS * cycle + CYCLE_BASE_YEAR;
        if year <= 0 {
            year -= 1;
        }
        let year = crate::year_from_i64(year)?;
        let (month, day) = split_year_day(n - to_day_number(year, 1, 1) + 1);
        Ok(Self { year, month, day })
    }
}

impl TryFrom<(i32, u8, u8)> for PersianDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<PersianDate> for (i32, u8, u8) {
    fn from(date: PersianDate) -> Self {
        (date.year, date.month, date.day)
    }
}
