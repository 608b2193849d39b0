//! ISO 8601 week dates and ordinal dates, both derived from the Gregorian
//! calendar.

use crate::day_count::{floor_div, floor_mod};
use crate::gregorian::{self, GregorianDate};
use crate::{CalendarDate, CalendarError, DayCount, Weekday, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "ISO week";

/// An ISO 8601 week date: week-numbering year, week 1-53 and weekday 1-7
/// (Monday = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year:04}-W{week:02}-{weekday}")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct IsoWeekDate {
    year: i32,
    week: u8,
    weekday: u8,
}

impl IsoWeekDate {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the week does not exist in the
    /// year or the weekday is not 1-7.
    pub fn new(year: i32, week: u8, weekday: u8) -> Result<Self, CalendarError> {
        check_field(
            CALENDAR,
            "week",
            week.into(),
            1,
            Self::weeks_in_year(year).into(),
        )?;
        check_field(CALENDAR, "weekday", weekday.into(), 1, 7)?;
        Ok(Self {
            year,
            week,
            weekday,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn week(&self) -> u8 {
        self.week
    }

    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    /// 53 when the year starts or ends on a Thursday, otherwise 52
    pub fn weeks_in_year(year: i32) -> u8 {
        let first = weekday_of(gregorian::to_day_number(year, 1, 1));
        let last = weekday_of(gregorian::to_day_number(year, 12, 31));
        if first == Weekday::Thursday || last == Weekday::Thursday {
            53
        } else {
            52
        }
    }
}

fn weekday_of(day: i64) -> Weekday {
    Weekday::from_index(floor_mod(day + 1, 7) as u8)
}

/// Day number of the Monday opening week 1 of `year`: the weeks are counted
/// from the Sunday before December 28 of the previous year.
fn week_one_monday(year: i32) -> i64 {
    week_day_number(year, 1, 1)
}

fn week_day_number(year: i32, week: u8, weekday: u8) -> i64 {
    // December 28 of the previous year, four days before January 1
    let dec_28 = (gregorian::to_day_number(year, 1, 1) - 4) as f64 - 0.5;
    let sunday = DayCount::new_unchecked(dec_28).previous_weekday(Weekday::Sunday);
    sunday.day_number() + 7 * i64::from(week) + i64::from(weekday)
}

impl CalendarDate for IsoWeekDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(week_day_number(self.year, self.week, self.weekday))
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        // The week-numbering year is the Gregorian year of this week's Thursday
        let (mut year, _, _) = gregorian::from_day_number(n - 3);
        if n >= week_one_monday(year + 1) {
            year += 1;
        }
        let week = floor_div(n - week_one_monday(year), 7) + 1;
        Ok(Self {
            year,
            week: week as u8,
            weekday: day.weekday().iso_number(),
        })
    }
}

impl TryFrom<(i32, u8, u8)> for IsoWeekDate {
    type Error = CalendarError;

    fn try_from((year, week, weekday): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, week, weekday)
    }
}

impl From<IsoWeekDate> for (i32, u8, u8) {
    fn from(date: IsoWeekDate) -> Self {
        (date.year, date.week, date.weekday)
    }
}

/// An ISO 8601 ordinal date: Gregorian year and day of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year:04}-{ordinal:03}")]
#[serde(try_from = "(i32, u16)", into = "(i32, u16)")]
pub struct IsoOrdinalDate {
    year: i32,
    ordinal: u16,
}

impl IsoOrdinalDate {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the ordinal is 0 or past the
    /// end of the year.
    pub fn new(year: i32, ordinal: u16) -> Result<Self, CalendarError> {
        let days = if GregorianDate::is_leap_year(year) { 366 } else { 365 };
        check_field("ISO ordinal", "day", ordinal.into(), 1, days)?;
        Ok(Self { year, ordinal })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn ordinal(&self) -> u16 {
        self.ordinal
    }
}

impl CalendarDate for IsoOrdinalDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(
            gregorian::to_day_number(self.year, 1, 1) + i64::from(self.ordinal) - 1,
        )
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        let (year, _, _) = gregorian::from_day_number(n);
        let ordinal = n - gregorian::to_day_number(year, 1, 1) + 1;
        Ok(Self {
            year,
            ordinal: ordinal as u16,
        })
    }
}

impl TryFrom<(i32, u16)> for IsoOrdinalDate {
    type Error = CalendarError;

    fn try_from((year, ordinal): (i32, u16)) -> Result<Self, Self::Error> {
        Self::new(year, ordinal)
    }
}

impl From<IsoOrdinalDate> for (i32, u16) {
    fn from(date: IsoOrdinalDate) -> Self {
        (date.year, date.ordinal)
    }
}
