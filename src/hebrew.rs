//! The Hebrew lunisolar calendar.
//!
//! Months are numbered from Nisan = 1, so the civil year starts in the
//! middle of the count at Tishri = 7. Leap years insert Adar II as month 13.
//! The new year is the molad of Tishri pushed by the postponement rules.

use crate::consts::{HEBREW_EPOCH, HEBREW_YEAR_LENGTHS, MAX_SEARCH_STEPS};
use crate::day_count::{floor_div, floor_mod};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

const CALENDAR: &str = "Hebrew";

/// Month number of Tishri, the first month of the civil year
const TISHRI: u8 = 7;
const HESHVAN: u8 = 8;
const KISLEV: u8 = 9;
const ADAR: u8 = 12;

/// Parts (1/1080 hour) in a day
const PARTS_PER_DAY: i64 = 25_920;
/// Parts in a mean lunar month beyond 29 days
const MONTH_EXCESS_PARTS: i64 = 13_753;
/// Molad of Tishri AM 1 (BaHaRaD) in parts after the epoch
const FIRST_MOLAD_PARTS: i64 = 12_084;

/// A date in the Hebrew calendar, years counted Anno Mundi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{day} {month} {year} AM")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct HebrewDate {
    year: i32,
    month: u8,
    day: u8,
}

/// The six shapes a Hebrew year can take, by length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum HebrewYearKind {
    /// 353 days
    #[display(fmt = "common deficient")]
    CommonDeficient,
    /// 354 days
    #[display(fmt = "common regular")]
    CommonRegular,
    /// 355 days
    #[display(fmt = "common complete")]
    CommonComplete,
    /// 383 days
    #[display(fmt = "embolismic deficient")]
    EmbolismicDeficient,
    /// 384 days
    #[display(fmt = "embolismic regular")]
    EmbolismicRegular,
    /// 385 days
    #[display(fmt = "embolismic complete")]
    EmbolismicComplete,
}

impl HebrewYearKind {
    const ALL: [Self; 6] = [
        Self::CommonDeficient,
        Self::CommonRegular,
        Self::CommonComplete,
        Self::EmbolismicDeficient,
        Self::EmbolismicRegular,
        Self::EmbolismicComplete,
    ];

    /// The kind of a year with `days` days, if that is a legal length
    pub fn from_days(days: i64) -> Option<Self> {
        HEBREW_YEAR_LENGTHS
            .iter()
            .position(|&length| length == days)
            .map(|index| Self::ALL[index])
    }

    pub const fn days(self) -> u16 {
        HEBREW_YEAR_LENGTHS[self as usize] as u16
    }

    pub const fn is_embolismic(self) -> bool {
        self as usize >= 3
    }
}

impl HebrewDate {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` for a month the year does not
    /// have or a day past the end of the month, and
    /// `CalendarError::InvalidYearLength` if the year itself is malformed.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        check_field(
            CALENDAR,
            "month",
            month.into(),
            1,
            Self::months_in_year(year).into(),
        )?;
        check_field(
            CALENDAR,
            "day",
            day.into(),
            1,
            Self::days_in_month(year, month)?.into(),
        )?;
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

    /// Seven leap years in every 19-year cycle
    pub const fn is_leap_year(year: i32) -> bool {
        floor_mod(7 * year as i64 + 1, 19) < 7
    }

    pub const fn months_in_year(year: i32) -> u8 {
        if Self::is_leap_year(year) { 13 } else { 12 }
    }

    /// Days from 1 Tishri of `year` to 1 Tishri of the next year.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYearLength` if the length is not one of
    /// the six legal values.
    pub fn days_in_year(year: i32) -> Result<u16, CalendarError> {
        Ok(Self::year_kind(year)?.days())
    }

    /// # Errors
    /// Returns `CalendarError::InvalidYearLength` if the year is malformed.
    pub fn year_kind(year: i32) -> Result<HebrewYearKind, CalendarError> {
        let year_number = i64::from(year);
        let days = new_year(year_number + 1) - new_year(year_number);
        HebrewYearKind::from_days(days).ok_or_else(|| {
            warn!(year, days, "Hebrew year has an illegal length");
            CalendarError::InvalidYearLength { year, days }
        })
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` for a month the year does not
    /// have and `CalendarError::InvalidYearLength` if the year is malformed.
    pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
        check_field(
            CALENDAR,
            "month",
            month.into(),
            1,
            Self::months_in_year(year).into(),
        )?;
        Ok(month_days(year, month, Self::year_kind(year)?))
    }

    /// The midnight starting 1 Tishri of `year`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the year lies beyond the
    /// supported day count range.
    pub fn year_start(year: i32) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(new_year(year.into()))
    }
}

/// Days from the epoch to the molad of Tishri, postponed a day when it
/// would make 1 Tishri fall on Sunday, Wednesday or Friday.
fn elapsed_days(year: i64) -> i64 {
    let months = floor_div(235 * year - 234, 19);
    let parts = FIRST_MOLAD_PARTS + MONTH_EXCESS_PARTS * months;
    let days = 29 * months + floor_div(parts, PARTS_PER_DAY);
    if floor_mod(3 * (days + 1), 7) < 3 {
        days + 1
    } else {
        days
    }
}

/// Further postponement keeping the year and the one before it within the
/// legal lengths.
fn length_correction(year: i64) -> i64 {
    let last = elapsed_days(year - 1);
    let present = elapsed_days(year);
    let next = elapsed_days(year + 1);
    if next - present == 356 {
        2
    } else if present - last == 382 {
        1
    } else {
        0
    }
}

/// Day number of 1 Tishri
fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH.day_number() + elapsed_days(year) + length_correction(year) + 2
}

/// Heshvan is long only in complete years, Kislev short only in deficient
/// ones.
const fn month_days(year: i32, month: u8, kind: HebrewYearKind) -> u8 {
    let complete = matches!(
        kind,
        HebrewYearKind::CommonComplete | HebrewYearKind::EmbolismicComplete
    );
    let deficient = matches!(
        kind,
        HebrewYearKind::CommonDeficient | HebrewYearKind::EmbolismicDeficient
    );
    match month {
        2 | 4 | 6 | 10 | 13 => 29,
        ADAR if !HebrewDate::is_leap_year(year) => 29,
        HESHVAN if !complete => 29,
        KISLEV if deficient => 29,
        _ => 30,
    }
}

/// Months of `year` in calendar order from Tishri.
fn civil_months(year: i32) -> impl Iterator<Item = u8> {
    (TISHRI..=HebrewDate::months_in_year(year)).chain(1..TISHRI)
}

/// Walks from `estimate` to the year whose 1 Tishri is on or before day
/// number `n` and whose successor's is after it.
fn find_year(n: i64, estimate: i64, max_steps: u32) -> Result<i64, CalendarError> {
    let mut year = estimate;
    let mut steps = 0;
    loop {
        let start = new_year(year);
        let next = new_year(year + 1);
        trace!(year, start, next, "Hebrew year search");
        if n < start {
            year -= 1;
        } else if n >= next {
            year += 1;
        } else {
            return Ok(year);
        }
        steps += 1;
        if steps > max_steps {
            warn!(day = n, estimate, "Hebrew year search did not converge");
            return Err(CalendarError::ConvergenceFailure {
                search: "Hebrew year",
                steps: max_steps,
            });
        }
    }
}

fn to_day_number(year: i32, month: u8, day: u8, kind: HebrewYearKind) -> i64 {
    let before: i64 = civil_months(year)
        .take_while(|&m| m != month)
        .map(|m| i64::from(month_days(year, m, kind)))
        .sum();
    new_year(year.into()) + before + i64::from(day) - 1
}

impl CalendarDate for HebrewDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        let kind = Self::year_kind(self.year)?;
        DayCount::from_day_number(to_day_number(self.year, self.month, self.day, kind))
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        // Mean year of 35975351/98496 days
        let estimate = floor_div((n - HEBREW_EPOCH.day_number()) * 98_496, 35_975_351) - 1;
        let year = crate::year_from_i64(find_year(n, estimate, MAX_SEARCH_STEPS)?)?;

        let kind = HebrewDate::year_kind(year)?;
        let mut start = new_year(year.into());
        for month in civil_months(year) {
            let length = i64::from(month_days(year, month, kind));
            if n < start + length {
                return Ok(Self {
                    year,
                    month,
                    day: (n - start + 1) as u8,
                });
            }
            start += length;
        }
        // The year search guarantees n falls before the next 1 Tishri
        warn!(day = n, year, "Hebrew month search ran past the year");
        Err(CalendarError::ConvergenceFailure {
            search: "Hebrew month",
            steps: HebrewDate::months_in_year(year).into(),
        })
    }
}

impl TryFrom<(i32, u8, u8)> for HebrewDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<HebrewDate> for (i32, u8, u8) {
    fn from(date: HebrewDate) -> Self {
        (date.year, date.month, date.day)
    }
}
