use crate::consts::BAHAI_EPOCH;
use crate::day_count::{floor_div, floor_mod};
use crate::gregorian;
use crate::persian;
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Bahá'í";

/// Years in a Váhid
const YEARS_PER_VAHID: i64 = 19;
/// Years in a Kull-i-Shay (19 Váhids)
const YEARS_PER_KULL_I_SHAY: i64 = 361;
const AYYAM_I_HA: u8 = 19;
const ALA: u8 = 20;
/// Last era year whose leap status follows the Gregorian rule
const LAST_GREGORIAN_LEAP_YEAR: i64 = 172;
/// Persian year in which Bahá'í era year 0 begins
const PERSIAN_YEAR_OFFSET: i64 = 1222;
/// Gregorian year of [`BAHAI_EPOCH`]
const EPOCH_YEAR: i64 = 1844;

/// A date in the Bahá'í (Badíʿ) calendar.
///
/// The era is grouped into Kull-i-Shay of 19 Váhids of 19 years each. A year
/// has eighteen months of 19 days, the intercalary days of Ayyám-i-Há
/// (month 19), and the closing month of ʿAlá (month 20). Years begin on
/// Gregorian March 21.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{major}.{cycle}.{year}.{month}.{day}")]
#[serde(
    try_from = "(i32, u8, u8, u8, u8)",
    into = "(i32, u8, u8, u8, u8)"
)]
pub struct BahaiDate {
    major: i32,
    cycle: u8,
    year: u8,
    month: u8,
    day: u8,
}

impl BahaiDate {
    /// Month number of the intercalary days
    pub const AYYAM_I_HA: u8 = AYYAM_I_HA;
    /// Month number of ʿAlá, the month of fasting
    pub const ALA: u8 = ALA;

    /// # Errors
    /// Returns `CalendarError::InvalidDate` for a Váhid, year or month out of
    /// range, or a day past the end of the month.
    pub fn new(
        major: i32,
        cycle: u8,
        year: u8,
        month: u8,
        day: u8,
    ) -> Result<Self, CalendarError> {
        check_field(CALENDAR, "vahid", cycle.into(), 1, 19)?;
        check_field(CALENDAR, "year", year.into(), 1, 19)?;
        check_field(CALENDAR, "month", month.into(), 1, ALA.into())?;
        let gregorian_year = gregorian_year(major, cycle, year);
        check_field(
            CALENDAR,
            "day",
            day.into(),
            1,
            days_in_month(gregorian_year, month).into(),
        )?;
        Ok(Self {
            major,
            cycle,
            year,
            month,
            day,
        })
    }

    /// Kull-i-Shay
    pub const fn major(&self) -> i32 {
        self.major
    }

    /// Váhid within the Kull-i-Shay
    pub const fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Year within the Váhid
    pub const fn year(&self) -> u8 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Years since the start of the era, 1 for the year beginning 1844-03-21.
    pub const fn era_year(&self) -> i64 {
        era_year(self.major, self.cycle, self.year)
    }

    /// Reported leap status of an era year: the Gregorian rule through era
    /// year 172, the arithmetic Persian rule after. Conversions keep the
    /// Gregorian anchoring either way.
    pub const fn is_leap_year(era_year: i64) -> bool {
        if era_year <= LAST_GREGORIAN_LEAP_YEAR {
            gregorian::is_leap(era_year + EPOCH_YEAR)
        } else {
            persian::is_leap(era_year + PERSIAN_YEAR_OFFSET)
        }
    }
}

const fn era_year(major: i32, cycle: u8, year: u8) -> i64 {
    YEARS_PER_KULL_I_SHAY * (major as i64 - 1)
        + YEARS_PER_VAHID * (cycle as i64 - 1)
        + year as i64
}

/// Gregorian year in which the Bahá'í year begins
const fn gregorian_year(major: i32, cycle: u8, year: u8) -> i64 {
    era_year(major, cycle, year) - 1 + EPOCH_YEAR
}

/// Ayyám-i-Há lasts into the following Gregorian year's February.
const fn days_in_month(gregorian_year: i64, month: u8) -> u8 {
    match month {
        AYYAM_I_HA if gregorian::is_leap(gregorian_year + 1) => 5,
        AYYAM_I_HA => 4,
        _ => 19,
    }
}

fn to_day_number(
    major: i32,
    cycle: u8,
    year: u8,
    month: u8,
    day: u8,
) -> Result<i64, CalendarError> {
    let gregorian_year = gregorian_year(major, cycle, year);
    let intercalary = if month != ALA {
        0
    } else if gregorian::is_leap(gregorian_year + 1) {
        -14
    } else {
        -15
    };
    let new_year_eve = gregorian::to_day_number(crate::year_from_i64(gregorian_year)?, 3, 20);
    Ok(new_year_eve + 19 * (i64::from(month) - 1) + intercalary + i64::from(day))
}

impl CalendarDate for BahaiDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(to_day_number(
            self.major, self.cycle, self.year, self.month, self.day,
        )?)
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        let (gregorian_year, _, _) = gregorian::from_day_number(n);
        // Days up to March 20 close the Bahá'í year begun the previous March
        let before_new_year = n <= gregorian::to_day_number(gregorian_year, 3, 20);
        let years_since_epoch =
            i64::from(gregorian_year) - EPOCH_YEAR - i64::from(before_new_year);

        let major = crate::year_from_i64(floor_div(years_since_epoch, YEARS_PER_KULL_I_SHAY) + 1)?;
        let in_kull_i_shay = floor_mod(years_since_epoch, YEARS_PER_KULL_I_SHAY);
        let cycle = (in_kull_i_shay / YEARS_PER_VAHID + 1) as u8;
        let year = (in_kull_i_shay % YEARS_PER_VAHID + 1) as u8;

        let month = if n >= to_day_number(major, cycle, year, ALA, 1)? {
            ALA
        } else {
            ((n - to_day_number(major, cycle, year, 1, 1)?) / 19 + 1) as u8
        };
        let day = n - to_day_number(major, cycle, year, month, 1)? + 1;
        Ok(Self {
            major,
            cycle,
            year,
            month,
            day: day as u8,
        })
    }
}

impl TryFrom<(i32, u8, u8, u8, u8)> for BahaiDate {
    type Error = CalendarError;

    fn try_from(
        (major, cycle, year, month, day): (i32, u8, u8, u8, u8),
    ) -> Result<Self, Self::Error> {
        Self::new(major, cycle, year, month, day)
    }
}

impl From<BahaiDate> for (i32, u8, u8, u8, u8) {
    fn from(date: BahaiDate) -> Self {
        (date.major, date.cycle, date.year, date.month, date.day)
    }
}
