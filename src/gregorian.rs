use crate::consts::{
    DAYS_IN_MONTH, DAYS_PER_CENTURY, DAYS_PER_QUADRENNIUM, DAYS_PER_QUADRICENTENNIUM, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_EPOCH, MAX_MONTH,
};
use crate::day_count::{floor_div, floor_mod};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Gregorian";

/// A date in the proleptic Gregorian calendar.
///
/// Years are astronomical: 1 BC is year 0, 2 BC is year -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct GregorianDate {
    year: i32,
    month: u8,
    day: u8,
}

impl GregorianDate {
    /// Creates a Gregorian date, validating month and day for the year.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-12 or the
    /// day does not exist in that month.
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

    /// Divisible by 4, and either not divisible by 100 or divisible by 400
    pub const fn is_leap_year(year: i32) -> bool {
        is_leap(year as i64)
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-12.
    pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
        check_field(CALENDAR, "month", month.into(), 1, MAX_MONTH.into())?;
        if month == FEBRUARY && Self::is_leap_year(year) {
            Ok(FEBRUARY_DAYS_LEAP)
        } else {
            Ok(DAYS_IN_MONTH[usize::from(month)])
        }
    }

    /// Ordinal day within the year, 1 for January 1
    pub fn day_of_year(&self) -> u16 {
        let day = to_day_number(self.year, self.month, self.day);
        (day - to_day_number(self.year, 1, 1) + 1) as u16
    }
}

impl CalendarDate for GregorianDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(to_day_number(self.year, self.month, self.day))
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let (year, month, day) = from_day_number(day.day_number());
        Ok(Self { year, month, day })
    }
}

impl TryFrom<(i32, u8, u8)> for GregorianDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<GregorianDate> for (i32, u8, u8) {
    fn from(date: GregorianDate) -> Self {
        (date.year, date.month, date.day)
    }
}

/// Gregorian leap rule over a widened year, for calendars whose year offset
/// from the Gregorian one can leave the `i32` range.
pub(crate) const fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Julian day number of a Gregorian date. Fields are not validated; other
/// calendars anchor on dates such as March 20 or December 28 through this.
pub(crate) fn to_day_number(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - 1;
    let m = i64::from(month);
    let leap_adjustment = if month <= FEBRUARY {
        0
    } else if GregorianDate::is_leap_year(year) {
        -1
    } else {
        -2
    };
    GREGORIAN_EPOCH.day_number() - 1
        + 365 * y
        + floor_div(y, 4)
        - floor_div(y, 100)
        + floor_div(y, 400)
        + floor_div(367 * m - 362, 12)
        + leap_adjustment
        + i64::from(day)
}

/// Splits the days since the epoch into 400-, 100-, 4- and 1-year blocks,
/// then reads the month off the day of the year.
pub(crate) fn from_day_number(day: i64) -> (i32, u8, u8) {
    let since_epoch = day - GREGORIAN_EPOCH.day_number();
    let quadricent = floor_div(since_epoch, DAYS_PER_QUADRICENTENNIUM);
    let in_quadricent = floor_mod(since_epoch, DAYS_PER_QUADRICENTENNIUM);
    let cent = in_quadricent / DAYS_PER_CENTURY;
    let in_cent = in_quadricent % DAYS_PER_CENTURY;
    let quad = in_cent / DAYS_PER_QUADRENNIUM;
    let in_quad = in_cent % DAYS_PER_QUADRENNIUM;
    let year_index = in_quad / 365;

    let mut year = quadricent * 400 + cent * 100 + quad * 4 + year_index;
    // The last day of a leap cycle closes the previous year
    if cent != 4 && year_index != 4 {
        year += 1;
    }
    // Day counts are bounded by MAX_DAY_COUNT, so the year fits
    let year = year as i32;

    let year_day = day - to_day_number(year, 1, 1);
    let leap_adjustment = if day < to_day_number(year, 3, 1) {
        0
    } else if GregorianDate::is_leap_year(year) {
        1
    } else {
        2
    };
    let month = floor_div((year_day + leap_adjustment) * 12 + 373, 367) as u8;
    let day_of_month = (day - to_day_number(year, month, 1) + 1) as u8;
    (year, month, day_of_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd(year: i32, month: u8, day: u8) -> f64 {
        GregorianDate::new(year, month, day)
            .unwrap()
            .to_day_count()
            .unwrap()
            .get()
    }

    #[test]
    fn test_known_day_counts() {
        assert_eq!(jd(2000, 1, 1), 2_451_544.5);
        assert_eq!(jd(1970, 1, 1), 2_440_587.5);
        assert_eq!(jd(1, 1, 1), GREGORIAN_EPOCH.get());
        assert_eq!(jd(1582, 10, 15), 2_299_160.5);
        assert_eq!(jd(0, 1, 1), 1_721_059.5);
        assert_eq!(jd(-4713, 11, 24), -0.5);
    }

    #[test]
    fn test_from_day_count() {
        for (value, expected) in [
            (2_451_544.5, (2000, 1, 1)),
            (2_451_544.0, (1999, 12, 31)),
            (2_451_603.5, (2000, 2, 29)),
            (2_451_604.5, (2000, 3, 1)),
            (2_415_078.5, (1900, 2, 28)),
            (2_415_079.5, (1900, 3, 1)),
            (2_299_160.5, (1582, 10, 15)),
            (1_721_424.5, (0, 12, 31)),
        ] {
            let date = GregorianDate::from_day_count(DayCount::new(value).unwrap()).unwrap();
            assert_eq!(<(i32, u8, u8)>::from(date), expected, "day count {value}");
        }
    }

    #[test]
    fn test_round_trip_across_cycles() {
        // Spans negative years and several 400-year cycles
        let start = jd(-801, 1, 1) as i64;
        let end = jd(801, 12, 31) as i64;
        let mut previous: Option<GregorianDate> = None;
        for n in (start..=end).step_by(7) {
            let day = DayCount::from_day_number(n).unwrap();
            let date = GregorianDate::from_day_count(day).unwrap();
            let back = date.to_day_count().unwrap();
            assert_eq!(back.day_number(), n, "{date}");
            if let Some(prev) = previous {
                assert!(prev < date);
            }
            previous = Some(date);
        }
    }

    #[test]
    fn test_every_day_of_leap_cycle_round_trips() {
        let start = jd(1600, 1, 1) as i64;
        for n in start..start + 146_097 {
            let day = DayCount::from_day_number(n).unwrap();
            let date = GregorianDate::from_day_count(day).unwrap();
            assert!(GregorianDate::new(date.year(), date.month(), date.day()).is_ok());
            assert_eq!(date.to_day_count().unwrap().day_number(), n);
        }
    }

    #[test]
    fn test_leap_density() {
        for start in [-400, 1, 1600, 1601, 1999] {
            let leaps = (start..start + 400)
                .filter(|&y| GregorianDate::is_leap_year(y))
                .count();
            assert_eq!(leaps, 97, "400 years from {start}");
        }
        assert!(GregorianDate::is_leap_year(2000));
        assert!(!GregorianDate::is_leap_year(1900));
        assert!(GregorianDate::is_leap_year(0));
        assert!(GregorianDate::is_leap_year(-4));
        assert!(!GregorianDate::is_leap_year(-100));
    }

    #[test]
    fn test_new_validates() {
        assert!(GregorianDate::new(2024, 2, 29).is_ok());
        assert!(matches!(
            GregorianDate::new(2023, 2, 29),
            Err(CalendarError::InvalidDate {
                field: "day",
                value: 29,
                max: 28,
                ..
            })
        ));
        assert!(GregorianDate::new(2023, 13, 1).is_err());
        assert!(GregorianDate::new(2023, 0, 1).is_err());
        assert!(GregorianDate::new(2023, 4, 0).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(GregorianDate::days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(GregorianDate::days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(GregorianDate::days_in_month(2023, 12).unwrap(), 31);
        assert!(matches!(
            GregorianDate::days_in_month(2023, 13),
            Err(CalendarError::InvalidDate {
                field: "month",
                value: 13,
                max: 12,
                ..
            })
        ));
        assert!(GregorianDate::days_in_month(2023, 0).is_err());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(GregorianDate::new(2023, 12, 31).unwrap().day_of_year(), 365);
        assert_eq!(GregorianDate::new(2024, 12, 31).unwrap().day_of_year(), 366);
        assert_eq!(GregorianDate::new(2024, 3, 1).unwrap().day_of_year(), 61);
    }

    #[test]
    fn test_display_and_serde() {
        let date = GregorianDate::new(1991, 8, 15).unwrap();
        assert_eq!(date.to_string(), "1991-08-15");
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "[1991,8,15]");
        let parsed: GregorianDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
        assert!(serde_json::from_str::<GregorianDate>("[1991,2,30]").is_err());
    }
}
