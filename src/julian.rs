use crate::consts::{DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, MAX_MONTH};
use crate::day_count::{floor_div, floor_mod};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Julian";

/// A date in the Julian (Roman) calendar.
///
/// Years follow historical numbering: 1 BC is year -1 and there is no year 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct JulianDate {
    year: i32,
    month: u8,
    day: u8,
}

impl JulianDate {
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

    /// Every fourth year; with no year 0, the BC leap years are 1, 5, 9, ... BC
    pub const fn is_leap_year(year: i32) -> bool {
        let expected = if year > 0 { 0 } else { 3 };
        floor_mod(year as i64, 4) == expected
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
}

// Meeus, Astronomical Algorithms, ch. 7, in exact integer form:
// floor(365.25 x) = floor(1461 x / 4), floor(30.6001 x) = floor(306001 x / 10000).

impl CalendarDate for JulianDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        let mut year = i64::from(self.year);
        if year < 1 {
            year += 1;
        }
        let mut month = i64::from(self.month);
        if month <= 2 {
            year -= 1;
            month += 12;
        }
        let day = floor_div(1461 * (year + 4716), 4)
            + floor_div(306_001 * (month + 1), 10_000)
            + i64::from(self.day)
            - 1524;
        DayCount::from_day_number(day)
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let b = day.day_number() + 1524;
        let c = floor_div(100 * b - 12_210, 36_525);
        let d = floor_div(1461 * c, 4);
        let e = floor_div(10_000 * (b - d), 306_001);

        let month = if e < 14 { e - 1 } else { e - 13 };
        let mut year = if month > 2 { c - 4716 } else { c - 4715 };
        let day_of_month = b - d - floor_div(306_001 * e, 10_000);
        // Back from zero-based to historical year numbering
        if year < 1 {
            year -= 1;
        }

        Ok(Self {
            year: crate::year_from_i64(year)?,
            month: month as u8,
            day: day_of_month as u8,
        })
    }
}

impl TryFrom<(i32, u8, u8)> for JulianDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<JulianDate> for (i32, u8, u8) {
    fn from(date: JulianDate) -> Self {
        (date.year, date.month, date.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JULIAN_EPOCH;

    fn jd(year: i32, month: u8, day: u8) -> f64 {
        JulianDate::new(year, month, day)
            .unwrap()
            .to_day_count()
            .unwrap()
            .get()
    }

    #[test]
    fn test_known_day_counts() {
        assert_eq!(jd(1, 1, 1), JULIAN_EPOCH.get());
        // Day before the Gregorian reform
        assert_eq!(jd(1582, 10, 4), 2_299_159.5);
        assert_eq!(jd(-4713, 1, 1), -0.5);
        // 2000-01-01 Gregorian
        assert_eq!(jd(1999, 12, 19), 2_451_544.5);
    }

    #[test]
    fn test_no_year_zero_across_epoch() {
        assert_eq!(jd(1, 1, 1) - jd(-1, 12, 31), 1.0);
        let date = JulianDate::from_day_count(DayCount::new(jd(1, 1, 1) - 1.0).unwrap()).unwrap();
        assert_eq!(<(i32, u8, u8)>::from(date), (-1, 12, 31));
        assert!(matches!(
            JulianDate::new(0, 1, 1),
            Err(CalendarError::NoYearZero { .. })
        ));
    }

    #[test]
    fn test_round_trip_near_epoch() {
        let start = jd(-10, 1, 1) as i64 - 1;
        for n in start..start + 20 * 366 {
            let date = JulianDate::from_day_count(DayCount::from_day_number(n).unwrap()).unwrap();
            assert_ne!(date.year(), 0);
            assert!(
                JulianDate::new(date.year(), date.month(), date.day()).is_ok(),
                "{date}"
            );
            assert_eq!(date.to_day_count().unwrap().day_number(), n, "{date}");
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(JulianDate::is_leap_year(1900));
        assert!(JulianDate::is_leap_year(4));
        assert!(!JulianDate::is_leap_year(1));
        assert!(JulianDate::is_leap_year(-1));
        assert!(JulianDate::is_leap_year(-5));
        assert!(!JulianDate::is_leap_year(-4));
        assert!(JulianDate::new(-1, 2, 29).is_ok());
        assert!(JulianDate::new(-4, 2, 29).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(JulianDate::days_in_month(1900, 2).unwrap(), 29);
        assert_eq!(JulianDate::days_in_month(1901, 2).unwrap(), 28);
        assert!(matches!(
            JulianDate::days_in_month(1900, 13),
            Err(CalendarError::InvalidDate {
                field: "month",
                max: 12,
                ..
            })
        ));
        assert!(JulianDate::days_in_month(1900, 0).is_err());
    }

    #[test]
    fn test_feb_29_in_leap_bc_year() {
        let day = JulianDate::new(-1, 2, 29).unwrap().to_day_count().unwrap();
        let back = JulianDate::from_day_count(day).unwrap();
        assert_eq!(<(i32, u8, u8)>::from(back), (-1, 2, 29));
    }
}
