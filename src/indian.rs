use crate::consts::{MAX_MONTH, SAKA_OFFSET, SAKA_YEAR_START};
use crate::gregorian::{self, GregorianDate};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "Indian Civil";

/// Days in Vaisakha through Bhadra
const LONG_MONTHS_DAYS: i64 = 5 * 31;
/// Days from 1 Vaisakha (always April 21) to the following January 1
const VAISAKHA_TO_JANUARY: i64 = 255;

/// A date in the Indian national (Saka) calendar.
///
/// The year starts on March 22, or March 21 when the Gregorian year is a leap
/// year, in which case Caitra gains its 31st day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year}-{month:02}-{day:02} Saka")]
#[serde(try_from = "(i32, u8, u8)", into = "(i32, u8, u8)")]
pub struct IndianCivilDate {
    year: i32,
    month: u8,
    day: u8,
}

impl IndianCivilDate {
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

    /// Follows the Gregorian year in which the Saka year begins
    pub const fn is_leap_year(year: i32) -> bool {
        gregorian::is_leap(year as i64 + SAKA_OFFSET as i64)
    }

    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-12.
    pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
        check_field(CALENDAR, "month", month.into(), 1, MAX_MONTH.into())?;
        Ok(match month {
            1 => caitra_days(year) as u8,
            2..=6 => 31,
            _ => 30,
        })
    }
}

const fn caitra_days(year: i32) -> i64 {
    if IndianCivilDate::is_leap_year(year) { 31 } else { 30 }
}

fn year_start(year: i32) -> Result<i64, CalendarError> {
    let gregorian_year = crate::year_from_i64(i64::from(year) + i64::from(SAKA_OFFSET))?;
    let day = if GregorianDate::is_leap_year(gregorian_year) { 21 } else { 22 };
    Ok(gregorian::to_day_number(gregorian_year, 3, day))
}

impl CalendarDate for IndianCivilDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        let start = year_start(self.year)?;
        let day = i64::from(self.day) - 1;
        let offset = if self.month == 1 {
            day
        } else {
            let month = i64::from(self.month);
            let long_months = (month - 2).min(5);
            let short_months = (month - 7).max(0);
            caitra_days(self.year) + 31 * long_months + 30 * short_months + day
        };
        DayCount::from_day_number(start + offset)
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let n = day.day_number();
        let (gregorian_year, _, _) = gregorian::from_day_number(n);
        let mut year = gregorian_year - SAKA_OFFSET;
        let mut year_day = n - gregorian::to_day_number(gregorian_year, 1, 1);

        if year_day < SAKA_YEAR_START {
            // January to the March start belongs to the previous Saka year
            year -= 1;
            year_day += caitra_days(year) + VAISAKHA_TO_JANUARY + SAKA_YEAR_START;
        }
        year_day -= SAKA_YEAR_START;

        let caitra = caitra_days(year);
        let (month, day) = if year_day < caitra {
            (1, year_day + 1)
        } else {
            let after_caitra = year_day - caitra;
            if after_caitra < LONG_MONTHS_DAYS {
                (after_caitra / 31 + 2, after_caitra % 31 + 1)
            } else {
                let rest = after_caitra - LONG_MONTHS_DAYS;
                (rest / 30 + 7, rest % 30 + 1)
            }
        };

        Ok(Self {
            year,
            month: month as u8,
            day: day as u8,
        })
    }
}

impl TryFrom<(i32, u8, u8)> for IndianCivilDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<IndianCivilDate> for (i32, u8, u8) {
    fn from(date: IndianCivilDate) -> Self {
        (date.year, date.month, date.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gregorian(year: i32, month: u8, day: u8) -> DayCount {
        GregorianDate::new(year, month, day)
            .unwrap()
            .to_day_count()
            .unwrap()
    }

    fn saka(day: DayCount) -> (i32, u8, u8) {
        IndianCivilDate::from_day_count(day).unwrap().into()
    }

    #[test]
    fn test_new_year() {
        // 2000 is a Gregorian leap year, so 1922 starts on March 21
        assert_eq!(saka(gregorian(2000, 3, 21)), (1922, 1, 1));
        assert_eq!(saka(gregorian(2000, 3, 20)), (1921, 12, 30));
        assert_eq!(saka(gregorian(2023, 3, 22)), (1945, 1, 1));
        assert_eq!(saka(gregorian(2023, 3, 21)), (1944, 12, 30));
        assert_eq!(
            IndianCivilDate::new(1945, 1, 1).unwrap().to_day_count().unwrap(),
            gregorian(2023, 3, 22)
        );
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(saka(gregorian(2000, 1, 1)), (1921, 10, 11));
        // Vaisakha always opens on April 21
        assert_eq!(saka(gregorian(2000, 4, 21)), (1922, 2, 1));
        assert_eq!(saka(gregorian(2001, 4, 21)), (1923, 2, 1));
        // Asvina opens on September 23
        assert_eq!(saka(gregorian(2001, 9, 23)), (1923, 7, 1));
    }

    #[test]
    fn test_caitra_length() {
        assert!(IndianCivilDate::is_leap_year(1922));
        assert!(!IndianCivilDate::is_leap_year(1923));
        assert!(IndianCivilDate::new(1922, 1, 31).is_ok());
        assert!(IndianCivilDate::new(1923, 1, 31).is_err());
        assert_eq!(IndianCivilDate::days_in_month(1923, 6).unwrap(), 31);
        assert_eq!(IndianCivilDate::days_in_month(1923, 7).unwrap(), 30);
        assert!(IndianCivilDate::new(1923, 12, 31).is_err());
        assert!(matches!(
            IndianCivilDate::days_in_month(1923, 13),
            Err(CalendarError::InvalidDate { field: "month", .. })
        ));
    }

    #[test]
    fn test_extreme_years() {
        // i32::MAX + 78 is not a Gregorian leap year
        assert!(!IndianCivilDate::is_leap_year(i32::MAX));
        let date = IndianCivilDate::new(i32::MAX, 1, 30).unwrap();
        assert!(matches!(
            date.to_day_count(),
            Err(CalendarError::OutOfRange { .. })
        ));
        let date = IndianCivilDate::new(i32::MIN, 12, 30).unwrap();
        assert!(matches!(
            date.to_day_count(),
            Err(CalendarError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        let start = gregorian(1995, 1, 1).day_number();
        for n in start..start + 10 * 366 {
            let day = DayCount::from_day_number(n).unwrap();
            let date = IndianCivilDate::from_day_count(day).unwrap();
            assert!(
                IndianCivilDate::new(date.year(), date.month(), date.day()).is_ok(),
                "{date}"
            );
            assert_eq!(date.to_day_count().unwrap(), day, "{date}");
        }
    }
}
