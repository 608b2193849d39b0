use crate::astro::Ephemeris;
use crate::equinox::EquinoxCalendar;
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const CALENDAR: &str = "French Republican";

/// Month number of the complementary days (sansculottides)
const COMPLEMENTARY: u8 = 13;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_DECADE: i64 = 10;

/// A date in the French Republican calendar.
///
/// Twelve months of three ten-day décades are followed by five complementary
/// days, six in a sextile year. The complementary days form month 13, which
/// has a single décade. Each year begins on the day of the September equinox
/// at Paris, so conversions locate the equinox through an
/// [`EquinoxCalendar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "an {year} {month:02}-{decade}-{day:02}")]
#[serde(try_from = "(i32, u8, u8, u8)", into = "(i32, u8, u8, u8)")]
pub struct FrenchRepublicanDate {
    year: i32,
    month: u8,
    decade: u8,
    day: u8,
}

impl FrenchRepublicanDate {
    /// Month number of the complementary days
    pub const COMPLEMENTARY_DAYS: u8 = COMPLEMENTARY;

    /// Builds a date, checking the sixth complementary day against the
    /// Paris equinoxes of the built-in ephemeris.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` for a field out of range and any
    /// error of locating the year's equinoxes.
    pub fn new(year: i32, month: u8, decade: u8, day: u8) -> Result<Self, CalendarError> {
        Self::new_with(year, month, decade, day, &EquinoxCalendar::french_republican())
    }

    /// # Errors
    /// As [`Self::new`], with sextile years decided by `calendar`.
    pub fn new_with<E: Ephemeris>(
        year: i32,
        month: u8,
        decade: u8,
        day: u8,
        calendar: &EquinoxCalendar<E>,
    ) -> Result<Self, CalendarError> {
        check_field(CALENDAR, "month", month.into(), 1, COMPLEMENTARY.into())?;
        if month == COMPLEMENTARY {
            check_field(CALENDAR, "decade", decade.into(), 1, 1)?;
            let days = calendar.year_length(year)? - 360;
            check_field(CALENDAR, "day", day.into(), 1, days)?;
        } else {
            check_field(CALENDAR, "decade", decade.into(), 1, 3)?;
            check_field(CALENDAR, "day", day.into(), 1, DAYS_PER_DECADE)?;
        }
        Ok(Self {
            year,
            month,
            decade,
            day,
        })
    }

    /// Year of the Republic, an I beginning 1792-09-22
    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn decade(&self) -> u8 {
        self.decade
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Whether `year` is sextile, with six complementary days.
    ///
    /// # Errors
    /// Returns an error if the year's equinoxes cannot be located.
    pub fn is_leap_year(year: i32) -> Result<bool, CalendarError> {
        Self::is_leap_year_with(year, &EquinoxCalendar::french_republican())
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
    /// Returns `CalendarError::InvalidDate` if `calendar` gives the year no
    /// sixth complementary day for this date to fall on.
    pub fn to_day_count_with<E: Ephemeris>(
        &self,
        calendar: &EquinoxCalendar<E>,
    ) -> Result<DayCount, CalendarError> {
        let year = calendar.year(self.year)?;
        let offset = DAYS_PER_MONTH * (i64::from(self.month) - 1)
            + DAYS_PER_DECADE * (i64::from(self.decade) - 1)
            + i64::from(self.day)
            - 1;
        if offset >= year.length() {
            return Err(CalendarError::InvalidDate {
                calendar: CALENDAR,
                field: "day",
                value: self.day.into(),
                min: 1,
                max: year.length() - 360,
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
        let elapsed = day.day_number() - year.start.day_number();
        let in_month = elapsed % DAYS_PER_MONTH;
        Ok(Self {
            year: year.year,
            month: (elapsed / DAYS_PER_MONTH + 1) as u8,
            decade: (in_month / DAYS_PER_DECADE + 1) as u8,
            day: (in_month % DAYS_PER_DECADE + 1) as u8,
        })
    }
}

impl CalendarDate for FrenchRepublicanDate {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        self.to_day_count_with(&EquinoxCalendar::french_republican())
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        Self::from_day_count_with(day, &EquinoxCalendar::french_republican())
    }
}

impl TryFrom<(i32, u8, u8, u8)> for FrenchRepublicanDate {
    type Error = CalendarError;

    fn try_from((year, month, decade, day): (i32, u8, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, decade, day)
    }
}

impl From<FrenchRepublicanDate> for (i32, u8, u8, u8) {
    fn from(date: FrenchRepublicanDate) -> Self {
        (date.year, date.month, date.decade, date.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GregorianDate;
    use crate::consts::FRENCH_REPUBLICAN_EPOCH;

    fn french(year: i32, month: u8, day: u8) -> (i32, u8, u8, u8) {
        let day = GregorianDate::new(year, month, day)
            .unwrap()
            .to_day_count()
            .unwrap();
        FrenchRepublicanDate::from_day_count(day).unwrap().into()
    }

    #[test]
    fn test_epoch() {
        let epoch = FrenchRepublicanDate::new(1, 1, 1, 1).unwrap();
        assert_eq!(epoch.to_day_count().unwrap(), FRENCH_REPUBLICAN_EPOCH);
        assert_eq!(french(1792, 9, 22), (1, 1, 1, 1));
        assert_eq!(epoch.to_string(), "an 1 01-1-01");
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(french(1793, 9, 21), (1, 13, 1, 5));
        assert_eq!(french(1793, 9, 22), (2, 1, 1, 1));
        // 18 Brumaire an VIII
        assert_eq!(french(1799, 11, 9), (8, 2, 2, 8));
        assert_eq!(french(1805, 12, 31), (14, 4, 1, 10));
        assert_eq!(french(1806, 1, 1), (14, 4, 2, 1));
        assert_eq!(french(2000, 1, 1), (208, 4, 2, 1));
    }

    #[test]
    fn test_sextile_years() {
        let sextile: Vec<i32> = (1..=20)
            .filter(|&year| FrenchRepublicanDate::is_leap_year(year).unwrap())
            .collect();
        assert_eq!(sextile, vec![3, 7, 11, 15, 20]);
    }

    #[test]
    fn test_complementary_days() {
        assert_eq!(french(1795, 9, 22), (3, 13, 1, 6));
        assert_eq!(french(1795, 9, 23), (4, 1, 1, 1));
        assert!(FrenchRepublicanDate::new(3, 13, 1, 6).is_ok());
        assert!(matches!(
            FrenchRepublicanDate::new(4, 13, 1, 6),
            Err(CalendarError::InvalidDate { field: "day", max: 5, .. })
        ));
        assert!(FrenchRepublicanDate::new(4, 13, 2, 1).is_err());
        assert!(FrenchRepublicanDate::new(4, 12, 3, 11).is_err());
        assert!(FrenchRepublicanDate::new(4, 14, 1, 1).is_err());
    }

    #[test]
    fn test_round_trip() {
        let calendar = EquinoxCalendar::french_republican();
        let start = FRENCH_REPUBLICAN_EPOCH.day_number() - 400;
        for n in (start..start + 365 * 30).step_by(7) {
            let day = DayCount::from_day_number(n).unwrap();
            let date = FrenchRepublicanDate::from_day_count_with(day, &calendar).unwrap();
            let (year, month, decade, d) = date.into();
            assert!(FrenchRepublicanDate::new_with(year, month, decade, d, &calendar).is_ok());
            assert_eq!(date.to_day_count_with(&calendar).unwrap(), day, "{date}");
        }
    }

    #[test]
    fn test_serde() {
        let date = FrenchRepublicanDate::new(8, 2, 2, 8).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "[8,2,2,8]");
        assert_eq!(serde_json::from_str::<FrenchRepublicanDate>(&json).unwrap(), date);
        assert!(serde_json::from_str::<FrenchRepublicanDate>("[4,13,1,6]").is_err());
    }
}
