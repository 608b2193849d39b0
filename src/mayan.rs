//! The Mayan Long Count and the two cycles recorded alongside it, the
//! 365-day Haab and the 260-day Tzolkin.
//!
//! The Long Count converts both ways. A Haab or Tzolkin position recurs
//! every cycle, so those only convert from a day count, plus a reverse
//! lookup of the latest matching day.

use crate::consts::{HAAB_DAYS, MAYAN_EPOCH, MAYAN_RADIX, TZOLKIN_DAYS};
use crate::day_count::{amod, floor_div, floor_mod};
use crate::{CalendarDate, CalendarError, DayCount, check_field, prelude::*};
use serde::{Deserialize, Serialize};

const HAAB_MONTHS: [&str; 19] = [
    "Pop", "Uo", "Zip", "Zotz", "Tzec", "Xul", "Yaxkin", "Mol", "Chen", "Yax", "Zac", "Ceh", "Mac",
    "Kankin", "Muan", "Pax", "Kayab", "Cumku", "Uayeb",
];

const TZOLKIN_NAMES: [&str; 20] = [
    "Imix", "Ik", "Akbal", "Kan", "Chicchan", "Cimi", "Manik", "Lamat", "Muluc", "Oc", "Chuen",
    "Eb", "Ben", "Ix", "Men", "Cib", "Caban", "Etznab", "Cauac", "Ahau",
];

/// Haab position of the Long Count epoch, 8 Cumku
const HAAB_EPOCH_OFFSET: i64 = 8 + (18 - 1) * 20;

fn days_since_epoch(day: DayCount) -> i64 {
    day.day_number() - MAYAN_EPOCH.day_number()
}

/// A Mayan Long Count date `baktun.katun.tun.uinal.kin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{baktun}.{katun}.{tun}.{uinal}.{kin}")]
#[serde(try_from = "(i32, u8, u8, u8, u8)", into = "(i32, u8, u8, u8, u8)")]
pub struct MayanLongCount {
    baktun: i32,
    katun: u8,
    tun: u8,
    uinal: u8,
    kin: u8,
}

impl MayanLongCount {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if a place exceeds its radix.
    pub fn new(baktun: i32, katun: u8, tun: u8, uinal: u8, kin: u8) -> Result<Self, CalendarError> {
        const CALENDAR: &str = "Mayan long count";
        check_field(CALENDAR, "katun", katun.into(), 0, 19)?;
        check_field(CALENDAR, "tun", tun.into(), 0, 19)?;
        check_field(CALENDAR, "uinal", uinal.into(), 0, 17)?;
        check_field(CALENDAR, "kin", kin.into(), 0, 19)?;
        Ok(Self {
            baktun,
            katun,
            tun,
            uinal,
            kin,
        })
    }

    pub const fn baktun(&self) -> i32 {
        self.baktun
    }

    pub const fn katun(&self) -> u8 {
        self.katun
    }

    pub const fn tun(&self) -> u8 {
        self.tun
    }

    pub const fn uinal(&self) -> u8 {
        self.uinal
    }

    pub const fn kin(&self) -> u8 {
        self.kin
    }
}

impl CalendarDate for MayanLongCount {
    fn to_day_count(&self) -> Result<DayCount, CalendarError> {
        let [baktun, katun, tun, uinal] = MAYAN_RADIX;
        let days = i64::from(self.baktun) * baktun
            + i64::from(self.katun) * katun
            + i64::from(self.tun) * tun
            + i64::from(self.uinal) * uinal
            + i64::from(self.kin);
        DayCount::from_day_number(MAYAN_EPOCH.day_number() + days)
    }

    fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        let mut rest = days_since_epoch(day);
        let baktun = crate::year_from_i64(floor_div(rest, MAYAN_RADIX[0]))?;
        rest = floor_mod(rest, MAYAN_RADIX[0]);

        let mut places = [0u8; 3];
        for (place, radix) in places.iter_mut().zip(&MAYAN_RADIX[1..]) {
            *place = (rest / radix) as u8;
            rest %= radix;
        }
        let [katun, tun, uinal] = places;

        Ok(Self {
            baktun,
            katun,
            tun,
            uinal,
            kin: rest as u8,
        })
    }
}

impl TryFrom<(i32, u8, u8, u8, u8)> for MayanLongCount {
    type Error = CalendarError;

    fn try_from(
        (baktun, katun, tun, uinal, kin): (i32, u8, u8, u8, u8),
    ) -> Result<Self, Self::Error> {
        Self::new(baktun, katun, tun, uinal, kin)
    }
}

impl From<MayanLongCount> for (i32, u8, u8, u8, u8) {
    fn from(date: MayanLongCount) -> Self {
        (date.baktun, date.katun, date.tun, date.uinal, date.kin)
    }
}

/// A position in the Haab: eighteen months of 20 days numbered 0-19, then
/// the five days of Uayeb (month 19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{} {}", day, "HAAB_MONTHS[usize::from(*month) - 1]")]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Haab {
    month: u8,
    day: u8,
}

impl Haab {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1-19 or the
    /// day does not exist in it.
    pub fn new(month: u8, day: u8) -> Result<Self, CalendarError> {
        check_field("Haab", "month", month.into(), 1, 19)?;
        let last_day = if month == 19 { 4 } else { 19 };
        check_field("Haab", "day", day.into(), 0, last_day)?;
        Ok(Self { month, day })
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn month_name(&self) -> &'static str {
        HAAB_MONTHS[self.month as usize - 1]
    }

    pub fn from_day_count(day: DayCount) -> Self {
        let position = floor_mod(days_since_epoch(day) + HAAB_EPOCH_OFFSET, HAAB_DAYS);
        Self {
            month: (position / 20 + 1) as u8,
            day: (position % 20) as u8,
        }
    }

    /// Days since 0 Pop
    const fn position(self) -> i64 {
        (self.month as i64 - 1) * 20 + self.day as i64
    }

    /// The latest midnight on or before `day` with this Haab position.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported
    /// day count range.
    pub fn on_or_before(self, day: DayCount) -> Result<DayCount, CalendarError> {
        let current = Self::from_day_count(day).position();
        DayCount::from_day_number(
            day.day_number() - floor_mod(current - self.position(), HAAB_DAYS),
        )
    }
}

impl TryFrom<(u8, u8)> for Haab {
    type Error = CalendarError;

    fn try_from((month, day): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(month, day)
    }
}

impl From<Haab> for (u8, u8) {
    fn from(haab: Haab) -> Self {
        (haab.month, haab.day)
    }
}

/// A position in the Tzolkin: one of twenty day names paired with a number
/// 1-13, both advancing every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{} {}", number, "TZOLKIN_NAMES[usize::from(*name) - 1]")]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Tzolkin {
    name: u8,
    number: u8,
}

impl Tzolkin {
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the name index is not 1-20 or
    /// the number is not 1-13.
    pub fn new(name: u8, number: u8) -> Result<Self, CalendarError> {
        check_field("Tzolkin", "name", name.into(), 1, 20)?;
        check_field("Tzolkin", "number", number.into(), 1, 13)?;
        Ok(Self { name, number })
    }

    /// Day name index, 1 (Imix) to 20 (Ahau)
    pub const fn name(&self) -> u8 {
        self.name
    }

    pub const fn number(&self) -> u8 {
        self.number
    }

    pub const fn name_str(&self) -> &'static str {
        TZOLKIN_NAMES[self.name as usize - 1]
    }

    pub fn from_day_count(day: DayCount) -> Self {
        let count = days_since_epoch(day);
        Self {
            name: amod(count + 20, 20) as u8,
            number: amod(count + 4, 13) as u8,
        }
    }

    /// Place in the 260-day cycle, counted like the day count since the
    /// epoch (which falls on 4 Ahau).
    const fn position(self) -> i64 {
        let name = self.name as i64;
        // 2 is the inverse of 20 modulo 13
        let cycles = floor_mod(2 * (self.number as i64 - 4 - name), 13);
        floor_mod(name + 20 * cycles, TZOLKIN_DAYS)
    }

    /// The latest midnight on or before `day` with this Tzolkin position.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the supported
    /// day count range.
    pub fn on_or_before(self, day: DayCount) -> Result<DayCount, CalendarError> {
        let count = days_since_epoch(day);
        DayCount::from_day_number(
            day.day_number() - floor_mod(count - self.position(), TZOLKIN_DAYS),
        )
    }
}

impl TryFrom<(u8, u8)> for Tzolkin {
    type Error = CalendarError;

    fn try_from((name, number): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(name, number)
    }
}

impl From<Tzolkin> for (u8, u8) {
    fn from(tzolkin: Tzolkin) -> Self {
        (tzolkin.name, tzolkin.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let epoch = MayanLongCount::new(0, 0, 0, 0, 0).unwrap();
        assert_eq!(epoch.to_day_count().unwrap().get(), 584_282.5);
        assert_eq!(MayanLongCount::from_day_count(MAYAN_EPOCH).unwrap(), epoch);
        // The creation date is 4 Ahau 8 Cumku
        assert_eq!(Haab::from_day_count(MAYAN_EPOCH).to_string(), "8 Cumku");
        assert_eq!(Tzolkin::from_day_count(MAYAN_EPOCH).to_string(), "4 Ahau");
    }

    #[test]
    fn test_gregorian_2000() {
        let day = DayCount::new(2_451_544.5).unwrap();
        assert_eq!(MayanLongCount::from_day_count(day).unwrap().to_string(), "12.19.6.15.2");
        assert_eq!(<(u8, u8)>::from(Haab::from_day_count(day)), (14, 10));
        assert_eq!(<(u8, u8)>::from(Tzolkin::from_day_count(day)), (2, 11));
        assert_eq!(Tzolkin::from_day_count(day).to_string(), "11 Ik");
    }

    #[test]
    fn test_before_epoch() {
        let day = DayCount::from_day_number(MAYAN_EPOCH.day_number() - 1).unwrap();
        let date = MayanLongCount::from_day_count(day).unwrap();
        assert_eq!(<(i32, u8, u8, u8, u8)>::from(date), (-1, 19, 19, 17, 19));
        assert_eq!(date.to_day_count().unwrap(), day);
    }

    #[test]
    fn test_validation() {
        assert!(MayanLongCount::new(13, 0, 0, 0, 0).is_ok());
        assert!(MayanLongCount::new(13, 20, 0, 0, 0).is_err());
        assert!(MayanLongCount::new(13, 0, 0, 18, 0).is_err());
        assert!(Haab::new(19, 4).is_ok());
        assert!(Haab::new(19, 5).is_err());
        assert!(Haab::new(18, 19).is_ok());
        assert!(Tzolkin::new(0, 1).is_err());
        assert!(Tzolkin::new(20, 14).is_err());
    }

    #[test]
    fn test_tzolkin_residues_never_zero() {
        let start = MAYAN_EPOCH.day_number() - 1000;
        for n in start..start + 2000 {
            let tzolkin = Tzolkin::from_day_count(DayCount::from_day_number(n).unwrap());
            assert!((1..=20).contains(&tzolkin.name()), "{n}");
            assert!((1..=13).contains(&tzolkin.number()), "{n}");
        }
    }

    #[test]
    fn test_on_or_before() {
        let start = 2_451_545 - 600;
        for n in (start..start + 1200).step_by(7) {
            let day = DayCount::from_day_number(n).unwrap();
            for target in [
                Tzolkin::new(20, 4).unwrap(),
                Tzolkin::new(1, 1).unwrap(),
                Tzolkin::new(13, 7).unwrap(),
            ] {
                let found = target.on_or_before(day).unwrap();
                assert_eq!(Tzolkin::from_day_count(found), target);
                assert!(found <= day && day.day_number() - found.day_number() < TZOLKIN_DAYS);
            }
            for target in [
                Haab::new(18, 8).unwrap(),
                Haab::new(19, 4).unwrap(),
                Haab::new(1, 0).unwrap(),
            ] {
                let found = target.on_or_before(day).unwrap();
                assert_eq!(Haab::from_day_count(found), target);
                assert!(found <= day && day.day_number() - found.day_number() < HAAB_DAYS);
            }
        }
        let day = DayCount::new(2_451_544.5).unwrap();
        assert_eq!(Tzolkin::from_day_count(day).on_or_before(day).unwrap(), day);
    }

    #[test]
    fn test_round_trip() {
        let start = MAYAN_EPOCH.day_number() - 5000;
        for n in (start..start + 2_000_000).step_by(97) {
            let day = DayCount::from_day_number(n).unwrap();
            let date = MayanLongCount::from_day_count(day).unwrap();
            assert_eq!(date.to_day_count().unwrap(), day, "{date}");
        }
    }
}
