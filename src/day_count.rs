//! The continuous day count every calendar converts through, plus the
//! integer helpers the calendar formulas share.

use crate::consts::{MAX_DAY_COUNT, SECONDS_PER_DAY};
use crate::{CalendarError, prelude::*};
use serde::{Deserialize, Serialize};

/// A Julian day count.
///
/// The integer part changes at noon, so a civil day starting at midnight is
/// represented by a value ending in `.5`. The fraction encodes time of day.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[display(fmt = "{_0}")]
#[serde(try_from = "f64", into = "f64")]
pub struct DayCount(f64);

impl DayCount {
    /// Creates a day count, rejecting NaN, infinities and magnitudes beyond
    /// [`MAX_DAY_COUNT`].
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the value is not usable.
    pub fn new(value: f64) -> Result<Self, CalendarError> {
        if !value.is_finite() || value.abs() > MAX_DAY_COUNT {
            return Err(CalendarError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    pub(crate) const fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw day count
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Julian day number of the civil (midnight to midnight) day containing
    /// this instant.
    #[inline]
    pub fn day_number(self) -> i64 {
        (self.0 + 0.5).floor() as i64
    }

    /// The midnight that starts civil day `day`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day lies outside the
    /// supported range.
    pub fn from_day_number(day: i64) -> Result<Self, CalendarError> {
        Self::new(day as f64 - 0.5)
    }

    /// The midnight starting the civil day containing this instant
    pub fn midnight(self) -> Self {
        Self(self.day_number() as f64 - 0.5)
    }

    /// Sets the time of day on the civil day containing this instant.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTime` for hours above 23 or minutes and
    /// seconds above 59.
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self, CalendarError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        let seconds = f64::from(second) + 60.0 * (f64::from(minute) + 60.0 * f64::from(hour));
        Ok(Self(self.midnight().0 + seconds / SECONDS_PER_DAY))
    }

    /// Time of day as `(hour, minute, second)`, rounded to the nearest second.
    pub fn time_of_day(self) -> (u8, u8, u8) {
        let shifted = self.0 + 0.5;
        let seconds = ((shifted - shifted.floor()) * SECONDS_PER_DAY + 0.5).floor();
        // Rounding up the last half second of a day stays on that day.
        let seconds = (seconds as u32).min(86_399);
        (
            (seconds / 3600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
        )
    }

    /// Day of the week of the civil day containing this instant
    pub fn weekday(self) -> Weekday {
        Weekday::from_index(floor_mod_f64((self.0 + 1.5).floor(), 7.0) as u8)
    }

    /// Locates `weekday` in the seven days ending `direction * offset` days
    /// from this day count.
    ///
    /// Every named weekday search below is a fixed `(direction, offset)` pair
    /// over this primitive.
    pub fn search_weekday(self, weekday: Weekday, direction: Direction, offset: u8) -> Self {
        let anchor = self.0 + f64::from(direction.sign()) * f64::from(offset);
        let back = Self(anchor - f64::from(weekday.index())).weekday();
        Self(anchor - f64::from(back.index()))
    }

    /// The `weekday` closest to this day (within three days either side)
    pub fn nearest_weekday(self, weekday: Weekday) -> Self {
        self.search_weekday(weekday, Direction::Forward, 3)
    }

    /// The first `weekday` strictly after this day
    pub fn next_weekday(self, weekday: Weekday) -> Self {
        self.search_weekday(weekday, Direction::Forward, 7)
    }

    /// This day if it is a `weekday`, otherwise the next one
    pub fn next_or_current_weekday(self, weekday: Weekday) -> Self {
        self.search_weekday(weekday, Direction::Forward, 6)
    }

    /// The last `weekday` strictly before this day
    pub fn previous_weekday(self, weekday: Weekday) -> Self {
        self.search_weekday(weekday, Direction::Backward, 1)
    }

    /// This day if it is a `weekday`, otherwise the previous one
    pub fn previous_or_current_weekday(self, weekday: Weekday) -> Self {
        self.search_weekday(weekday, Direction::Forward, 0)
    }
}

impl TryFrom<f64> for DayCount {
    type Error = CalendarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayCount> for f64 {
    fn from(day: DayCount) -> Self {
        day.0
    }
}

/// Search direction for [`DayCount::search_weekday`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    const fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Day of the week, numbered from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Weekday for `index` taken modulo 7 (0 = Sunday)
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    /// 0 for Sunday through 6 for Saturday
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// ISO 8601 numbering: 1 for Monday through 7 for Sunday
    pub const fn iso_number(self) -> u8 {
        match self {
            Self::Sunday => 7,
            other => other as u8,
        }
    }
}

// Integer helpers. Divisors are always positive in the calendar formulas.

/// Division rounding toward negative infinity
#[inline]
pub const fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Division rounding toward positive infinity
#[inline]
pub const fn ceil_div(a: i64, b: i64) -> i64 {
    -floor_div(-a, b)
}

/// Remainder of [`floor_div`]; never negative for a positive divisor
#[inline]
pub const fn floor_mod(a: i64, b: i64) -> i64 {
    a - b * floor_div(a, b)
}

/// One-based modulo, in `1..=b` rather than `0..b`
#[inline]
pub const fn amod(a: i64, b: i64) -> i64 {
    floor_mod(a - 1, b) + 1
}

/// Floating point floor modulo
#[inline]
pub fn floor_mod_f64(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}
