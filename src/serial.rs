//! Day-number systems that are affine offsets of the day count.

use crate::consts::{EXCEL_1900_LEAP_BUG, J0000, J1900, J1904, J1970, JMJD, SECONDS_PER_DAY};
use crate::{CalendarError, DayCount, prelude::*};
use serde::{Deserialize, Serialize};

/// Excel 1900 serial of the fictitious 1900-02-29
const EXCEL_PHANTOM_LEAP_DAY: f64 = 60.0;

/// A serial day or time number used outside the calendars proper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SerialFormat {
    /// Days since 1858-11-17T00:00Z
    #[display(fmt = "MJD")]
    ModifiedJulianDay,
    /// Whole seconds since 1970-01-01T00:00Z
    #[display(fmt = "Unix time")]
    Unix,
    /// Excel's PC date system, counting 1900-01-01 as day 1 and including
    /// a 1900-02-29 that never existed
    #[display(fmt = "Excel 1900")]
    Excel1900,
    /// Excel's Macintosh date system, counting 1904-01-01 as day 0
    #[display(fmt = "Excel 1904")]
    Excel1904,
    /// Days since proleptic Gregorian 0000-01-01
    #[display(fmt = "Gregorian serial")]
    GregorianSerial,
}

impl SerialFormat {
    pub const ALL: [Self; 5] = [
        Self::ModifiedJulianDay,
        Self::Unix,
        Self::Excel1900,
        Self::Excel1904,
        Self::GregorianSerial,
    ];

    /// The serial number of `day` in this format. Unix time is rounded to
    /// the nearest second.
    pub fn from_day_count(self, day: DayCount) -> f64 {
        let j = day.get();
        match self {
            Self::ModifiedJulianDay => j - JMJD.get(),
            Self::Unix => ((j - J1970.get()) * SECONDS_PER_DAY).round(),
            Self::Excel1900 => {
                let phantom = if j > EXCEL_1900_LEAP_BUG.get() { 1.0 } else { 0.0 };
                j - J1900.get() + 1.0 + phantom
            }
            Self::Excel1904 => j - J1904.get(),
            Self::GregorianSerial => j - J0000.get(),
        }
    }

    /// The day count of a serial number in this format.
    ///
    /// Excel 1900 serial 60, the phantom leap day, maps to 1900-03-01 like
    /// serial 61.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the serial is not finite or
    /// lands outside the supported day count range.
    pub fn to_day_count(self, serial: f64) -> Result<DayCount, CalendarError> {
        let j = match self {
            Self::ModifiedJulianDay => serial + JMJD.get(),
            Self::Unix => J1970.get() + serial / SECONDS_PER_DAY,
            Self::Excel1900 => {
                let serial = if serial > EXCEL_PHANTOM_LEAP_DAY {
                    serial - 1.0
                } else {
                    serial
                };
                serial - 1.0 + J1900.get()
            }
            Self::Excel1904 => serial + J1904.get(),
            Self::GregorianSerial => serial + J0000.get(),
        };
        DayCount::new(j)
    }
}
