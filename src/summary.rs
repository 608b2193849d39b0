use crate::astro::Ephemeris;
use crate::equinox::EquinoxCalendar;
use crate::{
    BahaiDate, CalendarDate, CalendarError, DayCount, FrenchRepublicanDate, GregorianDate, Haab,
    HebrewDate, HebrewYearKind, IndianCivilDate, IslamicDate, IsoOrdinalDate, IsoWeekDate,
    JulianDate, MayanLongCount, PersianAstronomicalDate, PersianDate, SerialFormat, Tzolkin,
    Weekday,
};
use serde::Serialize;

/// One instant rendered in every calendar and serial format the crate knows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarSummary {
    pub day_count: DayCount,
    pub modified_julian_day: f64,
    pub weekday: Weekday,
    /// Hour, minute and second, rounded to the second
    pub time_of_day: (u8, u8, u8),

    pub gregorian: GregorianDate,
    pub gregorian_leap: bool,
    pub julian: JulianDate,
    pub julian_leap: bool,
    pub iso_week: IsoWeekDate,
    pub iso_ordinal: IsoOrdinalDate,
    pub hebrew: HebrewDate,
    pub hebrew_year_kind: HebrewYearKind,
    pub islamic: IslamicDate,
    pub islamic_leap: bool,
    pub persian: PersianDate,
    pub persian_leap: bool,
    pub persian_astronomical: PersianAstronomicalDate,
    pub persian_astronomical_leap: bool,
    pub mayan_long_count: MayanLongCount,
    pub haab: Haab,
    pub tzolkin: Tzolkin,
    pub bahai: BahaiDate,
    pub bahai_leap: bool,
    pub indian_civil: IndianCivilDate,
    pub indian_civil_leap: bool,
    pub french_republican: FrenchRepublicanDate,
    pub french_republican_sextile: bool,

    pub unix_time: f64,
    pub excel_1900: f64,
    pub excel_1904: f64,
    pub gregorian_serial: f64,
}

impl CalendarSummary {
    /// Converts `day` into every calendar, locating equinoxes with the
    /// built-in ephemeris.
    ///
    /// # Errors
    /// Returns the first error of any single conversion.
    pub fn from_day_count(day: DayCount) -> Result<Self, CalendarError> {
        Self::from_day_count_with(
            day,
            &EquinoxCalendar::french_republican(),
            &EquinoxCalendar::persian(),
        )
    }

    /// # Errors
    /// As [`Self::from_day_count`].
    pub fn from_day_count_with<F: Ephemeris, P: Ephemeris>(
        day: DayCount,
        french_calendar: &EquinoxCalendar<F>,
        persian_calendar: &EquinoxCalendar<P>,
    ) -> Result<Self, CalendarError> {
        let gregorian = GregorianDate::from_day_count(day)?;
        let julian = JulianDate::from_day_count(day)?;
        let hebrew = HebrewDate::from_day_count(day)?;
        let islamic = IslamicDate::from_day_count(day)?;
        let persian = PersianDate::from_day_count(day)?;
        let persian_astronomical =
            PersianAstronomicalDate::from_day_count_with(day, persian_calendar)?;
        let bahai = BahaiDate::from_day_count(day)?;
        let indian_civil = IndianCivilDate::from_day_count(day)?;
        let french_republican = FrenchRepublicanDate::from_day_count_with(day, french_calendar)?;

        Ok(Self {
            day_count: day,
            modified_julian_day: SerialFormat::ModifiedJulianDay.from_day_count(day),
            weekday: day.weekday(),
            time_of_day: day.time_of_day(),

            gregorian,
            gregorian_leap: GregorianDate::is_leap_year(gregorian.year()),
            julian,
            julian_leap: JulianDate::is_leap_year(julian.year()),
            iso_week: IsoWeekDate::from_day_count(day)?,
            iso_ordinal: IsoOrdinalDate::from_day_count(day)?,
            hebrew,
            hebrew_year_kind: HebrewDate::year_kind(hebrew.year())?,
            islamic,
            islamic_leap: IslamicDate::is_leap_year(islamic.year()),
            persian,
            persian_leap: PersianDate::is_leap_year(persian.year()),
            persian_astronomical,
            persian_astronomical_leap: PersianAstronomicalDate::is_leap_year_with(
                persian_astronomical.year(),
                persian_calendar,
            )?,
            mayan_long_count: MayanLongCount::from_day_count(day)?,
            haab: Haab::from_day_count(day),
            tzolkin: Tzolkin::from_day_count(day),
            bahai,
            bahai_leap: BahaiDate::is_leap_year(bahai.era_year()),
            indian_civil,
            indian_civil_leap: IndianCivilDate::is_leap_year(indian_civil.year()),
            french_republican,
            french_republican_sextile: FrenchRepublicanDate::is_leap_year_with(
                french_republican.year(),
                french_calendar,
            )?,

            unix_time: SerialFormat::Unix.from_day_count(day),
            excel_1900: SerialFormat::Excel1900.from_day_count(day),
            excel_1904: SerialFormat::Excel1904.from_day_count(day),
            gregorian_serial: SerialFormat::GregorianSerial.from_day_count(day),
        })
    }
}
