use crate::DayCount;

/// Largest magnitude accepted for a day count (roughly 27 million years
/// either side of the Julian period epoch)
pub const MAX_DAY_COUNT: f64 = 1.0e10;

/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Upper bound on iterations of any year or month search
pub const MAX_SEARCH_STEPS: u32 = 32;

// Calendar epochs

/// Proleptic Gregorian 0001-01-01
pub const GREGORIAN_EPOCH: DayCount = DayCount::new_unchecked(1_721_425.5);
/// Julian calendar 0001-01-01
pub const JULIAN_EPOCH: DayCount = DayCount::new_unchecked(1_721_423.5);
/// Hebrew epoch; 1 Tishri AM 1 falls two days later
pub const HEBREW_EPOCH: DayCount = DayCount::new_unchecked(347_995.5);
/// 1 Muharram AH 1
pub const ISLAMIC_EPOCH: DayCount = DayCount::new_unchecked(1_948_439.5);
/// 1 Farvardin AP 1
pub const PERSIAN_EPOCH: DayCount = DayCount::new_unchecked(1_948_320.5);
/// Mayan long count 0.0.0.0.0
pub const MAYAN_EPOCH: DayCount = DayCount::new_unchecked(584_282.5);
/// 1 Bahá 1 BE (1844-03-21)
pub const BAHAI_EPOCH: DayCount = DayCount::new_unchecked(2_394_646.5);
/// 1 Vendémiaire an I (1792-09-22)
pub const FRENCH_REPUBLICAN_EPOCH: DayCount = DayCount::new_unchecked(2_375_839.5);

// Serial day-number epochs

/// Gregorian 0000-01-01, origin of the Gregorian serial day number
pub const J0000: DayCount = DayCount::new_unchecked(1_721_424.5);
/// Unix epoch, 1970-01-01T00:00:00Z
pub const J1970: DayCount = DayCount::new_unchecked(2_440_587.5);
/// Origin of the Modified Julian Date
pub const JMJD: DayCount = DayCount::new_unchecked(2_400_000.5);
/// Day 1 of the Excel 1900 serial system
pub const J1900: DayCount = DayCount::new_unchecked(2_415_020.5);
/// Day 0 of the Excel 1904 serial system
pub const J1904: DayCount = DayCount::new_unchecked(2_416_480.5);
/// 1900-02-28, the last Excel 1900 serial unaffected by its phantom leap day
pub const EXCEL_1900_LEAP_BUG: DayCount = DayCount::new_unchecked(2_415_078.5);

// Gregorian cycles

/// Maximum valid month in twelve-month calendars
pub const MAX_MONTH: u8 = 12;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in each month of the Julian and Gregorian calendars (index 0 is unused)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in 400 Gregorian years
pub(crate) const DAYS_PER_QUADRICENTENNIUM: i64 = 146_097;
/// Days in a Gregorian century not divisible by 400
pub(crate) const DAYS_PER_CENTURY: i64 = 36_524;
/// Days in four years including one leap day
pub(crate) const DAYS_PER_QUADRENNIUM: i64 = 1_461;

// Other cycles

/// Days in one 2820-year Persian grand cycle
pub(crate) const PERSIAN_CYCLE_DAYS: i64 = 1_029_983;
/// Years in one Persian grand cycle
pub(crate) const PERSIAN_CYCLE_YEARS: i64 = 2_820;

/// Gregorian year in which Saka year 0 begins
pub(crate) const SAKA_OFFSET: i32 = 78;
/// Zero-based Gregorian day-of-year on which a Saka year begins
pub(crate) const SAKA_YEAR_START: i64 = 80;

/// Days in one baktun, katun, tun and uinal
pub(crate) const MAYAN_RADIX: [i64; 4] = [144_000, 7_200, 360, 20];
/// Days in the Haab civil year
pub(crate) const HAAB_DAYS: i64 = 365;
/// Days in the Tzolkin ritual cycle
pub(crate) const TZOLKIN_DAYS: i64 = 260;

/// Legal Hebrew year lengths in days
pub const HEBREW_YEAR_LENGTHS: [i64; 6] = [353, 354, 355, 383, 384, 385];
