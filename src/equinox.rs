//! Locating calendar years whose first day is fixed by an equinox observed
//! at a given meridian.

use crate::astro::{Ephemeris, MeeusEphemeris, SeasonEvent};
use crate::consts::MAX_SEARCH_STEPS;
use crate::gregorian;
use crate::{CalendarError, DayCount};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Which local day an equinox instant opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayBoundary {
    /// The civil day containing the equinox.
    Midnight,
    /// The civil day whose local noon is the first after the equinox.
    Noon,
}

/// Where and how a calendar observes its year-opening equinox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquinoxRule {
    /// Meridian in degrees east of Greenwich.
    pub longitude: f64,
    pub event: SeasonEvent,
    pub boundary: DayBoundary,
}

impl EquinoxRule {
    /// The September equinox at the Paris Observatory, 2°20′15″ E
    pub const PARIS: Self = Self {
        longitude: 2.0 + 20.0 / 60.0 + 15.0 / 3600.0,
        event: SeasonEvent::SeptemberEquinox,
        boundary: DayBoundary::Midnight,
    };

    /// The March equinox at the Iran Standard Time meridian, 52°30′ E
    pub const TEHRAN: Self = Self {
        longitude: 52.5,
        event: SeasonEvent::MarchEquinox,
        boundary: DayBoundary::Noon,
    };

    /// # Errors
    /// Returns `CalendarError::InvalidRule` if the longitude is not a finite
    /// angle between -180° and 180°.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CalendarError::InvalidRule(format!(
                "longitude {} is outside -180..=180 degrees",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// One equinox-to-equinox year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquinoxYear {
    /// Year number in the calendar's own era
    pub year: i32,
    /// Midnight starting the first day of the year
    pub start: DayCount,
    /// Midnight starting the first day of the following year
    pub next_start: DayCount,
}

impl EquinoxYear {
    /// Days in the year, 365 or 366
    pub fn length(&self) -> i64 {
        self.next_start.day_number() - self.start.day_number()
    }
}

/// An equinox rule bound to an ephemeris and an era.
///
/// Year 1 of the era starts at the equinox in Gregorian year `first_year`,
/// so year numbers and Gregorian years of the opening equinox differ by a
/// constant.
///
/// # Example
///
/// ```
/// use calendar_hub::{EquinoxCalendar, GregorianDate, CalendarDate};
///
/// let calendar = EquinoxCalendar::persian().with_max_steps(8);
/// assert!(calendar.validate().is_ok());
///
/// let nowruz = calendar.year_start(1403)?;
/// let gregorian = GregorianDate::from_day_count(nowruz)?;
/// assert_eq!((gregorian.year(), gregorian.month(), gregorian.day()), (2024, 3, 20));
/// # Ok::<(), calendar_hub::CalendarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EquinoxCalendar<E = MeeusEphemeris> {
    ephemeris: E,
    rule: EquinoxRule,
    first_year: i32,
    max_steps: u32,
}

impl EquinoxCalendar<MeeusEphemeris> {
    /// The French Republican era: an I opened at the Paris September
    /// equinox of 1792.
    pub const fn french_republican() -> Self {
        Self::new(MeeusEphemeris, EquinoxRule::PARIS, 1792)
    }

    /// The astronomical Persian era: year 1 opened at the Tehran March
    /// equinox of 622.
    pub const fn persian() -> Self {
        Self::new(MeeusEphemeris, EquinoxRule::TEHRAN, 622)
    }
}

impl<E: Ephemeris> EquinoxCalendar<E> {
    /// Defaults: `max_steps = 32`.
    pub const fn new(ephemeris: E, rule: EquinoxRule, first_year: i32) -> Self {
        Self {
            ephemeris,
            rule,
            first_year,
            max_steps: MAX_SEARCH_STEPS,
        }
    }

    /// Replaces the ephemeris, keeping the rule and era.
    pub fn with_ephemeris<F: Ephemeris>(self, ephemeris: F) -> EquinoxCalendar<F> {
        EquinoxCalendar {
            ephemeris,
            rule: self.rule,
            first_year: self.first_year,
            max_steps: self.max_steps,
        }
    }

    pub fn with_rule(mut self, rule: EquinoxRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the bound on year steps taken by [`Self::bracket`].
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub const fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub const fn rule(&self) -> &EquinoxRule {
        &self.rule
    }

    pub const fn first_year(&self) -> i32 {
        self.first_year
    }

    pub const fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// # Errors
    /// Returns `CalendarError::InvalidRule` for an unusable longitude or a
    /// zero step bound.
    pub fn validate(&self) -> Result<(), CalendarError> {
        self.rule.validate()?;
        if self.max_steps == 0 {
            return Err(CalendarError::InvalidRule(
                "max_steps must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Local apparent time of the equinox in Gregorian `year`, as a
    /// fractional Julian day.
    pub fn local_equinox(&self, year: i32) -> f64 {
        let jde = self.ephemeris.equinox_or_solstice(year, self.rule.event);
        let universal = jde - self.ephemeris.delta_t(f64::from(year)) / crate::SECONDS_PER_DAY;
        let apparent = universal + self.ephemeris.equation_of_time(jde);
        apparent + self.rule.longitude / 360.0
    }

    fn new_year_number(&self, year: i32) -> Result<i64, CalendarError> {
        let local = self.local_equinox(year);
        if !local.is_finite() || local.abs() > crate::MAX_DAY_COUNT {
            return Err(CalendarError::OutOfRange { value: local });
        }
        Ok(match self.rule.boundary {
            DayBoundary::Midnight => (local + 0.5).floor() as i64,
            DayBoundary::Noon => local.floor() as i64 + 1,
        })
    }

    /// Midnight starting the year that opens at the equinox of Gregorian
    /// `year`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the ephemeris yields a time
    /// outside the supported day count range.
    pub fn new_year_day(&self, year: i32) -> Result<DayCount, CalendarError> {
        DayCount::from_day_number(self.new_year_number(year)?)
    }

    fn gregorian_year(&self, year: i32) -> Result<i32, CalendarError> {
        crate::year_from_i64(i64::from(year) + i64::from(self.first_year) - 1)
    }

    /// Midnight starting `year` of this calendar's era.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRule` for an invalid configuration and
    /// `CalendarError::OutOfRange` if the year cannot be placed on the day
    /// count.
    pub fn year_start(&self, year: i32) -> Result<DayCount, CalendarError> {
        self.validate()?;
        self.new_year_day(self.gregorian_year(year)?)
    }

    /// # Errors
    /// As [`Self::year_start`].
    pub fn year(&self, year: i32) -> Result<EquinoxYear, CalendarError> {
        self.validate()?;
        let gregorian_year = self.gregorian_year(year)?;
        Ok(EquinoxYear {
            year,
            start: self.new_year_day(gregorian_year)?,
            next_start: self.new_year_day(gregorian_year + 1)?,
        })
    }

    /// Days in `year` of this calendar's era.
    ///
    /// # Errors
    /// As [`Self::year_start`].
    pub fn year_length(&self, year: i32) -> Result<i64, CalendarError> {
        Ok(self.year(year)?.length())
    }

    /// Finds the year containing `day`: its opening equinox day is on or
    /// before `day` and the next year's is after it.
    ///
    /// # Errors
    /// Returns `CalendarError::ConvergenceFailure` if the year is not found
    /// within `max_steps` steps, plus the errors of [`Self::year_start`].
    pub fn bracket(&self, day: DayCount) -> Result<EquinoxYear, CalendarError> {
        self.validate()?;
        let n = day.day_number();
        let (estimate, _, _) = gregorian::from_day_number(n);
        let mut year = estimate - 1;
        let mut start = self.new_year_number(year)?;
        let mut steps = 0;

        let mut step = |year: i32, start: i64| {
            trace!(gregorian_year = year, start, day = n, "equinox year search");
            steps += 1;
            if steps > self.max_steps {
                warn!(
                    day = n,
                    estimate,
                    steps = self.max_steps,
                    "equinox year search did not converge"
                );
                return Err(CalendarError::ConvergenceFailure {
                    search: "equinox year",
                    steps: self.max_steps,
                });
            }
            Ok(())
        };

        // Back off until the equinox is on or before the target day
        while start > n {
            step(year, start)?;
            year -= 1;
            start = self.new_year_number(year)?;
        }
        // Then walk forward until the next equinox is after it
        let mut next = self.new_year_number(year + 1)?;
        while next <= n {
            step(year, start)?;
            year += 1;
            start = next;
            next = self.new_year_number(year + 1)?;
        }

        Ok(EquinoxYear {
            year: year - self.first_year + 1,
            start: DayCount::from_day_number(start)?,
            next_start: DayCount::from_day_number(next)?,
        })
    }
}

impl Default for EquinoxCalendar<MeeusEphemeris> {
    fn default() -> Self {
        Self::french_republican()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CalendarDate, GregorianDate};

    fn gregorian(day: DayCount) -> (i32, u8, u8) {
        GregorianDate::from_day_count(day).unwrap().into()
    }

    /// Equinox pinned to a fixed local time of day in every year.
    #[derive(Debug, Clone, Copy)]
    struct FixedEphemeris {
        fraction: f64,
    }

    impl Ephemeris for FixedEphemeris {
        fn equinox_or_solstice(&self, year: i32, _event: SeasonEvent) -> f64 {
            gregorian::to_day_number(year, 3, 20) as f64 - 0.5 + self.fraction
        }

        fn delta_t(&self, _year: f64) -> f64 {
            0.0
        }

        fn equation_of_time(&self, _jde: f64) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_republican_epoch() {
        let calendar = EquinoxCalendar::french_republican();
        let start = calendar.year_start(1).unwrap();
        assert_eq!(start, crate::FRENCH_REPUBLICAN_EPOCH);
        assert_eq!(gregorian(start), (1792, 9, 22));
    }

    #[test]
    fn test_nowruz() {
        let calendar = EquinoxCalendar::persian();
        // 2024-03-20 03:06 UT, before noon in Tehran
        assert_eq!(gregorian(calendar.year_start(1403).unwrap()), (2024, 3, 20));
        // 2025-03-20 09:01 UT, after noon in Tehran
        assert_eq!(gregorian(calendar.year_start(1404).unwrap()), (2025, 3, 21));
        assert_eq!(calendar.year_length(1403).unwrap(), 366);
    }

    #[test]
    fn test_day_boundaries() {
        let rule = |boundary| EquinoxRule {
            longitude: 0.0,
            event: SeasonEvent::MarchEquinox,
            boundary,
        };
        let morning = FixedEphemeris { fraction: 0.25 };
        let evening = FixedEphemeris { fraction: 0.75 };

        let midnight = EquinoxCalendar::new(morning, rule(DayBoundary::Midnight), 2000);
        assert_eq!(gregorian(midnight.year_start(1).unwrap()), (2000, 3, 20));
        let midnight = midnight.with_ephemeris(evening);
        assert_eq!(gregorian(midnight.year_start(1).unwrap()), (2000, 3, 20));

        let noon = EquinoxCalendar::new(morning, rule(DayBoundary::Noon), 2000);
        assert_eq!(gregorian(noon.year_start(1).unwrap()), (2000, 3, 20));
        let noon = noon.with_ephemeris(evening);
        assert_eq!(gregorian(noon.year_start(1).unwrap()), (2000, 3, 21));
    }

    #[test]
    fn test_bracket_invariant() {
        for calendar in [EquinoxCalendar::french_republican(), EquinoxCalendar::persian()] {
            let first = GregorianDate::new(1780, 1, 1).unwrap().to_day_count().unwrap();
            for offset in (0..365 * 60).step_by(13) {
                let day = DayCount::from_day_number(first.day_number() + offset).unwrap();
                let year = calendar.bracket(day).unwrap();
                assert!(year.start <= day && day < year.next_start, "{day}");
                assert!((365..=366).contains(&year.length()));
                assert_eq!(calendar.year_start(year.year).unwrap(), year.start);
            }
        }
    }

    #[test]
    fn test_equinox_day_opens_its_year() {
        let calendar = EquinoxCalendar::french_republican();
        let start = calendar.year_start(8).unwrap();
        assert_eq!(calendar.bracket(start).unwrap().year, 8);
        let eve = DayCount::from_day_number(start.day_number() - 1).unwrap();
        assert_eq!(calendar.bracket(eve).unwrap().year, 7);
        let late = start.with_time(23, 59, 59).unwrap();
        assert_eq!(calendar.bracket(late).unwrap().year, 8);
    }

    #[test]
    fn test_years_before_era() {
        let calendar = EquinoxCalendar::persian();
        for year in [-5, 0] {
            let start = calendar.year_start(year).unwrap();
            let found = calendar.bracket(start).unwrap();
            assert_eq!((found.year, found.start), (year, start));
        }
    }

    #[test]
    fn test_convergence_failure() {
        let day = GregorianDate::new(2000, 12, 1).unwrap().to_day_count().unwrap();
        // Equinoxes about three years late force repeated steps back
        let late = EquinoxCalendar::new(
            FixedEphemeris { fraction: 1100.0 },
            EquinoxRule::TEHRAN,
            622,
        );
        assert!(late.bracket(day).is_ok());
        assert_eq!(
            late.with_max_steps(1).bracket(day),
            Err(CalendarError::ConvergenceFailure {
                search: "equinox year",
                steps: 1,
            })
        );
        let zero = EquinoxCalendar::french_republican().with_max_steps(0);
        assert!(matches!(zero.bracket(day), Err(CalendarError::InvalidRule(_))));
    }

    #[test]
    fn test_validate() {
        assert!(EquinoxCalendar::default().validate().is_ok());
        let rule = EquinoxRule {
            longitude: 200.0,
            ..EquinoxRule::PARIS
        };
        let calendar = EquinoxCalendar::french_republican().with_rule(rule);
        assert!(matches!(calendar.validate(), Err(CalendarError::InvalidRule(_))));
        let rule = EquinoxRule {
            longitude: f64::NAN,
            ..EquinoxRule::TEHRAN
        };
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_rule_serde() {
        let json = serde_json::to_string(&EquinoxRule::TEHRAN).unwrap();
        assert_eq!(
            json,
            r#"{"longitude":52.5,"event":"MarchEquinox","boundary":"Noon"}"#
        );
        let rule: EquinoxRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, EquinoxRule::TEHRAN);
    }
}
