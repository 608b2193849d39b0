//! Approximate solar ephemeris used to locate equinoxes.
//!
//! Times are Julian ephemeris days (dynamical time) unless stated otherwise.
//! The built-in [`MeeusEphemeris`] follows Meeus, *Astronomical Algorithms*
//! (2nd ed.), chapters 10, 27 and 28. It is accurate to within a few minutes
//! for the last several millennia, which is enough to place an equinox on the
//! right calendar day except when it falls within minutes of the day boundary.

use crate::day_count::floor_mod_f64;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// J2000.0 as a Julian ephemeris day
const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
const JULIAN_CENTURY: f64 = 36_525.0;

/// The four solar season markers, in the order they occur in a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonEvent {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

/// Source of the solar timings the equinox calendars are built on.
pub trait Ephemeris {
    /// Instant of `event` in Gregorian `year`, as a Julian ephemeris day.
    fn equinox_or_solstice(&self, year: i32, event: SeasonEvent) -> f64;

    /// Dynamical time minus universal time, in seconds, for a (fractional)
    /// Gregorian year.
    fn delta_t(&self, year: f64) -> f64;

    /// Apparent minus mean solar time at `jde`, as a fraction of a day.
    fn equation_of_time(&self, jde: f64) -> f64;
}

/// Polynomial and periodic-term ephemeris from Meeus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeeusEphemeris;

/// Mean event instants for years -1000 to 1000, in powers of `year / 1000`
/// (Meeus table 27.A).
const MEAN_EVENTS_BEFORE_1000: [[f64; 5]; 4] = [
    [1_721_139.291_89, 365_242.137_40, 0.061_34, 0.001_11, -0.000_71],
    [1_721_233.254_01, 365_241.725_62, -0.053_23, 0.009_07, 0.000_25],
    [1_721_325.704_55, 365_242.495_58, -0.116_77, -0.002_97, 0.000_74],
    [1_721_414.399_87, 365_242.882_57, -0.007_69, -0.009_33, -0.000_06],
];

/// Mean event instants for years 1000 to 3000, in powers of
/// `(year - 2000) / 1000` (Meeus table 27.B).
const MEAN_EVENTS_FROM_1000: [[f64; 5]; 4] = [
    [2_451_623.809_84, 365_242.374_04, 0.051_69, -0.004_11, -0.000_57],
    [2_451_716.567_67, 365_241.626_03, 0.003_25, 0.008_88, -0.000_30],
    [2_451_810.217_15, 365_242.017_67, -0.115_75, 0.003_37, 0.000_78],
    [2_451_900.059_52, 365_242.740_49, -0.062_23, -0.008_23, 0.000_32],
];

/// Periodic terms `(A, B, C)` of Meeus table 27.C: `A cos(B + C T)` with
/// angles in degrees.
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1_934.136),
    (203.0, 337.23, 32_964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445_267.112),
    (156.0, 73.14, 45_036.886),
    (136.0, 171.52, 22_518.443),
    (77.0, 222.54, 65_928.934),
    (74.0, 296.72, 3_034.906),
    (70.0, 243.58, 9_037.513),
    (58.0, 119.81, 33_718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2_281.226),
    (45.0, 247.54, 29_929.562),
    (44.0, 325.15, 31_555.956),
    (29.0, 60.93, 4_443.417),
    (18.0, 155.12, 67_555.328),
    (17.0, 288.79, 4_562.452),
    (16.0, 198.04, 62_894.029),
    (14.0, 199.76, 31_436.921),
    (12.0, 95.39, 14_577.848),
    (12.0, 287.11, 31_931.756),
    (12.0, 320.81, 34_777.259),
    (9.0, 227.73, 1_222.114),
    (8.0, 15.45, 16_859.074),
];

/// First year of [`DELTA_T_TABLE`]
const DELTA_T_FIRST_YEAR: f64 = 1620.0;
/// Last year interpolated from [`DELTA_T_TABLE`]
const DELTA_T_LAST_YEAR: f64 = 2000.0;

/// Observed delta T in seconds for every second year from 1620 to 2002
/// (Meeus table 10.A).
const DELTA_T_TABLE: [f64; 192] = [
    121.0, 112.0, 103.0, 95.0, 88.0, 82.0, 77.0, 72.0, 68.0, 63.0, 60.0, 56.0, 53.0, 51.0, 48.0,
    46.0, 44.0, 42.0, 40.0, 38.0, 35.0, 33.0, 31.0, 29.0, 26.0, 24.0, 22.0, 20.0, 18.0, 16.0, 14.0,
    12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 8.0, 8.0, 9.0, 9.0, 9.0, 9.0, 9.0,
    10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0,
    12.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 14.0, 15.0, 15.0, 15.0, 15.0, 15.0, 16.0, 16.0, 16.0,
    16.0, 16.0, 16.0, 16.0, 16.0, 15.0, 15.0, 14.0, 13.0, 13.1, 12.5, 12.2, 12.0, 12.0, 12.0, 12.0,
    12.0, 12.0, 11.9, 11.6, 11.0, 10.2, 9.2, 8.2, 7.1, 6.2, 5.6, 5.4, 5.3, 5.4, 5.6, 5.9, 6.2, 6.5,
    6.8, 7.1, 7.3, 7.5, 7.6, 7.7, 7.3, 6.2, 5.2, 2.7, 1.4, -1.2, -2.8, -3.8, -4.8, -5.5, -5.3,
    -5.6, -5.7, -5.9, -6.0, -6.3, -6.5, -6.2, -4.7, -2.8, -0.1, 2.6, 5.3, 7.7, 10.4, 13.3, 16.0,
    18.2, 20.2, 21.1, 22.4, 23.5, 23.8, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0, 24.3, 25.3, 26.2, 27.3,
    28.2, 29.1, 30.0, 30.7, 31.4, 32.2, 33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
    50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3, 60.0, 61.6, 63.0, 63.8, 64.3,
];

fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

impl Ephemeris for MeeusEphemeris {
    fn equinox_or_solstice(&self, year: i32, event: SeasonEvent) -> f64 {
        let (table, y) = if year < 1000 {
            (&MEAN_EVENTS_BEFORE_1000, f64::from(year) / 1000.0)
        } else {
            (&MEAN_EVENTS_FROM_1000, (f64::from(year) - 2000.0) / 1000.0)
        };
        let mean = polynomial(&table[event as usize], y);

        let t = (mean - J2000) / JULIAN_CENTURY;
        let w = 35_999.373 * t - 2.47;
        let delta_lambda = 1.0 + 0.0334 * cos_deg(w) + 0.0007 * cos_deg(2.0 * w);
        let sum: f64 = PERIODIC_TERMS
            .iter()
            .map(|&(a, b, c)| a * cos_deg(b + c * t))
            .sum();

        mean + 0.000_01 * sum / delta_lambda
    }

    fn delta_t(&self, year: f64) -> f64 {
        if (DELTA_T_FIRST_YEAR..=DELTA_T_LAST_YEAR).contains(&year) {
            let position = (year - DELTA_T_FIRST_YEAR) / 2.0;
            let index = position.floor() as usize;
            let fraction = position - position.floor();
            let (a, b) = (DELTA_T_TABLE[index], DELTA_T_TABLE[index + 1]);
            return a + (b - a) * fraction;
        }

        let t = (year - 2000.0) / 100.0;
        if year < 948.0 {
            2177.0 + 497.0 * t + 44.1 * t * t
        } else {
            let mut dt = 102.0 + 102.0 * t + 25.3 * t * t;
            // Keeps the extrapolation continuous with observations through 2100
            if year > 2000.0 && year < 2100.0 {
                dt += 0.37 * (year - 2100.0);
            }
            dt
        }
    }

    // Smart's series in the Sun's mean longitude and anomaly (Meeus eq. 28.3)
    fn equation_of_time(&self, jde: f64) -> f64 {
        let t = (jde - J2000) / JULIAN_CENTURY;
        let mean_longitude = (280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t).to_radians();
        let mean_anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
        let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;
        let obliquity = polynomial(
            &[23.439_291_111, -0.013_004_166_7, -0.000_000_163_9, 0.000_000_503_6],
            t,
        )
        .to_radians();

        let y = (obliquity / 2.0).tan().powi(2);
        let e = eccentricity;
        let l2 = 2.0 * mean_longitude;
        let equation = y * l2.sin() - 2.0 * e * mean_anomaly.sin()
            + 4.0 * e * y * mean_anomaly.sin() * l2.cos()
            - 0.5 * y * y * (2.0 * l2).sin()
            - 1.25 * e * e * (2.0 * mean_anomaly).sin();

        let days = equation / TAU;
        floor_mod_f64(days + 0.5, 1.0) - 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: f64 = 1.0 / 1440.0;

    #[test]
    fn test_march_equinox_2024() {
        // 2024-03-20 03:06 UT, 03:07 TT
        let jde = MeeusEphemeris.equinox_or_solstice(2024, SeasonEvent::MarchEquinox);
        assert!((jde - 2_460_389.629_9).abs() < 3.0 * MINUTE, "{jde}");
    }

    #[test]
    fn test_meeus_example_27a() {
        // June solstice 1962: JDE 2437837.39245
        let jde = MeeusEphemeris.equinox_or_solstice(1962, SeasonEvent::JuneSolstice);
        assert!((jde - 2_437_837.392_45).abs() < MINUTE, "{jde}");
    }

    #[test]
    fn test_events_in_order() {
        for year in [-500, 0, 999, 1000, 1792, 2000, 2500] {
            let events = [
                SeasonEvent::MarchEquinox,
                SeasonEvent::JuneSolstice,
                SeasonEvent::SeptemberEquinox,
                SeasonEvent::DecemberSolstice,
            ]
            .map(|event| MeeusEphemeris.equinox_or_solstice(year, event));
            assert!(events.windows(2).all(|pair| pair[0] < pair[1]), "{year}");
            // Roughly three months apart
            for pair in events.windows(2) {
                assert!((85.0..95.0).contains(&(pair[1] - pair[0])), "{year}");
            }
        }
    }

    #[test]
    fn test_delta_t() {
        let eph = MeeusEphemeris;
        assert!((eph.delta_t(1620.0) - 121.0).abs() < 1e-9);
        assert!((eph.delta_t(1621.0) - 116.5).abs() < 1e-9);
        assert!((eph.delta_t(2000.0) - 63.8).abs() < 1e-9);
        // Extrapolations
        assert!((eph.delta_t(2024.0) - 99.817_28).abs() < 1e-9);
        assert!((eph.delta_t(500.0) - 4644.5).abs() < 1e-9);
        assert!((eph.delta_t(1500.0) - 224.5).abs() < 1e-9);
    }

    #[test]
    fn test_equation_of_time() {
        let eph = MeeusEphemeris;
        // Early November the sundial runs about 16.4 minutes fast
        let november = eph.equation_of_time(2_451_485.5);
        assert!((november / MINUTE - 16.4).abs() < 0.5, "{}", november / MINUTE);
        // Mid February it runs about 14.2 minutes slow
        let february = eph.equation_of_time(2_451_588.5);
        assert!((february / MINUTE + 14.2).abs() < 0.5, "{}", february / MINUTE);
        for offset in 0..400 {
            let e = eph.equation_of_time(2_451_545.0 + f64::from(offset));
            assert!(e.abs() < 17.0 * MINUTE);
        }
    }
}
