//! Low-precision solar ephemeris.
//!
//! Accurate to about 0.01° in direction between 1950 and 2050, which is far
//! below a pixel for anything the camera can frame.

use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::math::{zero_to_two_pi, ASTRONOMICAL_UNIT};

/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00 TT, treated as UTC)
pub const J2000_JULIAN_DATE: f64 = 2_451_545.0;

const UNIX_EPOCH_JULIAN_DATE: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Continuous day count used by the ephemeris
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct JulianDate(pub f64);

impl JulianDate {
    pub fn from_datetime(time: &DateTime<Utc>) -> Self {
        let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) * 1e-9;
        Self(seconds / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DATE)
    }

    pub fn days_since_j2000(&self) -> f64 {
        self.0 - J2000_JULIAN_DATE
    }

    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }
}

impl From<DateTime<Utc>> for JulianDate {
    fn from(time: DateTime<Utc>) -> Self {
        Self::from_datetime(&time)
    }
}

/// Sun position in metres, Earth-centred inertial equatorial frame
pub fn compute_sun_position_inertial(date: JulianDate) -> DVec3 {
    let n = date.days_since_j2000();

    let mean_longitude = (280.460 + 0.985_647_4 * n).to_radians();
    let mean_anomaly = (357.528 + 0.985_600_3 * n).to_radians();
    let ecliptic_longitude = mean_longitude
        + (1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin()).to_radians();
    let obliquity = (23.439 - 0.000_000_4 * n).to_radians();
    let distance = 1.000_14 - 0.016_71 * mean_anomaly.cos() - 0.000_14 * (2.0 * mean_anomaly).cos();

    let (sin_lambda, cos_lambda) = ecliptic_longitude.sin_cos();
    let (sin_epsilon, cos_epsilon) = obliquity.sin_cos();

    DVec3::new(
        cos_lambda,
        cos_epsilon * sin_lambda,
        sin_epsilon * sin_lambda,
    ) * (distance * ASTRONOMICAL_UNIT)
}

/// Greenwich mean sidereal time in radians, `[0, 2π)`
pub fn greenwich_mean_sidereal_time(date: JulianDate) -> f64 {
    let n = date.days_since_j2000();
    let t = date.centuries_since_j2000();
    let degrees = 280.460_618_37 + 360.985_647_366_29 * n + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    zero_to_two_pi(degrees.to_radians())
}

/// Sun position in metres, Earth-fixed frame
pub fn compute_sun_position_fixed(date: JulianDate) -> DVec3 {
    let inertial = compute_sun_position_inertial(date);
    let (sin_theta, cos_theta) = greenwich_mean_sidereal_time(date).sin_cos();

    DVec3::new(
        cos_theta * inertial.x + sin_theta * inertial.y,
        -sin_theta * inertial.x + cos_theta * inertial.y,
        inertial.z,
    )
}
