mod bounding_sphere;
mod color;
mod ellipsoid;
mod projection;

pub use bounding_sphere::BoundingSphere;
pub use color::Color;
pub use ellipsoid::{Cartographic, Ellipsoid};
pub use projection::GeographicProjection;

/// Mean radius of the sun in metres
pub const SOLAR_RADIUS: f64 = 6.955e8;

/// Astronomical unit in metres
pub const ASTRONOMICAL_UNIT: f64 = 1.495_978_707e11;

pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;

/// Wrap an angle into `[0, 2π)`
pub fn zero_to_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TWO_PI);
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_to_two_pi() {
        assert_eq!(zero_to_two_pi(0.0), 0.0);
        assert!((zero_to_two_pi(-std::f64::consts::FRAC_PI_2) - 1.5 * std::f64::consts::PI).abs() < 1e-12);
        assert!((zero_to_two_pi(5.0 * std::f64::consts::PI) - std::f64::consts::PI).abs() < 1e-12);
        assert!(zero_to_two_pi(-1e-20) < TWO_PI);
    }
}
