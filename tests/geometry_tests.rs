use glam::DVec3;
use sun_scene::math::{BoundingSphere, Cartographic, Ellipsoid, GeographicProjection, SOLAR_RADIUS};
use sun_scene::{Camera, HeadingPitchRange, SceneMode};

#[cfg(test)]
mod framing_tests {
    use super::*;

    #[test]
    fn test_framed_sphere_fills_narrow_dimension() {
        let mut camera = Camera::new(2.0);
        let sphere = BoundingSphere::new(DVec3::new(0.0, 1.4e11, 3.0e10), SOLAR_RADIUS);
        camera.view_bounding_sphere(&sphere);

        // Top of the sphere as seen by the camera lands on the top edge
        let distance = camera.position.distance(sphere.center);
        let tangent = (distance * distance - sphere.radius * sphere.radius).sqrt();
        let alpha = (sphere.radius / distance).asin();
        let top = camera.position + (camera.direction * alpha.cos() + camera.up * alpha.sin()) * tangent;
        let window = camera.world_to_window(top, 200, 100).expect("top should be in front");

        assert!(window.y.abs() < 1.0, "Top of sphere should touch the top edge, got {}", window.y);
        assert!((window.x - 100.0).abs() < 1e-3, "Sphere should be horizontally centred");
    }

    #[test]
    fn test_heading_rotates_around_target() {
        let mut camera = Camera::new(1.0);
        camera.reset_for_mode(SceneMode::ColumbusView);
        let target = BoundingSphere::new(DVec3::new(5000.0, 5000.0, 0.0), 10.0);

        camera.view_bounding_sphere_with_offset(&target, HeadingPitchRange::new(0.0, 0.0, 100.0));
        assert!((camera.position - DVec3::new(5000.0, 4900.0, 0.0)).length() < 1e-6);

        camera.view_bounding_sphere_with_offset(
            &target,
            HeadingPitchRange::new(std::f64::consts::FRAC_PI_2, 0.0, 100.0),
        );
        assert!((camera.position - DVec3::new(4900.0, 5000.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_straight_down_keeps_a_valid_up() {
        let mut camera = Camera::new(1.0);
        camera.reset_for_mode(SceneMode::ColumbusView);
        let target = BoundingSphere::new(DVec3::ZERO, 1.0);

        camera.view_bounding_sphere_with_offset(
            &target,
            HeadingPitchRange::new(0.0, -std::f64::consts::FRAC_PI_2, 50.0),
        );

        assert!((camera.direction - DVec3::NEG_Z).length() < 1e-12);
        assert!((camera.up.length() - 1.0).abs() < 1e-12);
        assert!(camera.up.dot(camera.direction).abs() < 1e-12);
    }
}

#[cfg(test)]
mod projection_tests {
    use super::*;

    #[test]
    fn test_sun_distance_survives_projection() {
        let ellipsoid = Ellipsoid::WGS84;
        let projection = GeographicProjection::new(ellipsoid);
        let fixed = DVec3::new(-1.2e11, 8.0e10, 2.5e10);

        let projected = projection.project(ellipsoid.cartesian_to_cartographic(fixed));
        let height = projected.z;
        assert!(
            (height + ellipsoid.radii.x - fixed.length()).abs() / fixed.length() < 1e-4,
            "Projected height should be the distance above the surface"
        );

        let back = ellipsoid.cartographic_to_cartesian(projection.unproject(projected));
        assert!(back.distance(fixed) / fixed.length() < 1e-9);
    }

    #[test]
    fn test_projected_longitude_is_linear() {
        let projection = GeographicProjection::default();
        let west = projection.project(Cartographic::from_degrees(-90.0, 0.0, 0.0));
        let east = projection.project(Cartographic::from_degrees(90.0, 0.0, 0.0));
        assert!((east.x + west.x).abs() < 1e-6);
        assert!((east.x - std::f64::consts::FRAC_PI_2 * 6_378_137.0).abs() < 1e-6);
    }
}
