use chrono::{DateTime, Utc};
use glam::{DMat4, DVec3};

use super::sun_position::{compute_sun_position_fixed, JulianDate};
use crate::camera::Camera;
use crate::math::GeographicProjection;
use crate::scene_mode::SceneMode;

/// Per-frame values shared by everything drawn in the frame
#[derive(Debug, Clone)]
pub struct UniformState {
    frame_number: u64,
    time: DateTime<Utc>,
    mode: SceneMode,
    view: DMat4,
    camera_position: DVec3,
    sun_position_fixed: DVec3,
    sun_position_columbus_view: DVec3,
    sun_position_wc: DVec3,
    sun_direction_wc: DVec3,
}

impl UniformState {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            frame_number: 0,
            time,
            mode: SceneMode::Scene3D,
            view: DMat4::IDENTITY,
            camera_position: DVec3::ZERO,
            sun_position_fixed: DVec3::ZERO,
            sun_position_columbus_view: DVec3::ZERO,
            sun_position_wc: DVec3::ZERO,
            sun_direction_wc: DVec3::ZERO,
        }
    }

    pub fn update(
        &mut self,
        frame_number: u64,
        mode: SceneMode,
        time: DateTime<Utc>,
        camera: &Camera,
        projection: &GeographicProjection,
    ) {
        self.frame_number = frame_number;
        self.mode = mode;
        self.view = camera.view_matrix();
        self.camera_position = camera.position;

        if time != self.time || self.sun_position_fixed == DVec3::ZERO {
            self.time = time;
            self.sun_position_fixed = compute_sun_position_fixed(JulianDate::from(time));
            let cartographic = projection
                .ellipsoid()
                .cartesian_to_cartographic(self.sun_position_fixed);
            self.sun_position_columbus_view = projection.project(cartographic);
        }

        self.sun_position_wc = if mode.is_projected() {
            self.sun_position_columbus_view
        } else {
            self.sun_position_fixed
        };
        self.sun_direction_wc = self.sun_position_wc.normalize_or_zero();
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn view(&self) -> DMat4 {
        self.view
    }

    pub fn camera_position(&self) -> DVec3 {
        self.camera_position
    }

    /// Sun position in Earth-fixed coordinates
    pub fn sun_position_fixed(&self) -> DVec3 {
        self.sun_position_fixed
    }

    /// Sun position in projected (easting, northing, height) coordinates
    pub fn sun_position_columbus_view(&self) -> DVec3 {
        self.sun_position_columbus_view
    }

    /// Sun position in the world coordinates of the current scene mode
    pub fn sun_position_wc(&self) -> DVec3 {
        self.sun_position_wc
    }

    pub fn sun_direction_wc(&self) -> DVec3 {
        self.sun_direction_wc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ASTRONOMICAL_UNIT;
    use chrono::TimeZone;

    fn time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn sun_position_wc_follows_mode() {
        let camera = Camera::new(1.0);
        let projection = GeographicProjection::default();
        let mut state = UniformState::new(time());

        state.update(1, SceneMode::Scene3D, time(), &camera, &projection);
        assert_eq!(state.sun_position_wc(), state.sun_position_fixed());
        let distance = state.sun_position_wc().length() / ASTRONOMICAL_UNIT;
        assert!((0.98..=1.02).contains(&distance));

        state.update(2, SceneMode::ColumbusView, time(), &camera, &projection);
        assert_eq!(state.sun_position_wc(), state.sun_position_columbus_view());
        assert_eq!(state.frame_number(), 2);
        assert_eq!(state.mode(), SceneMode::ColumbusView);
    }

    #[test]
    fn columbus_view_position_unprojects_to_fixed() {
        let camera = Camera::new(1.0);
        let projection = GeographicProjection::default();
        let mut state = UniformState::new(time());
        state.update(1, SceneMode::ColumbusView, time(), &camera, &projection);

        let cartographic = projection.unproject(state.sun_position_columbus_view());
        let fixed = projection.ellipsoid().cartographic_to_cartesian(cartographic);
        let error = fixed.distance(state.sun_position_fixed()) / state.sun_position_fixed().length();
        assert!(error < 1e-9);
    }

    #[test]
    fn sun_direction_is_unit_length() {
        let camera = Camera::new(1.0);
        let mut state = UniformState::new(time());
        state.update(1, SceneMode::Scene3D, time(), &camera, &GeographicProjection::default());
        assert!((state.sun_direction_wc().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn camera_values_are_copied() {
        let mut camera = Camera::new(1.0);
        camera.position = DVec3::new(1.0, 2.0, 3.0);
        let mut state = UniformState::new(time());
        state.update(7, SceneMode::Scene3D, time(), &camera, &GeographicProjection::default());
        assert_eq!(state.camera_position(), camera.position);
        assert_eq!(state.view(), camera.view_matrix());
    }
}
