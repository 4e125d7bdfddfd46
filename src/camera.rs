use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};

use crate::math::{BoundingSphere, Ellipsoid, GeographicProjection};
use crate::scene_mode::SceneMode;

pub const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_3;
pub const MINIMUM_ZOOM_DISTANCE: f64 = 1.0;

/// Distance of the default view from the globe, in ellipsoid radii
const DEFAULT_VIEW_FACTOR: f64 = 3.0;

/// Perspective frustum. `fov` spans the larger drawing-buffer dimension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PerspectiveFrustum {
    pub fov: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveFrustum {
    pub fn new(fov: f64, aspect_ratio: f64) -> Self {
        Self {
            fov,
            aspect_ratio,
            near: 1.0,
            far: f64::INFINITY,
        }
    }

    /// Vertical field of view
    pub fn fovy(&self) -> f64 {
        if self.aspect_ratio <= 1.0 {
            self.fov
        } else {
            ((self.fov * 0.5).tan() / self.aspect_ratio).atan() * 2.0
        }
    }

    /// Horizontal field of view
    pub fn fovx(&self) -> f64 {
        ((self.fovy() * 0.5).tan() * self.aspect_ratio).atan() * 2.0
    }

    /// The narrower of the two fields of view
    pub fn min_fov(&self) -> f64 {
        self.fovx().min(self.fovy())
    }
}

impl Default for PerspectiveFrustum {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, 1.0)
    }
}

/// Camera offset relative to a target, in the target's local frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeadingPitchRange {
    /// Clockwise from local north, radians
    pub heading: f64,
    /// Above the local horizontal, radians; negative looks down
    pub pitch: f64,
    /// Distance from the target; 0 picks a distance that fits the target
    pub range: f64,
}

impl HeadingPitchRange {
    pub fn new(heading: f64, pitch: f64, range: f64) -> Self {
        Self { heading, pitch, range }
    }
}

impl Default for HeadingPitchRange {
    fn default() -> Self {
        Self::new(0.0, -std::f64::consts::FRAC_PI_4, 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: DVec3,
    pub direction: DVec3,
    pub up: DVec3,
    pub frustum: PerspectiveFrustum,
    mode: SceneMode,
    ellipsoid: Ellipsoid,
}

impl Camera {
    pub fn new(aspect_ratio: f64) -> Self {
        let mut camera = Self {
            position: DVec3::ZERO,
            direction: DVec3::NEG_Z,
            up: DVec3::Y,
            frustum: PerspectiveFrustum::new(DEFAULT_FOV, aspect_ratio),
            mode: SceneMode::Scene3D,
            ellipsoid: Ellipsoid::WGS84,
        };
        camera.reset_for_mode(SceneMode::Scene3D);
        camera
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Move to the default view of `mode`
    pub fn reset_for_mode(&mut self, mode: SceneMode) {
        self.mode = mode;
        let distance = self.ellipsoid.maximum_radius() * DEFAULT_VIEW_FACTOR;

        if mode.is_projected() {
            let origin = GeographicProjection::new(self.ellipsoid).project(Default::default());
            self.set_view(origin + DVec3::Z * distance, DVec3::NEG_Z, DVec3::Y);
        } else {
            self.set_view(DVec3::X * distance, DVec3::NEG_X, DVec3::Z);
        }
    }

    pub fn right(&self) -> DVec3 {
        self.direction.cross(self.up).normalize()
    }

    /// Position and orient the camera, re-orthonormalizing `up` against `direction`
    pub fn set_view(&mut self, position: DVec3, direction: DVec3, up: DVec3) {
        let direction = direction.normalize();
        let right = direction.cross(up);
        let right = if right.length_squared() < 1e-24 {
            direction.any_orthonormal_vector()
        } else {
            right.normalize()
        };

        self.position = position;
        self.direction = direction;
        self.up = right.cross(direction);
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_to_rh(self.position, self.direction, self.up)
    }

    /// Frame `sphere` with the default offset: heading 0, pitch -45°, fitted range
    pub fn view_bounding_sphere(&mut self, sphere: &BoundingSphere) {
        self.view_bounding_sphere_with_offset(sphere, HeadingPitchRange::default());
    }

    pub fn view_bounding_sphere_with_offset(&mut self, sphere: &BoundingSphere, offset: HeadingPitchRange) {
        let range = if offset.range > 0.0 {
            offset.range
        } else {
            (sphere.radius / (self.frustum.min_fov() * 0.5).sin()).max(MINIMUM_ZOOM_DISTANCE)
        };

        let pitch = offset.pitch.clamp(-std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
        let (sin_heading, cos_heading) = offset.heading.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();

        let local_direction = DVec3::new(sin_heading * cos_pitch, cos_heading * cos_pitch, sin_pitch);
        let local_right = DVec3::new(cos_heading, -sin_heading, 0.0);
        let local_up = local_right.cross(local_direction);

        let frame = self.local_frame(sphere.center);
        let direction = frame * local_direction;
        let up = frame * local_up;

        self.set_view(sphere.center - direction * range, direction, up);
    }

    /// East-north-up at `origin` in 3D; the projected map axes otherwise
    fn local_frame(&self, origin: DVec3) -> DMat3 {
        if self.mode.is_projected() {
            DMat3::IDENTITY
        } else {
            self.ellipsoid.east_north_up_frame(origin)
        }
    }

    /// Window coordinates (origin top-left, y down) of a world point, or
    /// `None` if it is not in front of the camera.
    pub fn world_to_window(&self, point: DVec3, width: u32, height: u32) -> Option<DVec2> {
        let eye = self.view_matrix() * DVec4::from((point, 1.0));
        if eye.z >= 0.0 {
            return None;
        }

        let depth = -eye.z;
        let ndc_x = eye.x / (depth * (self.frustum.fovx() * 0.5).tan());
        let ndc_y = eye.y / (depth * (self.frustum.fovy() * 0.5).tan());

        Some(DVec2::new(
            (ndc_x + 1.0) * 0.5 * f64::from(width),
            (1.0 - ndc_y) * 0.5 * f64::from(height),
        ))
    }

    /// Conservative test of a sphere against the frustum's side planes
    pub fn is_sphere_visible(&self, sphere: &BoundingSphere) -> bool {
        let to_center = sphere.center - self.position;
        if to_center.length_squared() <= sphere.radius * sphere.radius {
            return true;
        }

        let half_x = self.frustum.fovx() * 0.5;
        let half_y = self.frustum.fovy() * 0.5;
        let right = self.right();

        // Inward-facing plane normals through the camera position
        let planes = [
            self.direction * half_x.sin() + right * half_x.cos(),
            self.direction * half_x.sin() - right * half_x.cos(),
            self.direction * half_y.sin() + self.up * half_y.cos(),
            self.direction * half_y.sin() - self.up * half_y.cos(),
        ];

        let near_distance = to_center.dot(self.direction) - self.frustum.near;
        near_distance >= -sphere.radius
            && planes.iter().all(|normal| to_center.dot(*normal) >= -sphere.radius)
    }
}
