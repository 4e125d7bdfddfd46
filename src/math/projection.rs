use glam::DVec3;

use super::ellipsoid::{Cartographic, Ellipsoid};

/// Equirectangular projection used by Columbus view and 2D.
/// Projected coordinates are `(easting, northing, height)` in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeographicProjection {
    ellipsoid: Ellipsoid,
    semimajor_axis: f64,
}

impl GeographicProjection {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self {
            ellipsoid,
            semimajor_axis: ellipsoid.maximum_radius(),
        }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn project(&self, cartographic: Cartographic) -> DVec3 {
        DVec3::new(
            cartographic.longitude * self.semimajor_axis,
            cartographic.latitude * self.semimajor_axis,
            cartographic.height,
        )
    }

    pub fn unproject(&self, projected: DVec3) -> Cartographic {
        let inverse = 1.0 / self.semimajor_axis;
        Cartographic::new(projected.x * inverse, projected.y * inverse, projected.z)
    }
}

impl Default for GeographicProjection {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}
