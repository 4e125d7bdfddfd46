use glam::{DMat3, DVec3};

/// Geodetic position: longitude/latitude in radians, height in metres
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl Cartographic {
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self { longitude, latitude, height }
    }

    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians(), height)
    }
}

/// Oblate ellipsoid of revolution centred at the origin, polar axis on +Z
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    pub radii: DVec3,
}

const GEODETIC_ITERATIONS: usize = 8;

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        radii: DVec3::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179_3),
    };

    pub fn new(equatorial_radius: f64, polar_radius: f64) -> Self {
        Self {
            radii: DVec3::new(equatorial_radius, equatorial_radius, polar_radius),
        }
    }

    pub fn maximum_radius(&self) -> f64 {
        self.radii.max_element()
    }

    fn eccentricity_squared(&self) -> f64 {
        let a = self.radii.x;
        let b = self.radii.z;
        (a * a - b * b) / (a * a)
    }

    /// Outward normal of the surface that passes through `position`'s geodetic latitude
    pub fn geodetic_surface_normal(&self, position: DVec3) -> DVec3 {
        (position / (self.radii * self.radii)).normalize_or_zero()
    }

    pub fn cartographic_to_cartesian(&self, cartographic: Cartographic) -> DVec3 {
        let a = self.radii.x;
        let e2 = self.eccentricity_squared();
        let (sin_lat, cos_lat) = cartographic.latitude.sin_cos();
        let (sin_lon, cos_lon) = cartographic.longitude.sin_cos();

        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let h = cartographic.height;

        DVec3::new(
            (n + h) * cos_lat * cos_lon,
            (n + h) * cos_lat * sin_lon,
            (n * (1.0 - e2) + h) * sin_lat,
        )
    }

    /// Iterative geodetic inversion; well behaved from the surface out to
    /// astronomical distances.
    pub fn cartesian_to_cartographic(&self, position: DVec3) -> Cartographic {
        let a = self.radii.x;
        let b = self.radii.z;
        let e2 = self.eccentricity_squared();

        let longitude = position.y.atan2(position.x);
        let p = (position.x * position.x + position.y * position.y).sqrt();

        if p < 1e-9 * a {
            let latitude = std::f64::consts::FRAC_PI_2.copysign(position.z);
            return Cartographic::new(longitude, latitude, position.z.abs() - b);
        }

        let mut latitude = position.z.atan2(p * (1.0 - e2));
        let mut height = 0.0;
        for _ in 0..GEODETIC_ITERATIONS {
            let sin_lat = latitude.sin();
            let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            height = p / latitude.cos() - n;
            latitude = position.z.atan2(p * (1.0 - e2 * n / (n + height)));
        }

        Cartographic::new(longitude, latitude, height)
    }

    /// Columns are the local east, north and up axes at `origin`
    pub fn east_north_up_frame(&self, origin: DVec3) -> DMat3 {
        let up = self.geodetic_surface_normal(origin);
        if up == DVec3::ZERO {
            return DMat3::IDENTITY;
        }

        let east = DVec3::new(-origin.y, origin.x, 0.0);
        let east = if east.length_squared() < 1e-12 {
            // Pole: take the limit along the prime meridian
            DVec3::Y
        } else {
            east.normalize()
        };
        let north = up.cross(east);

        DMat3::from_cols(east, north, up)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
