//! Procedural sun sprite: a limb-darkened disc with an optional lens-flare glow.

pub const MIN_TEXTURE_SIZE: u32 = 64;
pub const MAX_TEXTURE_SIZE: u32 = 1024;

/// Largest glow radius beyond the disc, in sun radii
pub const MAX_GLOW_EXTENT: f64 = 4.0;

const SUN_COLOR: [f32; 3] = [1.0, 0.98, 0.88];
const GLOW_COLOR: [f32; 3] = [1.0, 0.85, 0.55];
const LIMB_DARKENING: f32 = 0.6;
const RAY_COUNT: f64 = 6.0;

/// Texture side length for a drawing buffer of the given size
pub fn texture_size_for(width: u32, height: u32) -> u32 {
    let side = width
        .max(height)
        .checked_next_power_of_two()
        .unwrap_or(MAX_TEXTURE_SIZE * 4);
    (side / 4).clamp(MIN_TEXTURE_SIZE, MAX_TEXTURE_SIZE)
}

/// Half-width of the texture in sun radii
pub fn extent_for(glow_factor: f64) -> f64 {
    1.0 + glow_factor.clamp(0.0, MAX_GLOW_EXTENT)
}

/// Peak glow opacity just outside the disc
fn glow_intensity(glow_factor: f64) -> f64 {
    1.0 - (-glow_factor.max(0.0)).exp()
}

/// Square straight-alpha RGBA texture centred on the sun
#[derive(Clone, Debug)]
pub struct SunTexture {
    size: u32,
    glow_factor: f64,
    extent: f64,
    texels: Vec<[f32; 4]>,
}

impl SunTexture {
    pub fn generate(glow_factor: f64, size: u32) -> Self {
        let size = size.max(1);
        let extent = extent_for(glow_factor);
        let intensity = glow_intensity(glow_factor);

        let mut texels = Vec::with_capacity((size as usize) * (size as usize));
        for row in 0..size {
            let y = texel_to_radius(row, size, extent);
            for column in 0..size {
                let x = texel_to_radius(column, size, extent);
                texels.push(shade(x, y, extent, intensity));
            }
        }

        log::debug!(
            "generated {}x{} sun texture (glow factor {}, extent {:.2})",
            size,
            size,
            glow_factor,
            extent
        );

        Self { size, glow_factor, extent, texels }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn glow_factor(&self) -> f64 {
        self.glow_factor
    }

    /// Half-width of the texture in sun radii
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Nearest-neighbour lookup; `(0, 0)` is the top-left corner.
    /// Coordinates outside `[0, 1]` are transparent.
    pub fn sample(&self, u: f64, v: f64) -> [f32; 4] {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return [0.0; 4];
        }

        let last = (self.size - 1) as f64;
        let column = (u * self.size as f64).floor().min(last) as usize;
        let row = (v * self.size as f64).floor().min(last) as usize;
        self.texels[row * self.size as usize + column]
    }
}

fn texel_to_radius(index: u32, size: u32, extent: f64) -> f64 {
    ((f64::from(index) + 0.5) / f64::from(size) * 2.0 - 1.0) * extent
}

fn shade(x: f64, y: f64, extent: f64, intensity: f64) -> [f32; 4] {
    let r = (x * x + y * y).sqrt();

    if r <= 1.0 {
        let mu = (1.0 - r * r).sqrt() as f32;
        let brightness = 1.0 - LIMB_DARKENING * (1.0 - mu);
        return [
            SUN_COLOR[0] * brightness,
            SUN_COLOR[1] * brightness,
            SUN_COLOR[2] * brightness,
            1.0,
        ];
    }

    let glow_width = extent - 1.0;
    if intensity <= 0.0 || glow_width <= 0.0 || r >= extent {
        return [0.0; 4];
    }

    let t = (r - 1.0) / glow_width;
    let falloff = (-4.0 * t).exp() * (1.0 - t * t);
    let rays = 0.7 + 0.3 * (RAY_COUNT * y.atan2(x)).cos().abs().powi(4);
    let alpha = (intensity * falloff * rays).clamp(0.0, 1.0) as f32;

    [GLOW_COLOR[0], GLOW_COLOR[1], GLOW_COLOR[2], alpha]
}
