use std::sync::Arc;

use crate::core::{DrawCommand, FrameState};
use crate::error::{RenderError, Result};
use crate::math::{BoundingSphere, SOLAR_RADIUS};
use crate::scene_mode::SceneMode;
use crate::sun_texture::{texture_size_for, SunTexture};
use crate::traits::Primitive;

pub const DEFAULT_GLOW_FACTOR: f64 = 1.0;

/// Smallest on-screen disc radius, in pixels
const MIN_DISC_RADIUS: f64 = 0.5;

/// The sun, drawn as a billboard at the sun's position for the scene time.
///
/// The sprite is regenerated whenever the glow factor or the drawing buffer
/// size class changes. Only drawn in 3D and Columbus view.
#[derive(Debug, Clone)]
pub struct Sun {
    /// Whether the sun is drawn
    pub show: bool,
    glow_factor: f64,
    glow_factor_dirty: bool,
    texture: Option<Arc<SunTexture>>,
    destroyed: bool,
}

impl Sun {
    pub fn new() -> Self {
        Self {
            show: true,
            glow_factor: DEFAULT_GLOW_FACTOR,
            glow_factor_dirty: true,
            texture: None,
            destroyed: false,
        }
    }

    /// Strength of the lens-flare glow around the disc; 0 draws the bare disc
    pub fn glow_factor(&self) -> f64 {
        self.glow_factor
    }

    /// Negative and NaN values are stored as 0
    pub fn set_glow_factor(&mut self, glow_factor: f64) {
        let glow_factor = glow_factor.max(0.0);
        if glow_factor != self.glow_factor {
            self.glow_factor_dirty = true;
        }
        self.glow_factor = glow_factor;
    }

    /// Sprite used by the last update, if any
    pub fn texture(&self) -> Option<&SunTexture> {
        self.texture.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Release the sprite. Destroying twice is an error.
    pub fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(RenderError::Destroyed("Sun"));
        }

        self.texture = None;
        self.destroyed = true;
        Ok(())
    }

    /// Queue the billboard for this frame, or nothing when hidden or culled
    pub fn update(&mut self, frame_state: &FrameState) -> Result<Option<DrawCommand>> {
        if self.destroyed {
            return Err(RenderError::Destroyed("Sun"));
        }

        if !self.show || !matches!(frame_state.mode, SceneMode::Scene3D | SceneMode::ColumbusView) {
            return Ok(None);
        }

        let (width, height) = frame_state.drawing_buffer_dimensions();
        let texture = self.refresh_texture(texture_size_for(width, height));

        let camera = frame_state.camera;
        let position = frame_state.uniform_state.sun_position_wc();

        let glow_bounds = BoundingSphere::new(position, SOLAR_RADIUS * texture.extent());
        if !camera.is_sphere_visible(&glow_bounds) {
            log::trace!("sun culled by frustum");
            return Ok(None);
        }

        if BoundingSphere::new(position, SOLAR_RADIUS).contains(camera.position) {
            log::trace!("camera is inside the sun");
            return Ok(None);
        }

        let Some(center) = camera.world_to_window(position, width, height) else {
            return Ok(None);
        };

        let distance = camera.position.distance(position);
        let angular_tangent = SOLAR_RADIUS / (distance * distance - SOLAR_RADIUS * SOLAR_RADIUS).sqrt();
        let disc_radius = (angular_tangent / (camera.frustum.fovy() * 0.5).tan() * f64::from(height) * 0.5)
            .max(MIN_DISC_RADIUS);

        Ok(Some(DrawCommand::Billboard {
            center,
            half_extent: disc_radius * texture.extent(),
            texture,
        }))
    }

    fn refresh_texture(&mut self, size: u32) -> Arc<SunTexture> {
        if let Some(texture) = &self.texture {
            if !self.glow_factor_dirty && texture.size() == size {
                return Arc::clone(texture);
            }
        }

        let texture = Arc::new(SunTexture::generate(self.glow_factor, size));
        self.texture = Some(Arc::clone(&texture));
        self.glow_factor_dirty = false;
        texture
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitive for Sun {
    fn update(&mut self, frame_state: &FrameState) -> Result<Option<DrawCommand>> {
        Sun::update(self, frame_state)
    }

    fn is_destroyed(&self) -> bool {
        Sun::is_destroyed(self)
    }

    fn destroy(&mut self) -> Result<()> {
        Sun::destroy(self)
    }

    fn name(&self) -> &'static str {
        "Sun"
    }
}
