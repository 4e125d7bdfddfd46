use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_FOV;
use crate::error::ConfigError;
use crate::math::Color;
use crate::scene_mode::SceneMode;
use crate::sun::{Sun, DEFAULT_GLOW_FACTOR};

pub const DEFAULT_WIDTH: u32 = 64;
pub const DEFAULT_HEIGHT: u32 = 64;

/// Open interval `(0, 180)`; NaN and infinities are rejected
pub(crate) fn is_valid_fov_degrees(degrees: f64) -> bool {
    degrees.is_finite() && degrees > 0.0 && degrees < 180.0
}

/// Initial state of the scene's sun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SunOptions {
    pub show: bool,
    pub glow_factor: f64,
}

impl Default for SunOptions {
    fn default() -> Self {
        Self {
            show: true,
            glow_factor: DEFAULT_GLOW_FACTOR,
        }
    }
}

impl SunOptions {
    pub fn build(&self) -> Sun {
        let mut sun = Sun::new();
        sun.show = self.show;
        sun.set_glow_factor(self.glow_factor);
        sun
    }
}

/// Everything needed to construct a [`crate::scene::Scene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneOptions {
    pub width: u32,
    pub height: u32,
    pub mode: SceneMode,
    pub background_color: Color,
    /// Scene time; the current time when absent
    pub time: Option<DateTime<Utc>>,
    /// Field of view across the wider drawing-buffer dimension
    pub fov_degrees: f64,
    /// Sun assigned at construction; none when absent
    pub sun: Option<SunOptions>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mode: SceneMode::Scene3D,
            background_color: Color::BLACK,
            time: None,
            fov_degrees: DEFAULT_FOV.to_degrees(),
            sun: None,
        }
    }
}

impl SceneOptions {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: SceneOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !is_valid_fov_degrees(self.fov_degrees) {
            return Err(ConfigError::InvalidFieldOfView(self.fov_degrees));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}
