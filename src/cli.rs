// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::config::{SceneOptions, SunOptions};
use crate::error::ConfigError;
use crate::scene_mode::SceneMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "sun-scene")]
#[command(about = "Render the sun for a given time and scene mode", long_about = None)]
pub struct Cli {
    /// JSON scene options; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Drawing buffer width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Drawing buffer height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Scene mode: 3d, columbus-view, 2d or morphing
    #[arg(long)]
    pub mode: Option<SceneMode>,

    /// Lens-flare glow strength
    #[arg(long = "glow-factor")]
    pub glow_factor: Option<f64>,

    /// Scene time, RFC 3339 (defaults to now)
    #[arg(long)]
    pub time: Option<DateTime<Utc>>,

    /// Keep the sun but do not draw it
    #[arg(long = "hide-sun", default_value = "false")]
    pub hide_sun: bool,

    /// Leave the camera at the mode's default view instead of framing the sun
    #[arg(long = "no-frame", default_value = "false")]
    pub no_frame: bool,

    /// Write the rendered frame as a binary PPM
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Merge the config file (if any) with the command-line overrides.
    /// The scene always gets a sun.
    pub fn scene_options(&self) -> Result<SceneOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => SceneOptions::from_path(path)?,
            None => SceneOptions::default(),
        };

        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(mode) = self.mode {
            options.mode = mode;
        }
        if let Some(time) = self.time {
            options.time = Some(time);
        }

        let sun = options.sun.get_or_insert_with(SunOptions::default);
        if let Some(glow_factor) = self.glow_factor {
            sun.glow_factor = glow_factor;
        }
        if self.hide_sun {
            sun.show = false;
        }

        options.validate()?;
        Ok(options)
    }
}
