pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod scene;
pub mod scene_mode;
pub mod sun;
pub mod sun_texture;
pub mod traits;

pub use camera::{Camera, HeadingPitchRange, PerspectiveFrustum};
pub use config::{SceneOptions, SunOptions};
pub use error::{ConfigError, RenderError};
pub use scene::Scene;
pub use scene_mode::SceneMode;
pub use sun::Sun;
