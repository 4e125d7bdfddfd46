use thiserror::Error;

/// Errors raised while building or rendering a scene
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("{0} was used after it was destroyed")]
    Destroyed(&'static str),

    #[error("drawing buffer must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("field of view must be finite and within (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error(
        "pixel rectangle at ({x}, {y}) sized {width}x{height} lies outside the {buffer_width}x{buffer_height} drawing buffer"
    )]
    ReadOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        buffer_width: u32,
        buffer_height: u32,
    },
}

/// Errors raised while loading scene options
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scene options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown scene mode '{0}' (expected 3d, columbus-view, 2d or morphing)")]
    UnknownMode(String),

    #[error("drawing buffer must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("field of view must be finite and within (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),
}

pub type Result<T> = std::result::Result<T, RenderError>;
