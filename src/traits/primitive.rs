use crate::core::{DrawCommand, FrameState};
use crate::error::Result;

/// Something the scene updates once per frame and that may queue a draw
pub trait Primitive {
    /// Inspect the frame and return the command to draw, if any
    fn update(&mut self, frame_state: &FrameState) -> Result<Option<DrawCommand>>;

    /// Whether `destroy` has been called
    fn is_destroyed(&self) -> bool;

    /// Release resources. The primitive must not be updated afterwards.
    fn destroy(&mut self) -> Result<()>;

    /// Name used in errors and logs
    fn name(&self) -> &'static str {
        "Primitive"
    }
}
