use chrono::{DateTime, Utc};

use super::uniform_state::UniformState;
use crate::camera::Camera;
use crate::scene_mode::SceneMode;

/// Everything a primitive may read while queuing commands for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameState<'a> {
    pub frame_number: u64,
    pub time: DateTime<Utc>,
    pub mode: SceneMode,
    pub camera: &'a Camera,
    pub uniform_state: &'a UniformState,
    pub drawing_buffer_width: u32,
    pub drawing_buffer_height: u32,
}

impl<'a> FrameState<'a> {
    pub fn drawing_buffer_dimensions(&self) -> (u32, u32) {
        (self.drawing_buffer_width, self.drawing_buffer_height)
    }
}
