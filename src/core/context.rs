use chrono::{DateTime, Utc};

use super::framebuffer::Framebuffer;
use super::uniform_state::UniformState;
use crate::error::Result;

/// Render target plus the uniform values of the last frame
#[derive(Debug, Clone)]
pub struct Context {
    framebuffer: Framebuffer,
    uniform_state: UniformState,
}

impl Context {
    pub fn new(width: u32, height: u32, time: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            framebuffer: Framebuffer::new(width, height)?,
            uniform_state: UniformState::new(time),
        })
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn uniform_state(&self) -> &UniformState {
        &self.uniform_state
    }

    pub fn uniform_state_mut(&mut self) -> &mut UniformState {
        &mut self.uniform_state
    }

    pub fn drawing_buffer_width(&self) -> u32 {
        self.framebuffer.dimensions().0
    }

    pub fn drawing_buffer_height(&self) -> u32 {
        self.framebuffer.dimensions().1
    }

    /// Replace the drawing buffer; contents are undefined until the next clear
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.framebuffer.dimensions() != (width, height) {
            self.framebuffer = Framebuffer::new(width, height)?;
        }
        Ok(())
    }
}
