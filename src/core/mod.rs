pub mod context;
pub mod draw_command;
pub mod frame_state;
pub mod framebuffer;
pub mod sun_position;
pub mod uniform_state;

pub use context::Context;
pub use draw_command::DrawCommand;
pub use frame_state::FrameState;
pub use framebuffer::{Framebuffer, Rgba8};
pub use sun_position::{
    compute_sun_position_fixed, compute_sun_position_inertial, greenwich_mean_sidereal_time,
    JulianDate,
};
pub use uniform_state::UniformState;
