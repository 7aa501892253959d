mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::{
    world_radius_to_px, world_to_screen, ProjectedPoint, Viewport, VERTICAL_FOV_RADIANS,
};

pub const MARKER_MIN_HALF_SIZE_PX: i32 = 2;
pub const MARKER_MAX_HALF_SIZE_PX: i32 = 48;
