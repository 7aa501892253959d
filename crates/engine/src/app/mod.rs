mod input;
mod loop_runner;
mod math;
mod metrics;
mod rendering;
mod scene;

pub use input::{InputAction, PointerEvent, TouchPhase};
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use math::{approach, spherical_to_cartesian, Rotation, Vec2, Vec3};
pub use metrics::LoopStatsSnapshot;
pub use rendering::{
    world_radius_to_px, world_to_screen, ProjectedPoint, Renderer, Viewport,
    VERTICAL_FOV_RADIANS,
};
pub use scene::{CameraView, FrameView, InputSnapshot, Scene, ViewMarker};
