pub mod app;

pub use app::{
    approach, run_app, spherical_to_cartesian, world_radius_to_px, world_to_screen, AppError,
    CameraView, FrameView, InputAction, InputSnapshot, LoopConfig, LoopStatsSnapshot,
    PointerEvent, ProjectedPoint, Renderer, Rotation, Scene, TouchPhase, Vec2, Vec3, ViewMarker,
    Viewport, SLOW_FRAME_ENV_VAR, VERTICAL_FOV_RADIANS,
};
