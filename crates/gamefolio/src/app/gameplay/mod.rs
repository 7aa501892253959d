use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
use std::fs;
use std::path::{Path, PathBuf};

use engine::{
    approach, spherical_to_cartesian, CameraView, FrameView, InputAction, InputSnapshot,
    PointerEvent, Rotation, Scene, TouchPhase, Vec2, Vec3, ViewMarker,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const MOVE_SPEED: f32 = 8.0;
const BOOST_MULTIPLIER: f32 = 2.0;
const MAX_SPEED: f32 = MOVE_SPEED * BOOST_MULTIPLIER;
const TURN_SPEED: f32 = 3.0;
const DAMPING: f32 = 0.85;
const ANALOG_CONTRIBUTION_THRESHOLD: f32 = 0.1;
const ANALOG_FLAG_THRESHOLD: f32 = 0.3;
const PITCH_ATTENUATION: f32 = 0.3;
const WORLD_MIN: Vec3 = Vec3::new(-50.0, -35.0, -70.0);
const WORLD_MAX: Vec3 = Vec3::new(50.0, 20.0, 20.0);
const SWIM_CUE_PROBABILITY: f64 = 0.1;
const SWIM_INTENSITY_SPEED_SCALE: f32 = 10.0;

const ROTATE_SENSITIVITY: f32 = 0.005;
const PINCH_SENSITIVITY: f32 = 0.02;
const WHEEL_SENSITIVITY: f32 = 0.01;
const MIN_CAMERA_DISTANCE: f32 = 3.0;
const MAX_CAMERA_DISTANCE: f32 = 20.0;
const DEFAULT_CAMERA_DISTANCE: f32 = 8.0;
const MAX_CAMERA_PHI: f32 = FRAC_PI_3;
const CAMERA_SMOOTHING: f32 = 2.5;
const CAMERA_FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 8.0);
const CAMERA_LOOK_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

const AUTO_TRIGGER_RADIUS: f32 = 3.0;
const INTERACTION_RADIUS: f32 = 5.0;
const HINT_RADIUS: f32 = 8.0;
const PROJECT_AUTO_CLOSE_SECONDS: f32 = 10.0;

const JOYSTICK_MAX_DISTANCE_PX: f32 = 40.0;
const JOYSTICK_BASE_RADIUS_PX: f32 = 60.0;
const BOOST_BUTTON_RADIUS_PX: f32 = 40.0;
const STACK_BUTTON_RADIUS_PX: f32 = 28.0;
const STACK_BUTTON_SPACING_PX: f32 = 70.0;
const STACK_GAP_PX: f32 = 24.0;
const CONTROL_MARGIN_PX: f32 = 40.0;
const DEPTH_PULSE_SECONDS: f32 = 0.1;

const DEFAULT_WORLD_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/world.json"));

include!("types.rs");
include!("session.rs");
include!("input.rs");
include!("motion.rs");
include!("camera.rs");
include!("proximity.rs");
include!("collaborators.rs");
include!("world_data.rs");
include!("scene_impl.rs");

#[derive(Debug, Clone)]
pub(crate) struct SessionConfig {
    pub(crate) input_mode: InputMode,
    pub(crate) seed: Option<u64>,
    pub(crate) world: Vec<PointOfInterest>,
    pub(crate) start_with_instructions: bool,
}

pub(crate) fn build_scene(config: SessionConfig) -> Box<dyn Scene> {
    Box::new(GamefolioScene::new(
        config,
        TracingAudio::default(),
        TracingUi,
    ))
}
