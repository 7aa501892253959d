#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct OrbitAngles {
    /// Elevation, kept within [-MAX_CAMERA_PHI, MAX_CAMERA_PHI].
    phi: f32,
    theta: f32,
}

fn clamp_phi(phi: f32) -> f32 {
    phi.clamp(-MAX_CAMERA_PHI, MAX_CAMERA_PHI)
}

fn clamp_distance(distance: f32) -> f32 {
    distance.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE)
}

fn pinch_distance(touches: &[Vec2]) -> Option<f32> {
    match touches {
        [first, second, ..] => Some(first.distance(*second)),
        _ => None,
    }
}

/// Orbiting follow camera. Gestures move the targets; `advance` eases the
/// current values toward them.
#[derive(Debug, Clone)]
struct CameraRig {
    mode: InputMode,
    target_rotation: OrbitAngles,
    current_rotation: OrbitAngles,
    target_distance: f32,
    current_distance: f32,
    last_pointer: Vec2,
    last_pinch_distance: f32,
    is_interacting: bool,
    is_pinching: bool,
}

impl CameraRig {
    fn new(mode: InputMode) -> Self {
        Self {
            mode,
            target_rotation: OrbitAngles::default(),
            current_rotation: OrbitAngles::default(),
            target_distance: DEFAULT_CAMERA_DISTANCE,
            current_distance: DEFAULT_CAMERA_DISTANCE,
            last_pointer: Vec2::default(),
            last_pinch_distance: 0.0,
            is_interacting: false,
            is_pinching: false,
        }
    }

    fn reset(&mut self) {
        self.target_rotation = OrbitAngles::default();
        self.target_distance = DEFAULT_CAMERA_DISTANCE;
        info!("camera_reset");
    }

    fn apply_gesture(&mut self, gesture: &CameraGesture) {
        if gesture.input_mode() != self.mode {
            return;
        }
        match gesture {
            CameraGesture::TouchStart { touches } => self.touch_start(touches),
            CameraGesture::TouchMove { touches } => self.touch_move(touches),
            CameraGesture::TouchEnd { touches } => self.touch_end(touches),
            CameraGesture::PointerDown { position } => {
                self.is_interacting = true;
                self.last_pointer = *position;
            }
            CameraGesture::PointerMove { position } => {
                if self.is_interacting {
                    self.rotate_by_drag(*position);
                }
            }
            CameraGesture::PointerUp => {
                self.is_interacting = false;
            }
            CameraGesture::Wheel { delta_y_px } => {
                if delta_y_px.is_finite() {
                    self.target_distance =
                        clamp_distance(self.target_distance + delta_y_px * WHEEL_SENSITIVITY);
                }
            }
        }
    }

    fn touch_start(&mut self, touches: &[Vec2]) {
        match touches {
            [single] => {
                self.is_interacting = true;
                self.last_pointer = *single;
            }
            [_, _] => {
                if let Some(distance) = pinch_distance(touches) {
                    self.is_pinching = true;
                    self.last_pinch_distance = distance;
                }
            }
            _ => {}
        }
    }

    fn touch_move(&mut self, touches: &[Vec2]) {
        match touches {
            [single] if self.is_interacting && !self.is_pinching => {
                self.rotate_by_drag(*single);
            }
            [_, _] if self.is_pinching => {
                let Some(distance) = pinch_distance(touches) else {
                    return;
                };
                let delta = distance - self.last_pinch_distance;
                if delta.is_finite() {
                    self.target_distance =
                        clamp_distance(self.target_distance - delta * PINCH_SENSITIVITY);
                }
                self.last_pinch_distance = distance;
            }
            _ => {}
        }
    }

    fn touch_end(&mut self, remaining: &[Vec2]) {
        match remaining {
            [] => {
                self.is_interacting = false;
                self.is_pinching = false;
            }
            [survivor] => {
                self.is_pinching = false;
                self.last_pointer = *survivor;
            }
            [_, _] => {
                // A third finger lifted; re-anchor so the pinch does not jump.
                if let Some(distance) = pinch_distance(remaining) {
                    self.last_pinch_distance = distance;
                }
            }
            _ => {}
        }
    }

    fn rotate_by_drag(&mut self, pointer: Vec2) {
        let delta_x = pointer.x - self.last_pointer.x;
        let delta_y = pointer.y - self.last_pointer.y;
        self.last_pointer = pointer;
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return;
        }
        self.target_rotation.theta -= delta_x * ROTATE_SENSITIVITY;
        self.target_rotation.phi = clamp_phi(self.target_rotation.phi - delta_y * ROTATE_SENSITIVITY);
    }

    fn advance(&mut self, dt_seconds: f32) {
        let dt = sanitize_dt(dt_seconds);
        self.current_rotation.phi = clamp_phi(approach(
            self.current_rotation.phi,
            self.target_rotation.phi,
            CAMERA_SMOOTHING,
            dt,
        ));
        self.current_rotation.theta = approach(
            self.current_rotation.theta,
            self.target_rotation.theta,
            CAMERA_SMOOTHING,
            dt,
        );
        self.current_distance = clamp_distance(approach(
            self.current_distance,
            self.target_distance,
            CAMERA_SMOOTHING,
            dt,
        ));
    }

    fn pose(&self, agent: &AgentState) -> CameraView {
        let orbit = spherical_to_cartesian(
            self.current_distance,
            FRAC_PI_2 - self.current_rotation.phi,
            self.current_rotation.theta,
        );
        CameraView {
            eye: orbit + agent.position + CAMERA_FOLLOW_OFFSET,
            look_at: agent.position + CAMERA_LOOK_OFFSET,
        }
    }
}
