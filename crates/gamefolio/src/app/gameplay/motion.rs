fn sanitize_dt(dt_seconds: f32) -> f32 {
    if dt_seconds.is_finite() && dt_seconds > 0.0 {
        dt_seconds
    } else {
        0.0
    }
}

fn raw_move_vector(input: &InputFrame) -> Vec3 {
    let mut raw = Vec3::ZERO;
    if input.forward {
        raw.z -= 1.0;
    }
    if input.backward {
        raw.z += 1.0;
    }
    if input.left {
        raw.x -= 1.0;
    }
    if input.right {
        raw.x += 1.0;
    }
    if input.up {
        raw.y += 1.0;
    }
    if input.down {
        raw.y -= 1.0;
    }
    if input.x.abs() > ANALOG_CONTRIBUTION_THRESHOLD {
        raw.x += input.x;
    }
    if input.y.abs() > ANALOG_CONTRIBUTION_THRESHOLD {
        raw.z -= input.y;
    }
    raw
}

/// One deterministic integration step. Damping runs every tick so the agent
/// glides to rest once input stops.
fn integrate_agent(previous: &AgentState, input: &InputFrame, dt_seconds: f32) -> AgentState {
    let dt = sanitize_dt(dt_seconds);
    let direction = raw_move_vector(input).try_normalize();
    let is_moving = direction.is_some();
    let speed = MOVE_SPEED * if input.boost { BOOST_MULTIPLIER } else { 1.0 };
    let impulse = direction.map_or(Vec3::ZERO, |dir| dir * (speed * dt));

    let mut velocity = previous.velocity * DAMPING + impulse;
    if !velocity.is_finite() {
        velocity = Vec3::ZERO;
    }
    let velocity = velocity.clamp_length_max(MAX_SPEED);
    let position = (previous.position + velocity).clamp(WORLD_MIN, WORLD_MAX);

    let mut rotation = previous.rotation;
    if let Some(dir) = direction {
        let target_yaw = dir.x.atan2(-dir.z);
        let target_pitch = dir.y.clamp(-1.0, 1.0).asin() * PITCH_ATTENUATION;
        rotation.yaw = approach(rotation.yaw, target_yaw, TURN_SPEED, dt);
        rotation.pitch = approach(rotation.pitch, target_pitch, TURN_SPEED, dt);
    }

    AgentState {
        position,
        rotation,
        velocity,
        is_moving,
        is_boosting: input.boost,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MotionStep {
    agent: AgentState,
    /// Intensity in [0, 1] when this tick should play a swim cue.
    swim_cue: Option<f32>,
}

struct MotionIntegrator {
    rng: StdRng,
}

impl MotionIntegrator {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn step(&mut self, previous: &AgentState, input: &InputFrame, dt_seconds: f32) -> MotionStep {
        let agent = integrate_agent(previous, input, dt_seconds);
        let swim_cue = if agent.is_moving && self.rng.gen_bool(SWIM_CUE_PROBABILITY) {
            Some((agent.velocity.length() / SWIM_INTENSITY_SPEED_SCALE).min(1.0))
        } else {
            None
        };
        MotionStep { agent, swim_cue }
    }
}
