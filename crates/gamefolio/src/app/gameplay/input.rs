/// Merges keyboard, touch and analog sources into one frame. Pure: calling it
/// twice with the same sources yields the same frame.
fn aggregate_input(keys: KeyboardState, mobile: MobileInput, boost_button: bool) -> InputFrame {
    let x = sanitize_axis(mobile.x);
    let y = sanitize_axis(mobile.y);
    InputFrame {
        forward: keys.forward || mobile.forward || y > ANALOG_FLAG_THRESHOLD,
        backward: keys.backward || mobile.backward || y < -ANALOG_FLAG_THRESHOLD,
        left: keys.left || mobile.left || x < -ANALOG_FLAG_THRESHOLD,
        right: keys.right || mobile.right || x > ANALOG_FLAG_THRESHOLD,
        up: keys.up || mobile.up,
        down: keys.down || mobile.down,
        boost: keys.boost || boost_button,
        x,
        y,
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Camera-relevant pointer traffic after touch ownership has been resolved.
/// Touch variants carry the full list of canvas touches, oldest first.
#[derive(Debug, Clone, PartialEq)]
enum CameraGesture {
    TouchStart { touches: Vec<Vec2> },
    TouchMove { touches: Vec<Vec2> },
    TouchEnd { touches: Vec<Vec2> },
    PointerDown { position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp,
    Wheel { delta_y_px: f32 },
}

impl CameraGesture {
    fn input_mode(&self) -> InputMode {
        match self {
            Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd { .. } => {
                InputMode::Touch
            }
            Self::PointerDown { .. } | Self::PointerMove { .. } | Self::PointerUp | Self::Wheel { .. } => {
                InputMode::Pointer
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct RoutedInput {
    gestures: Vec<CameraGesture>,
    interact_requested: bool,
    close_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TouchControl {
    Joystick,
    Boost,
    SwimUp,
    Interact,
    Close,
    SwimDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TouchOwner {
    Control(TouchControl),
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ControlLayout {
    joystick_center: Vec2,
    boost_center: Vec2,
    /// Top to bottom: swim up, interact, close, swim down.
    stack: [(TouchControl, Vec2); 4],
}

impl ControlLayout {
    fn for_window(window_size: (u32, u32)) -> Self {
        let width = window_size.0 as f32;
        let height = window_size.1 as f32;
        let joystick_center = Vec2::new(
            CONTROL_MARGIN_PX + JOYSTICK_BASE_RADIUS_PX,
            height - CONTROL_MARGIN_PX - JOYSTICK_BASE_RADIUS_PX,
        );
        let boost_center = Vec2::new(
            width - CONTROL_MARGIN_PX - BOOST_BUTTON_RADIUS_PX,
            height - CONTROL_MARGIN_PX - BOOST_BUTTON_RADIUS_PX,
        );
        let stack_x = width - CONTROL_MARGIN_PX - BOOST_BUTTON_RADIUS_PX;
        let bottom_y = boost_center.y - BOOST_BUTTON_RADIUS_PX - STACK_GAP_PX - STACK_BUTTON_RADIUS_PX;
        let stack = [
            (
                TouchControl::SwimUp,
                Vec2::new(stack_x, bottom_y - STACK_BUTTON_SPACING_PX * 3.0),
            ),
            (
                TouchControl::Interact,
                Vec2::new(stack_x, bottom_y - STACK_BUTTON_SPACING_PX * 2.0),
            ),
            (
                TouchControl::Close,
                Vec2::new(stack_x, bottom_y - STACK_BUTTON_SPACING_PX),
            ),
            (TouchControl::SwimDown, Vec2::new(stack_x, bottom_y)),
        ];
        Self {
            joystick_center,
            boost_center,
            stack,
        }
    }

    fn hit_test(&self, position: Vec2) -> Option<TouchControl> {
        if position.distance(self.joystick_center) <= JOYSTICK_BASE_RADIUS_PX {
            return Some(TouchControl::Joystick);
        }
        if position.distance(self.boost_center) <= BOOST_BUTTON_RADIUS_PX {
            return Some(TouchControl::Boost);
        }
        self.stack
            .iter()
            .find(|(_, center)| position.distance(*center) <= STACK_BUTTON_RADIUS_PX)
            .map(|(control, _)| *control)
    }
}

/// Knob offset normalized to [-1, 1] with screen-up mapped to positive y.
fn joystick_axes(center: Vec2, touch: Vec2) -> (f32, f32) {
    let delta = touch - center;
    let distance = (delta.x * delta.x + delta.y * delta.y).sqrt();
    if !distance.is_finite() || distance == 0.0 {
        return (0.0, 0.0);
    }
    let scale = if distance > JOYSTICK_MAX_DISTANCE_PX {
        JOYSTICK_MAX_DISTANCE_PX / distance
    } else {
        1.0
    };
    let constrained_x = delta.x * scale;
    let constrained_y = delta.y * scale;
    (
        constrained_x / JOYSTICK_MAX_DISTANCE_PX,
        -constrained_y / JOYSTICK_MAX_DISTANCE_PX,
    )
}

/// On-screen controls for touch mode. Every touch is hit-tested once when it
/// starts and keeps that owner until it ends.
#[derive(Debug, Clone)]
struct TouchControls {
    layout: ControlLayout,
    owners: Vec<(u64, TouchOwner)>,
    canvas_touches: Vec<(u64, Vec2)>,
    joystick_axes: (f32, f32),
    boost_touches: u32,
    up_pulse_remaining: f32,
    down_pulse_remaining: f32,
}

impl TouchControls {
    fn new(window_size: (u32, u32)) -> Self {
        Self {
            layout: ControlLayout::for_window(window_size),
            owners: Vec::new(),
            canvas_touches: Vec::new(),
            joystick_axes: (0.0, 0.0),
            boost_touches: 0,
            up_pulse_remaining: 0.0,
            down_pulse_remaining: 0.0,
        }
    }

    /// Layout only; in-flight touches keep their owners.
    fn resize(&mut self, window_size: (u32, u32)) {
        self.layout = ControlLayout::for_window(window_size);
    }

    fn owner_of(&self, id: u64) -> Option<TouchOwner> {
        self.owners
            .iter()
            .find(|(owner_id, _)| *owner_id == id)
            .map(|(_, owner)| *owner)
    }

    fn canvas_positions(&self) -> Vec<Vec2> {
        self.canvas_touches
            .iter()
            .map(|(_, position)| *position)
            .collect()
    }

    fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2, out: &mut RoutedInput) {
        match phase {
            TouchPhase::Started => self.touch_started(id, position, out),
            TouchPhase::Moved => self.touch_moved(id, position, out),
            TouchPhase::Ended | TouchPhase::Cancelled => self.touch_ended(id, out),
        }
    }

    fn touch_started(&mut self, id: u64, position: Vec2, out: &mut RoutedInput) {
        if self.owner_of(id).is_some() {
            return;
        }
        let owner = match self.layout.hit_test(position) {
            Some(TouchControl::Joystick) if self.is_joystick_held() => TouchOwner::Canvas,
            Some(control) => TouchOwner::Control(control),
            None => TouchOwner::Canvas,
        };
        self.owners.push((id, owner));
        match owner {
            TouchOwner::Canvas => {
                self.canvas_touches.push((id, position));
                out.gestures.push(CameraGesture::TouchStart {
                    touches: self.canvas_positions(),
                });
            }
            TouchOwner::Control(TouchControl::Joystick) => {
                self.joystick_axes = joystick_axes(self.layout.joystick_center, position);
            }
            TouchOwner::Control(TouchControl::Boost) => {
                self.boost_touches = self.boost_touches.saturating_add(1);
            }
            TouchOwner::Control(TouchControl::SwimUp) => {
                self.up_pulse_remaining = DEPTH_PULSE_SECONDS;
            }
            TouchOwner::Control(TouchControl::SwimDown) => {
                self.down_pulse_remaining = DEPTH_PULSE_SECONDS;
            }
            TouchOwner::Control(TouchControl::Interact) => out.interact_requested = true,
            TouchOwner::Control(TouchControl::Close) => out.close_requested = true,
        }
    }

    fn touch_moved(&mut self, id: u64, position: Vec2, out: &mut RoutedInput) {
        match self.owner_of(id) {
            Some(TouchOwner::Canvas) => {
                if let Some(entry) = self.canvas_touches.iter_mut().find(|(touch_id, _)| *touch_id == id) {
                    entry.1 = position;
                }
                out.gestures.push(CameraGesture::TouchMove {
                    touches: self.canvas_positions(),
                });
            }
            Some(TouchOwner::Control(TouchControl::Joystick)) => {
                self.joystick_axes = joystick_axes(self.layout.joystick_center, position);
            }
            Some(TouchOwner::Control(_)) | None => {}
        }
    }

    fn touch_ended(&mut self, id: u64, out: &mut RoutedInput) {
        let Some(index) = self.owners.iter().position(|(owner_id, _)| *owner_id == id) else {
            return;
        };
        let (_, owner) = self.owners.remove(index);
        match owner {
            TouchOwner::Canvas => {
                self.canvas_touches.retain(|(touch_id, _)| *touch_id != id);
                out.gestures.push(CameraGesture::TouchEnd {
                    touches: self.canvas_positions(),
                });
            }
            TouchOwner::Control(TouchControl::Joystick) => {
                self.joystick_axes = (0.0, 0.0);
            }
            TouchOwner::Control(TouchControl::Boost) => {
                self.boost_touches = self.boost_touches.saturating_sub(1);
            }
            TouchOwner::Control(_) => {}
        }
    }

    fn is_joystick_held(&self) -> bool {
        self.owners
            .iter()
            .any(|(_, owner)| *owner == TouchOwner::Control(TouchControl::Joystick))
    }

    fn boost_held(&self) -> bool {
        self.boost_touches > 0
    }

    fn mobile_input(&self) -> MobileInput {
        let (x, y) = self.joystick_axes;
        MobileInput {
            forward: y > ANALOG_FLAG_THRESHOLD,
            backward: y < -ANALOG_FLAG_THRESHOLD,
            left: x < -ANALOG_FLAG_THRESHOLD,
            right: x > ANALOG_FLAG_THRESHOLD,
            up: self.up_pulse_remaining > 0.0,
            down: self.down_pulse_remaining > 0.0,
            x,
            y,
        }
    }

    fn advance_pulses(&mut self, dt_seconds: f32) {
        // Sub-microsecond leftovers from float steps count as expired.
        const PULSE_EPSILON: f32 = 1e-6;
        self.up_pulse_remaining = (self.up_pulse_remaining - dt_seconds).max(0.0);
        self.down_pulse_remaining = (self.down_pulse_remaining - dt_seconds).max(0.0);
        if self.up_pulse_remaining < PULSE_EPSILON {
            self.up_pulse_remaining = 0.0;
        }
        if self.down_pulse_remaining < PULSE_EPSILON {
            self.down_pulse_remaining = 0.0;
        }
    }
}

/// Splits the host's raw pointer queue into camera gestures and overlay
/// requests. Events that do not belong to `mode` are dropped so a single
/// physical gesture is never handled twice.
fn route_pointer_events(
    events: &[PointerEvent],
    mode: InputMode,
    touch_controls: &mut TouchControls,
) -> RoutedInput {
    let mut routed = RoutedInput::default();
    for event in events {
        match (mode, *event) {
            (InputMode::Touch, PointerEvent::Touch { id, phase, position_px }) => {
                touch_controls.handle_touch(id, phase, position_px, &mut routed);
            }
            (InputMode::Pointer, PointerEvent::PrimaryDown { position_px }) => {
                routed.gestures.push(CameraGesture::PointerDown {
                    position: position_px,
                });
            }
            (InputMode::Pointer, PointerEvent::CursorMoved { position_px }) => {
                routed.gestures.push(CameraGesture::PointerMove {
                    position: position_px,
                });
            }
            (InputMode::Pointer, PointerEvent::PrimaryUp) => {
                routed.gestures.push(CameraGesture::PointerUp);
            }
            (InputMode::Pointer, PointerEvent::Wheel { delta_y_px }) => {
                routed.gestures.push(CameraGesture::Wheel { delta_y_px });
            }
            (InputMode::Touch, _) | (InputMode::Pointer, PointerEvent::Touch { .. }) => {}
        }
    }
    routed
}
