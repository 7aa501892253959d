use tracing::info;

use super::input::{ActionStates, InputAction, PointerEvent};
use super::Vec3;

#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    pressed: ActionStates,
    pointer_events: Vec<PointerEvent>,
    window_width: u32,
    window_height: u32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        pressed: ActionStates,
        pointer_events: Vec<PointerEvent>,
        window_width: u32,
        window_height: u32,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            pressed,
            pointer_events,
            window_width,
            window_height,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// True only on the tick the action went from released to held.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn pointer_events(&self) -> &[PointerEvent] {
        &self.pointer_events
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.actions.set(action, true);
        self.pressed.set(action, true);
        self
    }

    pub fn with_pointer_event(mut self, event: PointerEvent) -> Self {
        self.pointer_events.push(event);
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_width = window_size.0;
        self.window_height = window_size.1;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 10.0),
            look_at: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMarker {
    pub position: Vec3,
    pub radius_world: f32,
    pub color: [u8; 4],
    pub outline: Option<[u8; 4]>,
}

/// What the host presents for one frame: a camera and a set of world markers.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub camera: CameraView,
    pub clear_color: [u8; 4],
    pub markers: Vec<ViewMarker>,
}

impl Default for FrameView {
    fn default() -> Self {
        Self {
            camera: CameraView::default(),
            clear_color: [8, 24, 48, 255],
            markers: Vec::new(),
        }
    }
}

pub trait Scene {
    fn load(&mut self, window_size: (u32, u32));
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);
    fn frame_view(&self) -> FrameView;
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    is_loaded: bool,
    ticks: u64,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            is_loaded: false,
            ticks: 0,
        }
    }

    pub(crate) fn load(&mut self, window_size: (u32, u32)) {
        if self.is_loaded {
            return;
        }
        self.scene.load(window_size);
        self.is_loaded = true;
    }

    pub(crate) fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        if !self.is_loaded {
            return;
        }
        self.scene.update(fixed_dt_seconds, input);
        self.ticks = self.ticks.saturating_add(1);
    }

    pub(crate) fn frame_view(&self) -> FrameView {
        self.scene.frame_view()
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title()
    }

    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn shutdown(&mut self) {
        if !self.is_loaded {
            return;
        }
        self.scene.unload();
        self.is_loaded = false;
        info!(ticks = self.ticks, "scene_shutdown");
    }
}
