use super::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    SwimUp,
    SwimDown,
    Boost,
    Interact,
    CloseOverlay,
    ShowHelp,
    ResetCamera,
    Quit,
}

const ACTION_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn clear(&mut self) {
        self.down = [false; ACTION_COUNT];
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveForward => 0,
            InputAction::MoveBackward => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::SwimUp => 4,
            InputAction::SwimDown => 5,
            InputAction::Boost => 6,
            InputAction::Interact => 7,
            InputAction::CloseOverlay => 8,
            InputAction::ShowHelp => 9,
            InputAction::ResetCamera => 10,
            InputAction::Quit => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Raw pointer traffic, buffered by the host in arrival order and handed to
/// the scene once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    PrimaryDown { position_px: Vec2 },
    PrimaryUp,
    CursorMoved { position_px: Vec2 },
    /// Positive values scroll toward the user (zoom out), in pixels.
    Wheel { delta_y_px: f32 },
    Touch {
        id: u64,
        phase: TouchPhase,
        position_px: Vec2,
    },
}
