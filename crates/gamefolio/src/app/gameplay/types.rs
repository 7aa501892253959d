#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AgentState {
    position: Vec3,
    rotation: Rotation,
    /// Displacement applied per tick, in world units.
    velocity: Vec3,
    is_moving: bool,
    is_boosting: bool,
}

/// Normalized per-tick movement intent. Rebuilt every tick, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct InputFrame {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    boost: bool,
    x: f32,
    y: f32,
}

/// Written by the touch path only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MobileInput {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeyboardState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    boost: bool,
}

impl KeyboardState {
    fn from_snapshot(input: &InputSnapshot) -> Self {
        Self {
            forward: input.is_down(InputAction::MoveForward),
            backward: input.is_down(InputAction::MoveBackward),
            left: input.is_down(InputAction::MoveLeft),
            right: input.is_down(InputAction::MoveRight),
            up: input.is_down(InputAction::SwimUp),
            down: input.is_down(InputAction::SwimDown),
            boost: input.is_down(InputAction::Boost),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct PoiId(String);

impl PoiId {
    fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ProjectRecord {
    id: String,
    title: String,
    description: String,
    tech_stack: Vec<String>,
    live_url: Option<String>,
    github_url: Option<String>,
    color: String,
    category: String,
    features: Vec<String>,
    tech_details: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
enum PoiKind {
    Intro,
    Project(ProjectRecord),
    Experience,
    Contact,
}

impl PoiKind {
    fn as_token(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Project(_) => "project",
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PointOfInterest {
    id: PoiId,
    position: Vec3,
    kind: PoiKind,
}

impl PointOfInterest {
    fn project(&self) -> Option<&ProjectRecord> {
        match &self.kind {
            PoiKind::Project(record) => Some(record),
            PoiKind::Intro | PoiKind::Experience | PoiKind::Contact => None,
        }
    }

    fn display_name(&self) -> &str {
        match &self.kind {
            PoiKind::Project(record) => &record.title,
            PoiKind::Intro | PoiKind::Experience | PoiKind::Contact => self.id.as_str(),
        }
    }
}

fn find_poi<'a>(world: &'a [PointOfInterest], id: &PoiId) -> Option<&'a PointOfInterest> {
    world.iter().find(|poi| &poi.id == id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Section {
    #[default]
    Surface,
    Intro,
    Projects,
    Skills,
    Experience,
    Contact,
}

impl Section {
    fn as_token(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Intro => "intro",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum InputMode {
    #[default]
    Pointer,
    Touch,
}

impl InputMode {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "pointer" | "mouse" | "desktop" => Some(Self::Pointer),
            "touch" | "mobile" => Some(Self::Touch),
            _ => None,
        }
    }

    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Touch => "touch",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ProximityResult {
    /// POIs inside the hint radius, in world list order.
    nearby: Vec<PoiId>,
    active_trigger: Option<PoiId>,
}

#[derive(Debug, Clone, PartialEq)]
enum SessionEvent {
    SectionChanged { from: Section, to: Section },
    ActiveProjectChanged { project: Option<PoiId> },
    InstructionsToggled { visible: bool },
    AudioInitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEventKind {
    SectionChanged,
    ActiveProjectChanged,
    InstructionsToggled,
    AudioInitRequested,
}

impl SessionEvent {
    fn kind(&self) -> SessionEventKind {
        match self {
            Self::SectionChanged { .. } => SessionEventKind::SectionChanged,
            Self::ActiveProjectChanged { .. } => SessionEventKind::ActiveProjectChanged,
            Self::InstructionsToggled { .. } => SessionEventKind::InstructionsToggled,
            Self::AudioInitRequested => SessionEventKind::AudioInitRequested,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SessionEventCounts {
    total: u32,
    section_changed: u32,
    active_project_changed: u32,
    instructions_toggled: u32,
    audio_init_requested: u32,
}

impl SessionEventCounts {
    fn record(&mut self, kind: SessionEventKind) {
        self.total = self.total.saturating_add(1);
        match kind {
            SessionEventKind::SectionChanged => {
                self.section_changed = self.section_changed.saturating_add(1)
            }
            SessionEventKind::ActiveProjectChanged => {
                self.active_project_changed = self.active_project_changed.saturating_add(1)
            }
            SessionEventKind::InstructionsToggled => {
                self.instructions_toggled = self.instructions_toggled.saturating_add(1)
            }
            SessionEventKind::AudioInitRequested => {
                self.audio_init_requested = self.audio_init_requested.saturating_add(1)
            }
        }
    }
}

/// Transitions raised during a tick, dispatched to collaborators once the
/// tick's state writes are done.
#[derive(Debug, Default)]
struct SessionEventBus {
    current_tick_events: Vec<SessionEvent>,
    last_tick_counts: SessionEventCounts,
}

impl SessionEventBus {
    fn emit(&mut self, event: SessionEvent) {
        self.current_tick_events.push(event);
    }

    fn iter_emitted_so_far(&self) -> impl Iterator<Item = &SessionEvent> {
        self.current_tick_events.iter()
    }

    fn finish_tick_rollover(&mut self) {
        let mut counts = SessionEventCounts::default();
        for event in &self.current_tick_events {
            counts.record(event.kind());
        }
        self.last_tick_counts = counts;
        self.current_tick_events.clear();
    }

    fn last_tick_counts(&self) -> SessionEventCounts {
        self.last_tick_counts
    }
}
