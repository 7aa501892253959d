/// Depth thresholds checked deepest first; the first match wins.
const SECTION_DEPTH_THRESHOLDS: [(f32, Section); 5] = [
    (-45.0, Section::Contact),
    (-35.0, Section::Experience),
    (-25.0, Section::Skills),
    (-15.0, Section::Projects),
    (-5.0, Section::Intro),
];

fn section_for_depth(depth: f32) -> Section {
    SECTION_DEPTH_THRESHOLDS
        .iter()
        .find(|(threshold, _)| depth < *threshold)
        .map(|(_, section)| *section)
        .unwrap_or(Section::Surface)
}

/// The one mutable store shared by the tick's components. Each field has a
/// single writer: the motion step owns `agent`, the touch path owns
/// `mobile_input` and `is_boosting`, proximity and overlay requests own
/// `active_project`.
#[derive(Debug)]
struct SessionState {
    agent: AgentState,
    active_project: Option<PoiId>,
    /// Seconds until the active project closes on its own.
    project_time_remaining: f32,
    current_section: Section,
    depth: f32,
    mobile_input: MobileInput,
    is_boosting: bool,
    show_instructions: bool,
    is_underwater: bool,
    interaction_mode: bool,
    audio_initialized: bool,
    audio_init_requested: bool,
    events: SessionEventBus,
}

impl SessionState {
    fn new(show_instructions: bool) -> Self {
        Self {
            agent: AgentState::default(),
            active_project: None,
            project_time_remaining: 0.0,
            current_section: Section::Surface,
            depth: 0.0,
            mobile_input: MobileInput::default(),
            is_boosting: false,
            show_instructions,
            is_underwater: !show_instructions,
            interaction_mode: false,
            audio_initialized: false,
            audio_init_requested: false,
            events: SessionEventBus::default(),
        }
    }

    fn agent(&self) -> AgentState {
        self.agent
    }

    fn set_agent(&mut self, agent: AgentState) {
        self.agent = agent;
    }

    fn set_depth(&mut self, depth: f32) {
        if !depth.is_finite() {
            return;
        }
        self.depth = depth;
        let section = section_for_depth(depth);
        if section != self.current_section {
            let from = self.current_section;
            self.current_section = section;
            info!(
                from = from.as_token(),
                to = section.as_token(),
                depth,
                "section_changed"
            );
            self.events.emit(SessionEvent::SectionChanged { from, to: section });
        }
    }

    /// Returns true only when the active project actually changed.
    fn set_active_project(&mut self, id: &PoiId) -> bool {
        if self.active_project.as_ref() == Some(id) {
            return false;
        }
        self.active_project = Some(id.clone());
        self.project_time_remaining = PROJECT_AUTO_CLOSE_SECONDS;
        self.interaction_mode = true;
        info!(project = id.as_str(), "project_activated");
        self.events.emit(SessionEvent::ActiveProjectChanged {
            project: Some(id.clone()),
        });
        true
    }

    fn clear_active_project(&mut self) -> Option<PoiId> {
        let cleared = self.active_project.take()?;
        self.project_time_remaining = 0.0;
        self.interaction_mode = false;
        info!(project = cleared.as_str(), "project_cleared");
        self.events
            .emit(SessionEvent::ActiveProjectChanged { project: None });
        Some(cleared)
    }

    /// Counts down the open project. True on the tick it runs out.
    fn advance_project_timer(&mut self, dt_seconds: f32) -> bool {
        if self.active_project.is_none() {
            return false;
        }
        self.project_time_remaining = (self.project_time_remaining - dt_seconds).max(0.0);
        self.project_time_remaining <= 0.0
    }

    fn hide_instructions(&mut self) {
        if self.show_instructions {
            self.show_instructions = false;
            self.events
                .emit(SessionEvent::InstructionsToggled { visible: false });
        }
        self.is_underwater = true;
        if !self.audio_initialized && !self.audio_init_requested {
            self.audio_init_requested = true;
            self.events.emit(SessionEvent::AudioInitRequested);
        }
    }

    fn show_instructions_dialog(&mut self) {
        if self.show_instructions {
            return;
        }
        self.show_instructions = true;
        self.events
            .emit(SessionEvent::InstructionsToggled { visible: true });
    }

    fn set_mobile_input(&mut self, input: MobileInput) {
        if input != self.mobile_input {
            debug!(?input, "mobile_input_updated");
        }
        self.mobile_input = input;
    }

    fn set_boost_button(&mut self, is_boosting: bool) {
        if is_boosting != self.is_boosting {
            debug!(is_boosting, "boost_button_changed");
        }
        self.is_boosting = is_boosting;
    }

    fn mark_audio_initialized(&mut self) {
        if self.audio_initialized {
            return;
        }
        self.audio_initialized = true;
        info!("audio_initialized");
    }
}
