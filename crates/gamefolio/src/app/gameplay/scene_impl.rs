const AGENT_MARKER_COLOR: [u8; 4] = [255, 140, 0, 255];
const INTRO_MARKER_COLOR: [u8; 4] = [120, 220, 255, 255];
const EXPERIENCE_MARKER_COLOR: [u8; 4] = [170, 120, 255, 255];
const CONTACT_MARKER_COLOR: [u8; 4] = [90, 255, 170, 255];
const FALLBACK_PROJECT_COLOR: [u8; 4] = [230, 230, 230, 255];
const NEARBY_OUTLINE_COLOR: [u8; 4] = [255, 230, 90, 255];
const ACTIVE_OUTLINE_COLOR: [u8; 4] = [255, 255, 255, 255];
const SURFACE_SKY_COLOR: [u8; 4] = [120, 180, 225, 255];
const AGENT_MARKER_RADIUS: f32 = 0.6;
const POI_MARKER_RADIUS: f32 = 1.0;

fn section_clear_color(section: Section) -> [u8; 4] {
    match section {
        Section::Surface => [40, 110, 170, 255],
        Section::Intro => [28, 88, 150, 255],
        Section::Projects => [18, 66, 124, 255],
        Section::Skills => [12, 48, 100, 255],
        Section::Experience => [8, 32, 76, 255],
        Section::Contact => [4, 18, 52, 255],
    }
}

fn poi_marker_color(poi: &PointOfInterest) -> [u8; 4] {
    match &poi.kind {
        PoiKind::Intro => INTRO_MARKER_COLOR,
        PoiKind::Project(record) => parse_hex_color(&record.color).unwrap_or(FALLBACK_PROJECT_COLOR),
        PoiKind::Experience => EXPERIENCE_MARKER_COLOR,
        PoiKind::Contact => CONTACT_MARKER_COLOR,
    }
}

/// Wires one tick: pointer routing, aggregation, motion, session write, then
/// camera and proximity against a copied agent snapshot, then event dispatch.
struct GamefolioScene<A: AudioBackend, U: UiSink> {
    world: Vec<PointOfInterest>,
    session: SessionState,
    input_mode: InputMode,
    touch_controls: TouchControls,
    camera: CameraRig,
    motion: MotionIntegrator,
    proximity: ProximityEvaluator,
    last_proximity: ProximityResult,
    audio: GatedAudio<A>,
    ui: U,
    window_size: (u32, u32),
    start_with_instructions: bool,
}

impl<A: AudioBackend, U: UiSink> GamefolioScene<A, U> {
    fn new(config: SessionConfig, audio: A, ui: U) -> Self {
        Self {
            world: config.world,
            session: SessionState::new(config.start_with_instructions),
            input_mode: config.input_mode,
            touch_controls: TouchControls::new((0, 0)),
            camera: CameraRig::new(config.input_mode),
            motion: MotionIntegrator::new(config.seed),
            proximity: ProximityEvaluator::default(),
            last_proximity: ProximityResult::default(),
            audio: GatedAudio::new(audio),
            ui,
            window_size: (0, 0),
            start_with_instructions: config.start_with_instructions,
        }
    }

    fn sync_window_size(&mut self, window_size: (u32, u32)) {
        if window_size == self.window_size || window_size.0 == 0 || window_size.1 == 0 {
            return;
        }
        self.window_size = window_size;
        self.touch_controls.resize(window_size);
        debug!(width = window_size.0, height = window_size.1, "layout_resized");
    }

    fn activate_project(&mut self, id: &PoiId, source: &'static str) {
        if self.session.set_active_project(id) {
            debug!(project = id.as_str(), source, "project_activation_source");
        }
    }

    fn close_overlay(&mut self) {
        if self.session.show_instructions {
            self.session.hide_instructions();
            return;
        }
        self.dismiss_active_project();
    }

    /// Clears the project and latches it when the agent still sits inside its
    /// trigger radius.
    fn dismiss_active_project(&mut self) {
        let Some(cleared) = self.session.clear_active_project() else {
            return;
        };
        let agent = self.session.agent();
        let inside_trigger = find_poi(&self.world, &cleared)
            .map(|poi| agent.position.distance(poi.position) < AUTO_TRIGGER_RADIUS)
            .unwrap_or(false);
        if inside_trigger {
            self.proximity.note_dismissed(cleared);
        }
    }

    fn handle_interact(&mut self) {
        if self.session.show_instructions {
            self.session.hide_instructions();
            return;
        }
        let agent = self.session.agent();
        match manual_interaction(&self.world, &agent) {
            ManualInteraction::Project(id) => self.activate_project(&id, "manual"),
            ManualInteraction::Section(id) => {
                let kind = find_poi(&self.world, &id).map_or("unknown", |poi| poi.kind.as_token());
                info!(poi = id.as_str(), kind, "section_interaction");
            }
            ManualInteraction::Nothing => {
                debug!("interaction_without_target");
            }
        }
    }

    fn dispatch_session_events(&mut self) {
        for event in self.session.events.iter_emitted_so_far() {
            match event {
                SessionEvent::SectionChanged { from, to } => {
                    debug!(from = from.as_token(), to = to.as_token(), "dispatch_section");
                    self.ui.section_changed(*to);
                }
                SessionEvent::ActiveProjectChanged { project: Some(id) } => {
                    match find_poi(&self.world, id) {
                        Some(poi) => self.ui.set_active_project(poi),
                        None => warn!(project = id.as_str(), "active_project_not_in_world"),
                    }
                    self.audio.play_interaction_sound();
                }
                SessionEvent::ActiveProjectChanged { project: None } => {
                    self.ui.clear_active_project();
                }
                SessionEvent::InstructionsToggled { visible } => {
                    self.ui.instructions_visibility_changed(*visible);
                }
                SessionEvent::AudioInitRequested => self.audio.request_initialization(),
            }
        }
        self.session.events.finish_tick_rollover();
        let counts = self.session.events.last_tick_counts();
        if counts.total > 0 {
            debug!(
                total = counts.total,
                section_changed = counts.section_changed,
                active_project_changed = counts.active_project_changed,
                instructions_toggled = counts.instructions_toggled,
                audio_init_requested = counts.audio_init_requested,
                "session_events_dispatched"
            );
        }
    }
}

impl<A: AudioBackend, U: UiSink> Scene for GamefolioScene<A, U> {
    fn load(&mut self, window_size: (u32, u32)) {
        self.session = SessionState::new(self.start_with_instructions);
        self.camera = CameraRig::new(self.input_mode);
        self.proximity = ProximityEvaluator::default();
        self.last_proximity = ProximityResult::default();
        self.window_size = (0, 0);
        self.sync_window_size(window_size);
        let project_count = self
            .world
            .iter()
            .filter(|poi| poi.project().is_some())
            .count();
        info!(
            poi_count = self.world.len(),
            project_count,
            input_mode = self.input_mode.as_token(),
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        let dt = sanitize_dt(fixed_dt_seconds);
        if !self.session.audio_initialized && self.audio.is_ready() {
            self.session.mark_audio_initialized();
        }
        self.sync_window_size(input.window_size());

        if input.was_pressed(InputAction::ShowHelp) {
            self.session.show_instructions_dialog();
        }
        if input.was_pressed(InputAction::ResetCamera) {
            self.camera.reset();
        }

        let routed = route_pointer_events(
            input.pointer_events(),
            self.input_mode,
            &mut self.touch_controls,
        );
        for gesture in &routed.gestures {
            self.camera.apply_gesture(gesture);
        }
        self.session.set_mobile_input(self.touch_controls.mobile_input());
        self.session.set_boost_button(self.touch_controls.boost_held());

        let frame = if self.session.show_instructions {
            InputFrame::default()
        } else {
            aggregate_input(
                KeyboardState::from_snapshot(input),
                self.session.mobile_input,
                self.session.is_boosting,
            )
        };

        let previous = self.session.agent();
        let step = self.motion.step(&previous, &frame, dt);
        self.session.set_agent(step.agent);
        self.session.set_depth(step.agent.position.y);

        let boost_engaged = step.agent.is_boosting && step.agent.is_moving;
        if boost_engaged && !(previous.is_boosting && previous.is_moving) {
            self.audio.play_bubble_sound();
        }
        if let Some(intensity) = step.swim_cue {
            self.audio.play_swim_sound(intensity);
        }

        let agent = self.session.agent();
        self.camera.advance(dt);
        let proximity = self.proximity.evaluate(&self.world, &agent);
        if proximity.nearby != self.last_proximity.nearby {
            debug!(
                nearby = ?proximity.nearby.iter().map(PoiId::as_str).collect::<Vec<_>>(),
                "nearby_changed"
            );
        }
        if let Some(id) = &proximity.active_trigger {
            self.activate_project(id, "auto");
        }
        self.last_proximity = proximity;

        if input.was_pressed(InputAction::Interact) || routed.interact_requested {
            self.handle_interact();
        }
        if input.was_pressed(InputAction::CloseOverlay) || routed.close_requested {
            self.close_overlay();
        }
        if self.session.advance_project_timer(dt) {
            if let Some(id) = &self.session.active_project {
                info!(project = id.as_str(), "project_auto_closed");
            }
            self.dismiss_active_project();
        }

        self.touch_controls.advance_pulses(dt);
        self.dispatch_session_events();
    }

    fn frame_view(&self) -> FrameView {
        let agent = self.session.agent();
        let mut markers = Vec::with_capacity(self.world.len() + 1);
        for poi in &self.world {
            let outline = if self.session.active_project.as_ref() == Some(&poi.id) {
                Some(ACTIVE_OUTLINE_COLOR)
            } else if self.last_proximity.nearby.contains(&poi.id) {
                Some(NEARBY_OUTLINE_COLOR)
            } else {
                None
            };
            markers.push(ViewMarker {
                position: poi.position,
                radius_world: POI_MARKER_RADIUS,
                color: poi_marker_color(poi),
                outline,
            });
        }
        markers.push(ViewMarker {
            position: agent.position,
            radius_world: AGENT_MARKER_RADIUS,
            color: AGENT_MARKER_COLOR,
            outline: if self.session.interaction_mode {
                Some(ACTIVE_OUTLINE_COLOR)
            } else {
                agent.is_boosting.then_some(NEARBY_OUTLINE_COLOR)
            },
        });

        FrameView {
            camera: self.camera.pose(&agent),
            clear_color: if self.session.is_underwater {
                section_clear_color(self.session.current_section)
            } else {
                SURFACE_SKY_COLOR
            },
            markers,
        }
    }

    fn unload(&mut self) {
        info!(
            dropped_audio_cues = self.audio.dropped_cues(),
            section = self.session.current_section.as_token(),
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let mut title = format!(
            "Gamefolio | {} | depth {:.1}",
            self.session.current_section.as_token(),
            self.session.depth
        );
        if let Some(poi) = self
            .session
            .active_project
            .as_ref()
            .and_then(|id| find_poi(&self.world, id))
        {
            title.push_str(" | ");
            title.push_str(poi.display_name());
        }
        if self.session.show_instructions {
            title.push_str(" | press Enter to dive, H for help");
        }
        Some(title)
    }
}
