/// Audio playback seam. Initialization may complete later than it was
/// requested; callers poll `is_ready`.
trait AudioBackend {
    fn request_initialization(&mut self);
    fn is_ready(&self) -> bool;
    fn play_swim_sound(&mut self, intensity: f32);
    fn play_interaction_sound(&mut self);
    fn play_bubble_sound(&mut self);
}

trait UiSink {
    fn set_active_project(&mut self, poi: &PointOfInterest);
    fn clear_active_project(&mut self);
    fn section_changed(&mut self, section: Section);
    fn instructions_visibility_changed(&mut self, _visible: bool) {}
}

/// Drops cues until the backend reports ready, so the tick never depends on
/// audio start-up.
#[derive(Debug)]
struct GatedAudio<A> {
    backend: A,
    dropped_cues: u64,
}

impl<A: AudioBackend> GatedAudio<A> {
    fn new(backend: A) -> Self {
        Self {
            backend,
            dropped_cues: 0,
        }
    }

    fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    fn request_initialization(&mut self) {
        self.backend.request_initialization();
    }

    fn gate(&mut self) -> bool {
        if self.backend.is_ready() {
            true
        } else {
            self.dropped_cues = self.dropped_cues.saturating_add(1);
            false
        }
    }

    fn play_swim_sound(&mut self, intensity: f32) {
        if self.gate() {
            let intensity = if intensity.is_finite() {
                intensity.clamp(0.0, 1.0)
            } else {
                0.0
            };
            self.backend.play_swim_sound(intensity);
        }
    }

    fn play_interaction_sound(&mut self) {
        if self.gate() {
            self.backend.play_interaction_sound();
        }
    }

    fn play_bubble_sound(&mut self) {
        if self.gate() {
            self.backend.play_bubble_sound();
        }
    }

    fn dropped_cues(&self) -> u64 {
        self.dropped_cues
    }

    #[cfg(test)]
    fn backend(&self) -> &A {
        &self.backend
    }
}

/// Desktop stand-in for a sound engine: cues become debug log lines.
#[derive(Debug, Default)]
struct TracingAudio {
    initialized: bool,
}

impl AudioBackend for TracingAudio {
    fn request_initialization(&mut self) {
        if !self.initialized {
            self.initialized = true;
            info!("audio_backend_started");
        }
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }

    fn play_swim_sound(&mut self, intensity: f32) {
        debug!(intensity, "swim_sound");
    }

    fn play_interaction_sound(&mut self) {
        debug!("interaction_sound");
    }

    fn play_bubble_sound(&mut self) {
        debug!("bubble_sound");
    }
}

#[derive(Debug, Default)]
struct TracingUi;

impl UiSink for TracingUi {
    fn set_active_project(&mut self, poi: &PointOfInterest) {
        match poi.project() {
            Some(project) => info!(
                project = project.id.as_str(),
                title = project.title.as_str(),
                category = project.category.as_str(),
                tech_stack = %project.tech_stack.join(", "),
                live_url = project.live_url.as_deref().unwrap_or("-"),
                github_url = project.github_url.as_deref().unwrap_or("-"),
                features = project.features.len(),
                tech_details = project.tech_details.len(),
                description_len = project.description.len(),
                "ui_show_project"
            ),
            None => warn!(poi = poi.id.as_str(), "ui_show_project_without_record"),
        }
    }

    fn clear_active_project(&mut self) {
        info!("ui_hide_project");
    }

    fn section_changed(&mut self, section: Section) {
        info!(section = section.as_token(), "ui_section");
    }

    fn instructions_visibility_changed(&mut self, visible: bool) {
        info!(visible, "ui_instructions");
    }
}
