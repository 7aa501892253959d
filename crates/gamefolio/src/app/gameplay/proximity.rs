/// Closest `Project` POI inside the interaction radius. Strict `<` keeps the
/// earliest entry on equal distances.
fn closest_project_in_range<'a>(
    world: &'a [PointOfInterest],
    agent_position: Vec3,
) -> Option<(&'a PointOfInterest, f32)> {
    let mut closest: Option<(&PointOfInterest, f32)> = None;
    for poi in world {
        if poi.project().is_none() {
            continue;
        }
        let distance = agent_position.distance(poi.position);
        if distance >= INTERACTION_RADIUS {
            continue;
        }
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((poi, distance)),
        }
    }
    closest
}

fn evaluate_proximity(world: &[PointOfInterest], agent: &AgentState) -> ProximityResult {
    let nearby = world
        .iter()
        .filter(|poi| agent.position.distance(poi.position) < HINT_RADIUS)
        .map(|poi| poi.id.clone())
        .collect();
    let active_trigger = closest_project_in_range(world, agent.position)
        .filter(|(_, distance)| *distance < AUTO_TRIGGER_RADIUS)
        .map(|(poi, _)| poi.id.clone());
    ProximityResult {
        nearby,
        active_trigger,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ManualInteraction {
    Nothing,
    Project(PoiId),
    /// Non-project POI reached; no behavior is attached yet.
    Section(PoiId),
}

/// First POI of any kind inside the interaction radius, in list order.
fn manual_interaction(world: &[PointOfInterest], agent: &AgentState) -> ManualInteraction {
    let Some(poi) = world
        .iter()
        .find(|poi| agent.position.distance(poi.position) < INTERACTION_RADIUS)
    else {
        return ManualInteraction::Nothing;
    };
    match &poi.kind {
        PoiKind::Project(_) => ManualInteraction::Project(poi.id.clone()),
        PoiKind::Intro | PoiKind::Experience | PoiKind::Contact => {
            ManualInteraction::Section(poi.id.clone())
        }
    }
}

/// Auto-trigger evaluation plus the dismissal latch: a project the user
/// closed while inside its trigger radius stays quiet until the agent leaves
/// that radius.
#[derive(Debug, Clone, Default)]
struct ProximityEvaluator {
    dismissed: Option<PoiId>,
}

impl ProximityEvaluator {
    fn evaluate(&mut self, world: &[PointOfInterest], agent: &AgentState) -> ProximityResult {
        if let Some(dismissed) = &self.dismissed {
            let still_inside = find_poi(world, dismissed)
                .map(|poi| agent.position.distance(poi.position) < AUTO_TRIGGER_RADIUS)
                .unwrap_or(false);
            if !still_inside {
                debug!(project = dismissed.as_str(), "dismissal_latch_released");
                self.dismissed = None;
            }
        }

        let mut result = evaluate_proximity(world, agent);
        if result.active_trigger.is_some() && result.active_trigger == self.dismissed {
            result.active_trigger = None;
        }
        result
    }

    fn note_dismissed(&mut self, project: PoiId) {
        self.dismissed = Some(project);
    }
}
