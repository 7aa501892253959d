#[derive(Debug, Error)]
pub(crate) enum WorldDataError {
    #[error("failed to read world file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid world json at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("points_of_interest[{index}].id must not be empty")]
    EmptyId { index: usize },
    #[error("points_of_interest[{index}].id duplicates '{id}' (first seen at index {first_index})")]
    DuplicateId {
        id: String,
        index: usize,
        first_index: usize,
    },
    #[error("points_of_interest[{index}].position must be finite")]
    NonFinitePosition { index: usize },
    #[error("points_of_interest[{index}] is a project but has no project record")]
    MissingProject { index: usize },
    #[error("points_of_interest[{index}] is a {kind} and must not carry a project record")]
    UnexpectedProject { index: usize, kind: &'static str },
    #[error("points_of_interest[{index}].project.id is '{project_id}', expected '{id}'")]
    ProjectIdMismatch {
        index: usize,
        id: String,
        project_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SavedWorld {
    points_of_interest: Vec<SavedPoi>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SavedPoi {
    id: String,
    kind: SavedPoiKind,
    position: SavedVec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project: Option<SavedProject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SavedPoiKind {
    Intro,
    Project,
    Experience,
    Contact,
}

impl SavedPoiKind {
    fn as_token(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Project => "project",
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SavedVec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl SavedVec3 {
    fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SavedProject {
    id: String,
    title: String,
    description: String,
    #[serde(default)]
    tech_stack: Vec<String>,
    #[serde(default)]
    live_url: Option<String>,
    #[serde(default)]
    github_url: Option<String>,
    color: String,
    category: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    tech_details: BTreeMap<String, String>,
}

impl SavedProject {
    fn into_record(self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            tech_stack: self.tech_stack,
            live_url: self.live_url,
            github_url: self.github_url,
            color: self.color,
            category: self.category,
            features: self.features,
            tech_details: self.tech_details,
        }
    }
}

fn parse_world_json(raw: &str) -> Result<Vec<PointOfInterest>, WorldDataError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let saved = serde_path_to_error::deserialize::<_, SavedWorld>(&mut deserializer).map_err(
        |error| {
            let path = error.path().to_string();
            WorldDataError::Parse {
                path,
                source: error.into_inner(),
            }
        },
    )?;
    build_world(saved)
}

fn build_world(saved: SavedWorld) -> Result<Vec<PointOfInterest>, WorldDataError> {
    let mut seen_ids: Vec<&str> = Vec::with_capacity(saved.points_of_interest.len());
    for (index, poi) in saved.points_of_interest.iter().enumerate() {
        if poi.id.trim().is_empty() {
            return Err(WorldDataError::EmptyId { index });
        }
        if let Some(first_index) = seen_ids.iter().position(|seen| *seen == poi.id) {
            return Err(WorldDataError::DuplicateId {
                id: poi.id.clone(),
                index,
                first_index,
            });
        }
        seen_ids.push(&poi.id);
        if !poi.position.to_vec3().is_finite() {
            return Err(WorldDataError::NonFinitePosition { index });
        }
    }

    saved
        .points_of_interest
        .into_iter()
        .enumerate()
        .map(|(index, poi)| {
            let kind = match (poi.kind, poi.project) {
                (SavedPoiKind::Project, Some(project)) => {
                    if project.id != poi.id {
                        return Err(WorldDataError::ProjectIdMismatch {
                            index,
                            id: poi.id,
                            project_id: project.id,
                        });
                    }
                    PoiKind::Project(project.into_record())
                }
                (SavedPoiKind::Project, None) => {
                    return Err(WorldDataError::MissingProject { index })
                }
                (kind, Some(_)) => {
                    return Err(WorldDataError::UnexpectedProject {
                        index,
                        kind: kind.as_token(),
                    })
                }
                (SavedPoiKind::Intro, None) => PoiKind::Intro,
                (SavedPoiKind::Experience, None) => PoiKind::Experience,
                (SavedPoiKind::Contact, None) => PoiKind::Contact,
            };
            Ok(PointOfInterest {
                id: PoiId::new(poi.id),
                position: poi.position.to_vec3(),
                kind,
            })
        })
        .collect()
}

pub(crate) fn load_world_from_path(path: &Path) -> Result<Vec<PointOfInterest>, WorldDataError> {
    let raw = fs::read_to_string(path).map_err(|source| WorldDataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_world_json(&raw)
}

pub(crate) fn default_world() -> Result<Vec<PointOfInterest>, WorldDataError> {
    parse_world_json(DEFAULT_WORLD_JSON)
}

/// Hex `#rrggbb` to an opaque RGBA color.
fn parse_hex_color(value: &str) -> Option<[u8; 4]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])
}
