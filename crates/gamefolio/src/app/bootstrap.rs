use std::env::{self, VarError};
use std::num::ParseIntError;
use std::path::Path;

use engine::{LoopConfig, Scene};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, InputMode, SessionConfig, WorldDataError};

const INPUT_MODE_ENV_VAR: &str = "GAMEFOLIO_INPUT_MODE";
const SEED_ENV_VAR: &str = "GAMEFOLIO_SEED";
const WORLD_ENV_VAR: &str = "GAMEFOLIO_WORLD";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum StartupError {
    #[error(transparent)]
    WorldData(#[from] WorldDataError),
    #[error("{INPUT_MODE_ENV_VAR}='{value}' is not one of: pointer, touch")]
    InvalidInputMode { value: String },
    #[error("{SEED_ENV_VAR}='{value}' is not a u64: {source}")]
    InvalidSeed {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("failed to read {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: VarError,
    },
}

pub(crate) fn build_app() -> Result<AppWiring, StartupError> {
    init_tracing();
    info!("=== Gamefolio Startup ===");

    let session = session_config_from_env()?;
    info!(
        input_mode = session.input_mode.as_token(),
        seeded = session.seed.is_some(),
        poi_count = session.world.len(),
        "session_config"
    );

    Ok(AppWiring {
        config: LoopConfig::default(),
        scene: gameplay::build_scene(session),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn session_config_from_env() -> Result<SessionConfig, StartupError> {
    let input_mode = read_env(INPUT_MODE_ENV_VAR)?
        .map(|raw| parse_input_mode(&raw))
        .transpose()?
        .unwrap_or_default();
    let seed = read_env(SEED_ENV_VAR)?
        .map(|raw| parse_seed(&raw))
        .transpose()?;
    let world = match read_env(WORLD_ENV_VAR)? {
        Some(path) => {
            info!(path = %path, "world_file_override");
            gameplay::load_world_from_path(Path::new(&path))?
        }
        None => gameplay::default_world()?,
    };

    Ok(SessionConfig {
        input_mode,
        seed,
        world,
        start_with_instructions: true,
    })
}

/// Unset and blank variables both read as `None`.
fn read_env(var: &'static str) -> Result<Option<String>, StartupError> {
    match env::var(var) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(source) => Err(StartupError::EnvVar { var, source }),
    }
}

fn parse_input_mode(raw: &str) -> Result<InputMode, StartupError> {
    InputMode::from_token(raw).ok_or_else(|| StartupError::InvalidInputMode {
        value: raw.to_string(),
    })
}

fn parse_seed(raw: &str) -> Result<u64, StartupError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|source| StartupError::InvalidSeed {
            value: raw.to_string(),
            source,
        })
}
