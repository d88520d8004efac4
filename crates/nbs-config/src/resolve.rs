//! Model path resolution.
//!
//! Resolution order: CLI argument → environment variables → XDG config →
//! system config. There is no built-in model; if nothing is found the caller
//! must fail rather than score against an empty model.

use std::path::{Path, PathBuf};

/// Where the model file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Explicitly provided via `--model`.
    CliArgument,

    /// Set via `NBS_MODEL`.
    Environment,

    /// Found in a config directory given by `--config` or `NBS_CONFIG_DIR`.
    ConfigDir,

    /// Found in the XDG config directory.
    XdgConfig,

    /// Found in /etc/nb-sentiment/.
    SystemConfig,

    /// Installed programmatically, no file behind it.
    InMemory,
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::CliArgument => write!(f, "CLI argument"),
            ModelSource::Environment => write!(f, "environment variable"),
            ModelSource::ConfigDir => write!(f, "config directory"),
            ModelSource::XdgConfig => write!(f, "XDG config"),
            ModelSource::SystemConfig => write!(f, "system config"),
            ModelSource::InMemory => write!(f, "in-memory"),
        }
    }
}

/// A located model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPath {
    pub path: PathBuf,
    pub source: ModelSource,
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ModelResolution {
    /// The model file to load, if any location matched.
    pub found: Option<ModelPath>,

    /// Every location that was considered, for diagnostics.
    pub searched: Vec<PathBuf>,
}

/// Environment variable names.
pub const ENV_MODEL_PATH: &str = "NBS_MODEL";
pub const ENV_CONFIG_DIR: &str = "NBS_CONFIG_DIR";

/// Standard model file name.
pub const MODEL_FILENAME: &str = "model.json";

/// Application name for XDG and system directories.
const APP_NAME: &str = "nb-sentiment";

/// Resolve the model path using the standard resolution order.
///
/// 1. Explicit CLI path (taken as-is; a missing file fails at load time)
/// 2. `NBS_MODEL` (taken as-is, same as the CLI path)
/// 3. `--config` directory, then `NBS_CONFIG_DIR`, + `model.json`
/// 4. XDG config directory (~/.config/nb-sentiment/model.json)
/// 5. System config (/etc/nb-sentiment/model.json)
pub fn resolve_model_path(cli_model: Option<&Path>, cli_config_dir: Option<&Path>) -> ModelResolution {
    let mut resolution = ModelResolution::default();

    // 1. CLI argument
    if let Some(path) = cli_model {
        resolution.searched.push(path.to_path_buf());
        resolution.found = Some(ModelPath {
            path: path.to_path_buf(),
            source: ModelSource::CliArgument,
        });
        return resolution;
    }

    // 2. Environment variable (direct path)
    if let Some(env_path) = non_empty_env(ENV_MODEL_PATH) {
        let path = PathBuf::from(env_path);
        resolution.searched.push(path.clone());
        resolution.found = Some(ModelPath {
            path,
            source: ModelSource::Environment,
        });
        return resolution;
    }

    // 3. Config directory (CLI, then environment)
    let config_dirs = cli_config_dir
        .map(Path::to_path_buf)
        .into_iter()
        .chain(non_empty_env(ENV_CONFIG_DIR).map(PathBuf::from));
    for dir in config_dirs {
        let path = dir.join(MODEL_FILENAME);
        if check_candidate(&mut resolution, path, ModelSource::ConfigDir) {
            return resolution;
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        if check_candidate(&mut resolution, dir.join(MODEL_FILENAME), ModelSource::XdgConfig) {
            return resolution;
        }
    }

    // 5. System config
    check_candidate(
        &mut resolution,
        system_config_dir().join(MODEL_FILENAME),
        ModelSource::SystemConfig,
    );

    resolution
}

fn check_candidate(resolution: &mut ModelResolution, path: PathBuf, source: ModelSource) -> bool {
    resolution.searched.push(path.clone());
    if path.is_file() {
        resolution.found = Some(ModelPath { path, source });
        return true;
    }
    false
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get the XDG config directory for nb-sentiment.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
