//! Model loading for nbs-core.
//!
//! This module handles:
//! - Resolving `model.json` (CLI > env > config dir > XDG > system)
//! - Parsing and semantic validation
//! - Snapshot generation for provenance in output

pub use nbs_config::resolve::{ModelPath, ModelSource};
pub use nbs_config::validate::ValidationError;
pub use nbs_config::{Model, ModelSnapshot};

use nbs_config::resolve::resolve_model_path;
use nbs_config::validate::validate_model;
use std::path::PathBuf;
use thiserror::Error;

use crate::logging::{event_names, Stage};

/// Errors that can occur during model loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No model file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in model file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ConfigError> for nbs_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { searched } => nbs_common::Error::ModelNotFound(format!(
                "searched {}",
                display_paths(&searched)
            )),
            ConfigError::Io { path, source } => nbs_common::Error::ModelUnreadable {
                path,
                reason: source.to_string(),
            },
            ConfigError::Parse { .. } | ConfigError::Validation(_) => {
                nbs_common::Error::InvalidModel(err.to_string())
            }
            ConfigError::VersionMismatch { expected, actual } => {
                nbs_common::Error::SchemaVersion { expected, actual }
            }
        }
    }
}

/// Model resolution options.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Explicit model file (highest priority).
    pub model_path: Option<PathBuf>,
    /// Explicit config directory containing `model.json`.
    pub config_dir: Option<PathBuf>,
}

/// A validated model together with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: Model,
    pub snapshot: ModelSnapshot,
}

impl LoadedModel {
    /// Wrap a model that did not come from a file.
    pub fn in_memory(model: Model) -> Result<Self, ConfigError> {
        check(&model)?;
        let snapshot = ModelSnapshot::in_memory(&model);
        Ok(Self { model, snapshot })
    }
}

/// Resolve, read, parse and validate the model.
///
/// There is no fallback model: if nothing resolves, this fails with
/// [`ConfigError::NotFound`].
pub fn load_model(options: &LoadOptions) -> Result<LoadedModel, ConfigError> {
    let resolution = resolve_model_path(
        options.model_path.as_deref(),
        options.config_dir.as_deref(),
    );
    let location = resolution.found.ok_or_else(|| ConfigError::NotFound {
        searched: resolution.searched.clone(),
    })?;

    tracing::debug!(
        target: event_names::MODEL_RESOLVED,
        path = %location.path.display(),
        source = %location.source,
        "model path resolved"
    );

    load_model_file(&location)
}

/// Read and validate a model from an already-resolved location.
pub fn load_model_file(location: &ModelPath) -> Result<LoadedModel, ConfigError> {
    let path = &location.path;
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                searched: vec![path.clone()],
            }
        } else {
            ConfigError::Io {
                path: path.clone(),
                source,
            }
        }
    })?;

    let model: Model = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    check(&model)?;

    let snapshot = ModelSnapshot::from_file(&model, location, &content);
    tracing::info!(
        target: event_names::MODEL_LOADED,
        stage = %Stage::Init,
        path = %path.display(),
        source = %location.source,
        vocabulary = snapshot.vocabulary_size,
        sha256 = snapshot.sha256.as_deref().unwrap_or(""),
        "model loaded"
    );

    Ok(LoadedModel { model, snapshot })
}

fn check(model: &Model) -> Result<(), ConfigError> {
    validate_model(model).map_err(|err| match err {
        ValidationError::VersionMismatch { expected, actual } => {
            ConfigError::VersionMismatch { expected, actual }
        }
        other => ConfigError::Validation(other),
    })?;

    if model.likelihood().is_empty() {
        tracing::warn!(
            target: event_names::MODEL_EMPTY,
            prior = model.prior(),
            "model has an empty likelihood table; every score will equal the prior"
        );
    }
    Ok(())
}
