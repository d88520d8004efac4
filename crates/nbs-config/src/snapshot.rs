//! Model snapshots for provenance.
//!
//! A snapshot records which model produced a score, so outputs can be
//! audited and reproduced later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::Model;
use crate::resolve::ModelPath;

/// A frozen description of a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// When the model was loaded.
    pub loaded_at: DateTime<Utc>,

    /// Path the model was loaded from (None for in-memory models).
    #[serde(default)]
    pub path: Option<String>,

    /// Where the path came from.
    pub source: String,

    /// SHA-256 of the model file content.
    #[serde(default)]
    pub sha256: Option<String>,

    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub prior: f64,

    pub vocabulary_size: usize,

    /// Words with a positive log-likelihood ratio.
    pub positive_words: usize,

    /// Words with a negative log-likelihood ratio.
    pub negative_words: usize,

    /// Words whose ratio is exactly zero.
    pub neutral_words: usize,

    pub stemmed: bool,
}

impl ModelSnapshot {
    /// Capture a snapshot of a model read from `location` with file `content`.
    pub fn from_file(model: &Model, location: &ModelPath, content: &str) -> Self {
        let mut snapshot = Self::describe(model, location.source.to_string());
        snapshot.path = Some(location.path.display().to_string());
        snapshot.sha256 = Some(sha256_hex(content.as_bytes()));
        snapshot
    }

    /// Capture a snapshot of a model with no backing file.
    pub fn in_memory(model: &Model) -> Self {
        Self::describe(model, crate::resolve::ModelSource::InMemory.to_string())
    }

    fn describe(model: &Model, source: String) -> Self {
        let mut positive_words = 0;
        let mut negative_words = 0;
        let mut neutral_words = 0;
        for value in model.likelihood().values() {
            if *value > 0.0 {
                positive_words += 1;
            } else if *value < 0.0 {
                negative_words += 1;
            } else {
                neutral_words += 1;
            }
        }

        ModelSnapshot {
            loaded_at: Utc::now(),
            path: None,
            source,
            sha256: None,
            schema_version: model.schema_version().to_string(),
            name: model.metadata().and_then(|m| m.name.clone()),
            prior: model.prior(),
            vocabulary_size: model.vocabulary_size(),
            positive_words,
            negative_words,
            neutral_words,
            stemmed: model.is_stemmed(),
        }
    }
}

/// Compute the SHA-256 hash of `bytes` as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
