//! Naive Bayes sentiment model artifact.
//!
//! A model is the pair produced by the offline trainer: the log prior ratio
//! of the two classes and a per-word log-likelihood ratio table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::validate::ValidationError;

/// Informational metadata written by the trainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Short name of the training corpus or model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the trainer produced this artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,

    /// Whether vocabulary keys are stemmed. Absent means stemmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stemmed: Option<bool>,
}

/// Immutable sentiment model: prior log-odds plus word log-likelihoods.
///
/// Words absent from the likelihood table are evidentially neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    schema_version: String,

    /// log(P(positive) / P(negative)).
    #[serde(alias = "logprior")]
    prior: f64,

    /// word -> log(P(word | positive) / P(word | negative)).
    #[serde(default, alias = "loglikelihood")]
    likelihood: HashMap<String, f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<ModelMetadata>,
}

impl Model {
    /// Build a model at the current schema version.
    pub fn new(prior: f64, likelihood: HashMap<String, f64>) -> Self {
        Self {
            schema_version: crate::MODEL_SCHEMA_VERSION.to_string(),
            prior,
            likelihood,
            metadata: None,
        }
    }

    /// Attach trainer metadata.
    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Load a model from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse a model from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ValidationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("Serialization failed: {}", e)))
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    pub fn likelihood(&self) -> &HashMap<String, f64> {
        &self.likelihood
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }

    /// Log-likelihood ratio of a word, if the model knows it.
    pub fn log_likelihood(&self, word: &str) -> Option<f64> {
        self.likelihood.get(word).copied()
    }

    /// Number of words with a log-likelihood entry.
    pub fn vocabulary_size(&self) -> usize {
        self.likelihood.len()
    }

    /// Whether the vocabulary was built from stemmed tokens.
    pub fn is_stemmed(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|m| m.stemmed)
            .unwrap_or(true)
    }
}
