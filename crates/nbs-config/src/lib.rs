//! nb-sentiment model configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the `model.json` artifact
//! - Model path resolution (CLI → env → XDG → system)
//! - Semantic validation
//! - Load snapshots for provenance in output

pub mod model;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use model::{Model, ModelMetadata};
pub use resolve::{resolve_model_path, ModelPath, ModelResolution, ModelSource};
pub use snapshot::ModelSnapshot;
pub use validate::{validate_model, ValidationError, ValidationResult};

/// Schema version for model files.
pub const MODEL_SCHEMA_VERSION: &str = "1.0.0";
