//! nb-sentiment common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - Common error types with stable codes
//! - Output format specifications
//! - Output schema versioning

pub mod error;
pub mod output;
pub mod schema;

pub use error::{Error, ErrorCategory, StructuredError};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
