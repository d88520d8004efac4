//! Output schema versioning.

/// Version of the JSON payloads written to stdout.
///
/// Bumped whenever a field is renamed or removed; additions keep the version.
pub const SCHEMA_VERSION: &str = "1.0.0";
