//! Structured event definitions for logging.
//!
//! Event names are used as `tracing` targets so JSONL consumers can filter
//! on them without parsing messages.

use serde::{Deserialize, Serialize};

/// Processing stages in the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and model loading.
    Init,
    /// Tokenizing, scoring and polarity.
    Score,
    /// Rendering results.
    Output,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Score => "score",
            Stage::Output => "output",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";
    pub const RUN_FAILED: &str = "run.failed";

    // Model loading
    pub const MODEL_RESOLVED: &str = "model.resolved";
    pub const MODEL_LOADED: &str = "model.loaded";
    pub const MODEL_EMPTY: &str = "model.empty";
    pub const MODEL_REUSED: &str = "model.reused";

    // Scoring
    pub const SCORE_COMPUTED: &str = "score.computed";
    pub const SCORE_PRIOR_ONLY: &str = "score.prior_only";
    pub const BATCH_FINISHED: &str = "score.batch_finished";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_matches_serde() {
        for stage in [Stage::Init, Stage::Score, Stage::Output] {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage));
        }
    }

    #[test]
    fn event_names_are_dotted() {
        for name in [
            event_names::RUN_STARTED,
            event_names::MODEL_LOADED,
            event_names::SCORE_COMPUTED,
            event_names::SCORE_PRIOR_ONLY,
        ] {
            assert!(name.contains('.'), "{name}");
        }
    }
}
