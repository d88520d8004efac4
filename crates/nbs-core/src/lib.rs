//! nb-sentiment Core Library
//!
//! This library provides the core functionality for sentiment scoring:
//! - The pure Naive Bayes scorer and polarity rule
//! - Tweet tokenization
//! - Load-once model store
//! - Evidence ledger for explanations
//! - Logging, exit codes and output rendering for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod ledger;
pub mod logging;
pub mod model_store;
pub mod output;
pub mod polarity;
pub mod scorer;
pub mod tokenize;

pub use config::{load_model, ConfigError, LoadOptions, LoadedModel};
pub use ledger::EvidenceLedger;
pub use model_store::ModelStore;
pub use nbs_config::Model;
pub use polarity::{Polarity, POLARITY_THRESHOLD};
pub use scorer::{score, Scorer};
pub use tokenize::{Tokenize, TweetTokenizer, WhitespaceTokenizer};
