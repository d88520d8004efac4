//! Fuzz target for model.json parsing and validation.
//!
//! Tests that parsing arbitrary bytes as a model, and validating whatever
//! parses, never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nbs_config::validate::validate_model;
use nbs_config::Model;

fuzz_target!(|data: &[u8]| {
    if let Ok(model) = serde_json::from_slice::<Model>(data) {
        let _ = validate_model(&model);
    }
});
