//! Fuzz target for scoring against arbitrary models.
//!
//! The evidence ledger must reproduce the scorer's result bit for bit.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nbs_core::{score, EvidenceLedger, Model};
use std::collections::HashMap;

#[derive(Debug, Arbitrary)]
struct Input {
    prior: f64,
    likelihood: Vec<(String, f64)>,
    tokens: Vec<String>,
}

fuzz_target!(|input: Input| {
    let likelihood: HashMap<String, f64> = input.likelihood.into_iter().collect();
    let expected = score(&input.tokens, input.prior, &likelihood);
    let model = Model::new(input.prior, likelihood);
    let ledger = EvidenceLedger::build(&input.tokens, &model);
    assert_eq!(ledger.score.to_bits(), expected.to_bits());
});
