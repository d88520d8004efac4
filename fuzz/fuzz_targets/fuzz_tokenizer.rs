//! Fuzz target for the tweet tokenizer.
//!
//! Tokenization must not panic on any UTF-8 input and must be
//! deterministic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nbs_core::{Tokenize, TweetTokenizer};

fuzz_target!(|data: &str| {
    let tokenizer = TweetTokenizer::new();
    assert_eq!(tokenizer.tokenize(data), tokenizer.tokenize(data));
});
