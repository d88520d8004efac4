//! Property-based tests for scorer invariants.

use std::collections::HashMap;

use nbs_core::ledger::EvidenceLedger;
use nbs_core::{score, Model, Polarity, Tokenize, TweetTokenizer};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word(), 0..32)
}

fn likelihood() -> impl Strategy<Value = HashMap<String, f64>> {
    prop::collection::hash_map(word(), -10.0f64..10.0, 0..24)
}

fn prior() -> impl Strategy<Value = f64> {
    -5.0f64..5.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn empty_likelihood_yields_prior(t in tokens(), p in prior()) {
        prop_assert_eq!(score(&t, p, &HashMap::new()), p);
    }

    #[test]
    fn empty_tokens_yield_prior(l in likelihood(), p in prior()) {
        prop_assert_eq!(score(Vec::<String>::new(), p, &l), p);
    }

    #[test]
    fn duplicate_word_counts_twice(w in word(), x in -10.0f64..10.0, p in prior()) {
        let mut l = HashMap::new();
        l.insert(w.clone(), x);
        prop_assert_eq!(score([w.as_str(), w.as_str()], p, &l), p + x + x);
    }

    #[test]
    fn unknown_word_contributes_nothing(w in word(), p in prior()) {
        prop_assert_eq!(score([w.as_str()], p, &HashMap::new()), p);
    }

    #[test]
    fn repeated_calls_are_bit_identical(t in tokens(), l in likelihood(), p in prior()) {
        let first = score(&t, p, &l).to_bits();
        for _ in 0..3 {
            prop_assert_eq!(score(&t, p, &l).to_bits(), first);
        }
    }

    #[test]
    fn known_words_sum_in_order(t in tokens(), l in likelihood(), p in prior()) {
        let mut expected = p;
        for w in &t {
            if let Some(x) = l.get(w) {
                expected += x;
            }
        }
        prop_assert_eq!(score(&t, p, &l).to_bits(), expected.to_bits());
    }

    #[test]
    fn polarity_follows_sign(t in tokens(), l in likelihood(), p in prior()) {
        let s = score(&t, p, &l);
        prop_assert_eq!(Polarity::from_score(s).is_positive(), s > 0.0);
    }

    #[test]
    fn ledger_score_matches_scorer(t in tokens(), l in likelihood(), p in prior()) {
        let expected = score(&t, p, &l);
        let model = Model::new(p, l);
        let ledger = EvidenceLedger::build(&t, &model);
        prop_assert_eq!(ledger.score.to_bits(), expected.to_bits());
        let counted: usize = ledger.entries.iter().map(|e| e.count).sum();
        let known = t.iter().filter(|w| model.log_likelihood(w.as_str()).is_some()).count();
        prop_assert_eq!(counted, known);
    }

    #[test]
    fn tokenizer_is_deterministic(text in "\\PC{0,80}") {
        let tokenizer = TweetTokenizer::new();
        prop_assert_eq!(tokenizer.tokenize(&text), tokenizer.tokenize(&text));
    }
}

#[test]
fn zero_prior_with_empty_model_is_negative() {
    let s = score(["anything", "at", "all"], 0.0, &HashMap::new());
    assert_eq!(s, 0.0);
    assert_eq!(Polarity::from_score(s), Polarity::Negative);
}

#[test]
fn reference_scenarios() {
    let l: HashMap<String, f64> = [("good".to_string(), 1.2), ("bad".to_string(), -1.5)]
        .into_iter()
        .collect();

    let s = score(["good", "good", "bad"], 0.5, &l);
    assert!((s - 1.4).abs() < 1e-12);
    assert_eq!(Polarity::from_score(s), Polarity::Positive);

    let s = score(["bad", "bad"], 0.5, &l);
    assert!((s + 2.5).abs() < 1e-12);
    assert_eq!(Polarity::from_score(s), Polarity::Negative);

    let s = score(Vec::<&str>::new(), 0.5, &l);
    assert_eq!(s, 0.5);
    assert_eq!(Polarity::from_score(s), Polarity::Positive);
}
