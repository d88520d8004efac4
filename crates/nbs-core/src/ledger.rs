//! Evidence ledger for explainability.
//!
//! Breaks a score down into the prior and the per-word log-likelihood
//! ratios that produced it. The ledger's `score` is computed by the same
//! ordered summation as [`crate::scorer::score`], so the two always agree
//! bit for bit; per-entry `contribution` values are informational only.

use std::collections::HashMap;

use nbs_config::Model;
use nbs_math::{delta_bits, logistic, odds_from_log_odds, EvidenceDirection, EvidenceStrength};
use serde::Serialize;

use crate::polarity::Polarity;
use crate::scorer::score;

/// Contribution of one distinct known word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub word: String,
    /// Occurrences in the token sequence.
    pub count: usize,
    /// Model value for the word, in nats.
    pub log_likelihood: f64,
    /// `count * log_likelihood`.
    pub contribution: f64,
    pub delta_bits: f64,
    pub direction: EvidenceDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceLedger {
    pub prior: f64,
    pub score: f64,
    pub polarity: Polarity,
    /// Posterior odds of a positive message, clamped to stay finite.
    pub odds: f64,
    /// Logistic of the score, treating it as posterior log-odds.
    pub probability_positive: f64,
    pub strength: EvidenceStrength,
    pub entries: Vec<LedgerEntry>,
    pub unknown_tokens: Vec<String>,
    pub top_evidence: Vec<String>,
    pub summary: String,
}

impl EvidenceLedger {
    pub fn build<S: AsRef<str>>(tokens: &[S], model: &Model) -> Self {
        let score = score(tokens, model.prior(), model.likelihood());
        let polarity = Polarity::from_score(score);

        let mut entries: Vec<LedgerEntry> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut unknown_tokens: Vec<String> = Vec::new();

        for token in tokens {
            let word = token.as_ref();
            match model.log_likelihood(word) {
                Some(value) => {
                    if let Some(&i) = index.get(word) {
                        entries[i].count += 1;
                    } else {
                        index.insert(word, entries.len());
                        entries.push(LedgerEntry {
                            word: word.to_string(),
                            count: 1,
                            log_likelihood: value,
                            contribution: 0.0,
                            delta_bits: 0.0,
                            direction: EvidenceDirection::from_log_odds(value),
                        });
                    }
                }
                None => {
                    if !unknown_tokens.iter().any(|u| u == word) {
                        unknown_tokens.push(word.to_string());
                    }
                }
            }
        }

        for entry in &mut entries {
            entry.contribution = entry.count as f64 * entry.log_likelihood;
            entry.delta_bits = delta_bits(entry.contribution);
        }

        let mut ranked: Vec<&LedgerEntry> = entries
            .iter()
            .filter(|e| e.direction != EvidenceDirection::Neutral)
            .collect();
        // Stable sort keeps first-occurrence order among ties.
        ranked.sort_by(|a, b| {
            b.contribution
                .abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let top_evidence = ranked
            .iter()
            .take(3)
            .map(|e| {
                format!(
                    "{} x{} ({:.1} bits toward {})",
                    e.word,
                    e.count,
                    e.delta_bits.abs(),
                    e.direction
                )
            })
            .collect();

        let summary = format!(
            "{} (score {:.3}, {} evidence) from {} known and {} unknown words.",
            capitalize(polarity.label()),
            score,
            EvidenceStrength::from_log_odds(score),
            entries.len(),
            unknown_tokens.len()
        );

        Self {
            prior: model.prior(),
            score,
            polarity,
            odds: odds_from_log_odds(score),
            probability_positive: logistic(score),
            strength: EvidenceStrength::from_log_odds(score),
            entries,
            unknown_tokens,
            top_evidence,
            summary,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
