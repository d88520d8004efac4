//! Naive Bayes sentiment scorer.
//!
//! The score of a message is the prior log-odds plus the log-likelihood
//! ratio of every token the model knows:
//!
//! ```text
//! score = prior + Σ likelihood[w]   for w in tokens, w ∈ likelihood
//! ```
//!
//! Tokens are summed in input order so the floating-point result is
//! reproducible bit for bit. Unknown tokens contribute nothing and
//! duplicates count once per occurrence.

use std::collections::HashMap;

use nbs_config::Model;
use serde::Serialize;

use crate::logging::{event_names, Stage};
use crate::polarity::Polarity;
use crate::tokenize::Tokenize;

/// Score a token sequence against a prior and a likelihood table.
///
/// Pure and total: empty `tokens` or an empty `likelihood` yield `prior`.
pub fn score<I, S>(tokens: I, prior: f64, likelihood: &HashMap<String, f64>) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = prior;
    for word in tokens {
        if let Some(value) = likelihood.get(word.as_ref()) {
            total += value;
        }
    }
    total
}

/// Result of scoring one raw message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub tokens: Vec<String>,
    pub score: f64,
    pub polarity: Polarity,
}

/// Scorer bound to a shared, read-only model.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'m> {
    model: &'m Model,
}

impl<'m> Scorer<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Score already-tokenized words.
    pub fn score<I, S>(&self, tokens: I) -> f64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        score(tokens, self.model.prior(), self.model.likelihood())
    }

    /// Tokenize and score raw text.
    pub fn score_text<T: Tokenize + ?Sized>(&self, text: &str, tokenizer: &T) -> f64 {
        self.score(tokenizer.tokenize(text))
    }

    /// Tokenize, score and classify raw text.
    pub fn evaluate<T: Tokenize + ?Sized>(&self, text: &str, tokenizer: &T) -> Evaluation {
        let tokens = tokenizer.tokenize(text);
        let score = self.score(&tokens);
        let polarity = Polarity::from_score(score);

        if tokens.is_empty() {
            tracing::debug!(
                target: event_names::SCORE_PRIOR_ONLY,
                prior = self.model.prior(),
                "no tokens after normalization; score is the prior"
            );
        }
        tracing::debug!(
            target: event_names::SCORE_COMPUTED,
            stage = %Stage::Score,
            tokens = tokens.len(),
            score,
            polarity = %polarity,
            "message scored"
        );

        Evaluation {
            tokens,
            score,
            polarity,
        }
    }
}
