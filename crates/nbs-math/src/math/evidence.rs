//! Log-odds evidence utilities for explainability.
//!
//! Every term of a Naive Bayes sentiment score is a log-likelihood ratio
//! log P(w|positive) - log P(w|negative), so each one is a log Bayes factor
//! in nats. This module turns those numbers into:
//! - odds ratios (overflow-safe)
//! - evidence in bits
//! - a Jeffreys-scale strength label
//! - a direction (which class the evidence favors)

use serde::Serialize;

/// Maximum log-odds before clamping to avoid overflow.
/// exp(709) ≈ 8.2e307 is near f64::MAX.
pub const LOG_ODDS_MAX: f64 = 700.0;

/// Minimum log-odds before clamping to avoid underflow.
pub const LOG_ODDS_MIN: f64 = -700.0;

/// Convert a log-odds value to an odds ratio with overflow-safe handling.
///
/// - Clamps to [LOG_ODDS_MIN, LOG_ODDS_MAX] before exponentiation
/// - Returns 0.0 for -inf and f64::MAX for +inf
/// - Returns NaN for NaN
pub fn odds_from_log_odds(log_odds: f64) -> f64 {
    if log_odds.is_nan() {
        return f64::NAN;
    }
    if log_odds == f64::NEG_INFINITY {
        return 0.0;
    }
    if log_odds == f64::INFINITY {
        return f64::MAX;
    }
    log_odds.clamp(LOG_ODDS_MIN, LOG_ODDS_MAX).exp()
}

/// Convert evidence in nats to bits.
pub fn delta_bits(log_odds: f64) -> f64 {
    if log_odds.is_nan() {
        return f64::NAN;
    }
    log_odds / std::f64::consts::LN_2
}

/// Evidence strength on the Jeffreys scale.
///
/// Labels are for presentation only; the raw log-odds value is always kept
/// alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// |log_odds| = 0
    None,
    /// 0 < |log_odds| < ln(3.2)
    Anecdotal,
    /// ln(3.2) <= |log_odds| < ln(10)
    Substantial,
    /// ln(10) <= |log_odds| < ln(32)
    Strong,
    /// ln(32) <= |log_odds| < ln(100)
    VeryStrong,
    /// |log_odds| >= ln(100)
    Decisive,
}

impl EvidenceStrength {
    /// Classify evidence strength from a log-odds value (sign ignored).
    pub fn from_log_odds(log_odds: f64) -> Self {
        if log_odds.is_nan() {
            return EvidenceStrength::None;
        }

        let abs = log_odds.abs();

        const LN_3_2: f64 = 1.163_150_809_678_64; // ln(3.2)
        const LN_32: f64 = 3.465_735_902_799_727; // ln(32)
        const LN_100: f64 = 4.605_170_185_988_092; // ln(100)
        let ln_10 = std::f64::consts::LN_10;

        if abs < f64::EPSILON {
            EvidenceStrength::None
        } else if abs < LN_3_2 {
            EvidenceStrength::Anecdotal
        } else if abs < ln_10 {
            EvidenceStrength::Substantial
        } else if abs < LN_32 {
            EvidenceStrength::Strong
        } else if abs < LN_100 {
            EvidenceStrength::VeryStrong
        } else {
            EvidenceStrength::Decisive
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceStrength::None => "none",
            EvidenceStrength::Anecdotal => "anecdotal",
            EvidenceStrength::Substantial => "substantial",
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::VeryStrong => "very strong",
            EvidenceStrength::Decisive => "decisive",
        }
    }
}

impl std::fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which class a piece of evidence favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceDirection {
    /// log_odds > 0
    Positive,
    /// log_odds < 0
    Negative,
    /// log_odds = 0 (or NaN)
    Neutral,
}

impl EvidenceDirection {
    pub fn from_log_odds(log_odds: f64) -> Self {
        if log_odds.is_nan() || log_odds.abs() < f64::EPSILON {
            EvidenceDirection::Neutral
        } else if log_odds > 0.0 {
            EvidenceDirection::Positive
        } else {
            EvidenceDirection::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EvidenceDirection::Positive => "positive",
            EvidenceDirection::Negative => "negative",
            EvidenceDirection::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for EvidenceDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
