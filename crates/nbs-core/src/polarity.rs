//! Polarity rule: the sign of a score decides the reported sentiment.

use serde::{Deserialize, Serialize};

/// Scores strictly above this value are positive; everything else,
/// including exactly zero, is negative.
pub const POLARITY_THRESHOLD: f64 = 0.0;

/// Binary sentiment derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Classify a score. NaN is not above the threshold and is negative.
    pub fn from_score(score: f64) -> Self {
        if score > POLARITY_THRESHOLD {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Polarity::Positive)
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_above_zero() {
        assert_eq!(Polarity::from_score(1.4), Polarity::Positive);
        assert_eq!(Polarity::from_score(f64::MIN_POSITIVE), Polarity::Positive);
    }

    #[test]
    fn zero_is_negative() {
        assert_eq!(Polarity::from_score(0.0), Polarity::Negative);
        assert_eq!(Polarity::from_score(-0.0), Polarity::Negative);
    }

    #[test]
    fn below_zero_is_negative() {
        assert_eq!(Polarity::from_score(-2.5), Polarity::Negative);
    }

    #[test]
    fn nan_is_negative() {
        assert_eq!(Polarity::from_score(f64::NAN), Polarity::Negative);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Polarity::Positive).unwrap(), "\"positive\"");
        assert_eq!(Polarity::Negative.to_string(), "negative");
    }
}
