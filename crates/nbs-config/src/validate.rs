//! Model validation errors and semantic validation.

use thiserror::Error;

use crate::model::Model;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Model validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a model semantically.
///
/// An empty likelihood table is valid: every word is then neutral and the
/// score is the prior alone.
pub fn validate_model(model: &Model) -> ValidationResult<()> {
    if model.schema_version() != crate::MODEL_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::MODEL_SCHEMA_VERSION.to_string(),
            actual: model.schema_version().to_string(),
        });
    }

    if !model.prior().is_finite() {
        return Err(ValidationError::InvalidValue {
            field: "prior".to_string(),
            message: format!("Must be finite, got {}", model.prior()),
        });
    }

    // Sorted so the reported offender does not depend on hash order.
    let mut words: Vec<(&String, &f64)> = model.likelihood().iter().collect();
    words.sort_by(|a, b| a.0.cmp(b.0));

    for (word, value) in words {
        validate_word(word)?;
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("likelihood.{}", word),
                message: format!("Must be finite, got {}", value),
            });
        }
    }

    Ok(())
}

fn validate_word(word: &str) -> ValidationResult<()> {
    if word.is_empty() {
        return Err(ValidationError::SemanticError(
            "likelihood contains an empty word".to_string(),
        ));
    }
    if word.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidValue {
            field: format!("likelihood.{:?}", word),
            message: "Words must not contain whitespace".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn model_with(prior: f64, entries: &[(&str, f64)]) -> Model {
        let likelihood: HashMap<String, f64> = entries
            .iter()
            .map(|(w, v)| (w.to_string(), *v))
            .collect();
        Model::new(prior, likelihood)
    }

    #[test]
    fn valid_model_passes() {
        let model = model_with(0.5, &[("good", 1.2), ("bad", -1.5)]);
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn empty_likelihood_is_valid() {
        assert!(validate_model(&model_with(0.0, &[])).is_ok());
    }

    #[test]
    fn non_finite_prior_rejected() {
        for prior in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = validate_model(&model_with(prior, &[])).unwrap_err();
            assert_eq!(err.code(), 65);
        }
    }

    #[test]
    fn non_finite_likelihood_rejected() {
        let err = validate_model(&model_with(0.0, &[("good", 1.0), ("bad", f64::NAN)])).unwrap_err();
        match err {
            ValidationError::InvalidValue { field, .. } => assert_eq!(field, "likelihood.bad"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_word_rejected() {
        let err = validate_model(&model_with(0.0, &[("", 1.0)])).unwrap_err();
        assert_eq!(err.code(), 63);
    }

    #[test]
    fn whitespace_word_rejected() {
        let err = validate_model(&model_with(0.0, &[("not good", 1.0)])).unwrap_err();
        assert_eq!(err.code(), 65);
    }

    #[test]
    fn version_mismatch_rejected() {
        let json = r#"{"schema_version":"0.1.0","prior":0.0}"#;
        let model = Model::from_json(json).unwrap();
        let err = validate_model(&model).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
        assert_eq!(err.code(), 66);
    }
}
