//! Pipeline error types

use thiserror::Error;

/// Errors raised while loading or evaluating a serialized pipeline
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    #[error("columns are missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("columns are not expected by the pipeline: {}", .0.join(", "))]
    UnexpectedColumns(Vec<String>),

    #[error("invalid value for column '{column}': {message}")]
    InvalidValue { column: String, message: String },

    #[error("found unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("invalid pipeline artifact: {0}")]
    InvalidArtifact(String),
}

impl PipelineError {
    pub fn invalid_value(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn unknown_category(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn invalid_artifact(message: impl Into<String>) -> Self {
        Self::InvalidArtifact(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let error = PipelineError::MissingColumns(vec!["tenure".into(), "Contract".into()]);
        assert_eq!(error.to_string(), "columns are missing: tenure, Contract");
    }

    #[test]
    fn test_unknown_category_message() {
        let error = PipelineError::unknown_category("Contract", "Weekly");
        assert_eq!(
            error.to_string(),
            "found unknown category 'Weekly' in column 'Contract'"
        );
    }
}
