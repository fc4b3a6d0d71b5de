//! Churn pipeline trait and class-probability output

#[cfg(test)]
use mockall::automock;

use serde::Serialize;

use super::features::FeatureRow;
use crate::domain::DomainError;

/// Index of the positive ("churn", label `1`) class
pub const POSITIVE_CLASS: usize = 1;

/// Class-probability vector for a single row: `[p(no churn), p(churn)]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities([f64; 2]);

impl ClassProbabilities {
    pub fn new(negative: f64, positive: f64) -> Self {
        Self([negative, positive])
    }

    /// Build from the positive-class probability of a binary classifier
    pub fn from_positive(positive: f64) -> Self {
        Self([1.0 - positive, positive])
    }

    pub fn positive(&self) -> f64 {
        self.0[POSITIVE_CLASS]
    }

    pub fn negative(&self) -> f64 {
        self.0[0]
    }

    pub fn as_array(&self) -> [f64; 2] {
        self.0
    }
}

/// A pre-trained inference pipeline (preprocessing + classifier).
///
/// Implementations are loaded once and shared read-only across concurrent
/// requests, so they must not rely on interior mutability.
#[cfg_attr(test, automock)]
pub trait ChurnPipeline: Send + Sync {
    /// Estimate class probabilities for a single row of named features
    fn predict_proba(&self, row: &FeatureRow) -> Result<ClassProbabilities, DomainError>;

    /// Columns the pipeline reads from a row
    fn required_columns(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_positive() {
        let probabilities = ClassProbabilities::from_positive(0.25);

        assert_eq!(probabilities.positive(), 0.25);
        assert_eq!(probabilities.negative(), 0.75);
        assert_eq!(probabilities.as_array(), [0.75, 0.25]);
    }

    #[test]
    fn test_mock_pipeline() {
        let mut pipeline = MockChurnPipeline::new();
        pipeline
            .expect_predict_proba()
            .returning(|_| Ok(ClassProbabilities::from_positive(0.6)));

        let result = pipeline.predict_proba(&FeatureRow::default()).unwrap();
        assert_eq!(result.positive(), 0.6);
    }
}
