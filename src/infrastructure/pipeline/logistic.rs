//! Logistic regression classifier

use serde::Deserialize;

use super::error::PipelineError;
use super::sigmoid;

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn validate(&self, input_width: usize) -> Result<(), PipelineError> {
        if self.coefficients.len() != input_width {
            return Err(PipelineError::invalid_artifact(format!(
                "logistic regression has {} coefficients but the preprocessor produces {} features",
                self.coefficients.len(),
                input_width
            )));
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PipelineError::invalid_artifact(
                "logistic regression parameters must be finite",
            ));
        }

        Ok(())
    }

    pub fn decision_function(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    /// Probability of the positive class
    pub fn predict_positive(&self, features: &[f64]) -> f64 {
        sigmoid(self.decision_function(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression {
            coefficients: vec![0.5, -1.0, 2.0],
            intercept: -0.5,
        }
    }

    #[test]
    fn test_decision_function() {
        assert_eq!(model().decision_function(&[1.0, 1.0, 0.5]), 0.0);
        assert_eq!(model().decision_function(&[2.0, 0.0, 1.0]), 2.5);
    }

    #[test]
    fn test_predict_positive() {
        assert_eq!(model().predict_positive(&[1.0, 1.0, 0.5]), 0.5);

        let high = model().predict_positive(&[0.0, -10.0, 10.0]);
        let low = model().predict_positive(&[0.0, 10.0, -10.0]);
        assert!(high > 0.99 && high <= 1.0);
        assert!(low < 0.01 && low >= 0.0);
    }

    #[test]
    fn test_validate_width() {
        assert!(model().validate(3).is_ok());
        assert!(model().validate(4).is_err());

        let mut non_finite = model();
        non_finite.coefficients[1] = f64::INFINITY;
        assert!(non_finite.validate(3).is_err());
    }
}
