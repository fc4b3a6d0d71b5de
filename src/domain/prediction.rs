//! Inference adapter: feature mapping in, churn probability out

use serde::Serialize;
use tracing::debug;

use super::features::{FeatureMap, FeatureRow};
use super::pipeline::ChurnPipeline;
use crate::domain::DomainError;

/// Probability of churn (label `1`) for a single customer, always in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ChurnProbability(f64);

impl ChurnProbability {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DomainError::internal(format!(
                "Pipeline returned a churn probability outside [0, 1]: {}",
                value
            )));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Run one customer's features through a pipeline and extract the
/// positive-class probability
pub fn predict_churn(
    pipeline: &dyn ChurnPipeline,
    features: FeatureMap,
) -> Result<ChurnProbability, DomainError> {
    let row = FeatureRow::new(features);
    debug!(columns = row.len(), "Running churn inference");

    let probabilities = pipeline.predict_proba(&row)?;

    ChurnProbability::new(probabilities.positive())
}
