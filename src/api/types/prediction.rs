//! Prediction request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::{ChurnProbability, Decision, FeatureMap, Threshold};

/// Model identifier reported in prediction responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    Xgboost,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic_regression",
            Self::Xgboost => "xgboost",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{"features": {name: value, ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub features: FeatureMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub model: ModelKind,
    pub churn_probability: ChurnProbability,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessPredictionResponse {
    pub model: ModelKind,
    pub churn_probability: ChurnProbability,
    pub threshold: Threshold,
    pub decision: Decision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureValue;

    #[test]
    fn test_predict_request_deserialization() {
        let request: PredictRequest = serde_json::from_str(
            r#"{"features": {"tenure": 2, "PaymentMethod": "Electronic check"}}"#,
        )
        .unwrap();

        assert_eq!(request.features.len(), 2);
        assert_eq!(request.features["tenure"], FeatureValue::Number(2.0));
    }

    #[test]
    fn test_predict_request_requires_mapping() {
        assert!(serde_json::from_str::<PredictRequest>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<PredictRequest>(r#"{"features": [1, 2]}"#).is_err());
        assert!(serde_json::from_str::<PredictRequest>(r#"{"features": "tenure=2"}"#).is_err());
    }

    #[test]
    fn test_business_response_serialization() {
        let response = BusinessPredictionResponse {
            model: ModelKind::Xgboost,
            churn_probability: ChurnProbability::new(0.42).unwrap(),
            threshold: Threshold::new(0.42).unwrap(),
            decision: Decision::Contact,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "xgboost",
                "churn_probability": 0.42,
                "threshold": 0.42,
                "decision": "contact"
            })
        );
    }

    #[test]
    fn test_model_kind_serialization() {
        let response = PredictionResponse {
            model: ModelKind::LogisticRegression,
            churn_probability: ChurnProbability::new(0.1).unwrap(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"model":"logistic_regression","churn_probability":0.1}"#);
    }
}
