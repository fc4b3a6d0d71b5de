//! Prediction endpoint handlers

use std::time::Instant;

use axum::extract::State;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, BusinessPredictionResponse, Json, ModelKind, PredictRequest, PredictionResponse,
};
use crate::domain::{decide, predict_churn, ChurnPipeline, ChurnProbability, FeatureMap};
use crate::infrastructure::observability::{record_decision, record_prediction};

/// POST /predict_lr
pub async fn predict_lr(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let model = ModelKind::LogisticRegression;
    let churn_probability = score(model, state.logistic.as_ref(), request.features)?;

    Ok(Json(PredictionResponse {
        model,
        churn_probability,
    }))
}

/// POST /predict_xgb
pub async fn predict_xgb(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let model = ModelKind::Xgboost;
    let churn_probability = score(model, state.boosted.as_ref(), request.features)?;

    Ok(Json(PredictionResponse {
        model,
        churn_probability,
    }))
}

/// POST /predict_xgb_business
pub async fn predict_xgb_business(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<BusinessPredictionResponse>, ApiError> {
    let model = ModelKind::Xgboost;
    let churn_probability = score(model, state.boosted.as_ref(), request.features)?;
    let decision = decide(churn_probability.value(), state.threshold);

    record_decision(decision);
    debug!(
        probability = churn_probability.value(),
        threshold = state.threshold.value(),
        %decision,
        "Decision rule applied"
    );

    Ok(Json(BusinessPredictionResponse {
        model,
        churn_probability,
        threshold: state.threshold,
        decision,
    }))
}

fn score(
    model: ModelKind,
    pipeline: &dyn ChurnPipeline,
    features: FeatureMap,
) -> Result<ChurnProbability, ApiError> {
    let start = Instant::now();
    let result = predict_churn(pipeline, features);
    record_prediction(model.as_str(), result.is_ok(), start.elapsed());

    match result {
        Ok(probability) => {
            debug!(%model, probability = probability.value(), "Prediction served");
            Ok(probability)
        }
        Err(e) => {
            warn!(%model, error = %e, "Prediction failed");
            Err(ApiError::from(e))
        }
    }
}
