use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::health;
use super::middleware::{
    logging_middleware, metrics_middleware, security_headers_middleware, MAX_BODY_SIZE,
};
use super::predict;
use super::state::AppState;
use super::types::ApiError;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/predict_lr", post(predict::predict_lr))
        .route("/predict_xgb", post(predict::predict_xgb))
        .route("/predict_xgb_business", post(predict::predict_xgb_business))
        .fallback(route_not_found)
        .with_state(state);

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router.layer(DefaultBodyLimit::max(MAX_BODY_SIZE)).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(logging_middleware))
            .layer(middleware::from_fn(metrics_middleware))
            .layer(middleware::from_fn(security_headers_middleware)),
    )
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("No such endpoint")
}
