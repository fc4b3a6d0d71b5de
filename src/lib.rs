//! Churn Scoring API
//!
//! Serves churn-prediction inference from two pre-trained pipelines:
//! - Logistic regression and gradient-boosted trees behind one `ChurnPipeline` seam
//! - A business decision rule over a stored probability threshold
//! - Artifacts loaded once at startup and shared read-only across requests

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::artifacts::{ArtifactError, ArtifactLoader, ArtifactPaths};
use infrastructure::observability::{init_metrics, record_threshold, PrometheusMetrics};

/// Load the artifacts named by the configuration and build the shared state
pub fn create_app_state(config: &AppConfig) -> Result<AppState, ArtifactError> {
    let loader = ArtifactLoader::new(ArtifactPaths::from_config(&config.models));
    let artifacts = loader.load()?;

    record_threshold(artifacts.threshold);

    Ok(AppState::from(artifacts))
}

/// Install the metrics recorder, then load the artifacts
///
/// Startup gauges recorded while loading are dropped unless the recorder
/// already exists, so the order here matters.
pub fn init_app(
    config: &AppConfig,
) -> Result<(AppState, Option<PrometheusMetrics>), ArtifactError> {
    let metrics = init_metrics(&config.observability.metrics);
    let state = create_app_state(config)?;

    Ok((state, metrics))
}
