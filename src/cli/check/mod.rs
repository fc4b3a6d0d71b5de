//! Check command - validates the artifacts a server would load

use anyhow::Context;
use clap::Args;
use tracing::info;

use super::ModelArgs;
use crate::config::AppConfig;
use crate::domain::ChurnPipeline;
use crate::infrastructure::artifacts::{
    ArtifactError, ArtifactLoader, ArtifactPaths, LoadedArtifacts,
};
use crate::infrastructure::logging;

/// Arguments for the check command
#[derive(Args, Clone, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub models: ModelArgs,
}

/// Load every artifact and report what was found; fails like `serve` would
pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.models.apply(&mut config);

    logging::init_logging(&config.logging);

    check_artifacts(&config)?;

    Ok(())
}

/// Load the configured artifacts and log a summary of each
pub fn check_artifacts(config: &AppConfig) -> Result<LoadedArtifacts, ArtifactError> {
    let loader = ArtifactLoader::new(ArtifactPaths::from_config(&config.models));
    let artifacts = loader.load()?;

    for pipeline in [&artifacts.logistic, &artifacts.boosted] {
        info!(
            pipeline = pipeline.name(),
            classifier = pipeline.classifier_kind(),
            columns = ?pipeline.required_columns(),
            "Pipeline OK"
        );
    }

    info!(
        models_dir = %artifacts.paths.models_dir.display(),
        threshold = artifacts.threshold.value(),
        "All artifacts loaded"
    );

    Ok(artifacts)
}
