//! Startup loading of the pipeline artifacts and decision threshold

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::ModelsConfig;
use crate::domain::{DomainError, Threshold};
use crate::infrastructure::pipeline::{PipelineError, SerializedPipeline};

/// Fatal errors raised while loading artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {path}")]
    Missing { path: String },

    #[error("Failed to read artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load pipeline {path}: {source}")]
    Pipeline {
        path: String,
        #[source]
        source: PipelineError,
    },

    #[error("Failed to load threshold {path}: {source}")]
    Threshold {
        path: String,
        #[source]
        source: DomainError,
    },
}

/// Resolved locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub models_dir: PathBuf,
    pub logistic: PathBuf,
    pub boosted: PathBuf,
    pub threshold: PathBuf,
}

impl ArtifactPaths {
    pub fn new(models_dir: impl Into<PathBuf>, config: &ModelsConfig) -> Self {
        let models_dir = models_dir.into();

        Self {
            logistic: models_dir.join(&config.lr_file),
            boosted: models_dir.join(&config.xgb_file),
            threshold: models_dir.join(&config.threshold_file),
            models_dir,
        }
    }

    pub fn from_config(config: &ModelsConfig) -> Self {
        Self::new(&config.dir, config)
    }

    /// Checked against the filesystem on every call
    pub fn has_logistic(&self) -> bool {
        self.logistic.exists()
    }

    /// Checked against the filesystem on every call
    pub fn has_boosted(&self) -> bool {
        self.boosted.exists()
    }
}

/// The immutable artifacts a server instance runs on
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub paths: ArtifactPaths,
    pub logistic: Arc<SerializedPipeline>,
    pub boosted: Arc<SerializedPipeline>,
    pub threshold: Threshold,
}

pub struct ArtifactLoader {
    paths: ArtifactPaths,
}

impl ArtifactLoader {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load every artifact; any failure is fatal for the caller
    pub fn load(&self) -> Result<LoadedArtifacts, ArtifactError> {
        info!(
            models_dir = %self.paths.models_dir.display(),
            "Loading model artifacts"
        );

        let logistic = load_pipeline(&self.paths.logistic)?;
        let boosted = load_pipeline(&self.paths.boosted)?;
        let threshold = load_threshold(&self.paths.threshold)?;

        info!(threshold = threshold.value(), "Decision threshold loaded");

        Ok(LoadedArtifacts {
            paths: self.paths.clone(),
            logistic: Arc::new(logistic),
            boosted: Arc::new(boosted),
            threshold,
        })
    }
}

fn read_artifact(path: &Path) -> Result<String, ArtifactError> {
    if !path.is_file() {
        return Err(ArtifactError::Missing {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn load_pipeline(path: &Path) -> Result<SerializedPipeline, ArtifactError> {
    let json = read_artifact(path)?;
    let pipeline = SerializedPipeline::from_json(&json, &SerializedPipeline::stem_name(path))
        .map_err(|source| ArtifactError::Pipeline {
            path: path.display().to_string(),
            source,
        })?;

    info!(
        pipeline = pipeline.name(),
        classifier = pipeline.classifier_kind(),
        features = pipeline.input_width(),
        path = %path.display(),
        "Pipeline loaded"
    );

    Ok(pipeline)
}

fn load_threshold(path: &Path) -> Result<Threshold, ArtifactError> {
    read_artifact(path)?
        .parse::<Threshold>()
        .map_err(|source| ArtifactError::Threshold {
            path: path.display().to_string(),
            source,
        })
}
