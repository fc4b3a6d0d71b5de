//! Application state shared by all handlers

use std::sync::Arc;

use crate::domain::{ChurnPipeline, Threshold};
use crate::infrastructure::artifacts::{ArtifactPaths, LoadedArtifacts};

/// Immutable startup-loaded artifacts; cloning only bumps reference counts
#[derive(Clone)]
pub struct AppState {
    pub logistic: Arc<dyn ChurnPipeline>,
    pub boosted: Arc<dyn ChurnPipeline>,
    pub threshold: Threshold,
    pub paths: Arc<ArtifactPaths>,
}

impl AppState {
    pub fn new(
        logistic: Arc<dyn ChurnPipeline>,
        boosted: Arc<dyn ChurnPipeline>,
        threshold: Threshold,
        paths: ArtifactPaths,
    ) -> Self {
        Self {
            logistic,
            boosted,
            threshold,
            paths: Arc::new(paths),
        }
    }
}

impl From<LoadedArtifacts> for AppState {
    fn from(artifacts: LoadedArtifacts) -> Self {
        Self::new(
            artifacts.logistic,
            artifacts.boosted,
            artifacts.threshold,
            artifacts.paths,
        )
    }
}
