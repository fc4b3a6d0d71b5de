//! Model artifact loading

mod loader;

pub use loader::{ArtifactError, ArtifactLoader, ArtifactPaths, LoadedArtifacts};
