//! Infrastructure layer - Artifact loading, pipeline runtime and observability

pub mod artifacts;
pub mod logging;
pub mod observability;
pub mod pipeline;
