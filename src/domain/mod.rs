//! Domain layer - Core business logic and entities

pub mod decision;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod prediction;

pub use decision::{decide, Decision, Threshold};
pub use error::DomainError;
pub use features::{FeatureMap, FeatureRow, FeatureValue};
pub use pipeline::{ChurnPipeline, ClassProbabilities, POSITIVE_CLASS};
pub use prediction::{predict_churn, ChurnProbability};
