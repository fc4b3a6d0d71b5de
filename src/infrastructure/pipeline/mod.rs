//! Runtime for serialized churn pipelines
//!
//! A pipeline artifact is a JSON document holding the fitted parameters of a
//! column transformer (imputation, standard scaling, one-hot encoding) and a
//! binary classifier (logistic regression or gradient-boosted trees).

mod boosted;
mod error;
mod logistic;
mod preprocess;
mod serialized;

pub use boosted::{GradientBoostedTrees, Tree, TreeNode};
pub use error::PipelineError;
pub use logistic::LogisticRegression;
pub use preprocess::{CategoricalColumn, ColumnTransformer, HandleUnknown, NumericColumn};
pub use serialized::{Classifier, SerializedPipeline, FORMAT_VERSION};

#[cfg(test)]
pub(crate) use serialized::fixtures;

/// Logistic function, stable for large negative inputs
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
