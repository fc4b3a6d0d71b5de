//! JSON pipeline artifact: a column transformer followed by a classifier

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::boosted::GradientBoostedTrees;
use super::error::PipelineError;
use super::logistic::LogisticRegression;
use super::preprocess::ColumnTransformer;
use crate::domain::{ChurnPipeline, ClassProbabilities, DomainError, FeatureRow};

/// Artifact format understood by this runtime
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression(LogisticRegression),
    GradientBoostedTrees(GradientBoostedTrees),
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::GradientBoostedTrees(_) => "gradient_boosted_trees",
        }
    }

    /// Whether the classifier has its own routing for NaN inputs
    fn handles_missing(&self) -> bool {
        matches!(self, Self::GradientBoostedTrees(_))
    }

    fn validate(&self, input_width: usize) -> Result<(), PipelineError> {
        match self {
            Self::LogisticRegression(model) => model.validate(input_width),
            Self::GradientBoostedTrees(model) => model.validate(input_width),
        }
    }

    fn predict_positive(&self, features: &[f64]) -> Result<f64, PipelineError> {
        match self {
            Self::LogisticRegression(model) => Ok(model.predict_positive(features)),
            Self::GradientBoostedTrees(model) => model.predict_positive(features),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PipelineDocument {
    format_version: u32,
    #[serde(default)]
    name: Option<String>,
    preprocessor: ColumnTransformer,
    classifier: Classifier,
}

/// A validated, immutable pipeline loaded from a JSON artifact
#[derive(Debug, Clone)]
pub struct SerializedPipeline {
    name: String,
    preprocessor: ColumnTransformer,
    classifier: Classifier,
}

impl SerializedPipeline {
    /// Parse and validate an artifact; `default_name` is used when the
    /// document does not name itself
    pub fn from_json(json: &str, default_name: &str) -> Result<Self, PipelineError> {
        let document: PipelineDocument = serde_json::from_str(json)
            .map_err(|e| PipelineError::invalid_artifact(e.to_string()))?;

        if document.format_version != FORMAT_VERSION {
            return Err(PipelineError::invalid_artifact(format!(
                "unsupported format_version {} (expected {})",
                document.format_version, FORMAT_VERSION
            )));
        }

        let mut preprocessor = document.preprocessor;
        preprocessor.validate()?;
        document.classifier.validate(preprocessor.output_width())?;
        preprocessor.allow_missing = document.classifier.handles_missing();

        Ok(Self {
            name: document.name.unwrap_or_else(|| default_name.to_string()),
            preprocessor,
            classifier: document.classifier,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classifier_kind(&self) -> &'static str {
        self.classifier.kind()
    }

    pub fn input_width(&self) -> usize {
        self.preprocessor.output_width()
    }

    /// Name used when an artifact path has no usable file stem
    pub fn stem_name(path: &Path) -> String {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("pipeline")
            .to_string()
    }

    fn evaluate(&self, row: &FeatureRow) -> Result<ClassProbabilities, PipelineError> {
        let features = self.preprocessor.transform(row)?;
        let positive = self.classifier.predict_positive(&features)?;

        debug!(
            pipeline = %self.name,
            classifier = self.classifier.kind(),
            positive,
            "Pipeline evaluated"
        );

        Ok(ClassProbabilities::from_positive(positive))
    }
}

impl ChurnPipeline for SerializedPipeline {
    fn predict_proba(&self, row: &FeatureRow) -> Result<ClassProbabilities, DomainError> {
        self.evaluate(row)
            .map_err(|e| DomainError::inference(&self.name, e.to_string()))
    }

    fn required_columns(&self) -> Vec<String> {
        self.preprocessor.columns().map(str::to_string).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small but complete artifacts shared by tests across the crate

    pub const LR_PIPELINE: &str = r#"{
        "format_version": 1,
        "name": "lr_churn_pipeline",
        "preprocessor": {
            "numeric": [
                {"name": "tenure", "impute": 24.0, "mean": 24.0, "scale": 12.0},
                {"name": "MonthlyCharges", "mean": 70.0, "scale": 20.0}
            ],
            "categorical": [
                {"name": "Contract", "categories": ["Month-to-month", "One year", "Two year"]}
            ]
        },
        "classifier": {
            "type": "logistic_regression",
            "coefficients": [-1.0, 0.5, 0.8, -0.4, -1.2],
            "intercept": -0.3
        }
    }"#;

    pub const XGB_PIPELINE: &str = r#"{
        "format_version": 1,
        "name": "xgb_churn_pipeline",
        "preprocessor": {
            "numeric": [
                {"name": "tenure", "mean": 0.0, "scale": 1.0},
                {"name": "MonthlyCharges"}
            ],
            "categorical": [
                {"name": "Contract", "categories": ["Month-to-month", "One year", "Two year"]}
            ]
        },
        "classifier": {
            "type": "gradient_boosted_trees",
            "base_margin": 0.0,
            "trees": [
                {"nodes": [
                    {"feature": 2, "threshold": 0.5, "left": 1, "right": 2},
                    {"leaf": -1.0},
                    {"feature": 0, "threshold": 12.0, "left": 3, "right": 4, "default_left": true},
                    {"leaf": 1.0},
                    {"leaf": -0.5}
                ]},
                {"nodes": [
                    {"feature": 1, "threshold": 80.0, "left": 1, "right": 2},
                    {"leaf": 0.0},
                    {"leaf": 0.5}
                ]}
            ]
        }
    }"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::{LR_PIPELINE, XGB_PIPELINE};
    use super::*;
    use crate::domain::FeatureValue;
    use crate::infrastructure::pipeline::sigmoid;

    fn customer() -> FeatureRow {
        FeatureRow::default()
            .with("tenure", 24i64)
            .with("MonthlyCharges", 70.0)
            .with("Contract", "Month-to-month")
    }

    #[test]
    fn test_load_logistic_pipeline() {
        let pipeline = SerializedPipeline::from_json(LR_PIPELINE, "fallback").unwrap();

        assert_eq!(pipeline.name(), "lr_churn_pipeline");
        assert_eq!(pipeline.classifier_kind(), "logistic_regression");
        assert_eq!(pipeline.input_width(), 5);
        assert_eq!(
            pipeline.required_columns(),
            vec!["tenure", "MonthlyCharges", "Contract"]
        );
    }

    #[test]
    fn test_logistic_probability() {
        let pipeline = SerializedPipeline::from_json(LR_PIPELINE, "fallback").unwrap();
        let probabilities = pipeline.predict_proba(&customer()).unwrap();

        // scaled numerics are 0, month-to-month contributes 0.8
        assert_eq!(probabilities.positive(), sigmoid(-0.3 + 0.8));
        assert_eq!(probabilities.negative(), 1.0 - sigmoid(-0.3 + 0.8));
    }

    #[test]
    fn test_boosted_probability() {
        let pipeline = SerializedPipeline::from_json(XGB_PIPELINE, "fallback").unwrap();
        assert_eq!(pipeline.classifier_kind(), "gradient_boosted_trees");

        // month-to-month -> tenure 24 >= 12 -> -0.5; charges 70 < 80 -> 0.0
        let probabilities = pipeline.predict_proba(&customer()).unwrap();
        assert_eq!(probabilities.positive(), sigmoid(-0.5));

        // one year contract -> -1.0; charges 95 -> 0.5
        let row = customer()
            .with("Contract", "One year")
            .with("MonthlyCharges", 95.0);
        assert_eq!(pipeline.predict_proba(&row).unwrap().positive(), sigmoid(-0.5));

        // new month-to-month customer with high charges
        let row = customer().with("tenure", 2i64).with("MonthlyCharges", 99.0);
        assert_eq!(pipeline.predict_proba(&row).unwrap().positive(), sigmoid(1.5));
    }

    #[test]
    fn test_repeated_predictions_are_identical() {
        let pipeline = SerializedPipeline::from_json(XGB_PIPELINE, "fallback").unwrap();
        let first = pipeline.predict_proba(&customer()).unwrap();
        let second = pipeline.predict_proba(&customer()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_column_is_inference_error() {
        let pipeline = SerializedPipeline::from_json(LR_PIPELINE, "fallback").unwrap();
        let row = FeatureRow::default().with("tenure", 3i64);

        let error = pipeline.predict_proba(&row).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Inference error: lr_churn_pipeline - columns are missing: MonthlyCharges, Contract"
        );
    }

    #[test]
    fn test_mistyped_value_is_inference_error() {
        let pipeline = SerializedPipeline::from_json(LR_PIPELINE, "fallback").unwrap();
        let row = customer().with("MonthlyCharges", FeatureValue::from("a lot"));

        assert!(matches!(
            pipeline.predict_proba(&row),
            Err(DomainError::Inference { .. })
        ));
    }

    #[test]
    fn test_boosted_routes_missing_numeric_by_default_direction() {
        let pipeline = SerializedPipeline::from_json(XGB_PIPELINE, "fallback").unwrap();

        // month-to-month -> tenure missing -> default left -> 1.0; charges 70 -> 0.0
        for missing in [FeatureValue::Null, FeatureValue::from("NaN")] {
            let row = customer().with("tenure", missing);
            assert_eq!(pipeline.predict_proba(&row).unwrap().positive(), sigmoid(1.0));
        }
    }

    #[test]
    fn test_logistic_rejects_unimputed_missing_numeric() {
        let pipeline = SerializedPipeline::from_json(LR_PIPELINE, "fallback").unwrap();

        for value in [FeatureValue::Null, FeatureValue::from("NaN"), FeatureValue::from("inf")] {
            let row = customer().with("MonthlyCharges", value);
            assert!(matches!(
                pipeline.predict_proba(&row),
                Err(DomainError::Inference { .. })
            ));
        }
    }

    #[test]
    fn test_default_name_used_when_document_has_none() {
        let json = LR_PIPELINE.replace(r#""name": "lr_churn_pipeline","#, "");
        let pipeline = SerializedPipeline::from_json(&json, "lr_from_file").unwrap();

        assert_eq!(pipeline.name(), "lr_from_file");
    }

    #[test]
    fn test_rejects_inconsistent_artifacts() {
        let wrong_version = LR_PIPELINE.replace(r#""format_version": 1"#, r#""format_version": 2"#);
        assert!(SerializedPipeline::from_json(&wrong_version, "x").is_err());

        let wrong_width = LR_PIPELINE.replace("[-1.0, 0.5, 0.8, -0.4, -1.2]", "[-1.0, 0.5]");
        let error = SerializedPipeline::from_json(&wrong_width, "x").unwrap_err();
        assert!(matches!(error, PipelineError::InvalidArtifact(_)));

        let unknown_classifier =
            LR_PIPELINE.replace(r#""type": "logistic_regression""#, r#""type": "svm""#);
        assert!(SerializedPipeline::from_json(&unknown_classifier, "x").is_err());

        assert!(SerializedPipeline::from_json("not json", "x").is_err());
    }

    #[test]
    fn test_stem_name() {
        assert_eq!(
            SerializedPipeline::stem_name(Path::new("/models/xgb_churn_pipeline.json")),
            "xgb_churn_pipeline"
        );
    }
}
