//! Column transformer: replays the fitted preprocessing of a pipeline
//!
//! The transformed vector holds the scaled numeric columns in declared order,
//! followed by one one-hot block per categorical column.

use std::collections::HashSet;

use serde::Deserialize;

use super::error::PipelineError;
use crate::domain::{FeatureRow, FeatureValue};

/// Fitted imputation + standard scaling for a numeric column
#[derive(Debug, Clone, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    /// Replacement for `null` and NaN inputs
    #[serde(default)]
    pub impute: Option<f64>,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

/// How a categorical column treats values outside its fitted categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Ignore,
    Error,
}

/// Fitted imputation + one-hot encoding for a categorical column
#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub impute: Option<String>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnTransformer {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
    /// Reject columns the transformer does not declare instead of dropping them
    #[serde(default)]
    pub strict_columns: bool,
    /// Pass unimputed missing numerics through as NaN; set by the owning
    /// pipeline when its classifier routes missing values
    #[serde(skip)]
    pub allow_missing: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl NumericColumn {
    /// `null` and NaN are missing values: imputed when configured, passed on
    /// as NaN when `allow_missing`, rejected otherwise
    fn encode(&self, value: &FeatureValue, allow_missing: bool) -> Result<f64, PipelineError> {
        let raw = match value {
            FeatureValue::Number(number) => *number,
            FeatureValue::Bool(flag) => f64::from(u8::from(*flag)),
            FeatureValue::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                PipelineError::invalid_value(
                    &self.name,
                    format!("could not convert string to float: '{}'", text),
                )
            })?,
            FeatureValue::Null => f64::NAN,
        };

        if raw.is_nan() {
            return match self.impute {
                Some(fill) => Ok((fill - self.mean) / self.scale),
                None if allow_missing => Ok(f64::NAN),
                None => Err(PipelineError::invalid_value(
                    &self.name,
                    "missing value and no imputation configured",
                )),
            };
        }

        if raw.is_infinite() {
            return Err(PipelineError::invalid_value(
                &self.name,
                format!("value must be finite, got {}", raw),
            ));
        }

        Ok((raw - self.mean) / self.scale)
    }
}

impl CategoricalColumn {
    fn encode_into(&self, value: &FeatureValue, output: &mut Vec<f64>) -> Result<(), PipelineError> {
        let label = match value {
            FeatureValue::Null => self.impute.clone(),
            other => Some(other.to_string()),
        };

        let position = label
            .as_deref()
            .and_then(|label| self.categories.iter().position(|c| c == label));

        if position.is_none() && self.handle_unknown == HandleUnknown::Error {
            return Err(PipelineError::unknown_category(
                &self.name,
                label.unwrap_or_else(|| value.to_string()),
            ));
        }

        output.extend((0..self.categories.len()).map(|i| {
            if Some(i) == position { 1.0 } else { 0.0 }
        }));

        Ok(())
    }
}

impl ColumnTransformer {
    /// Check the fitted parameters for internal consistency
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err(PipelineError::invalid_artifact(
                "preprocessor declares no columns",
            ));
        }

        let mut seen = HashSet::new();
        for name in self.columns() {
            if !seen.insert(name) {
                return Err(PipelineError::invalid_artifact(format!(
                    "column '{}' is declared more than once",
                    name
                )));
            }
        }

        for column in &self.numeric {
            if !column.scale.is_finite() || column.scale == 0.0 {
                return Err(PipelineError::invalid_artifact(format!(
                    "numeric column '{}' has an invalid scale {}",
                    column.name, column.scale
                )));
            }
            if !column.mean.is_finite() {
                return Err(PipelineError::invalid_artifact(format!(
                    "numeric column '{}' has a non-finite mean",
                    column.name
                )));
            }
        }

        for column in &self.categorical {
            if column.categories.is_empty() {
                return Err(PipelineError::invalid_artifact(format!(
                    "categorical column '{}' has no categories",
                    column.name
                )));
            }
        }

        Ok(())
    }

    /// Declared input columns, numeric first
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.categorical.iter().map(|c| c.name.as_str()))
    }

    /// Length of the transformed feature vector
    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<Vec<f64>, PipelineError> {
        let missing: Vec<String> = self
            .columns()
            .filter(|name| !row.contains(name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(PipelineError::MissingColumns(missing));
        }

        if self.strict_columns {
            let declared: HashSet<&str> = self.columns().collect();
            let unexpected: Vec<String> = row
                .column_names()
                .filter(|name| !declared.contains(name))
                .map(str::to_string)
                .collect();

            if !unexpected.is_empty() {
                return Err(PipelineError::UnexpectedColumns(unexpected));
            }
        }

        let mut output = Vec::with_capacity(self.output_width());

        for column in &self.numeric {
            if let Some(value) = row.get(&column.name) {
                output.push(column.encode(value, self.allow_missing)?);
            }
        }

        for column in &self.categorical {
            if let Some(value) = row.get(&column.name) {
                column.encode_into(value, &mut output)?;
            }
        }

        Ok(output)
    }
}
