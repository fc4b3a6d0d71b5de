//! Customer feature values and the single-row table handed to pipelines

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar feature value as received on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl FeatureValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Human-readable type name used in inference error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            // Integral numbers print without a fractional part so that `1` and
            // `1.0` match the same category label.
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Feature name to value mapping supplied per request
pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// Single-row table whose column names are the feature mapping keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    columns: FeatureMap,
}

impl FeatureRow {
    pub fn new(columns: FeatureMap) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Builder-style column insertion, mostly useful in tests
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }
}

impl From<FeatureMap> for FeatureRow {
    fn from(columns: FeatureMap) -> Self {
        Self::new(columns)
    }
}
