//! Business decision rule over the churn probability

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Probability cutoff, tuned offline, at or above which a customer is contacted
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DomainError::validation(format!(
                "Threshold must be a finite number within [0, 1], got {}",
                value
            )));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FromStr for Threshold {
    type Err = DomainError;

    /// Parse a single floating-point literal, ignoring surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed.parse::<f64>().map_err(|_| {
            DomainError::validation(format!(
                "Threshold must be a single decimal number, got '{}'",
                trimmed
            ))
        })?;

        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of the decision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Contact,
    NoContact,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::NoContact => "no_contact",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact when `probability >= threshold`; equality counts as contact
pub fn decide(probability: f64, threshold: Threshold) -> Decision {
    if probability >= threshold.value() {
        Decision::Contact
    } else {
        Decision::NoContact
    }
}
