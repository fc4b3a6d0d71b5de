//! Gradient-boosted decision trees with a binary logistic objective
//!
//! Each tree is a flat node list with the root at index 0. A split routes
//! `x[feature] < threshold` to `left` and everything else to `right`; a
//! missing (`NaN`) input follows `default_left`. The positive-class
//! probability is `sigmoid(base_margin + sum of reached leaf values)`.

use serde::Deserialize;

use super::error::PipelineError;
use super::sigmoid;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default)]
        default_left: bool,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradientBoostedTrees {
    #[serde(default)]
    pub base_margin: f64,
    pub trees: Vec<Tree>,
}

impl Tree {
    fn validate(&self, index: usize, input_width: usize) -> Result<(), PipelineError> {
        if self.nodes.is_empty() {
            return Err(PipelineError::invalid_artifact(format!(
                "tree {} has no nodes",
                index
            )));
        }

        for (position, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= input_width {
                        return Err(PipelineError::invalid_artifact(format!(
                            "tree {} node {} splits on feature {} but the preprocessor produces {} features",
                            index, position, feature, input_width
                        )));
                    }

                    if threshold.is_nan() {
                        return Err(PipelineError::invalid_artifact(format!(
                            "tree {} node {} has a NaN threshold",
                            index, position
                        )));
                    }

                    // Children must come after their parent, which rules out cycles.
                    for child in [left, right] {
                        if *child <= position || *child >= self.nodes.len() {
                            return Err(PipelineError::invalid_artifact(format!(
                                "tree {} node {} has an invalid child index {}",
                                index, position, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(PipelineError::invalid_artifact(format!(
                            "tree {} node {} has a non-finite leaf value",
                            index, position
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walk from the root to a leaf and return its value
    pub fn evaluate(&self, features: &[f64]) -> Result<f64, PipelineError> {
        let mut position = 0;

        loop {
            let node = self.nodes.get(position).ok_or_else(|| {
                PipelineError::invalid_artifact(format!("tree node {} does not exist", position))
            })?;

            match node {
                TreeNode::Leaf { leaf } => return Ok(*leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(f64::NAN);
                    let go_left = if value.is_nan() {
                        *default_left
                    } else {
                        value < *threshold
                    };

                    position = if go_left { *left } else { *right };
                }
            }
        }
    }
}

impl GradientBoostedTrees {
    pub fn validate(&self, input_width: usize) -> Result<(), PipelineError> {
        if self.trees.is_empty() {
            return Err(PipelineError::invalid_artifact("ensemble has no trees"));
        }

        if !self.base_margin.is_finite() {
            return Err(PipelineError::invalid_artifact("base margin must be finite"));
        }

        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(index, tree)| tree.validate(index, input_width))
    }

    pub fn margin(&self, features: &[f64]) -> Result<f64, PipelineError> {
        self.trees
            .iter()
            .try_fold(self.base_margin, |sum, tree| Ok(sum + tree.evaluate(features)?))
    }

    /// Probability of the positive class
    pub fn predict_positive(&self, features: &[f64]) -> Result<f64, PipelineError> {
        Ok(sigmoid(self.margin(features)?))
    }
}
