use crate::{Error, Result};
use serde::Deserialize;

/// A fitted model mapping one scaled feature vector to one prediction.
#[cfg_attr(test, mockall::automock)]
pub trait Regressor: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<f64>;
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>> {
        match self {
            Self::Linear(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            Self::TreeEnsemble(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

pub fn from_json(json: &str) -> Result<Box<dyn Regressor>> {
    let artifact: ModelArtifact = serde_json::from_str(json)?;
    artifact.into_regressor()
}

fn check_len(expected: usize, features: &[f64]) -> Result<()> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(Error::FeatureMismatch {
            expected,
            actual: features.len(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(Error::artifact("linear model has no coefficients"));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::artifact("linear model contains a non-finite value"));
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_len(self.coefficients.len(), features)?;
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    Mean,
    /// `base_score + learning_rate * Σ trees` (gradient boosting).
    Sum,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Binary regression tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::artifact("tree has no nodes"));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(Error::artifact(format!(
                            "node {} splits on feature {} of {}",
                            index, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::artifact(format!(
                            "node {} has a non-finite threshold",
                            index
                        )));
                    }
                    // Children must point forward, which also rules out cycles.
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(Error::artifact(format!(
                                "node {} has invalid child index {}",
                                index, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(Error::artifact(format!(
                            "leaf {} has a non-finite value",
                            index
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    aggregation: Aggregation,
    #[serde(default)]
    base_score: f64,
    #[serde(default = "default_learning_rate")]
    learning_rate: f64,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::artifact("tree ensemble has no trees"));
        }
        if self.n_features == 0 {
            return Err(Error::artifact("tree ensemble declares zero features"));
        }
        if !self.base_score.is_finite() || !self.learning_rate.is_finite() {
            return Err(Error::artifact(
                "tree ensemble has a non-finite base score or learning rate",
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| e.in_artifact(format!("tree {}", i)))?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_len(self.n_features, features)?;
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(features)).sum();
        Ok(match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + self.learning_rate * total,
        })
    }
}
