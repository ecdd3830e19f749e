//! Read model artifact JSON files.
//!
//! An artifact is the portable form of a trained model:
//! - a display name
//! - the encoded feature columns it was trained on, in order
//! - the model parameters (linear coefficients or a tree dump)
//!
//! Loading validates the structure up front so inference never has to deal
//! with dangling node references or mismatched parameter counts.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::models::linear::LinearModel;
use crate::models::tree::{Node, Tree, TreeEnsemble};
use crate::models::{LoadedModel, ModelKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub features: Vec<String>,
    pub model: ModelSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    TreeEnsemble {
        #[serde(default)]
        base_score: f64,
        trees: Vec<TreeSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Leaf {
        leaf: f64,
    },
    Split {
        split: String,
        threshold: f64,
        yes: usize,
        no: usize,
    },
}

impl ModelArtifact {
    /// Validate the artifact and build the in-memory model.
    pub fn build(self) -> Result<LoadedModel, String> {
        if self.features.is_empty() {
            return Err("artifact declares no features".to_string());
        }
        let n_features = self.features.len();

        let kind = match self.model {
            ModelSpec::Linear {
                intercept,
                coefficients,
            } => {
                if coefficients.len() != n_features {
                    return Err(format!(
                        "{} coefficients for {n_features} features",
                        coefficients.len()
                    ));
                }
                ModelKind::Linear(LinearModel::new(intercept, &coefficients)?)
            }
            ModelSpec::TreeEnsemble { base_score, trees } => {
                let mut built = Vec::with_capacity(trees.len());
                for (t, spec) in trees.into_iter().enumerate() {
                    let nodes = spec
                        .nodes
                        .into_iter()
                        .map(|n| resolve_node(n, &self.features))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|e| format!("tree {t}: {e}"))?;
                    built.push(Tree::new(nodes, n_features).map_err(|e| format!("tree {t}: {e}"))?);
                }
                ModelKind::Trees(TreeEnsemble::new(base_score, built, n_features)?)
            }
        };

        Ok(LoadedModel::new(self.name, self.features, kind))
    }
}

fn resolve_node(node: NodeSpec, features: &[String]) -> Result<Node, String> {
    match node {
        NodeSpec::Leaf { leaf } => Ok(Node::Leaf(leaf)),
        NodeSpec::Split {
            split,
            threshold,
            yes,
            no,
        } => {
            let feature = features
                .iter()
                .position(|f| *f == split)
                .ok_or_else(|| format!("split on undeclared feature '{split}'"))?;
            Ok(Node::Split {
                feature,
                threshold,
                yes,
                no,
            })
        }
    }
}

/// Parse and validate an artifact from a JSON string.
pub fn parse_model_json(json: &str) -> Result<LoadedModel, PredictError> {
    let artifact: ModelArtifact = serde_json::from_str(json)
        .map_err(|e| PredictError::ModelUnavailable(format!("invalid model JSON: {e}")))?;
    artifact.build().map_err(PredictError::ModelUnavailable)
}

/// Read and validate a model artifact file.
pub fn load_model(path: &Path) -> Result<LoadedModel, PredictError> {
    let file = File::open(path).map_err(|e| {
        PredictError::ModelUnavailable(format!(
            "failed to open model artifact '{}': {e}",
            path.display()
        ))
    })?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        PredictError::ModelUnavailable(format!(
            "invalid model artifact '{}': {e}",
            path.display()
        ))
    })?;
    artifact.build().map_err(|e| {
        PredictError::ModelUnavailable(format!(
            "invalid model artifact '{}': {e}",
            path.display()
        ))
    })
}
