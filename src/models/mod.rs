//! Trained regression models.
//!
//! The prediction service only needs two capabilities from a model: the list of
//! encoded columns it was trained on, and inference on one numeric row. Those
//! live behind [`Regressor`] so the service can be handed any implementation
//! (a loaded artifact in production, a stub in tests).

pub mod artifact;
pub mod linear;
pub mod tree;

pub use artifact::{ModelArtifact, ModelSpec, NodeSpec, TreeSpec, load_model, parse_model_json};
pub use linear::LinearModel;
pub use tree::{Node, Tree, TreeEnsemble};

use crate::error::PredictError;

/// A read-only trained model.
pub trait Regressor: Send + Sync {
    /// Encoded column names in trained order.
    fn feature_names(&self) -> &[String];

    /// Raw model output for one row aligned with `feature_names`.
    fn infer(&self, row: &[f64]) -> Result<f64, PredictError>;

    fn describe(&self) -> ModelInfo;
}

/// Summary used by `inspect` and the TUI header.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub kind: &'static str,
    pub features: Vec<String>,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub enum ModelKind {
    Linear(LinearModel),
    Trees(TreeEnsemble),
}

/// A model built from a validated artifact.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    name: String,
    features: Vec<String>,
    kind: ModelKind,
}

impl LoadedModel {
    pub fn new(name: String, features: Vec<String>, kind: ModelKind) -> Self {
        Self {
            name,
            features,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Regressor for LoadedModel {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn infer(&self, row: &[f64]) -> Result<f64, PredictError> {
        match &self.kind {
            ModelKind::Linear(m) => m.predict(row),
            ModelKind::Trees(m) => m.predict(row),
        }
    }

    fn describe(&self) -> ModelInfo {
        let (kind, detail) = match &self.kind {
            ModelKind::Linear(m) => ("linear", format!("{} coefficients", m.n_coefficients())),
            ModelKind::Trees(m) => (
                "tree_ensemble",
                format!("{} trees, {} nodes", m.n_trees(), m.n_nodes()),
            ),
        };
        ModelInfo {
            name: self.name.clone(),
            kind,
            features: self.features.clone(),
            detail,
        }
    }
}
