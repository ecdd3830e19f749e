//! Gradient-boosted regression trees.
//!
//! Each tree is a flat node array rooted at index 0. A split sends the row to
//! `yes` when `row[feature] < threshold` and to `no` otherwise; the ensemble
//! output is `base_score + Σ leaf(tree)`.
//!
//! Child indices always point forward, which is checked when the tree is built,
//! so walking a tree terminates in at most `nodes.len()` steps.

use crate::error::PredictError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    n_features: usize,
}

impl Tree {
    pub fn new(nodes: Vec<Node>, n_features: usize) -> Result<Self, String> {
        if nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in nodes.iter().enumerate() {
            match *node {
                Node::Leaf(v) if !v.is_finite() => {
                    return Err(format!("node {idx}: non-finite leaf value"));
                }
                Node::Leaf(_) => {}
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    if feature >= n_features {
                        return Err(format!("node {idx}: feature index {feature} out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx}: non-finite threshold"));
                    }
                    for child in [yes, no] {
                        if child <= idx || child >= nodes.len() {
                            return Err(format!("node {idx}: child {child} is not a later node"));
                        }
                    }
                }
            }
        }
        Ok(Self { nodes, n_features })
    }

    /// Row width the split indices were checked against.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk the tree for `row`; `None` when the row is too short for a split.
    pub fn evaluate(&self, row: &[f64]) -> Option<f64> {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(v) => return Some(v),
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    idx = if *row.get(feature)? < threshold { yes } else { no };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    base_score: f64,
    trees: Vec<Tree>,
    n_features: usize,
}

impl TreeEnsemble {
    pub fn new(base_score: f64, trees: Vec<Tree>, n_features: usize) -> Result<Self, String> {
        if !base_score.is_finite() {
            return Err("non-finite base score".to_string());
        }
        if trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if let Some((i, t)) = trees.iter().enumerate().find(|(_, t)| t.n_features != n_features) {
            return Err(format!(
                "tree {i} built for {} features, ensemble has {n_features}",
                t.n_features
            ));
        }
        Ok(Self {
            base_score,
            trees,
            n_features,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_nodes(&self) -> usize {
        self.trees.iter().map(Tree::len).sum()
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64, PredictError> {
        if row.len() != self.n_features {
            return Err(PredictError::InferenceError(format!(
                "tree ensemble expects {} features, got {}",
                self.n_features,
                row.len()
            )));
        }
        let mut total = self.base_score;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(row).ok_or_else(|| {
                PredictError::InferenceError(format!("tree {i} split on a feature outside the row"))
            })?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Vec<Node> {
        vec![
            Node::Split {
                feature,
                threshold,
                yes: 1,
                no: 2,
            },
            Node::Leaf(left),
            Node::Leaf(right),
        ]
    }

    #[test]
    fn split_goes_yes_below_threshold() {
        let tree = Tree::new(stump(0, 0.5, -1.0, 1.0), 1).unwrap();
        assert_eq!(tree.evaluate(&[0.0]), Some(-1.0));
        assert_eq!(tree.evaluate(&[0.5]), Some(1.0));
        assert_eq!(tree.evaluate(&[]), None);
    }

    #[test]
    fn ensemble_sums_trees_and_base() {
        let trees = vec![
            Tree::new(stump(0, 10.0, 1.0, 2.0), 2).unwrap(),
            Tree::new(stump(1, 0.5, 10.0, 20.0), 2).unwrap(),
        ];
        let ens = TreeEnsemble::new(100.0, trees, 2).unwrap();
        assert_eq!(ens.predict(&[5.0, 1.0]).unwrap(), 121.0);
        assert_eq!(ens.n_nodes(), 6);
    }

    #[test]
    fn backward_child_is_rejected() {
        let nodes = vec![
            Node::Leaf(0.0),
            Node::Split {
                feature: 0,
                threshold: 1.0,
                yes: 0,
                no: 0,
            },
        ];
        assert!(Tree::new(nodes, 1).is_err());
    }

    #[test]
    fn feature_out_of_range_is_rejected() {
        assert!(Tree::new(stump(3, 0.5, 0.0, 0.0), 2).is_err());
    }

    #[test]
    fn ensemble_rejects_trees_of_another_width() {
        let wide = Tree::new(stump(3, 0.5, 0.0, 1.0), 5).unwrap();
        assert_eq!(wide.n_features(), 5);
        let err = TreeEnsemble::new(0.0, vec![wide], 2).unwrap_err();
        assert!(err.contains("tree 0 built for 5 features"), "{err}");

        let narrow = Tree::new(stump(0, 0.5, 0.0, 1.0), 1).unwrap();
        assert!(TreeEnsemble::new(0.0, vec![narrow], 2).is_err());
    }
}
