//! Depth-limited regression trees fit by exact greedy splitting.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// A node in the tree arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    /// Terminal node carrying a predicted value
    Leaf {
        /// Mean of the training targets routed to this leaf
        value: f64,
    },
    /// Internal split: rows with `feature <= threshold` go left
    Split {
        /// Index of the split feature
        feature: usize,
        /// Split threshold (midpoint between adjacent training values)
        threshold: f64,
        /// Arena index of the left child
        left: usize,
        /// Arena index of the right child
        right: usize,
    },
}

/// A fitted regression tree.
///
/// Nodes live in a flat arena; children are built before their parent, so
/// the root is always the last node pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    root: usize,
}

/// Candidate split chosen by the greedy search.
struct BestSplit {
    feature: usize,
    threshold: f64,
    sse: f64,
}

fn subset_mean(y: &Array1<f64>, rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|&r| y[r]).sum::<f64>() / rows.len() as f64
}

/// Greedy exact search over all features and thresholds, minimizing the
/// summed squared error of the two children.
fn best_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    rows: &[usize],
    min_samples_leaf: usize,
) -> Option<BestSplit> {
    let n = rows.len();
    if n < 2 * min_samples_leaf {
        return None;
    }

    let total_sum: f64 = rows.iter().map(|&r| y[r]).sum();
    let total_sq: f64 = rows.iter().map(|&r| y[r] * y[r]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n as f64;

    let mut best: Option<BestSplit> = None;

    for feature in 0..x.ncols() {
        let mut order = rows.to_vec();
        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for i in 1..n {
            let prev = order[i - 1];
            left_sum += y[prev];
            left_sq += y[prev] * y[prev];

            // No threshold fits between equal feature values
            if x[[prev, feature]] == x[[order[i], feature]] {
                continue;
            }
            if i < min_samples_leaf || n - i < min_samples_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let left_n = i as f64;
            let right_n = (n - i) as f64;

            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().is_none_or(|b| sse < b.sse) {
                best = Some(BestSplit {
                    feature,
                    threshold: (x[[prev, feature]] + x[[order[i], feature]]) / 2.0,
                    sse,
                });
            }
        }
    }

    // Require a strict improvement over leaving the node unsplit
    best.filter(|b| b.sse < parent_sse - 1e-12)
}

impl RegressionTree {
    /// Fit a tree to the given targets.
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<f64>,
        max_depth: usize,
        min_samples_leaf: usize,
    ) -> Self {
        let rows: Vec<usize> = (0..x.nrows()).collect();
        let mut nodes = Vec::new();
        let root = build(&mut nodes, x, y, rows, 0, max_depth, min_samples_leaf);
        Self { nodes, root }
    }

    /// Predict a single feature row.
    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut index = self.root;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is a bare leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

fn build(
    nodes: &mut Vec<Node>,
    x: &Array2<f64>,
    y: &Array1<f64>,
    rows: Vec<usize>,
    depth: usize,
    max_depth: usize,
    min_samples_leaf: usize,
) -> usize {
    let leaf = |nodes: &mut Vec<Node>, rows: &[usize]| {
        nodes.push(Node::Leaf {
            value: subset_mean(y, rows),
        });
        nodes.len() - 1
    };

    if depth >= max_depth {
        return leaf(nodes, &rows);
    }

    let Some(split) = best_split(x, y, &rows, min_samples_leaf) else {
        return leaf(nodes, &rows);
    };

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
        .into_iter()
        .partition(|&r| x[[r, split.feature]] <= split.threshold);

    let left = build(nodes, x, y, left_rows, depth + 1, max_depth, min_samples_leaf);
    let right = build(nodes, x, y, right_rows, depth + 1, max_depth, min_samples_leaf);

    nodes.push(Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    });
    nodes.len() - 1
}
