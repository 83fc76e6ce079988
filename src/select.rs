//! Example-point selection.
//!
//! Scans the joint assignment table for a mixture cluster whose members
//! came from at least three different K-means clusters, then picks one
//! representative per hard cluster. Those points are the demonstration
//! that hard and soft assignment genuinely disagree.

use crate::error::{MezclaError, Result};
use serde::{Deserialize, Serialize};

/// Number of example points a demonstration needs.
pub const EXAMPLE_COUNT: usize = 3;

/// One selected point: its dataset index and its hard label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePoint {
    /// 0-based index into the dataset.
    pub index: usize,
    /// K-means cluster of the point.
    pub hard_label: usize,
}

/// Three points sharing one mixture cluster but spanning three distinct
/// K-means clusters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSet {
    /// The mixture (GMM) cluster all three points share.
    pub mixture_cluster: usize,
    /// The selected points, in dataset-index order.
    pub points: [ExamplePoint; EXAMPLE_COUNT],
}

/// Finds the demonstration cluster and its example points.
///
/// Mixture clusters are visited in id order; within the first cluster that
/// spans at least [`EXAMPLE_COUNT`] distinct hard labels, the first index
/// carrying each previously-unseen hard label is picked, and the first
/// three picks win.
///
/// # Errors
///
/// Returns [`MezclaError::InvalidParameter`] on mismatched label lengths
/// or out-of-range labels, and [`MezclaError::NoExampleFound`] (carrying
/// the widest span actually seen) when no mixture cluster qualifies.
///
/// # Examples
///
/// ```
/// use mezcla::select::find_example_set;
///
/// let hard = [0, 1, 2, 2, 1];
/// let soft = [0, 0, 0, 1, 1];
/// let set = find_example_set(&hard, &soft, 3).unwrap();
/// assert_eq!(set.mixture_cluster, 0);
/// assert_eq!(set.points.map(|p| p.index), [0, 1, 2]);
/// ```
pub fn find_example_set(
    hard: &[usize],
    soft: &[usize],
    n_clusters: usize,
) -> Result<ExampleSet> {
    if hard.len() != soft.len() {
        return Err(MezclaError::InvalidParameter {
            param: "soft".to_string(),
            value: soft.len().to_string(),
            constraint: format!("length equal to the hard labeling ({})", hard.len()),
        });
    }
    for (name, labels) in [("hard", hard), ("soft", soft)] {
        if let Some((i, &label)) = labels.iter().enumerate().find(|(_, &l)| l >= n_clusters) {
            return Err(MezclaError::InvalidParameter {
                param: format!("{name}[{i}]"),
                value: label.to_string(),
                constraint: format!("less than n_clusters ({n_clusters})"),
            });
        }
    }

    let mut best_span = 0;
    for cluster in 0..n_clusters {
        let mut picks: Vec<ExamplePoint> = Vec::with_capacity(EXAMPLE_COUNT);

        for (index, (&h, &s)) in hard.iter().zip(soft.iter()).enumerate() {
            if s != cluster {
                continue;
            }
            if picks.iter().any(|p| p.hard_label == h) {
                continue;
            }
            picks.push(ExamplePoint {
                index,
                hard_label: h,
            });
            if picks.len() == EXAMPLE_COUNT {
                return Ok(ExampleSet {
                    mixture_cluster: cluster,
                    points: [picks[0], picks[1], picks[2]],
                });
            }
        }

        best_span = best_span.max(picks.len());
    }

    Err(MezclaError::NoExampleFound {
        required: EXAMPLE_COUNT,
        best: best_span,
    })
}
