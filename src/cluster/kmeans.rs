//! K-Means clustering algorithm.
//!
//! Lloyd's algorithm with multiple random restarts; the restart with the
//! lowest inertia wins.

use crate::error::{MezclaError, Result};
use crate::primitives::Matrix;
use crate::traits::UnsupervisedEstimator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// K-Means clustering algorithm.
///
/// Runs Lloyd's algorithm from several random center placements and keeps
/// the run with the lowest within-cluster sum of squared distances.
///
/// # Algorithm
///
/// 1. Pick `n_clusters` distinct data points as initial centroids
/// 2. Assign each sample to its nearest centroid
/// 3. Update centroids as the mean of assigned samples
/// 4. Repeat until convergence or max iterations
/// 5. Repeat 1-4 `n_init` times, keep the lowest-inertia run
///
/// # Examples
///
/// ```
/// use mezcla::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     1.0, 2.0,
///     1.5, 1.8,
///     5.0, 8.0,
///     8.0, 8.0,
///     1.0, 0.6,
///     9.0, 11.0,
/// ]).expect("valid matrix dimensions and data length");
///
/// let mut kmeans = KMeans::new(2).with_random_state(42);
/// kmeans.fit(&data).expect("fit succeeds with valid data");
///
/// let labels = kmeans.predict(&data);
/// assert_eq!(labels.len(), 6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeans {
    /// Number of clusters.
    n_clusters: usize,
    /// Number of random restarts.
    n_init: usize,
    /// Maximum Lloyd iterations per restart.
    max_iter: usize,
    /// Convergence tolerance on centroid movement.
    tol: f32,
    /// Random seed for initialization.
    random_state: Option<u64>,
    /// Cluster centroids after fitting.
    centroids: Option<Matrix<f32>>,
    /// Labels for training data.
    labels: Option<Vec<usize>>,
    /// Sum of squared distances (inertia) of the winning restart.
    inertia: f32,
    /// Number of iterations the winning restart ran.
    n_iter: usize,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(8)
    }
}

impl KMeans {
    /// Creates a new K-Means with the specified number of clusters.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
            random_state: None,
            centroids: None,
            labels: None,
            inertia: 0.0,
            n_iter: 0,
        }
    }

    /// Sets the number of random restarts.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Sets the maximum number of iterations per restart.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Returns the cluster centroids.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn centroids(&self) -> &Matrix<f32> {
        self.centroids
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the training labels of the winning restart.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        self.labels
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the inertia (within-cluster sum of squares).
    #[must_use]
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Returns the number of iterations the winning restart ran.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    fn validate(&self, x: &Matrix<f32>) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(MezclaError::InvalidParameter {
                param: "n_clusters".to_string(),
                value: "0".to_string(),
                constraint: "at least 1".to_string(),
            });
        }
        if self.n_init == 0 {
            return Err(MezclaError::InvalidParameter {
                param: "n_init".to_string(),
                value: "0".to_string(),
                constraint: "at least 1".to_string(),
            });
        }
        let (n_samples, n_features) = x.shape();
        if n_samples == 0 || n_features == 0 {
            return Err(MezclaError::InvalidParameter {
                param: "x".to_string(),
                value: format!("{n_samples}x{n_features}"),
                constraint: "at least one sample and one feature".to_string(),
            });
        }
        if n_samples < self.n_clusters {
            return Err(MezclaError::InvalidParameter {
                param: "n_clusters".to_string(),
                value: self.n_clusters.to_string(),
                constraint: format!("at most the sample count ({n_samples})"),
            });
        }
        Ok(())
    }

    /// Picks `n_clusters` distinct data points as initial centroids.
    fn random_init(&self, x: &Matrix<f32>, rng: &mut StdRng) -> Matrix<f32> {
        let (n_samples, n_features) = x.shape();
        let chosen = rand::seq::index::sample(rng, n_samples, self.n_clusters);

        let mut centroids_data = Vec::with_capacity(self.n_clusters * n_features);
        for idx in chosen.iter() {
            centroids_data.extend_from_slice(x.row_slice(idx));
        }
        Matrix::from_vec(self.n_clusters, n_features, centroids_data)
            .expect("centroid count matches preallocated length")
    }

    /// Assigns each sample to the nearest centroid.
    fn assign_labels(&self, x: &Matrix<f32>, centroids: &Matrix<f32>) -> Vec<usize> {
        let n_samples = x.n_rows();
        let mut labels = vec![0; n_samples];

        for (i, label) in labels.iter_mut().enumerate() {
            let point = x.row(i);
            let mut min_dist = f32::INFINITY;
            let mut min_cluster = 0;

            for k in 0..self.n_clusters {
                let centroid = centroids.row(k);
                let dist = (&point - &centroid).norm_squared();

                if dist < min_dist {
                    min_dist = dist;
                    min_cluster = k;
                }
            }

            *label = min_cluster;
        }

        labels
    }

    /// Updates centroids as the mean of assigned samples.
    ///
    /// Returns `None` if any cluster lost all of its samples, which voids
    /// the whole restart.
    fn update_centroids(&self, x: &Matrix<f32>, labels: &[usize]) -> Option<Matrix<f32>> {
        let (_, n_features) = x.shape();
        let mut new_centroids = vec![0.0; self.n_clusters * n_features];
        let mut counts = vec![0usize; self.n_clusters];

        for (i, &label) in labels.iter().enumerate() {
            counts[label] += 1;
            for j in 0..n_features {
                new_centroids[label * n_features + j] += x.get(i, j);
            }
        }

        if counts.iter().any(|&c| c == 0) {
            return None;
        }

        for k in 0..self.n_clusters {
            for j in 0..n_features {
                new_centroids[k * n_features + j] /= counts[k] as f32;
            }
        }

        Some(
            Matrix::from_vec(self.n_clusters, n_features, new_centroids)
                .expect("centroid count matches preallocated length"),
        )
    }

    /// Checks if centroids have converged.
    fn centroids_converged(&self, old: &Matrix<f32>, new: &Matrix<f32>) -> bool {
        let (n_clusters, n_features) = old.shape();

        for k in 0..n_clusters {
            let mut dist_sq = 0.0;
            for j in 0..n_features {
                let diff = old.get(k, j) - new.get(k, j);
                dist_sq += diff * diff;
            }
            if dist_sq > self.tol * self.tol {
                return false;
            }
        }

        true
    }

    /// Within-cluster sum of squared distances.
    fn compute_inertia(&self, x: &Matrix<f32>, centroids: &Matrix<f32>, labels: &[usize]) -> f32 {
        let mut total = 0.0;
        for (i, &label) in labels.iter().enumerate() {
            let point = x.row(i);
            let centroid = centroids.row(label);
            total += (&point - &centroid).norm_squared();
        }
        total
    }

    /// Runs Lloyd's algorithm once from the given centroids.
    ///
    /// Returns `(centroids, labels, inertia, n_iter)`, or `None` if a
    /// cluster emptied out.
    fn lloyd(
        &self,
        x: &Matrix<f32>,
        mut centroids: Matrix<f32>,
    ) -> Option<(Matrix<f32>, Vec<usize>, f32, usize)> {
        let mut labels = vec![0; x.n_rows()];
        let mut n_iter = 0;

        for iter in 0..self.max_iter {
            labels = self.assign_labels(x, &centroids);
            let new_centroids = self.update_centroids(x, &labels)?;
            n_iter = iter + 1;

            if self.centroids_converged(&centroids, &new_centroids) {
                centroids = new_centroids;
                break;
            }
            centroids = new_centroids;
        }

        let inertia = self.compute_inertia(x, &centroids, &labels);
        Some((centroids, labels, inertia, n_iter))
    }
}

impl UnsupervisedEstimator for KMeans {
    type Labels = Vec<usize>;

    /// Fits the K-Means model to data.
    ///
    /// # Errors
    ///
    /// Returns [`MezclaError::InvalidParameter`] for empty data, zero
    /// clusters/restarts, or more clusters than samples, and
    /// [`MezclaError::DegenerateClustering`] if every restart produced an
    /// empty cluster.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()> {
        self.validate(x)?;

        let seed = self.random_state.unwrap_or(42);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut best: Option<(Matrix<f32>, Vec<usize>, f32, usize)> = None;
        for _restart in 0..self.n_init {
            let init = self.random_init(x, &mut rng);
            let Some(run) = self.lloyd(x, init) else {
                continue;
            };
            let better = match &best {
                Some((_, _, best_inertia, _)) => run.2 < *best_inertia,
                None => true,
            };
            if better {
                best = Some(run);
            }
        }

        let Some((centroids, labels, inertia, n_iter)) = best else {
            return Err(MezclaError::DegenerateClustering {
                restarts: self.n_init,
            });
        };

        self.centroids = Some(centroids);
        self.labels = Some(labels);
        self.inertia = inertia;
        self.n_iter = n_iter;
        Ok(())
    }

    /// Predicts cluster labels for new data.
    fn predict(&self, x: &Matrix<f32>) -> Vec<usize> {
        let centroids = self
            .centroids
            .as_ref()
            .expect("Model not fitted. Call fit() first.");

        self.assign_labels(x, centroids)
    }
}
