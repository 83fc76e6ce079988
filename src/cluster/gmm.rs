//! Gaussian Mixture Model for probabilistic clustering.
//!
//! Expectation-Maximization over a mixture of full-covariance Gaussians.
//! The pipeline initializes the fit from a K-Means hard labeling; the
//! estimator trait path runs its own K-Means first.

use super::KMeans;
use crate::error::{MezclaError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::UnsupervisedEstimator;
use serde::{Deserialize, Serialize};

/// Ridge added to covariance diagonals at every M-step.
const REG_COVAR: f32 = 1e-6;

/// Effective component weight below which the fit is declared collapsed.
const COLLAPSE_EPS: f32 = 1e-6;

/// Gaussian Mixture Model with full (unconstrained) covariance per
/// component.
///
/// # Algorithm
///
/// 1. Initialize responsibilities one-hot from a hard labeling
/// 2. **M-step**: update means, covariances, and mixing weights
/// 3. **E-step**: recompute responsibilities and the log-likelihood
/// 4. Repeat 2-3 until the log-likelihood stops improving
///
/// All densities are evaluated in log space through a Cholesky
/// factorization of each covariance; a covariance that fails to factor
/// aborts the fit instead of producing NaNs.
///
/// # Examples
///
/// ```
/// use mezcla::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     1.0, 1.0, 1.1, 1.0, 1.0, 1.1,
///     5.0, 5.0, 5.1, 5.0, 5.0, 5.1,
/// ]).expect("valid matrix dimensions and data length");
///
/// let mut gmm = GaussianMixture::new(2);
/// gmm.fit_from_labels(&data, &[0, 0, 0, 1, 1, 1]).expect("fit succeeds");
///
/// let proba = gmm.responsibilities();
/// assert_eq!(proba.shape(), (6, 2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianMixture {
    /// Number of mixture components.
    n_components: usize,
    /// Maximum number of EM iterations.
    max_iter: usize,
    /// Convergence tolerance on the mean log-likelihood.
    tol: f32,
    /// Random seed for the trait-path K-Means initialization.
    random_state: Option<u64>,
    /// Component means after fitting (k × d).
    means: Option<Matrix<f32>>,
    /// Component covariances after fitting (each d × d).
    covariances: Option<Vec<Matrix<f32>>>,
    /// Mixing weights after fitting (sums to 1).
    weights: Option<Vector<f32>>,
    /// Responsibility matrix for the training data (n × k).
    responsibilities: Option<Matrix<f32>>,
    /// Hard labels derived from the responsibility argmax.
    labels: Option<Vec<usize>>,
    /// Final mean log-likelihood.
    log_likelihood: f32,
    /// Number of EM iterations run.
    n_iter: usize,
    /// Whether the log-likelihood converged before `max_iter`.
    converged: bool,
}

impl GaussianMixture {
    /// Creates a new mixture with the specified number of components.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            max_iter: 100,
            tol: 1e-4,
            random_state: None,
            means: None,
            covariances: None,
            weights: None,
            responsibilities: None,
            labels: None,
            log_likelihood: f32::NEG_INFINITY,
            n_iter: 0,
            converged: false,
        }
    }

    /// Sets the maximum number of EM iterations.
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

    /// Sets the random seed for the internal K-Means initialization.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Returns the number of components.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.means.is_some()
    }

    /// Returns the component means.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn means(&self) -> &Matrix<f32> {
        self.means
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the per-component covariance matrices.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn covariances(&self) -> &[Matrix<f32>] {
        self.covariances
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the mixing weights.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn weights(&self) -> &Vector<f32> {
        self.weights
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the responsibility matrix for the training data.
    ///
    /// Rows are non-negative and sum to 1.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn responsibilities(&self) -> &Matrix<f32> {
        self.responsibilities
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the hard labels (responsibility argmax, ties to the first
    /// component).
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

    /// Returns the final mean log-likelihood of the training data.
    #[must_use]
    pub fn log_likelihood(&self) -> f32 {
        self.log_likelihood
    }

    /// Returns the number of EM iterations run.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if EM converged before the iteration cap.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Fits the mixture by EM, starting from a hard labeling.
    ///
    /// The labeling is converted to a one-hot responsibility matrix and an
    /// M-step derives the initial means, covariances, and weights from it.
    ///
    /// # Errors
    ///
    /// Returns [`MezclaError::InvalidParameter`] if the data is empty, has
    /// fewer samples than components, the labeling length doesn't match,
    /// a label is out of range, or some component receives no point; and
    /// [`MezclaError::SingularCovariance`] if a covariance degenerates
    /// during the fit.
    pub fn fit_from_labels(&mut self, x: &Matrix<f32>, labels: &[usize]) -> Result<()> {
        self.validate(x)?;
        let (n_samples, _) = x.shape();

        if labels.len() != n_samples {
            return Err(MezclaError::InvalidParameter {
                param: "labels".to_string(),
                value: labels.len().to_string(),
                constraint: format!("length equal to the sample count ({n_samples})"),
            });
        }
        let mut counts = vec![0usize; self.n_components];
        for (i, &label) in labels.iter().enumerate() {
            if label >= self.n_components {
                return Err(MezclaError::InvalidParameter {
                    param: format!("labels[{i}]"),
                    value: label.to_string(),
                    constraint: format!("less than n_components ({})", self.n_components),
                });
            }
            counts[label] += 1;
        }
        if let Some(empty) = counts.iter().position(|&c| c == 0) {
            return Err(MezclaError::InvalidParameter {
                param: "labels".to_string(),
                value: format!("component {empty} unused"),
                constraint: "at least one point per component".to_string(),
            });
        }

        // One-hot responsibilities seed the first M-step.
        let mut resp = Matrix::zeros(n_samples, self.n_components);
        for (i, &label) in labels.iter().enumerate() {
            resp.set(i, label, 1.0);
        }
        self.m_step(x, &resp)?;
        self.run_em(x)
    }

    fn validate(&self, x: &Matrix<f32>) -> Result<()> {
        if self.n_components == 0 {
            return Err(MezclaError::InvalidParameter {
                param: "n_components".to_string(),
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
        if n_samples < self.n_components {
            return Err(MezclaError::InvalidParameter {
                param: "n_components".to_string(),
                value: self.n_components.to_string(),
                constraint: format!("at most the sample count ({n_samples})"),
            });
        }
        Ok(())
    }

    /// EM loop over an already-initialized parameter set.
    fn run_em(&mut self, x: &Matrix<f32>) -> Result<()> {
        self.converged = false;
        let mut prev_log_likelihood = f32::NEG_INFINITY;

        for iter in 1..=self.max_iter {
            let (resp, log_likelihood) = self.e_step(x)?;
            self.m_step(x, &resp)?;
            self.n_iter = iter;

            if (log_likelihood - prev_log_likelihood).abs() < self.tol {
                self.converged = true;
                break;
            }
            prev_log_likelihood = log_likelihood;
        }

        // Responsibilities and labels under the final parameters.
        let (resp, log_likelihood) = self.e_step(x)?;
        self.log_likelihood = log_likelihood;
        self.labels = Some(argmax_rows(&resp));
        self.responsibilities = Some(resp);
        Ok(())
    }

    /// E-step: responsibilities and mean log-likelihood under the current
    /// parameters. Works in log space, normalizing rows by log-sum-exp.
    fn e_step(&self, x: &Matrix<f32>) -> Result<(Matrix<f32>, f32)> {
        let (n_samples, _) = x.shape();
        let means = self
            .means
            .as_ref()
            .expect("Parameters must be initialized before the E-step");
        let weights = self
            .weights
            .as_ref()
            .expect("Parameters must be initialized before the E-step");
        let covariances = self
            .covariances
            .as_ref()
            .expect("Parameters must be initialized before the E-step");

        // Factor every covariance up front; a failed factorization is the
        // degeneracy error.
        let mut factors = Vec::with_capacity(self.n_components);
        for (k, cov) in covariances.iter().enumerate() {
            match CholeskyFactor::new(cov) {
                Some(factor) => factors.push(factor),
                None => {
                    return Err(MezclaError::SingularCovariance {
                        component: k,
                        det: determinant_estimate(cov),
                    })
                }
            }
        }

        let mut resp = vec![0.0; n_samples * self.n_components];
        let mut total_log_likelihood = 0.0;
        let mut log_probs = vec![0.0; self.n_components];

        for i in 0..n_samples {
            let point = x.row_slice(i);

            for k in 0..self.n_components {
                let mean = means.row_slice(k);
                let log_weight = weights[k].max(f32::MIN_POSITIVE).ln();
                log_probs[k] = log_weight + factors[k].log_pdf(point, mean);
            }

            let max_lp = log_probs.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
            let sum_exp: f32 = log_probs.iter().map(|&lp| (lp - max_lp).exp()).sum();
            let log_norm = max_lp + sum_exp.ln();
            total_log_likelihood += log_norm;

            for k in 0..self.n_components {
                resp[i * self.n_components + k] = (log_probs[k] - log_norm).exp();
            }
        }

        let resp = Matrix::from_vec(n_samples, self.n_components, resp)
            .expect("responsibility count matches preallocated length");
        Ok((resp, total_log_likelihood / n_samples as f32))
    }

    /// M-step: re-estimate weights, means, and full covariances from the
    /// responsibilities.
    fn m_step(&mut self, x: &Matrix<f32>, resp: &Matrix<f32>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        let mut n_k = vec![0.0; self.n_components];
        for k in 0..self.n_components {
            for i in 0..n_samples {
                n_k[k] += resp.get(i, k);
            }
        }
        if let Some(collapsed) = n_k.iter().position(|&nk| nk < COLLAPSE_EPS) {
            return Err(MezclaError::SingularCovariance {
                component: collapsed,
                det: 0.0,
            });
        }

        let mut new_weights = vec![0.0; self.n_components];
        for k in 0..self.n_components {
            new_weights[k] = n_k[k] / n_samples as f32;
        }

        let mut new_means = vec![0.0; self.n_components * n_features];
        for k in 0..self.n_components {
            for j in 0..n_features {
                let mut weighted_sum = 0.0;
                for i in 0..n_samples {
                    weighted_sum += resp.get(i, k) * x.get(i, j);
                }
                new_means[k * n_features + j] = weighted_sum / n_k[k];
            }
        }
        let new_means = Matrix::from_vec(self.n_components, n_features, new_means)
            .expect("mean count matches preallocated length");

        let mut new_covariances = Vec::with_capacity(self.n_components);
        let mut diff = vec![0.0; n_features];
        for k in 0..self.n_components {
            let mean = new_means.row_slice(k);
            let mut cov_data = vec![0.0; n_features * n_features];

            for i in 0..n_samples {
                let r = resp.get(i, k);
                let point = x.row_slice(i);
                for (j, d) in diff.iter_mut().enumerate() {
                    *d = point[j] - mean[j];
                }
                for a in 0..n_features {
                    for b in 0..n_features {
                        cov_data[a * n_features + b] += r * diff[a] * diff[b];
                    }
                }
            }
            for v in cov_data.iter_mut() {
                *v /= n_k[k];
            }
            for j in 0..n_features {
                cov_data[j * n_features + j] += REG_COVAR;
            }

            new_covariances.push(
                Matrix::from_vec(n_features, n_features, cov_data)
                    .expect("covariance count matches preallocated length"),
            );
        }

        self.weights = Some(Vector::from_vec(new_weights));
        self.means = Some(new_means);
        self.covariances = Some(new_covariances);
        Ok(())
    }
}

impl UnsupervisedEstimator for GaussianMixture {
    type Labels = Vec<usize>;

    /// Fits the mixture, initializing from an internal K-Means run.
    ///
    /// # Errors
    ///
    /// Returns the K-Means validation errors, or
    /// [`MezclaError::SingularCovariance`] if a covariance degenerates.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()> {
        let mut kmeans = KMeans::new(self.n_components);
        if let Some(seed) = self.random_state {
            kmeans = kmeans.with_random_state(seed);
        }
        kmeans.fit(x)?;

        let labels = kmeans.labels().to_vec();
        self.fit_from_labels(x, &labels)
    }

    /// Predicts component labels for data.
    fn predict(&self, x: &Matrix<f32>) -> Vec<usize> {
        assert!(self.is_fitted(), "Model not fitted. Call fit() first.");
        let (resp, _) = self
            .e_step(x)
            .expect("covariances were validated during fit");
        argmax_rows(&resp)
    }
}

/// Row-wise argmax; ties break to the first component.
fn argmax_rows(resp: &Matrix<f32>) -> Vec<usize> {
    let (n_samples, n_components) = resp.shape();
    let mut labels = vec![0; n_samples];
    for (i, label) in labels.iter_mut().enumerate() {
        let mut max_prob = -1.0;
        for k in 0..n_components {
            let prob = resp.get(i, k);
            if prob > max_prob {
                max_prob = prob;
                *label = k;
            }
        }
    }
    labels
}

/// Lower-triangular Cholesky factor of a covariance matrix, with the
/// derived log-determinant.
struct CholeskyFactor {
    lower: Vec<f32>,
    log_det: f32,
    dim: usize,
}

impl CholeskyFactor {
    /// Factors a symmetric positive-definite matrix; `None` if a pivot is
    /// not positive.
    fn new(cov: &Matrix<f32>) -> Option<Self> {
        let (dim, cols) = cov.shape();
        debug_assert_eq!(dim, cols, "covariance must be square");

        let mut lower = vec![0.0_f32; dim * dim];
        let mut log_det = 0.0;

        for j in 0..dim {
            let mut pivot = cov.get(j, j);
            for t in 0..j {
                pivot -= lower[j * dim + t] * lower[j * dim + t];
            }
            if pivot <= 0.0 || !pivot.is_finite() {
                return None;
            }
            let l_jj = pivot.sqrt();
            lower[j * dim + j] = l_jj;
            log_det += 2.0 * l_jj.ln();

            for i in (j + 1)..dim {
                let mut value = cov.get(i, j);
                for t in 0..j {
                    value -= lower[i * dim + t] * lower[j * dim + t];
                }
                lower[i * dim + j] = value / l_jj;
            }
        }

        Some(Self {
            lower,
            log_det,
            dim,
        })
    }

    /// Log-density of a multivariate normal at `point`.
    fn log_pdf(&self, point: &[f32], mean: &[f32]) -> f32 {
        let dim = self.dim;

        // Forward-substitute L y = (point - mean); Mahalanobis = |y|^2.
        let mut y = vec![0.0_f32; dim];
        for i in 0..dim {
            let mut value = point[i] - mean[i];
            for t in 0..i {
                value -= self.lower[i * dim + t] * y[t];
            }
            y[i] = value / self.lower[i * dim + i];
        }
        let mahalanobis: f32 = y.iter().map(|&v| v * v).sum();

        -0.5 * (dim as f32 * (2.0 * std::f32::consts::PI).ln() + self.log_det + mahalanobis)
    }
}

/// Determinant estimate for diagnostics on a factorization failure.
fn determinant_estimate(cov: &Matrix<f32>) -> f64 {
    let (dim, _) = cov.shape();
    if dim == 2 {
        return f64::from(cov.get(0, 0)) * f64::from(cov.get(1, 1))
            - f64::from(cov.get(0, 1)) * f64::from(cov.get(1, 0));
    }
    // Fall back to the diagonal product for higher dimensions.
    (0..dim).map(|j| f64::from(cov.get(j, j))).product()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blob_data() -> Matrix<f32> {
        Matrix::from_vec(
            8,
            2,
            vec![
                0.0, 0.0, 0.1, 0.1, 0.2, 0.0, 0.0, 0.2, 5.0, 5.0, 5.1, 5.1, 5.2, 5.0, 5.0, 5.2,
            ],
        )
        .unwrap()
    }

    fn two_blob_labels() -> Vec<usize> {
        vec![0, 0, 0, 0, 1, 1, 1, 1]
    }

    #[test]
    fn test_new() {
        let gmm = GaussianMixture::new(3);
        assert_eq!(gmm.n_components(), 3);
        assert!(!gmm.is_fitted());
    }

    #[test]
    fn test_fit_from_labels_basic() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        gmm.fit_from_labels(&data, &two_blob_labels()).unwrap();

        assert!(gmm.is_fitted());
        assert_eq!(gmm.means().shape(), (2, 2));
        assert_eq!(gmm.covariances().len(), 2);
        assert_eq!(gmm.covariances()[0].shape(), (2, 2));
        assert_eq!(gmm.labels().len(), 8);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        gmm.fit_from_labels(&data, &two_blob_labels()).unwrap();

        let sum: f32 = gmm.weights().as_slice().iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_responsibility_rows_sum_to_one() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        gmm.fit_from_labels(&data, &two_blob_labels()).unwrap();

        let resp = gmm.responsibilities();
        let (n, k) = resp.shape();
        assert_eq!((n, k), (8, 2));
        for i in 0..n {
            let mut row_sum = 0.0;
            for j in 0..k {
                let p = resp.get(i, j);
                assert!(p >= 0.0);
                row_sum += p;
            }
            assert!((row_sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_separated_blobs_stay_separated() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        gmm.fit_from_labels(&data, &two_blob_labels()).unwrap();

        let labels = gmm.labels();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[4], labels[5]);
        assert_eq!(labels[5], labels[6]);
        assert_ne!(labels[0], labels[4]);
    }

    #[test]
    fn test_means_near_blob_centers() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        gmm.fit_from_labels(&data, &two_blob_labels()).unwrap();

        let means = gmm.means();
        let mut centers: Vec<(f32, f32)> = (0..2).map(|k| (means.get(k, 0), means.get(k, 1))).collect();
        centers.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        assert!((centers[0].0 - 0.075).abs() < 0.5);
        assert!((centers[1].0 - 5.075).abs() < 0.5);
    }

    #[test]
    fn test_determinism() {
        let data = two_blob_data();

        let mut gmm1 = GaussianMixture::new(2);
        gmm1.fit_from_labels(&data, &two_blob_labels()).unwrap();
        let mut gmm2 = GaussianMixture::new(2);
        gmm2.fit_from_labels(&data, &two_blob_labels()).unwrap();

        assert_eq!(gmm1.labels(), gmm2.labels());
        let m1 = gmm1.means();
        let m2 = gmm2.means();
        for k in 0..2 {
            for j in 0..2 {
                assert!((m1.get(k, j) - m2.get(k, j)).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn test_trait_fit_with_kmeans_init() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2).with_random_state(42);
        gmm.fit(&data).unwrap();

        assert!(gmm.is_fitted());
        let labels = gmm.predict(&data);
        assert_eq!(labels.len(), 8);
        assert_ne!(labels[0], labels[4]);
    }

    #[test]
    fn test_label_length_mismatch_rejected() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        let err = gmm.fit_from_labels(&data, &[0, 1]).unwrap_err();
        assert!(matches!(err, MezclaError::InvalidParameter { .. }));
    }

    #[test]
    fn test_out_of_range_label_rejected() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        let labels = vec![0, 0, 0, 0, 1, 1, 1, 9];
        assert!(gmm.fit_from_labels(&data, &labels).is_err());
    }

    #[test]
    fn test_unused_component_rejected() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        let labels = vec![0; 8];
        assert!(gmm.fit_from_labels(&data, &labels).is_err());
    }

    #[test]
    fn test_more_components_than_samples_rejected() {
        let data = Matrix::from_vec(2, 2, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        let mut gmm = GaussianMixture::new(5);
        assert!(matches!(
            gmm.fit_from_labels(&data, &[0, 1]),
            Err(MezclaError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_log_likelihood_is_finite() {
        let data = two_blob_data();
        let mut gmm = GaussianMixture::new(2);
        gmm.fit_from_labels(&data, &two_blob_labels()).unwrap();
        assert!(gmm.log_likelihood().is_finite());
        assert!(gmm.n_iter() >= 1);
    }

    #[test]
    fn test_cholesky_identity() {
        let factor = CholeskyFactor::new(&Matrix::eye(2)).unwrap();
        assert!(factor.log_det.abs() < 1e-6);

        // Standard normal density at the mean: 1 / (2 pi).
        let lp = factor.log_pdf(&[0.0, 0.0], &[0.0, 0.0]);
        let expected = -(2.0 * std::f32::consts::PI).ln();
        assert!((lp - expected).abs() < 1e-5);
    }

    #[test]
    fn test_cholesky_rejects_non_positive_definite() {
        let cov = Matrix::from_vec(2, 2, vec![1.0, 2.0, 2.0, 1.0]).unwrap();
        assert!(CholeskyFactor::new(&cov).is_none());
    }

    #[test]
    fn test_cholesky_full_covariance() {
        // Correlated covariance: [[2, 0.6], [0.6, 1]].
        let cov = Matrix::from_vec(2, 2, vec![2.0, 0.6, 0.6, 1.0]).unwrap();
        let factor = CholeskyFactor::new(&cov).unwrap();
        let det = 2.0 * 1.0 - 0.6 * 0.6;
        assert!((factor.log_det - (det as f32).ln()).abs() < 1e-5);
    }

    #[test]
    fn test_argmax_ties_break_first() {
        let resp = Matrix::from_vec(1, 3, vec![0.4, 0.4, 0.2]).unwrap();
        assert_eq!(argmax_rows(&resp), vec![0]);
    }
}
