//! Clustering algorithms.
//!
//! K-Means for hard assignment and a full-covariance Gaussian mixture for
//! soft assignment, behind the same estimator trait.

mod gmm;
mod kmeans;

pub use gmm::GaussianMixture;
pub use kmeans::KMeans;
