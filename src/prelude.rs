//! Convenience re-exports for common usage.

pub use crate::cluster::{GaussianMixture, KMeans};
pub use crate::error::{MezclaError, Result};
pub use crate::primitives::{Matrix, Vector};
pub use crate::select::{ExamplePoint, ExampleSet};
pub use crate::synthetic::BlobSpec;
pub use crate::traits::UnsupervisedEstimator;
pub use crate::N_CLUSTERS;
