//! Mezcla: hard vs. soft cluster assignment on synthetic blobs.
//!
//! The crate samples a fixed five-blob point cloud, clusters it twice
//! (K-Means for a hard partition, a full-covariance Gaussian mixture
//! seeded from that partition for soft posteriors), then finds three
//! points on which the two assignments disagree and renders the
//! comparison.
//!
//! # Quick Start
//!
//! ```
//! use mezcla::prelude::*;
//! use mezcla::synthetic::{default_blobs, generate_blobs};
//!
//! let data = generate_blobs(&default_blobs(), 42).unwrap();
//! assert_eq!(data.shape(), (230, 2));
//!
//! let mut kmeans = KMeans::new(N_CLUSTERS).with_random_state(42);
//! kmeans.fit(&data).unwrap();
//!
//! let mut gmm = GaussianMixture::new(N_CLUSTERS);
//! gmm.fit_from_labels(&data, kmeans.labels()).unwrap();
//! assert_eq!(gmm.responsibilities().shape(), (230, N_CLUSTERS));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`synthetic`]: Gaussian-blob data generation
//! - [`cluster`]: K-Means and Gaussian mixture estimators
//! - [`select`]: Demonstration-point selection
//! - [`report`]: Console report rendering
//! - [`plot`]: Side-by-side scatter rendering

pub mod cluster;
pub mod error;
pub mod plot;
pub mod prelude;
pub mod primitives;
pub mod report;
pub mod select;
pub mod synthetic;
pub mod traits;

/// Cluster count used by both models.
pub const N_CLUSTERS: usize = 5;
