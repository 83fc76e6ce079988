//! Synthetic Gaussian-blob data generation.
//!
//! Produces the point cloud the pipeline clusters: a handful of isotropic
//! Gaussian blobs, sampled in group order with a seeded generator so the
//! whole run is reproducible.

use crate::error::{MezclaError, Result};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Specification for one Gaussian blob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlobSpec {
    /// Number of points to draw.
    pub n_samples: usize,
    /// Blob center (x1, x2).
    pub center: (f32, f32),
    /// Per-axis standard deviation.
    pub std_dev: f32,
}

impl BlobSpec {
    /// Creates a new blob specification.
    #[must_use]
    pub fn new(n_samples: usize, center: (f32, f32), std_dev: f32) -> Self {
        Self {
            n_samples,
            center,
            std_dev,
        }
    }

    fn validate(&self, idx: usize) -> Result<()> {
        if self.n_samples == 0 {
            return Err(MezclaError::InvalidParameter {
                param: format!("blobs[{idx}].n_samples"),
                value: "0".to_string(),
                constraint: "at least 1".to_string(),
            });
        }
        if !self.center.0.is_finite() || !self.center.1.is_finite() {
            return Err(MezclaError::InvalidParameter {
                param: format!("blobs[{idx}].center"),
                value: format!("({}, {})", self.center.0, self.center.1),
                constraint: "finite coordinates".to_string(),
            });
        }
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(MezclaError::InvalidParameter {
                param: format!("blobs[{idx}].std_dev"),
                value: self.std_dev.to_string(),
                constraint: "positive and finite".to_string(),
            });
        }
        Ok(())
    }
}

/// The documented default configuration: one broad central blob with four
/// tight satellites sitting inside it (230 points total).
#[must_use]
pub fn default_blobs() -> Vec<BlobSpec> {
    vec![
        BlobSpec::new(150, (0.0, 0.0), 2.0),
        BlobSpec::new(20, (1.5, 1.5), 0.3),
        BlobSpec::new(20, (-1.5, 1.5), 0.3),
        BlobSpec::new(20, (-1.5, -1.5), 0.3),
        BlobSpec::new(20, (1.5, -1.5), 0.3),
    ]
}

/// Samples all blobs in group order into one N×2 dataset.
///
/// Row order is generation order and is never reshuffled; downstream
/// labelings index into it.
///
/// # Errors
///
/// Returns [`MezclaError::InvalidParameter`] if the spec list is empty or
/// any blob has a zero count, non-finite center, or non-positive deviation.
/// All validation happens before the first sample is drawn.
///
/// # Examples
///
/// ```
/// use mezcla::synthetic::{generate_blobs, BlobSpec};
///
/// let specs = [
///     BlobSpec::new(10, (0.0, 0.0), 1.0),
///     BlobSpec::new(5, (4.0, 4.0), 0.5),
/// ];
/// let data = generate_blobs(&specs, 42).unwrap();
/// assert_eq!(data.shape(), (15, 2));
/// ```
pub fn generate_blobs(specs: &[BlobSpec], seed: u64) -> Result<Matrix<f32>> {
    if specs.is_empty() {
        return Err(MezclaError::InvalidParameter {
            param: "blobs".to_string(),
            value: "[]".to_string(),
            constraint: "at least one blob".to_string(),
        });
    }
    for (idx, spec) in specs.iter().enumerate() {
        spec.validate(idx)?;
    }

    let n_total: usize = specs.iter().map(|s| s.n_samples).sum();
    let mut data = Vec::with_capacity(n_total * 2);
    let mut rng = StdRng::seed_from_u64(seed);

    for spec in specs {
        // Validation above guarantees a legal deviation.
        let dist_x = Normal::new(spec.center.0, spec.std_dev)
            .expect("validated standard deviation");
        let dist_y = Normal::new(spec.center.1, spec.std_dev)
            .expect("validated standard deviation");
        for _ in 0..spec.n_samples {
            data.push(dist_x.sample(&mut rng));
            data.push(dist_y.sample(&mut rng));
        }
    }

    Ok(Matrix::from_vec(n_total, 2, data)
        .expect("sample count matches preallocated length"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blobs_total() {
        let specs = default_blobs();
        let total: usize = specs.iter().map(|s| s.n_samples).sum();
        assert_eq!(total, 230);
        assert_eq!(specs.len(), 5);
    }

    #[test]
    fn test_generate_shape() {
        let data = generate_blobs(&default_blobs(), 42).unwrap();
        assert_eq!(data.shape(), (230, 2));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate_blobs(&default_blobs(), 42).unwrap();
        let b = generate_blobs(&default_blobs(), 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_blobs(&default_blobs(), 42).unwrap();
        let b = generate_blobs(&default_blobs(), 43).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_group_order_is_preserved() {
        // Widely separated blobs: each group's rows must hug its center.
        let specs = [
            BlobSpec::new(10, (0.0, 0.0), 0.1),
            BlobSpec::new(10, (100.0, 100.0), 0.1),
        ];
        let data = generate_blobs(&specs, 7).unwrap();
        for i in 0..10 {
            assert!(data.get(i, 0).abs() < 5.0);
        }
        for i in 10..20 {
            assert!((data.get(i, 0) - 100.0).abs() < 5.0);
        }
    }

    #[test]
    fn test_zero_count_rejected() {
        let specs = [BlobSpec::new(0, (0.0, 0.0), 1.0)];
        let err = generate_blobs(&specs, 42).unwrap_err();
        assert!(matches!(err, MezclaError::InvalidParameter { .. }));
    }

    #[test]
    fn test_nonfinite_center_rejected() {
        let specs = [BlobSpec::new(5, (f32::NAN, 0.0), 1.0)];
        assert!(generate_blobs(&specs, 42).is_err());
    }

    #[test]
    fn test_nonpositive_std_dev_rejected() {
        let specs = [BlobSpec::new(5, (0.0, 0.0), 0.0)];
        assert!(generate_blobs(&specs, 42).is_err());
        let specs = [BlobSpec::new(5, (0.0, 0.0), -1.0)];
        assert!(generate_blobs(&specs, 42).is_err());
    }

    #[test]
    fn test_empty_spec_list_rejected() {
        assert!(generate_blobs(&[], 42).is_err());
    }

    #[test]
    fn test_samples_spread_around_center() {
        let specs = [BlobSpec::new(200, (3.0, -2.0), 0.5)];
        let data = generate_blobs(&specs, 42).unwrap();
        let n = data.n_rows() as f32;
        let mean_x: f32 = (0..data.n_rows()).map(|i| data.get(i, 0)).sum::<f32>() / n;
        let mean_y: f32 = (0..data.n_rows()).map(|i| data.get(i, 1)).sum::<f32>() / n;
        assert!((mean_x - 3.0).abs() < 0.2);
        assert!((mean_y + 2.0).abs() < 0.2);
    }
}
