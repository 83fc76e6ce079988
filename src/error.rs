//! Error types for mezcla operations.
//!
//! Every failure the pipeline can hit is a variant here, so callers can
//! tell a bad configuration from a numerical breakdown from a dataset that
//! simply has nothing to demonstrate.

use std::fmt;

/// Main error type for mezcla operations.
///
/// # Examples
///
/// ```
/// use mezcla::error::MezclaError;
///
/// let err = MezclaError::InvalidParameter {
///     param: "std_dev".to_string(),
///     value: "-1".to_string(),
///     constraint: "positive and finite".to_string(),
/// };
/// assert!(err.to_string().contains("std_dev"));
/// ```
#[derive(Debug)]
pub enum MezclaError {
    /// Invalid configuration value, rejected before any computation.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Every K-means restart produced an empty cluster.
    DegenerateClustering {
        /// Number of restarts attempted
        restarts: usize,
    },

    /// A mixture component's covariance became singular during EM.
    SingularCovariance {
        /// Component index (0-based)
        component: usize,
        /// Determinant estimate (close to or below zero)
        det: f64,
    },

    /// No mixture cluster spans enough distinct hard clusters.
    NoExampleFound {
        /// Distinct hard labels a cluster must span
        required: usize,
        /// Best span seen across all mixture clusters
        best: usize,
    },

    /// I/O error while writing the output artifact.
    Io(std::io::Error),

    /// Plotting backend error.
    Render(String),
}

impl fmt::Display for MezclaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MezclaError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            MezclaError::DegenerateClustering { restarts } => {
                write!(
                    f,
                    "Clustering degenerated: all {restarts} restarts produced an empty cluster"
                )
            }
            MezclaError::SingularCovariance { component, det } => {
                write!(
                    f,
                    "Singular covariance in mixture component {component}: determinant = {det}"
                )
            }
            MezclaError::NoExampleFound { required, best } => {
                write!(
                    f,
                    "No demonstrative example found: no mixture cluster spans {required} \
                     distinct K-means clusters (best span: {best})"
                )
            }
            MezclaError::Io(e) => write!(f, "I/O error: {e}"),
            MezclaError::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for MezclaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MezclaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MezclaError {
    fn from(err: std::io::Error) -> Self {
        MezclaError::Io(err)
    }
}

/// Result type alias for mezcla operations.
pub type Result<T> = std::result::Result<T, MezclaError>;
