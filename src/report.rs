//! Console report rendering.
//!
//! Pure formatting: turns the example points and their assignments into a
//! printable block. Nothing here mutates or recomputes upstream results.

use crate::primitives::Matrix;
use crate::select::ExampleSet;
use std::fmt::Write;

const SEPARATOR: &str =
    "══════════════════════════════════════════════════════════════════";

/// Renders the demonstration report.
///
/// For each example point: 1-based dataset index, coordinates, 1-based
/// K-means and GMM cluster ids, and the full posterior vector with the
/// assigned component in brackets.
///
/// # Panics
///
/// Panics if an example index is out of range for `data`, `hard`, or
/// `responsibilities`; the selector guarantees they are in range.
#[must_use]
pub fn render_report(
    data: &Matrix<f32>,
    hard: &[usize],
    responsibilities: &Matrix<f32>,
    examples: &ExampleSet,
) -> String {
    let mut out = String::new();
    let (_, n_components) = responsibilities.shape();

    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "  Hard vs. soft assignment: K-means and GMM disagree");
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(
        out,
        "GMM cluster {} contains points from {} different K-means clusters.",
        examples.mixture_cluster + 1,
        examples.points.len()
    );
    let _ = writeln!(out);

    for point in &examples.points {
        let i = point.index;
        let _ = writeln!(
            out,
            "Point #{}: (x1, x2) = ({:.4}, {:.4})",
            i + 1,
            data.get(i, 0),
            data.get(i, 1)
        );
        let _ = writeln!(out, "  K-means cluster: {}", hard[i] + 1);
        let _ = writeln!(out, "  GMM cluster:     {}", examples.mixture_cluster + 1);

        let _ = write!(out, "  GMM posteriors: ");
        for k in 0..n_components {
            let p = responsibilities.get(i, k);
            if k == examples.mixture_cluster {
                let _ = write!(out, " [{p:.4}]");
            } else {
                let _ = write!(out, "  {p:.4} ");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{SEPARATOR}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{ExamplePoint, ExampleSet};

    fn fixture() -> (Matrix<f32>, Vec<usize>, Matrix<f32>, ExampleSet) {
        let data = Matrix::from_vec(
            4,
            2,
            vec![0.5, -1.25, 2.0, 3.0, -4.0, 0.0, 1.0, 1.0],
        )
        .unwrap();
        let hard = vec![0, 1, 2, 0];
        let resp = Matrix::from_vec(
            4,
            3,
            vec![
                0.7, 0.2, 0.1, //
                0.6, 0.3, 0.1, //
                0.8, 0.1, 0.1, //
                0.1, 0.1, 0.8,
            ],
        )
        .unwrap();
        let examples = ExampleSet {
            mixture_cluster: 0,
            points: [
                ExamplePoint {
                    index: 0,
                    hard_label: 0,
                },
                ExamplePoint {
                    index: 1,
                    hard_label: 1,
                },
                ExamplePoint {
                    index: 2,
                    hard_label: 2,
                },
            ],
        };
        (data, hard, resp, examples)
    }

    #[test]
    fn test_report_lists_all_three_points() {
        let (data, hard, resp, examples) = fixture();
        let report = render_report(&data, &hard, &resp, &examples);

        assert!(report.contains("Point #1:"));
        assert!(report.contains("Point #2:"));
        assert!(report.contains("Point #3:"));
    }

    #[test]
    fn test_report_is_one_based() {
        let (data, hard, resp, examples) = fixture();
        let report = render_report(&data, &hard, &resp, &examples);

        // Hard label 2 of point #3 renders as cluster 3.
        assert!(report.contains("K-means cluster: 3"));
        assert!(report.contains("GMM cluster:     1"));
    }

    #[test]
    fn test_report_shows_coordinates() {
        let (data, hard, resp, examples) = fixture();
        let report = render_report(&data, &hard, &resp, &examples);
        assert!(report.contains("(0.5000, -1.2500)"));
    }

    #[test]
    fn test_assigned_posterior_is_bracketed() {
        let (data, hard, resp, examples) = fixture();
        let report = render_report(&data, &hard, &resp, &examples);
        assert!(report.contains("[0.7000]"));
        assert!(!report.contains("[0.2000]"));
    }

    #[test]
    fn test_report_has_separators() {
        let (data, hard, resp, examples) = fixture();
        let report = render_report(&data, &hard, &resp, &examples);
        assert!(report.matches(SEPARATOR).count() >= 3);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let (data, hard, resp, examples) = fixture();
        let data_before = data.clone();
        let resp_before = resp.clone();
        let _ = render_report(&data, &hard, &resp, &examples);
        assert_eq!(data, data_before);
        assert_eq!(resp, resp_before);
    }
}
