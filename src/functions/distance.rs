//! Distance metrics for raw and density feature spaces.

use crate::error::{ClusterError, Result};

/// Number of features produced by the density conversion.
pub const DENSITY_FEATURES: usize = 4;

fn check_same_len(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(ClusterError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(())
}

/// Euclidean (L2) distance between two points.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_same_len(a, b)?;

    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt())
}

/// Manhattan (L1) distance between two points.
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_same_len(a, b)?;

    Ok(a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum())
}

/// Distance between two density feature vectors `[mean, std, median, variance]`.
///
/// Sums half of how far the mean gap exceeds each point's std, the median gap,
/// and the square root of the variance gap.
pub fn density_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    for v in [a, b] {
        if v.len() != DENSITY_FEATURES {
            return Err(ClusterError::DimensionMismatch {
                expected: DENSITY_FEATURES,
                got: v.len(),
            });
        }
    }

    let mean_gap = (a[0] - b[0]).abs();
    let excess: f64 = [a[1], b[1]]
        .iter()
        .filter(|&&std| mean_gap > std)
        .map(|&std| mean_gap - std)
        .sum();

    Ok(excess / 2.0 + (a[2] - b[2]).abs() + (a[3] - b[3]).abs().sqrt())
}
