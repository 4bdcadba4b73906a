//! Cluster comparison functions.

use crate::algorithm::{CenterEstimator, DistanceMetric};
use crate::core::Cluster;
use crate::error::Result;

/// Orders clusters by member count.
pub fn compare_by_size(
    a: &Cluster,
    b: &Cluster,
    _distance: &dyn DistanceMetric,
    _center: &dyn CenterEstimator,
    _center_params: &[f64],
) -> Result<f32> {
    Ok(a.len() as f32 - b.len() as f32)
}
