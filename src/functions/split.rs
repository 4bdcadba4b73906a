//! Cluster split strategies.

use crate::algorithm::{CenterEstimator, ClusterSplitter, DistanceMetric};
use crate::core::Cluster;
use crate::error::{ClusterError, Result};
use crate::graph::split_by_distance_threshold;

/// Never splits: returns the cluster unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrivialSplit;

impl ClusterSplitter for TrivialSplit {
    fn split(
        &self,
        cluster: &Cluster,
        _distance: &dyn DistanceMetric,
        _center: &dyn CenterEstimator,
        _center_params: &[f64],
        _split_params: &[f64],
    ) -> Result<Vec<Cluster>> {
        Ok(vec![cluster.clone()])
    }

    fn is_trivial(&self) -> bool {
        true
    }
}

/// Splits along the pruned nearest-neighbor graph.
///
/// `split_params[0]` is the longest edge kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceThresholdSplit;

impl ClusterSplitter for DistanceThresholdSplit {
    fn split(
        &self,
        cluster: &Cluster,
        distance: &dyn DistanceMetric,
        _center: &dyn CenterEstimator,
        _center_params: &[f64],
        split_params: &[f64],
    ) -> Result<Vec<Cluster>> {
        let threshold = split_params.first().copied().ok_or_else(|| {
            ClusterError::InvalidArgument("threshold split expects [threshold]".to_string())
        })?;
        split_by_distance_threshold(cluster, distance, threshold)
    }
}
