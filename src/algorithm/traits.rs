//! Strategy traits consumed by the clustering orchestrator.
//!
//! Each role is a small object-safe trait. Every trait is implemented for plain
//! functions and closures of the matching shape, so a strategy can be a unit
//! struct, a configured struct, or a `fn` item.

use crate::core::Cluster;
use crate::error::Result;

/// Distance between two points of the same space.
pub trait DistanceMetric: Send + Sync {
    /// Symmetric, non-negative distance. Fails on dimension mismatch.
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}

impl<F> DistanceMetric for F
where
    F: Fn(&[f64], &[f64]) -> Result<f64> + Send + Sync,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        self(a, b)
    }
}

/// Estimates the center point of a cluster.
pub trait CenterEstimator: Send + Sync {
    /// Returns a point with the cluster's dimensionality.
    fn center(&self, cluster: &Cluster, distance: &dyn DistanceMetric, params: &[f64])
        -> Result<Vec<f64>>;
}

impl<F> CenterEstimator for F
where
    F: Fn(&Cluster, &dyn DistanceMetric, &[f64]) -> Result<Vec<f64>> + Send + Sync,
{
    fn center(
        &self,
        cluster: &Cluster,
        distance: &dyn DistanceMetric,
        params: &[f64],
    ) -> Result<Vec<f64>> {
        self(cluster, distance, params)
    }
}

/// Maps the raw input space into the working feature space.
pub trait SpaceConverter: Send + Sync {
    /// May change dimensionality but must keep every global index.
    fn convert(&self, distance: &dyn DistanceMetric, data: &Cluster, params: &[f64])
        -> Result<Cluster>;
}

impl<F> SpaceConverter for F
where
    F: Fn(&dyn DistanceMetric, &Cluster, &[f64]) -> Result<Cluster> + Send + Sync,
{
    fn convert(
        &self,
        distance: &dyn DistanceMetric,
        data: &Cluster,
        params: &[f64],
    ) -> Result<Cluster> {
        self(distance, data, params)
    }
}

/// Point-level "same cluster" affinity, in `[0, 1]`.
pub trait PointAffinity: Send + Sync {
    fn same_cluster(
        &self,
        a: &Cluster,
        b: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
    ) -> Result<f32>;
}

impl<F> PointAffinity for F
where
    F: Fn(&Cluster, &Cluster, &dyn DistanceMetric, &dyn CenterEstimator, &[f64]) -> Result<f32>
        + Send
        + Sync,
{
    fn same_cluster(
        &self,
        a: &Cluster,
        b: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
    ) -> Result<f32> {
        self(a, b, distance, center, center_params)
    }
}

/// Cluster fusion affinity. A positive value means the clusters may be fused.
pub trait ClusterAffinity: Send + Sync {
    fn similarity(
        &self,
        a: &Cluster,
        b: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
    ) -> Result<f32>;
}

impl<F> ClusterAffinity for F
where
    F: Fn(&Cluster, &Cluster, &dyn DistanceMetric, &dyn CenterEstimator, &[f64]) -> Result<f32>
        + Send
        + Sync,
{
    fn similarity(
        &self,
        a: &Cluster,
        b: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
    ) -> Result<f32> {
        self(a, b, distance, center, center_params)
    }
}

/// Divides a cluster into sub-clusters.
///
/// An empty result or a single cluster means "no split".
pub trait ClusterSplitter: Send + Sync {
    fn split(
        &self,
        cluster: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
        split_params: &[f64],
    ) -> Result<Vec<Cluster>>;

    /// Whether this splitter never divides anything; lets the orchestrator
    /// skip the split phase.
    fn is_trivial(&self) -> bool {
        false
    }
}

impl<F> ClusterSplitter for F
where
    F: Fn(&Cluster, &dyn DistanceMetric, &dyn CenterEstimator, &[f64], &[f64]) -> Result<Vec<Cluster>>
        + Send
        + Sync,
{
    fn split(
        &self,
        cluster: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
        split_params: &[f64],
    ) -> Result<Vec<Cluster>> {
        self(cluster, distance, center, center_params, split_params)
    }
}

/// Orders clusters: `> 0` if `a` is greater, `< 0` if lesser, `0` if equal.
pub trait ClusterComparator: Send + Sync {
    fn compare(
        &self,
        a: &Cluster,
        b: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
    ) -> Result<f32>;
}

impl<F> ClusterComparator for F
where
    F: Fn(&Cluster, &Cluster, &dyn DistanceMetric, &dyn CenterEstimator, &[f64]) -> Result<f32>
        + Send
        + Sync,
{
    fn compare(
        &self,
        a: &Cluster,
        b: &Cluster,
        distance: &dyn DistanceMetric,
        center: &dyn CenterEstimator,
        center_params: &[f64],
    ) -> Result<f32> {
        self(a, b, distance, center, center_params)
    }
}
