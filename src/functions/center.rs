//! Cluster center estimators.

use crate::algorithm::{CenterEstimator, DistanceMetric};
use crate::core::Cluster;
use crate::error::{ClusterError, Result};
use crate::utils::stats::column_means;

/// Coordinate-wise mean of all members.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanCenter;

impl CenterEstimator for MeanCenter {
    fn center(&self, cluster: &Cluster, _distance: &dyn DistanceMetric, _params: &[f64]) -> Result<Vec<f64>> {
        if cluster.is_empty() {
            return Err(ClusterError::EmptyData);
        }
        Ok(column_means(cluster.iter().map(|(_, v)| v), cluster.dimensions()))
    }
}

/// The member closest to the coordinate-wise mean.
///
/// Always returns an actual point of the cluster; ties go to the lowest local index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMedoidCenter;

impl CenterEstimator for MeanMedoidCenter {
    fn center(&self, cluster: &Cluster, distance: &dyn DistanceMetric, params: &[f64]) -> Result<Vec<f64>> {
        let mean = MeanCenter.center(cluster, distance, params)?;

        let mut best: Option<(&[f64], f64)> = None;
        for (_, point) in cluster.iter() {
            let dist = distance.distance(&mean, point)?;
            match best {
                Some((_, min)) if dist >= min => {}
                _ => best = Some((point, dist)),
            }
        }

        best.map(|(p, _)| p.to_vec()).ok_or(ClusterError::EmptyData)
    }
}
