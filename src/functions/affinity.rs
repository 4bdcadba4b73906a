//! Brute-force affinity functions between clusters.

use crate::algorithm::{CenterEstimator, DistanceMetric};
use crate::core::Cluster;
use crate::error::Result;

/// Largest distance from `center` to any member of `cluster`.
pub fn radius(cluster: &Cluster, center: &[f64], distance: &dyn DistanceMetric) -> Result<f64> {
    let mut max = 0.0_f64;
    for (_, point) in cluster.iter() {
        max = max.max(distance.distance(point, center)?);
    }
    Ok(max)
}

fn share_within(cluster: &Cluster, center: &[f64], reach: f64, distance: &dyn DistanceMetric) -> Result<f32> {
    let mut inside = 0usize;
    for (_, point) in cluster.iter() {
        if distance.distance(point, center)? < reach {
            inside += 1;
        }
    }
    Ok(inside as f32 / cluster.len() as f32)
}

/// Point-level affinity in `[0, 1]`.
///
/// The share of `a`'s points that lie closer to `b`'s center than `a`'s own
/// radius, multiplied by the same share computed the other way around.
pub fn same_cluster_brute(
    a: &Cluster,
    b: &Cluster,
    distance: &dyn DistanceMetric,
    center: &dyn CenterEstimator,
    center_params: &[f64],
) -> Result<f32> {
    let center_a = center.center(a, distance, center_params)?;
    let center_b = center.center(b, distance, center_params)?;
    let radius_a = radius(a, &center_a, distance)?;
    let radius_b = radius(b, &center_b, distance)?;

    let share_a = share_within(a, &center_b, radius_a, distance)?;
    let share_b = share_within(b, &center_a, radius_b, distance)?;
    Ok(share_a * share_b)
}

/// Fusion affinity: `1` when the centers are closer than the mean radius,
/// otherwise mean radius over center distance.
pub fn similar_clusters_brute(
    a: &Cluster,
    b: &Cluster,
    distance: &dyn DistanceMetric,
    center: &dyn CenterEstimator,
    center_params: &[f64],
) -> Result<f32> {
    let center_a = center.center(a, distance, center_params)?;
    let center_b = center.center(b, distance, center_params)?;
    let mean_radius = (radius(a, &center_a, distance)? + radius(b, &center_b, distance)?) / 2.0;
    let center_gap = distance.distance(&center_a, &center_b)?;

    if center_gap < mean_radius {
        Ok(1.0)
    } else {
        Ok(mean_radius as f32 / center_gap as f32)
    }
}
