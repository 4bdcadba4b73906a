//! Density-based splitting on the pruned nearest-neighbor graph.

use super::components::{connected_components, nearest_neighbor_graph};
use crate::algorithm::DistanceMetric;
use crate::core::Cluster;
use crate::error::Result;

/// Split `cluster` into the connected components of its nearest-neighbor graph
/// after dropping every edge longer than `threshold`.
///
/// Sub-clusters keep the global indexes and vectors of their members.
pub fn split_by_distance_threshold(
    cluster: &Cluster,
    distance: &dyn DistanceMetric,
    threshold: f64,
) -> Result<Vec<Cluster>> {
    let edges: Vec<_> = nearest_neighbor_graph(cluster, distance)?
        .into_iter()
        .filter(|e| e.distance() <= threshold)
        .collect();
    let vertices: Vec<usize> = (0..cluster.len()).collect();

    connected_components(&edges, &vertices)
        .into_iter()
        .map(|component| {
            let mut sub = Cluster::new(cluster.dimensions());
            for local in component {
                sub.add_element(cluster.element(local)?.to_vec(), cluster.global_index(local)?)?;
            }
            Ok(sub)
        })
        .collect()
}
