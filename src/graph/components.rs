//! Nearest-neighbor graph construction and connected components.

use super::edge::Edge;
use crate::algorithm::DistanceMetric;
use crate::core::Cluster;
use crate::error::Result;
use std::collections::{HashMap, HashSet};

/// Build the nearest-neighbor graph over the local indexes of `cluster`.
///
/// Every vertex contributes one edge to its closest other vertex; ties go to the
/// lowest local index. Mutual nearest neighbors collapse into a single edge, so
/// the result never has more edges than the cluster has points.
pub fn nearest_neighbor_graph(cluster: &Cluster, distance: &dyn DistanceMetric) -> Result<Vec<Edge>> {
    let n = cluster.len();
    let mut edges = Vec::with_capacity(n);
    let mut seen = HashSet::with_capacity(n);

    for i in 0..n {
        let point = cluster.element(i)?;
        let mut nearest: Option<(usize, f64)> = None;

        for j in 0..n {
            if i == j {
                continue;
            }
            let dist = distance.distance(point, cluster.element(j)?)?;
            match nearest {
                Some((_, best)) if dist >= best => {}
                _ => nearest = Some((j, dist)),
            }
        }

        if let Some((j, dist)) = nearest {
            let edge = Edge::new(dist, i, j);
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }

    Ok(edges)
}

/// Partition `vertices` into connected components of the graph given by `edges`.
///
/// Components are returned in the order their first vertex appears in
/// `vertices`; inside a component vertexes are listed in depth-first order.
/// Vertexes without incident edges form singleton components. Edges touching a
/// vertex outside `vertices` are ignored.
pub fn connected_components(edges: &[Edge], vertices: &[usize]) -> Vec<Vec<usize>> {
    let known: HashSet<usize> = vertices.iter().copied().collect();
    let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
    for edge in edges {
        if !known.contains(&edge.v1()) || !known.contains(&edge.v2()) {
            continue;
        }
        let (first, last) = edge.key();
        for vertex in std::iter::once(first).chain((first != last).then_some(last)) {
            if let Some(next) = edge.other_side(vertex) {
                adjacency.entry(vertex).or_default().push(next);
            }
        }
    }

    let mut visited: HashSet<usize> = HashSet::with_capacity(vertices.len());
    let mut components = Vec::new();

    for &seed in vertices {
        if !visited.insert(seed) {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![seed];

        while let Some(vertex) = stack.pop() {
            component.push(vertex);
            if let Some(neighbors) = adjacency.get(&vertex) {
                // reversed so the first listed neighbor is explored first
                for &next in neighbors.iter().rev() {
                    if visited.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }

        components.push(component);
    }

    components
}
