//! Undirected graph utilities used for density-based splitting.
//!
//! # Example
//!
//! ```
//! use metacluster::core::Cluster;
//! use metacluster::functions::euclidean_distance;
//! use metacluster::graph::{connected_components, nearest_neighbor_graph, split_by_distance_threshold};
//!
//! let cluster = Cluster::from_parts(
//!     vec![0, 1, 2, 3],
//!     vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]],
//! )
//! .unwrap();
//!
//! let edges = nearest_neighbor_graph(&cluster, &euclidean_distance).unwrap();
//! let components = connected_components(&edges, &[0, 1, 2, 3]);
//! assert_eq!(components.len(), 2);
//!
//! let parts = split_by_distance_threshold(&cluster, &euclidean_distance, 0.5).unwrap();
//! assert_eq!(parts.len(), 4);
//! ```

pub mod components;
pub mod edge;
pub mod split;

pub use components::{connected_components, nearest_neighbor_graph};
pub use edge::Edge;
pub use split::split_by_distance_threshold;
