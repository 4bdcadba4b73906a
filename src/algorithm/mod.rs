//! The clustering orchestrator and the strategy traits it is assembled from.
//!
//! # Example
//!
//! ```
//! use metacluster::algorithm::{ClusterAlgorithm, ProcessConfig};
//! use metacluster::core::Cluster;
//! use metacluster::functions::MeanCenter;
//!
//! let data = Cluster::from_parts(
//!     vec![0, 1, 2, 3],
//!     vec![
//!         vec![0.0, 0.0],
//!         vec![0.0, 1.0],
//!         vec![10.0, 0.0],
//!         vec![10.0, 1.0],
//!     ],
//! )
//! .unwrap();
//!
//! let algorithm = ClusterAlgorithm::builder().center(MeanCenter).build();
//! let config = ProcessConfig::default().target_cluster_count(2).seed(42);
//! let clusters = algorithm.process(&data, &config).unwrap();
//!
//! assert_eq!(clusters.len(), 2);
//! ```

pub mod config;
pub mod orchestrator;
pub mod traits;

pub use config::ProcessConfig;
pub use orchestrator::{ClusterAlgorithm, ClusterAlgorithmBuilder};
pub use traits::{
    CenterEstimator, ClusterAffinity, ClusterComparator, ClusterSplitter, DistanceMetric,
    PointAffinity, SpaceConverter,
};
