//! # metacluster
//!
//! Generic meta-clustering engine.
//!
//! A [`ClusterAlgorithm`](algorithm::ClusterAlgorithm) is assembled from
//! pluggable strategies (distances, space conversion, center estimation,
//! affinities, splitting) and drives an iterative sample, pair, fuse and split
//! loop over a [`Cluster`](core::Cluster) of points. Ready-made configurations
//! live in [`presets`]; the strategies they use live in [`functions`].

#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]

pub mod algorithm;
pub mod core;
pub mod error;
pub mod functions;
pub mod graph;
pub mod presets;
pub mod utils;

pub use error::{ClusterError, Result};

pub mod prelude {
    pub use crate::algorithm::{
        CenterEstimator, ClusterAffinity, ClusterAlgorithm, ClusterAlgorithmBuilder,
        ClusterComparator, ClusterSplitter, DistanceMetric, PointAffinity, ProcessConfig,
        SpaceConverter,
    };
    pub use crate::core::Cluster;
    pub use crate::error::{ClusterError, Result};
}
