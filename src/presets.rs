//! Ready-made algorithm configurations.
//!
//! Each preset is a plain [`ClusterAlgorithm`], so the builder remains the one
//! place where strategies are chosen.

use crate::algorithm::{ClusterAlgorithm, ClusterAlgorithmBuilder};
use crate::functions::{
    density_distance, euclidean_distance, DensityConversion, DistanceThresholdSplit,
    IdentityConversion,
};

/// Centroid-style clustering that only merges.
///
/// Euclidean distance, identity conversion, brute-force affinities and no split.
/// Pair with a `target_cluster_count`.
pub fn kmeans_like() -> ClusterAlgorithm {
    ClusterAlgorithmBuilder::default().build()
}

/// Clustering on local density.
///
/// Points are rewritten as statistics of their neighborhood
/// (`conversion_params = [k, alpha]`) and compared with [`density_distance`];
/// clusters are split along the nearest-neighbor graph
/// (`split_params = [threshold]`).
pub fn density() -> ClusterAlgorithm {
    ClusterAlgorithm::builder()
        .input_distance(euclidean_distance)
        .working_distance(density_distance)
        .converter(DensityConversion)
        .splitter(DistanceThresholdSplit)
        .build()
}

/// Merge then split along the nearest-neighbor graph
/// (`split_params = [threshold]`), in the raw space.
pub fn hierarchical() -> ClusterAlgorithm {
    ClusterAlgorithm::builder()
        .distance(euclidean_distance)
        .converter(IdentityConversion)
        .splitter(DistanceThresholdSplit)
        .build()
}
