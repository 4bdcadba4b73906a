//! Concrete strategy implementations.
//!
//! Distances, centers, space conversions, affinities, splits and comparisons
//! that the presets wire into [`ClusterAlgorithm`](crate::algorithm::ClusterAlgorithm).

pub mod affinity;
pub mod center;
pub mod compare;
pub mod conversion;
pub mod distance;
pub mod split;

pub use affinity::{radius, same_cluster_brute, similar_clusters_brute};
pub use center::{MeanCenter, MeanMedoidCenter};
pub use compare::compare_by_size;
pub use conversion::{DensityConversion, IdentityConversion};
pub use distance::{density_distance, euclidean_distance, manhattan_distance, DENSITY_FEATURES};
pub use split::{DistanceThresholdSplit, TrivialSplit};
