//! Core data structures.

mod cluster;

pub use cluster::Cluster;
