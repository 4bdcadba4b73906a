//! Undirected weighted edge.

use std::hash::{Hash, Hasher};

/// Undirected edge between two local vertex indexes.
///
/// Two edges are equal when they connect the same unordered pair of vertexes.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    v1: usize,
    v2: usize,
    distance: f64,
}

impl Edge {
    pub fn new(distance: f64, v1: usize, v2: usize) -> Self {
        Self { v1, v2, distance }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn v1(&self) -> usize {
        self.v1
    }

    pub fn v2(&self) -> usize {
        self.v2
    }

    /// Whether `vertex` is one of the endpoints.
    pub fn contains(&self, vertex: usize) -> bool {
        self.v1 == vertex || self.v2 == vertex
    }

    /// The endpoint opposite to `vertex`, or `None` if `vertex` is not on this edge.
    pub fn other_side(&self, vertex: usize) -> Option<usize> {
        if vertex == self.v1 {
            Some(self.v2)
        } else if vertex == self.v2 {
            Some(self.v1)
        } else {
            None
        }
    }

    /// Endpoints ordered as `(min, max)`.
    pub fn key(&self) -> (usize, usize) {
        (self.v1.min(self.v2), self.v1.max(self.v2))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
