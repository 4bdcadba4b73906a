//! Cluster data structure: an indexed set of equally sized vectors.

use crate::error::{ClusterError, Result};

/// A set of points with stable global indexes.
///
/// Every element is a vector of `dimensions` values paired with the global index
/// it had in the root dataset. The local index of an element is its position in
/// this cluster and changes as elements are removed; the global index never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    dimensions: usize,
    indexes: Vec<usize>,
    data: Vec<Vec<f64>>,
}

impl Cluster {
    /// Create an empty cluster for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            indexes: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Create a cluster from parallel arrays of global indexes and vectors.
    ///
    /// The dimensionality is taken from the first vector.
    pub fn from_parts(indexes: Vec<usize>, vectors: Vec<Vec<f64>>) -> Result<Self> {
        if indexes.len() != vectors.len() {
            return Err(ClusterError::DimensionMismatch {
                expected: indexes.len(),
                got: vectors.len(),
            });
        }
        let dimensions = match vectors.first() {
            Some(first) => first.len(),
            None => return Err(ClusterError::EmptyData),
        };
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimensions) {
            return Err(ClusterError::DimensionMismatch {
                expected: dimensions,
                got: bad.len(),
            });
        }

        Ok(Self {
            dimensions,
            indexes,
            data: vectors,
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Length of every vector in this cluster.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Snapshot of all global indexes in insertion order.
    pub fn indexes(&self) -> Vec<usize> {
        self.indexes.clone()
    }

    /// Borrowed view of the global indexes.
    pub fn global_indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Iterate over `(global_index, vector)` pairs in local order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[f64])> + '_ {
        self.indexes
            .iter()
            .zip(self.data.iter())
            .map(|(&g, v)| (g, v.as_slice()))
    }

    /// Append one element.
    pub fn add_element(&mut self, vector: Vec<f64>, global_index: usize) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(ClusterError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.len(),
            });
        }
        self.data.push(vector);
        self.indexes.push(global_index);
        Ok(())
    }

    /// Copy every element of `other` into this cluster, keeping global indexes.
    pub fn append(&mut self, other: &Cluster) -> Result<()> {
        self.check_same_dimensions(other)?;
        self.indexes.extend_from_slice(&other.indexes);
        self.data.extend(other.data.iter().cloned());
        Ok(())
    }

    /// Move every element of `other` into this cluster.
    pub fn merge(&mut self, other: Cluster) -> Result<()> {
        self.check_same_dimensions(&other)?;
        self.indexes.extend(other.indexes);
        self.data.extend(other.data);
        Ok(())
    }

    /// Remove the element at `local_index`, returning its global index and vector.
    pub fn delete_element_by_local_index(&mut self, local_index: usize) -> Result<(usize, Vec<f64>)> {
        self.check_local(local_index)?;
        let global = self.indexes.remove(local_index);
        let vector = self.data.remove(local_index);
        Ok((global, vector))
    }

    /// Remove the first element carrying `global_index`, returning its vector.
    pub fn delete_element_by_global_index(&mut self, global_index: usize) -> Result<Vec<f64>> {
        let local = self
            .local_index_of(global_index)
            .ok_or(ClusterError::NotFound { global_index })?;
        self.indexes.remove(local);
        Ok(self.data.remove(local))
    }

    /// Vector at `local_index`.
    pub fn element(&self, local_index: usize) -> Result<&[f64]> {
        self.check_local(local_index)?;
        Ok(&self.data[local_index])
    }

    /// Vector carrying `global_index` (linear scan).
    pub fn element_by_global_index(&self, global_index: usize) -> Result<&[f64]> {
        self.local_index_of(global_index)
            .map(|local| self.data[local].as_slice())
            .ok_or(ClusterError::NotFound { global_index })
    }

    /// Global index of the element at `local_index`.
    pub fn global_index(&self, local_index: usize) -> Result<usize> {
        self.check_local(local_index)?;
        Ok(self.indexes[local_index])
    }

    /// Local position of the first element carrying `global_index`.
    pub fn local_index_of(&self, global_index: usize) -> Option<usize> {
        self.indexes.iter().position(|&g| g == global_index)
    }

    fn check_local(&self, local_index: usize) -> Result<()> {
        if local_index >= self.indexes.len() {
            return Err(ClusterError::IndexOutOfBounds {
                index: local_index,
                size: self.indexes.len(),
            });
        }
        Ok(())
    }

    fn check_same_dimensions(&self, other: &Cluster) -> Result<()> {
        if other.dimensions != self.dimensions {
            return Err(ClusterError::DimensionMismatch {
                expected: self.dimensions,
                got: other.dimensions,
            });
        }
        Ok(())
    }
}
