//! Per-call parameters of the clustering process.

use crate::error::{ClusterError, Result};

/// Parameters of one [`ClusterAlgorithm::process`](super::ClusterAlgorithm::process) call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessConfig {
    /// Opaque parameters for the space converter
    pub conversion_params: Vec<f64>,
    /// Opaque parameters for the center estimator
    pub center_params: Vec<f64>,
    /// Opaque parameters for the splitter
    pub split_params: Vec<f64>,
    /// Radius ratio bounding the fusion and split loops
    pub unite_threshold_ratio: f32,
    /// Share of points clustered before leftovers are assigned (0 to 1)
    pub initial_work_sector_ratio: f32,
    /// Desired number of clusters, `None` when unconstrained
    pub target_cluster_count: Option<usize>,
    /// Random seed for sampling (None for random)
    pub seed: Option<u64>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            conversion_params: Vec::new(),
            center_params: Vec::new(),
            split_params: Vec::new(),
            unite_threshold_ratio: 1.0,
            initial_work_sector_ratio: 1.0,
            target_cluster_count: None,
            seed: None,
        }
    }
}

impl ProcessConfig {
    /// Set space conversion parameters.
    pub fn conversion_params(mut self, params: Vec<f64>) -> Self {
        self.conversion_params = params;
        self
    }

    /// Set center estimation parameters.
    pub fn center_params(mut self, params: Vec<f64>) -> Self {
        self.center_params = params;
        self
    }

    /// Set split parameters.
    pub fn split_params(mut self, params: Vec<f64>) -> Self {
        self.split_params = params;
        self
    }

    /// Set the radius ratio threshold.
    pub fn unite_threshold_ratio(mut self, ratio: f32) -> Self {
        self.unite_threshold_ratio = ratio;
        self
    }

    /// Set the initial sample share.
    pub fn initial_work_sector_ratio(mut self, ratio: f32) -> Self {
        self.initial_work_sector_ratio = ratio;
        self
    }

    /// Set the target number of clusters.
    pub fn target_cluster_count(mut self, count: usize) -> Self {
        self.target_cluster_count = Some(count);
        self
    }

    /// Set random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether `count` clusters already satisfy the target.
    pub(crate) fn target_reached(&self, count: usize) -> bool {
        matches!(self.target_cluster_count, Some(target) if count <= target)
    }

    /// Whether the target asks for fewer than `count` clusters.
    pub(crate) fn wants_fewer(&self, count: usize) -> bool {
        matches!(self.target_cluster_count, Some(target) if count > target)
    }

    /// Whether more than `count` clusters are acceptable; always true without a target.
    pub(crate) fn wants_more(&self, count: usize) -> bool {
        self.target_cluster_count.map_or(true, |target| count < target)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.initial_work_sector_ratio) {
            return Err(ClusterError::InvalidArgument(format!(
                "initial work sector ratio must be within [0, 1], got {}",
                self.initial_work_sector_ratio
            )));
        }
        Ok(())
    }
}
