//! The meta-clustering orchestrator.
//!
//! Runs the sample, pair, fuse, assign and split phases over caller-supplied
//! strategies.

use super::config::ProcessConfig;
use super::traits::{
    CenterEstimator, ClusterAffinity, ClusterComparator, ClusterSplitter, DistanceMetric,
    PointAffinity, SpaceConverter,
};
use crate::core::Cluster;
use crate::error::{ClusterError, Result};
use crate::functions::{
    compare_by_size, euclidean_distance, same_cluster_brute, similar_clusters_brute,
    IdentityConversion, MeanMedoidCenter, TrivialSplit,
};
use log::{debug, info, trace};
use rand::prelude::*;
use rand::seq::index;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Which affinity drives a merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeCriterion {
    /// Cluster fusion affinity
    Fusion,
    /// Point-level same-cluster affinity
    Neighbor,
}

/// Clustering algorithm assembled from pluggable strategies.
///
/// The configuration is immutable once built; every [`process`](Self::process)
/// call owns its working state, so one instance can serve concurrent callers.
pub struct ClusterAlgorithm {
    input_distance: Box<dyn DistanceMetric>,
    working_distance: Box<dyn DistanceMetric>,
    converter: Box<dyn SpaceConverter>,
    point_affinity: Box<dyn PointAffinity>,
    cluster_affinity: Box<dyn ClusterAffinity>,
    splitter: Box<dyn ClusterSplitter>,
    comparator: Box<dyn ClusterComparator>,
    center: Box<dyn CenterEstimator>,
    trivial_split: bool,
}

impl fmt::Debug for ClusterAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterAlgorithm")
            .field("trivial_split", &self.trivial_split)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ClusterAlgorithm`].
///
/// Starts from the k-means-like configuration: Euclidean distance in both
/// spaces, identity conversion, mean-medoid center, brute-force affinities,
/// trivial split and size comparison.
pub struct ClusterAlgorithmBuilder {
    input_distance: Box<dyn DistanceMetric>,
    working_distance: Box<dyn DistanceMetric>,
    converter: Box<dyn SpaceConverter>,
    point_affinity: Box<dyn PointAffinity>,
    cluster_affinity: Box<dyn ClusterAffinity>,
    splitter: Box<dyn ClusterSplitter>,
    comparator: Box<dyn ClusterComparator>,
    center: Box<dyn CenterEstimator>,
    trivial_split: bool,
}

impl Default for ClusterAlgorithmBuilder {
    fn default() -> Self {
        Self {
            input_distance: Box::new(euclidean_distance),
            working_distance: Box::new(euclidean_distance),
            converter: Box::new(IdentityConversion),
            point_affinity: Box::new(same_cluster_brute),
            cluster_affinity: Box::new(similar_clusters_brute),
            splitter: Box::new(TrivialSplit),
            comparator: Box::new(compare_by_size),
            center: Box::new(MeanMedoidCenter),
            trivial_split: true,
        }
    }
}

impl ClusterAlgorithmBuilder {
    /// Distance in the raw input space, handed to the space converter.
    pub fn input_distance<D: DistanceMetric + 'static>(mut self, distance: D) -> Self {
        self.input_distance = Box::new(distance);
        self
    }

    /// Distance in the working space, used for every clustering decision.
    pub fn working_distance<D: DistanceMetric + 'static>(mut self, distance: D) -> Self {
        self.working_distance = Box::new(distance);
        self
    }

    /// Use the same distance in both spaces.
    pub fn distance<D: DistanceMetric + Clone + 'static>(self, distance: D) -> Self {
        self.input_distance(distance.clone()).working_distance(distance)
    }

    /// Space conversion from the input space into the working space.
    pub fn converter<S: SpaceConverter + 'static>(mut self, converter: S) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Point-level affinity driving the neighbor passes.
    pub fn point_affinity<A: PointAffinity + 'static>(mut self, affinity: A) -> Self {
        self.point_affinity = Box::new(affinity);
        self
    }

    /// Cluster fusion affinity driving the first merge pass.
    pub fn cluster_affinity<A: ClusterAffinity + 'static>(mut self, affinity: A) -> Self {
        self.cluster_affinity = Box::new(affinity);
        self
    }

    /// Set the splitter; the trivial-split flag follows [`ClusterSplitter::is_trivial`].
    pub fn splitter<S: ClusterSplitter + 'static>(mut self, splitter: S) -> Self {
        self.trivial_split = splitter.is_trivial();
        self.splitter = Box::new(splitter);
        self
    }

    /// Cluster comparison exposed through [`ClusterAlgorithm::compare`].
    pub fn comparator<C: ClusterComparator + 'static>(mut self, comparator: C) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Center estimator used in the working space.
    pub fn center<C: CenterEstimator + 'static>(mut self, center: C) -> Self {
        self.center = Box::new(center);
        self
    }

    /// Override the trivial-split flag. When set, the split phase is skipped.
    pub fn trivial_split(mut self, trivial: bool) -> Self {
        self.trivial_split = trivial;
        self
    }

    /// Finish the configuration.
    pub fn build(self) -> ClusterAlgorithm {
        ClusterAlgorithm {
            input_distance: self.input_distance,
            working_distance: self.working_distance,
            converter: self.converter,
            point_affinity: self.point_affinity,
            cluster_affinity: self.cluster_affinity,
            splitter: self.splitter,
            comparator: self.comparator,
            center: self.center,
            trivial_split: self.trivial_split,
        }
    }
}

impl ClusterAlgorithm {
    /// Start from the k-means-like defaults.
    pub fn builder() -> ClusterAlgorithmBuilder {
        ClusterAlgorithmBuilder::default()
    }

    /// Whether the split phase is skipped.
    pub fn is_split_trivial(&self) -> bool {
        self.trivial_split
    }

    /// Compare two clusters with the configured comparator in the working space.
    pub fn compare(&self, a: &Cluster, b: &Cluster, center_params: &[f64]) -> Result<f32> {
        self.comparator.compare(
            a,
            b,
            self.working_distance.as_ref(),
            self.center.as_ref(),
            center_params,
        )
    }

    /// Cluster `data`.
    ///
    /// Sampling uses `config.seed` when set and fresh entropy otherwise, so
    /// unseeded runs are not reproducible.
    ///
    /// # Errors
    /// * `InvalidArgument` if the work sector ratio is outside `[0, 1]`
    /// * `InsufficientData` if `data` has fewer than two points
    /// * any error raised by a strategy
    pub fn process(&self, data: &Cluster, config: &ProcessConfig) -> Result<Vec<Cluster>> {
        let mut rng: StdRng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.process_with_rng(data, config, &mut rng)
    }

    /// Cluster `data` drawing the initial sample from `rng`.
    ///
    /// The returned clusters hold the original vectors of `data` and together
    /// contain every global index of `data` exactly once.
    pub fn process_with_rng<R: Rng + ?Sized>(
        &self,
        data: &Cluster,
        config: &ProcessConfig,
        rng: &mut R,
    ) -> Result<Vec<Cluster>> {
        config.validate()?;
        if data.len() <= 1 {
            return Err(ClusterError::InsufficientData {
                needed: 2,
                got: data.len(),
            });
        }
        info!(
            "Clustering {} points of dimension {} (target: {:?})",
            data.len(),
            data.dimensions(),
            config.target_cluster_count
        );

        let working = self
            .converter
            .convert(self.input_distance.as_ref(), data, &config.conversion_params)?;
        if working.len() != data.len() {
            return Err(ClusterError::ComputationError(format!(
                "space conversion produced {} points from {}",
                working.len(),
                data.len()
            )));
        }

        let (sector, remaining) = sample_sector(&working, config.initial_work_sector_ratio, rng)?;
        debug!(
            "Sampled {} points, {} left for assignment",
            sector.len(),
            remaining.len()
        );

        let mut clusters = self.seed_pairs(&sector, config)?;
        debug!("Seed pairing produced {} clusters", clusters.len());

        clusters = self.merge_pass(clusters, config, MergeCriterion::Fusion)?;
        debug!("Fusion pass left {} clusters", clusters.len());
        clusters = self.merge_pass(clusters, config, MergeCriterion::Neighbor)?;
        debug!("Neighbor pass left {} clusters", clusters.len());

        self.assign_leftovers(&mut clusters, &working, &remaining, config)?;

        clusters = self.fuse_until_stable(clusters, config)?;
        if !self.trivial_split {
            clusters = self.split_until_stable(clusters, working.len(), config)?;
        }

        let result = reproject(data, &clusters)?;
        info!("Clustering finished with {} clusters", result.len());
        Ok(result)
    }

    fn center_of(&self, cluster: &Cluster, config: &ProcessConfig) -> Result<Vec<f64>> {
        self.center
            .center(cluster, self.working_distance.as_ref(), &config.center_params)
    }

    /// Index of the first center closest to `point`.
    fn nearest_center(&self, point: &[f64], centers: &[Vec<f64>]) -> Result<usize> {
        let mut nearest = 0;
        let mut min_dist = f64::INFINITY;
        for (i, center) in centers.iter().enumerate() {
            let dist = self.working_distance.distance(point, center)?;
            if dist < min_dist {
                min_dist = dist;
                nearest = i;
            }
        }
        Ok(nearest)
    }

    /// Largest center-to-member distance over all clusters.
    fn max_center_to_member_distance(
        &self,
        clusters: &[Cluster],
        config: &ProcessConfig,
    ) -> Result<f64> {
        let mut max = 0.0_f64;
        for cluster in clusters {
            let center = self.center_of(cluster, config)?;
            for (_, point) in cluster.iter() {
                max = max.max(self.working_distance.distance(&center, point)?);
            }
        }
        Ok(max)
    }

    /// Pair every sampled point with its closest unpaired partner; an odd point
    /// out joins the pair with the nearest center.
    fn seed_pairs(&self, sector: &Cluster, config: &ProcessConfig) -> Result<Vec<Cluster>> {
        let n = sector.len();
        let mut used = vec![false; n];
        let mut clusters = Vec::with_capacity(n / 2);
        let mut odd_one = None;

        for i in 0..n {
            if used[i] {
                continue;
            }
            let point = sector.element(i)?;
            let mut partner: Option<(usize, f64)> = None;
            for j in 0..n {
                if j == i || used[j] {
                    continue;
                }
                let dist = self.working_distance.distance(point, sector.element(j)?)?;
                match partner {
                    Some((_, best)) if dist >= best => {}
                    _ => partner = Some((j, dist)),
                }
            }

            let Some((j, _)) = partner else {
                odd_one = Some(i);
                break;
            };
            used[i] = true;
            used[j] = true;

            let mut pair = Cluster::new(sector.dimensions());
            pair.add_element(point.to_vec(), sector.global_index(i)?)?;
            pair.add_element(sector.element(j)?.to_vec(), sector.global_index(j)?)?;
            clusters.push(pair);
        }

        if let Some(i) = odd_one {
            let centers = clusters
                .iter()
                .map(|c| self.center_of(c, config))
                .collect::<Result<Vec<_>>>()?;
            let point = sector.element(i)?;
            let nearest = self.nearest_center(point, &centers)?;
            clusters[nearest].add_element(point.to_vec(), sector.global_index(i)?)?;
        }

        Ok(clusters)
    }

    fn affinity(
        &self,
        criterion: MergeCriterion,
        a: &Cluster,
        b: &Cluster,
        config: &ProcessConfig,
    ) -> Result<f32> {
        let distance = self.working_distance.as_ref();
        let center = self.center.as_ref();
        match criterion {
            MergeCriterion::Fusion => {
                self.cluster_affinity
                    .similarity(a, b, distance, center, &config.center_params)
            }
            MergeCriterion::Neighbor => {
                self.point_affinity
                    .same_cluster(a, b, distance, center, &config.center_params)
            }
        }
    }

    /// Handle of the live cluster with the highest positive affinity to
    /// `current`; the lowest handle wins ties.
    fn best_partner(
        &self,
        handle: usize,
        current: &Cluster,
        slots: &[Option<Cluster>],
        criterion: MergeCriterion,
        config: &ProcessConfig,
    ) -> Result<Option<usize>> {
        let candidates: Vec<(usize, &Cluster)> = slots
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != handle)
            .filter_map(|(j, slot)| slot.as_ref().map(|c| (j, c)))
            .collect();

        #[cfg(feature = "parallel")]
        let scores: Vec<f32> = candidates
            .par_iter()
            .map(|(_, other)| self.affinity(criterion, current, other, config))
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let scores: Vec<f32> = candidates
            .iter()
            .map(|(_, other)| self.affinity(criterion, current, other, config))
            .collect::<Result<_>>()?;

        let mut best: Option<(usize, f32)> = None;
        for (&(j, _), score) in candidates.iter().zip(scores) {
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((j, score));
            }
        }
        Ok(best.map(|(j, _)| j))
    }

    /// One merge pass: every live cluster, in order, absorbs its best partner.
    ///
    /// Clusters live in slots addressed by stable handles, so absorbing a
    /// cluster never shifts the position of another. Stops once the target
    /// count is reached.
    fn merge_pass(
        &self,
        clusters: Vec<Cluster>,
        config: &ProcessConfig,
        criterion: MergeCriterion,
    ) -> Result<Vec<Cluster>> {
        let mut slots: Vec<Option<Cluster>> = clusters.into_iter().map(Some).collect();
        let mut alive = slots.len();

        for handle in 0..slots.len() {
            if config.target_reached(alive) {
                break;
            }
            let Some(current) = slots[handle].as_ref() else {
                continue;
            };
            let Some(partner) = self.best_partner(handle, current, &slots, criterion, config)? else {
                continue;
            };

            if let Some(absorbed) = slots[partner].take() {
                trace!("{:?} merge: cluster {} absorbs cluster {}", criterion, handle, partner);
                if let Some(target) = slots[handle].as_mut() {
                    target.merge(absorbed)?;
                }
                alive -= 1;
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Hand every unsampled point to the cluster with the nearest center,
    /// refreshing that cluster's center after each addition.
    fn assign_leftovers(
        &self,
        clusters: &mut [Cluster],
        working: &Cluster,
        remaining: &[usize],
        config: &ProcessConfig,
    ) -> Result<()> {
        if remaining.is_empty() {
            return Ok(());
        }
        let mut centers = clusters
            .iter()
            .map(|c| self.center_of(c, config))
            .collect::<Result<Vec<_>>>()?;

        for &local in remaining {
            let point = working.element(local)?;
            let nearest = self.nearest_center(point, &centers)?;
            clusters[nearest].add_element(point.to_vec(), working.global_index(local)?)?;
            centers[nearest] = self.center_of(&clusters[nearest], config)?;
        }
        debug!("Assigned {} leftover points", remaining.len());
        Ok(())
    }

    /// Repeat neighbor passes while the target asks for fewer clusters or the
    /// radius grows slower than the unite ratio, as long as passes still merge.
    fn fuse_until_stable(
        &self,
        mut clusters: Vec<Cluster>,
        config: &ProcessConfig,
    ) -> Result<Vec<Cluster>> {
        let ratio = f64::from(config.unite_threshold_ratio);
        let mut radius = self.max_center_to_member_distance(&clusters, config)?;
        let mut previous_radius = radius;
        let mut changed = true;

        while changed && (config.wants_fewer(clusters.len()) || radius / previous_radius < ratio) {
            let before = clusters.len();
            previous_radius = radius;

            clusters = self.merge_pass(clusters, config, MergeCriterion::Neighbor)?;
            radius = self.max_center_to_member_distance(&clusters, config)?;
            changed = clusters.len() != before;
            debug!(
                "Fusion loop: {} -> {} clusters, radius {:.6}",
                before,
                clusters.len(),
                radius
            );
        }

        Ok(clusters)
    }

    /// Repeatedly split every cluster while the count keeps growing and either
    /// the target allows more clusters or the radius is still above
    /// `unite_threshold_ratio` times the pre-split radius.
    fn split_until_stable(
        &self,
        mut clusters: Vec<Cluster>,
        point_count: usize,
        config: &ProcessConfig,
    ) -> Result<Vec<Cluster>> {
        let ratio = f64::from(config.unite_threshold_ratio);
        let baseline = self.max_center_to_member_distance(&clusters, config)?;
        let mut radius = baseline;
        let mut changed = true;

        while changed
            && clusters.len() < point_count
            && (config.wants_more(clusters.len()) || radius / baseline > ratio)
        {
            let before = clusters.len();
            let mut next = Vec::with_capacity(before);

            for cluster in clusters {
                let parts: Vec<Cluster> = self
                    .splitter
                    .split(
                        &cluster,
                        self.working_distance.as_ref(),
                        self.center.as_ref(),
                        &config.center_params,
                        &config.split_params,
                    )?
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect();

                if parts.is_empty() {
                    next.push(cluster);
                } else {
                    trace!("Split {} points into {} clusters", cluster.len(), parts.len());
                    next.extend(parts);
                }
            }

            clusters = next;
            radius = self.max_center_to_member_distance(&clusters, config)?;
            changed = clusters.len() != before;
            debug!(
                "Split loop: {} -> {} clusters, radius {:.6}",
                before,
                clusters.len(),
                radius
            );
        }

        Ok(clusters)
    }
}

/// Number of points sampled from `len`: `len * ratio` rounded half to even,
/// clamped to `[2, len]`.
fn sector_size(len: usize, ratio: f32) -> usize {
    ((len as f64 * f64::from(ratio)).round_ties_even() as usize)
        .max(2)
        .min(len)
}

/// Draw [`sector_size`] points without replacement.
///
/// Returns the sample as a cluster in draw order and the local indexes of the
/// points left out, in ascending order.
fn sample_sector<R: Rng + ?Sized>(
    working: &Cluster,
    ratio: f32,
    rng: &mut R,
) -> Result<(Cluster, Vec<usize>)> {
    let n = working.len();
    let amount = sector_size(n, ratio);

    let picked = index::sample(rng, n, amount).into_vec();
    let mut in_sector = vec![false; n];
    let mut sector = Cluster::new(working.dimensions());
    for &local in &picked {
        in_sector[local] = true;
        sector.add_element(working.element(local)?.to_vec(), working.global_index(local)?)?;
    }

    let remaining = (0..n).filter(|&local| !in_sector[local]).collect();
    Ok((sector, remaining))
}

/// Rebuild `clusters` from the original vectors of `data`.
fn reproject(data: &Cluster, clusters: &[Cluster]) -> Result<Vec<Cluster>> {
    let mut lookup: HashMap<usize, usize> = HashMap::with_capacity(data.len());
    for (local, &global) in data.global_indexes().iter().enumerate() {
        lookup.entry(global).or_insert(local);
    }

    clusters
        .iter()
        .map(|cluster| {
            let mut original = Cluster::new(data.dimensions());
            for &global in cluster.global_indexes() {
                let local = *lookup
                    .get(&global)
                    .ok_or(ClusterError::NotFound { global_index: global })?;
                original.add_element(data.element(local)?.to_vec(), global)?;
            }
            Ok(original)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{
        density_distance, manhattan_distance, DensityConversion, DistanceThresholdSplit,
        MeanCenter,
    };
    use rand::rngs::StdRng;

    fn four_points() -> Cluster {
        Cluster::from_parts(
            vec![0, 1, 2, 3],
            vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![10.0, 0.0],
                vec![10.0, 1.0],
            ],
        )
        .unwrap()
    }

    /// Two tight blobs of `per_blob` points each, 100 units apart.
    fn two_blobs(per_blob: usize) -> Cluster {
        let mut c = Cluster::new(2);
        for i in 0..per_blob {
            let dx = (i % 3) as f64 * 0.3;
            let dy = (i / 3) as f64 * 0.3;
            c.add_element(vec![dx, dy], i).unwrap();
            c.add_element(vec![100.0 + dx, dy], per_blob + i).unwrap();
        }
        c
    }

    fn sorted_groups(clusters: &[Cluster]) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = clusters
            .iter()
            .map(|c| {
                let mut ix = c.indexes();
                ix.sort_unstable();
                ix
            })
            .collect();
        groups.sort();
        groups
    }

    fn assert_partition(input: &Cluster, clusters: &[Cluster]) {
        let mut all: Vec<usize> = clusters.iter().flat_map(|c| c.indexes()).collect();
        all.sort_unstable();
        let mut expected = input.indexes();
        expected.sort_unstable();
        assert_eq!(all, expected);
    }

    fn kmeans_like() -> ClusterAlgorithm {
        ClusterAlgorithm::builder().center(MeanCenter).build()
    }

    // ==================== preconditions ====================

    #[test]
    fn rejects_bad_sector_ratio() {
        let alg = kmeans_like();
        let config = ProcessConfig::default().initial_work_sector_ratio(1.5);
        assert!(matches!(
            alg.process(&four_points(), &config),
            Err(ClusterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_single_point() {
        let alg = kmeans_like();
        let data = Cluster::from_parts(vec![0], vec![vec![1.0, 1.0]]).unwrap();
        assert_eq!(
            alg.process(&data, &ProcessConfig::default()).unwrap_err(),
            ClusterError::InsufficientData { needed: 2, got: 1 }
        );
    }

    #[test]
    fn conversion_dropping_points_is_an_error() {
        let drop_last = |_: &dyn DistanceMetric, data: &Cluster, _: &[f64]| -> Result<Cluster> {
            let mut c = data.clone();
            c.delete_element_by_local_index(c.len() - 1)?;
            Ok(c)
        };
        let alg = ClusterAlgorithm::builder().converter(drop_last).build();
        assert!(matches!(
            alg.process(&four_points(), &ProcessConfig::default()),
            Err(ClusterError::ComputationError(_))
        ));
    }

    #[test]
    fn strategy_errors_propagate() {
        let failing = |_: &[f64], _: &[f64]| -> Result<f64> {
            Err(ClusterError::ComputationError("boom".to_string()))
        };
        let alg = ClusterAlgorithm::builder().working_distance(failing).build();
        assert_eq!(
            alg.process(&four_points(), &ProcessConfig::default().seed(1))
                .unwrap_err(),
            ClusterError::ComputationError("boom".to_string())
        );
    }

    // ==================== end-to-end ====================

    #[test]
    fn four_points_two_clusters() {
        let alg = kmeans_like();
        for seed in 0..20 {
            let config = ProcessConfig::default()
                .target_cluster_count(2)
                .unite_threshold_ratio(1.5)
                .seed(seed);
            let result = alg.process(&four_points(), &config).unwrap();
            assert_eq!(sorted_groups(&result), vec![vec![0, 1], vec![2, 3]]);
        }
    }

    #[test]
    fn results_carry_original_vectors() {
        let alg = kmeans_like();
        let data = four_points();
        let config = ProcessConfig::default().target_cluster_count(2).seed(3);
        for cluster in alg.process(&data, &config).unwrap() {
            for (g, v) in cluster.iter() {
                assert_eq!(v, data.element_by_global_index(g).unwrap());
            }
        }
    }

    #[test]
    fn blobs_separate_with_target() {
        let data = two_blobs(6);
        let alg = kmeans_like();
        let config = ProcessConfig::default().target_cluster_count(2).seed(11);
        let result = alg.process(&data, &config).unwrap();

        assert_eq!(
            sorted_groups(&result),
            vec![(0..6).collect::<Vec<_>>(), (6..12).collect::<Vec<_>>()]
        );
    }

    #[test]
    fn unconstrained_trivial_split_terminates() {
        let data = two_blobs(9);
        let alg = kmeans_like();
        for seed in 0..5 {
            let config = ProcessConfig::default()
                .unite_threshold_ratio(2.0)
                .seed(seed);
            let result = alg.process(&data, &config).unwrap();
            assert!(!result.is_empty());
            assert_partition(&data, &result);
        }
    }

    #[test]
    fn partial_sample_assigns_leftovers() {
        let data = two_blobs(9);
        let alg = kmeans_like();
        for ratio in [0.0, 0.1, 0.5] {
            let config = ProcessConfig::default()
                .initial_work_sector_ratio(ratio)
                .seed(5);
            let result = alg.process(&data, &config).unwrap();
            assert_partition(&data, &result);
        }
    }

    #[test]
    fn graph_split_keeps_blobs_apart() {
        let data = two_blobs(9);
        let alg = ClusterAlgorithm::builder()
            .center(MeanCenter)
            .splitter(DistanceThresholdSplit)
            .build();
        assert!(!alg.is_split_trivial());

        let config = ProcessConfig::default().split_params(vec![5.0]).seed(2);
        let result = alg.process(&data, &config).unwrap();
        assert_partition(&data, &result);
        for cluster in &result {
            let left = cluster.global_indexes().iter().all(|&g| g < 9);
            let right = cluster.global_indexes().iter().all(|&g| g >= 9);
            assert!(left || right, "cluster mixes blobs: {:?}", cluster.indexes());
        }
    }

    #[test]
    fn density_configuration_partitions_input() {
        let data = two_blobs(9);
        let alg = ClusterAlgorithm::builder()
            .input_distance(euclidean_distance)
            .working_distance(density_distance)
            .converter(DensityConversion)
            .splitter(DistanceThresholdSplit)
            .build();
        let config = ProcessConfig::default()
            .conversion_params(vec![3.0, 2.0])
            .split_params(vec![0.5])
            .seed(9);

        let result = alg.process(&data, &config).unwrap();
        assert_partition(&data, &result);
        assert!(result.iter().all(|c| c.dimensions() == 2));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let data = two_blobs(9);
        let alg = ClusterAlgorithm::builder().distance(manhattan_distance).build();
        let config = ProcessConfig::default().initial_work_sector_ratio(0.5).seed(42);

        let a = alg.process(&data, &config).unwrap();
        let b = alg.process(&data, &config).unwrap();
        assert_eq!(a, b);

        let mut rng = StdRng::seed_from_u64(42);
        let c = alg.process_with_rng(&data, &config, &mut rng).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn non_positive_affinity_never_merges() {
        let never = |_: &Cluster, _: &Cluster, _: &dyn DistanceMetric, _: &dyn CenterEstimator, _: &[f64]| -> Result<f32> {
            Ok(0.0)
        };
        let alg = ClusterAlgorithm::builder()
            .point_affinity(never)
            .cluster_affinity(never)
            .build();
        let data = four_points();
        let result = alg.process(&data, &ProcessConfig::default().seed(0)).unwrap();
        // only seed pairs remain
        assert_eq!(result.len(), 2);
        assert_partition(&data, &result);
    }

    #[test]
    fn empty_split_result_keeps_cluster() {
        let vanish = |_: &Cluster, _: &dyn DistanceMetric, _: &dyn CenterEstimator, _: &[f64], _: &[f64]| -> Result<Vec<Cluster>> {
            Ok(Vec::new())
        };
        let alg = ClusterAlgorithm::builder().splitter(vanish).build();
        assert!(!alg.is_split_trivial());

        let data = two_blobs(6);
        let result = alg.process(&data, &ProcessConfig::default().seed(4)).unwrap();
        assert_partition(&data, &result);
    }

    #[test]
    fn comparator_is_exposed() {
        let alg = kmeans_like();
        let a = four_points();
        let b = Cluster::from_parts(vec![9], vec![vec![0.0, 0.0]]).unwrap();
        assert_eq!(alg.compare(&a, &b, &[]).unwrap(), 3.0);
    }

    // ==================== convergence loops ====================

    /// Two groups of four points on a line, 20 units apart.
    fn two_groups_on_line() -> Cluster {
        Cluster::from_parts(
            (0..8).collect(),
            [0.0, 0.5, 1.0, 1.5, 20.0, 20.5, 21.0, 21.5]
                .iter()
                .map(|&x| vec![x])
                .collect(),
        )
        .unwrap()
    }

    fn isolating_split() -> ClusterAlgorithm {
        ClusterAlgorithm::builder()
            .splitter(DistanceThresholdSplit)
            .build()
    }

    #[test]
    fn split_skipped_at_target_with_unit_ratio() {
        let config = ProcessConfig::default()
            .target_cluster_count(2)
            .split_params(vec![0.0])
            .unite_threshold_ratio(1.0)
            .seed(1);
        let result = isolating_split()
            .process(&two_groups_on_line(), &config)
            .unwrap();

        assert_eq!(sorted_groups(&result), vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
    }

    #[test]
    fn split_runs_when_ratio_below_one() {
        // the first pass sees current / baseline radius == 1
        let config = ProcessConfig::default()
            .target_cluster_count(2)
            .split_params(vec![0.0])
            .unite_threshold_ratio(0.5)
            .seed(1);
        let result = isolating_split()
            .process(&two_groups_on_line(), &config)
            .unwrap();

        assert_eq!(result.len(), 8);
        assert_partition(&two_groups_on_line(), &result);
    }

    #[test]
    fn split_runs_while_target_wants_more() {
        let config = ProcessConfig::default()
            .target_cluster_count(8)
            .split_params(vec![0.0])
            .seed(1);
        let result = isolating_split()
            .process(&two_groups_on_line(), &config)
            .unwrap();

        assert_eq!(result.len(), 8);
    }

    #[test]
    fn fusion_loop_driven_by_ratio_alone() {
        let never = |_: &Cluster, _: &Cluster, _: &dyn DistanceMetric, _: &dyn CenterEstimator, _: &[f64]| -> Result<f32> {
            Ok(0.0)
        };
        let always = |_: &Cluster, _: &Cluster, _: &dyn DistanceMetric, _: &dyn CenterEstimator, _: &[f64]| -> Result<f32> {
            Ok(1.0)
        };
        let alg = ClusterAlgorithm::builder()
            .cluster_affinity(never)
            .point_affinity(always)
            .build();
        let data = two_groups_on_line();

        // four seed pairs, the first neighbor pass halves them
        let stable = ProcessConfig::default().unite_threshold_ratio(1.0).seed(1);
        assert_eq!(alg.process(&data, &stable).unwrap().len(), 2);

        let eager = ProcessConfig::default().unite_threshold_ratio(2.0).seed(1);
        let result = alg.process(&data, &eager).unwrap();
        assert_eq!(result.len(), 1);
        assert_partition(&data, &result);
    }

    // ==================== internals ====================

    #[test]
    fn sample_sector_clamps_to_two() {
        let data = four_points();
        let mut rng = StdRng::seed_from_u64(1);
        let (sector, remaining) = sample_sector(&data, 0.0, &mut rng).unwrap();
        assert_eq!(sector.len(), 2);
        assert_eq!(remaining.len(), 2);

        let (sector, remaining) = sample_sector(&data, 1.0, &mut rng).unwrap();
        assert_eq!(sector.len(), 4);
        assert!(remaining.is_empty());
    }

    #[test]
    fn sector_size_rounds_half_to_even() {
        assert_eq!(sector_size(5, 0.5), 2);
        assert_eq!(sector_size(7, 0.5), 4);
        assert_eq!(sector_size(10, 0.25), 2);
        assert_eq!(sector_size(9, 0.5), 4);
        assert_eq!(sector_size(11, 0.5), 6);
        assert_eq!(sector_size(3, 0.0), 2);
        assert_eq!(sector_size(3, 1.0), 3);
    }

    #[test]
    fn seed_pairs_matches_nearest_and_places_odd_point() {
        let alg = kmeans_like();
        let sector = Cluster::from_parts(
            vec![0, 1, 2, 3, 4],
            vec![vec![0.0], vec![10.0], vec![1.0], vec![11.0], vec![0.5]],
        )
        .unwrap();
        let pairs = alg.seed_pairs(&sector, &ProcessConfig::default()).unwrap();

        assert_eq!(sorted_groups(&pairs), vec![vec![0, 2, 4], vec![1, 3]]);
    }

    #[test]
    fn merge_pass_stops_at_target() {
        let alg = kmeans_like();
        // pairs of width one, ten units apart
        let clusters: Vec<Cluster> = (0..4)
            .map(|i| {
                let x = 10.0 * i as f64;
                Cluster::from_parts(vec![2 * i, 2 * i + 1], vec![vec![x], vec![x + 1.0]]).unwrap()
            })
            .collect();
        let config = ProcessConfig::default().target_cluster_count(3);
        let merged = alg
            .merge_pass(clusters, &config, MergeCriterion::Fusion)
            .unwrap();
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_pass_keeps_order_of_survivors() {
        let by_gap = |a: &Cluster, b: &Cluster, _: &dyn DistanceMetric, _: &dyn CenterEstimator, _: &[f64]| -> Result<f32> {
            let gap = (a.element(0)?[0] - b.element(0)?[0]).abs();
            Ok(if gap < 2.0 { 1.0 / gap as f32 } else { 0.0 })
        };
        let alg = ClusterAlgorithm::builder().cluster_affinity(by_gap).build();
        let clusters: Vec<Cluster> = [0.0, 10.0, 1.0, 11.0]
            .iter()
            .enumerate()
            .map(|(i, &x)| Cluster::from_parts(vec![i], vec![vec![x]]).unwrap())
            .collect();

        let merged = alg
            .merge_pass(clusters, &ProcessConfig::default(), MergeCriterion::Fusion)
            .unwrap();
        let groups: Vec<Vec<usize>> = merged.iter().map(|c| c.indexes()).collect();
        assert_eq!(groups, vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn reproject_rejects_unknown_index() {
        let data = four_points();
        let stray = Cluster::from_parts(vec![42], vec![vec![0.0, 0.0]]).unwrap();
        assert_eq!(
            reproject(&data, &[stray]).unwrap_err(),
            ClusterError::NotFound { global_index: 42 }
        );
    }
}
