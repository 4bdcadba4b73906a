//! Space conversions from raw points into working feature spaces.

use super::distance::DENSITY_FEATURES;
use crate::algorithm::{DistanceMetric, SpaceConverter};
use crate::core::Cluster;
use crate::error::{ClusterError, Result};
use crate::utils::stats::{mean, median, population_std_dev, population_variance};

/// Keeps the input space as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConversion;

impl SpaceConverter for IdentityConversion {
    fn convert(&self, _distance: &dyn DistanceMetric, data: &Cluster, _params: &[f64]) -> Result<Cluster> {
        Ok(data.clone())
    }
}

/// Describes every point by the statistics of its neighborhood.
///
/// Parameters: `[k, alpha]`. For each point the `k` nearest neighbors are
/// taken; a neighbor is dropped when its distance ratio to another neighbor
/// exceeds `alpha` and the triangle it forms with that neighbor is equally
/// lopsided. The point becomes `[mean, std, median, variance]` of the remaining
/// neighbor distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityConversion;

impl DensityConversion {
    fn parse_params(params: &[f64]) -> Result<(usize, f64)> {
        match params {
            [k, alpha, ..] if *k >= 1.0 && alpha.is_finite() => Ok((*k as usize, *alpha)),
            [_, _, ..] => Err(ClusterError::InvalidArgument(
                "density conversion needs k >= 1 and a finite alpha".to_string(),
            )),
            _ => Err(ClusterError::InvalidArgument(
                "density conversion expects parameters [k, alpha]".to_string(),
            )),
        }
    }
}

fn ratio(a: f64, b: f64) -> f64 {
    a.max(b) / a.min(b)
}

/// Local indexes and distances of the `k` nearest neighbors of `local`.
fn nearest_neighbors(
    data: &Cluster,
    local: usize,
    k: usize,
    distance: &dyn DistanceMetric,
) -> Result<Vec<(usize, f64)>> {
    let point = data.element(local)?;
    let mut neighbors = Vec::with_capacity(data.len().saturating_sub(1));
    for (j, (_, other)) in data.iter().enumerate() {
        if j != local {
            neighbors.push((j, distance.distance(other, point)?));
        }
    }
    neighbors.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    neighbors.truncate(k);
    Ok(neighbors)
}

impl SpaceConverter for DensityConversion {
    fn convert(&self, distance: &dyn DistanceMetric, data: &Cluster, params: &[f64]) -> Result<Cluster> {
        let (k, alpha) = Self::parse_params(params)?;
        let mut converted = Cluster::new(DENSITY_FEATURES);

        for local in 0..data.len() {
            let neighbors = nearest_neighbors(data, local, k, distance)?;
            let mut dropped = vec![false; neighbors.len()];

            for (j, &(pj, dj)) in neighbors.iter().enumerate() {
                for (l, &(pl, dl)) in neighbors.iter().enumerate() {
                    if l == j || !(ratio(dl, dj) > alpha) {
                        continue;
                    }
                    let between = distance.distance(data.element(pj)?, data.element(pl)?)?;
                    if ratio(dl, between) > alpha || ratio(dj, between) > alpha {
                        if dj > dl {
                            dropped[j] = true;
                        } else {
                            dropped[l] = true;
                        }
                    }
                }
            }

            let mut kept: Vec<f64> = neighbors
                .iter()
                .zip(&dropped)
                .filter(|(_, &d)| !d)
                .map(|(&(_, dist), _)| dist)
                .collect();
            if kept.is_empty() {
                kept = neighbors.iter().map(|&(_, dist)| dist).collect();
            }

            converted.add_element(
                vec![
                    mean(&kept),
                    population_std_dev(&kept),
                    median(&kept),
                    population_variance(&kept),
                ],
                data.global_index(local)?,
            )?;
        }

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::euclidean_distance;
    use approx::assert_relative_eq;

    fn line(xs: &[f64]) -> Cluster {
        Cluster::from_parts(
            (0..xs.len()).map(|i| i + 100).collect(),
            xs.iter().map(|&x| vec![x]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn identity_returns_equal_cluster() {
        let c = line(&[1.0, 2.0, 3.0]);
        let converted = IdentityConversion.convert(&euclidean_distance, &c, &[]).unwrap();
        assert_eq!(converted, c);
    }

    #[test]
    fn density_conversion_keeps_global_indexes() {
        let c = line(&[0.0, 1.0, 2.0, 3.0, 10.0]);
        let converted = DensityConversion
            .convert(&euclidean_distance, &c, &[2.0, 3.0])
            .unwrap();

        assert_eq!(converted.len(), c.len());
        assert_eq!(converted.dimensions(), DENSITY_FEATURES);
        assert_eq!(converted.indexes(), c.indexes());
    }

    #[test]
    fn density_features_of_uniform_line() {
        // interior points of an evenly spaced line see two neighbors at distance 1
        let c = line(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let converted = DensityConversion
            .convert(&euclidean_distance, &c, &[2.0, 10.0])
            .unwrap();

        let features = converted.element_by_global_index(102).unwrap();
        assert_relative_eq!(features[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(features[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(features[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(features[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn inconsistent_neighbor_is_filtered() {
        // for point 0 the neighbors sit at 1 and 10; the far one is dropped
        let c = line(&[0.0, 1.0, 10.0]);
        let converted = DensityConversion
            .convert(&euclidean_distance, &c, &[2.0, 2.0])
            .unwrap();

        let features = converted.element_by_global_index(100).unwrap();
        assert_relative_eq!(features[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(features[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn density_conversion_validates_params() {
        let c = line(&[0.0, 1.0]);
        assert!(matches!(
            DensityConversion.convert(&euclidean_distance, &c, &[2.0]),
            Err(ClusterError::InvalidArgument(_))
        ));
        assert!(matches!(
            DensityConversion.convert(&euclidean_distance, &c, &[0.0, 2.0]),
            Err(ClusterError::InvalidArgument(_))
        ));
    }
}
