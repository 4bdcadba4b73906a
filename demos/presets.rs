//! Preset Clustering Example
//!
//! This example clusters two point blobs with each of the ready-made
//! configurations and prints the resulting groups.
//!
//! Run with: cargo run --example presets

use metacluster::algorithm::{ClusterAlgorithm, ProcessConfig};
use metacluster::core::Cluster;
use metacluster::presets;

fn print_clusters(name: &str, algorithm: &ClusterAlgorithm, data: &Cluster, config: &ProcessConfig) {
    println!("--- {} ---", name);
    match algorithm.process(data, config) {
        Ok(clusters) => {
            println!("{} clusters", clusters.len());
            for (i, cluster) in clusters.iter().enumerate() {
                let mut members = cluster.indexes();
                members.sort_unstable();
                println!("  cluster {}: {:?}", i, members);
            }
        }
        Err(e) => println!("  failed: {}", e),
    }
    println!();
}

fn main() {
    println!("=== Preset Clustering Example ===\n");

    // Two blobs: points 0..8 near the origin, 8..16 near (30, 30)
    let mut data = Cluster::new(2);
    for i in 0..16 {
        let offset = if i < 8 { 0.0 } else { 30.0 };
        let x = offset + (i % 4) as f64 * 0.8;
        let y = offset + ((i / 4) % 2) as f64 * 0.8;
        data.add_element(vec![x, y], i).expect("points share one dimension");
    }
    println!("Clustering {} points\n", data.len());

    print_clusters(
        "k-means-like (target 2)",
        &presets::kmeans_like(),
        &data,
        &ProcessConfig::default().target_cluster_count(2).seed(42),
    );

    print_clusters(
        "hierarchical (threshold 5.0)",
        &presets::hierarchical(),
        &data,
        &ProcessConfig::default().split_params(vec![5.0]).seed(42),
    );

    print_clusters(
        "density (k = 3, alpha = 2.0)",
        &presets::density(),
        &data,
        &ProcessConfig::default()
            .conversion_params(vec![3.0, 2.0])
            .split_params(vec![0.5])
            .seed(42),
    );
}
