//! Numeric helpers shared by the strategy functions.

pub mod stats;

pub use stats::{column_means, mean, median, population_std_dev, population_variance};
