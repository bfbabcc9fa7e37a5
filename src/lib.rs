//! Plurality-vote k-nearest-neighbors classification over labeled CSV data.
//!
//! ```
//! use knn_vote::{classify, DataPoint};
//!
//! let dataset = vec![
//!     DataPoint::new(vec![0.0, 0.0], "A"),
//!     DataPoint::new(vec![1.0, 0.0], "A"),
//!     DataPoint::new(vec![0.0, 5.0], "B"),
//! ];
//! assert_eq!(classify(2, &dataset, &[0.0, 0.0]), Ok("A"));
//! ```

pub mod common_types;
pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod knn;

#[cfg(feature = "python")]
mod python;

use tracing::info;

pub use common_types::{DataPoint, Dataset};
pub use config::KnnConfig;
pub use dataset::{load_dataset, read_dataset, save_dataset, write_dataset};
pub use distance::euclidean_distance;
pub use error::{ConfigError, Error, InvalidInput, LoadError, Result};
pub use knn::{classify, explain, nearest_neighbors, rank_neighbors, KnnClassifier, Neighbor, Prediction, Vote};

/// Loads the configured dataset and classifies the configured query point.
///
/// Load failures come back as [`Error::Load`], bad `k` or query dimensions
/// as [`Error::InvalidInput`].
pub fn run(config: &KnnConfig) -> Result<Prediction<String>> {
    let dataset = load_dataset(&config.dataset_path)?;
    let k = config.neighbor_count()?;
    let prediction = explain(k, &dataset, &config.query_point)?;
    info!(
        dataset = %config.dataset_path.display(),
        k,
        label = %prediction.label,
        "classified query point"
    );
    Ok(prediction)
}
