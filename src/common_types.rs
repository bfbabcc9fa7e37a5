//! This module contains the data structures shared by the loader and the classifier.

use serde::{Deserialize, Serialize};

/// Represents a single labeled observation.
///
/// - `F`: The type of the features (`f64` for anything read from disk).
/// - `L`: The type of the label (`String` for anything read from disk).
///
/// Every point of a dataset that is classified against must have the same
/// number of features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint<F = f64, L = String> {
    pub features: Vec<F>,
    pub label: L,
}

impl<F, L> DataPoint<F, L> {
    pub fn new(features: Vec<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    /// Number of features of this point.
    pub fn dimensions(&self) -> usize {
        self.features.len()
    }
}

/// An ordered sequence of data points. Row order is kept from load to
/// classification since equal-distance neighbors are ranked by it.
pub type Dataset<F = f64, L = String> = Vec<DataPoint<F, L>>;
