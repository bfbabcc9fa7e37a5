//! K-nearest-neighbors classification by plurality vote.
//!
//! Every dataset point is measured against the query with
//! [`euclidean_distance`], the `k` closest are kept and their labels vote.
//!
//! Ordering rules, so results are reproducible:
//! - neighbors at equal distance are ranked by dataset row, lower row first;
//! - when several labels share the highest vote count, the label held by the
//!   nearest of the `k` neighbors wins.

pub mod heap_utils;

use std::collections::HashMap;
use std::hash::Hash;

use num_traits::{AsPrimitive, Float};
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::common_types::DataPoint;
use crate::distance::euclidean_distance;
use crate::error::InvalidInput;
use heap_utils::KBestNeighbors;

/// A dataset row paired with its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Number of votes a label collected among the k nearest neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote<L> {
    pub label: L,
    pub count: usize,
}

/// A classification together with the evidence it was reached from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<L> {
    pub label: L,
    /// The k nearest neighbors, nearest first.
    pub neighbors: Vec<Neighbor>,
    /// Vote tally, in order of each label's nearest neighbor.
    pub votes: Vec<Vote<L>>,
}

/// Checks the neighbor count against the dataset size.
fn check_k(k: usize, len: usize) -> Result<(), InvalidInput> {
    if len == 0 {
        return Err(InvalidInput::EmptyDataset);
    }
    if k == 0 {
        return Err(InvalidInput::NonPositiveK(0));
    }
    if k > len {
        return Err(InvalidInput::KExceedsDataset { k, len });
    }
    Ok(())
}

/// Distance from every dataset row to the query, in dataset order.
fn measure<'a, F, L>(
    dataset: &'a [DataPoint<F, L>],
    query: &'a [F],
) -> impl Iterator<Item = Result<Neighbor, InvalidInput>> + 'a
where
    F: Float + AsPrimitive<f64>,
{
    dataset.iter().enumerate().map(move |(index, point)| {
        if point.features.len() != query.len() {
            return Err(InvalidInput::DimensionMismatch {
                expected: query.len(),
                found: point.features.len(),
                index: Some(index),
            });
        }
        let distance = euclidean_distance(&point.features, query)?;
        Ok(Neighbor { index, distance })
    })
}

/// Ranks every dataset row by distance to `query`, nearest first.
///
/// The sort is stable, so rows at equal distance keep their dataset order.
pub fn rank_neighbors<F, L>(dataset: &[DataPoint<F, L>], query: &[F]) -> Result<Vec<Neighbor>, InvalidInput>
where
    F: Float + AsPrimitive<f64>,
{
    if dataset.is_empty() {
        return Err(InvalidInput::EmptyDataset);
    }
    let mut neighbors = measure(dataset, query).collect::<Result<Vec<_>, _>>()?;
    neighbors.sort_by_key(|neighbor| OrderedFloat(neighbor.distance));
    Ok(neighbors)
}

/// Returns the `k` nearest rows to `query`, nearest first.
///
/// Equivalent to the first `k` entries of [`rank_neighbors`], but only ever
/// holds `k` candidates.
pub fn nearest_neighbors<F, L>(k: usize, dataset: &[DataPoint<F, L>], query: &[F]) -> Result<Vec<Neighbor>, InvalidInput>
where
    F: Float + AsPrimitive<f64>,
{
    check_k(k, dataset.len())?;
    let mut best = KBestNeighbors::new(k);
    for neighbor in measure(dataset, query) {
        best.add(neighbor?);
    }
    if let Some(radius) = best.current_farthest_distance() {
        trace!(k, radius, "k-th neighbor distance");
    }
    Ok(best.into_sorted_neighbors())
}

/// Tallies the labels of `neighbors`. Labels appear in the order their first
/// (nearest) neighbor does.
fn tally<F, L>(dataset: &[DataPoint<F, L>], neighbors: &[Neighbor]) -> Vec<Vote<L>>
where
    L: Clone + Eq + Hash,
{
    let mut positions: HashMap<&L, usize> = HashMap::new();
    let mut votes: Vec<Vote<L>> = Vec::new();
    for neighbor in neighbors {
        let label = &dataset[neighbor.index].label;
        match positions.get(label) {
            Some(&pos) => votes[pos].count += 1,
            None => {
                positions.insert(label, votes.len());
                votes.push(Vote { label: label.clone(), count: 1 });
            }
        }
    }
    votes
}

/// Index of the winning vote: highest count, earliest entry on ties.
/// `votes` is never empty once `k >= 1` has been checked.
fn plurality<L>(votes: &[Vote<L>]) -> usize {
    let mut winner = 0;
    for (pos, vote) in votes.iter().enumerate().skip(1) {
        if vote.count > votes[winner].count {
            winner = pos;
        }
    }
    winner
}

/// Classifies `query` and returns the neighbors and votes behind the answer.
pub fn explain<F, L>(k: usize, dataset: &[DataPoint<F, L>], query: &[F]) -> Result<Prediction<L>, InvalidInput>
where
    F: Float + AsPrimitive<f64>,
    L: Clone + Eq + Hash,
{
    let neighbors = nearest_neighbors(k, dataset, query)?;
    let votes = tally(dataset, &neighbors);
    let winner = plurality(&votes);
    debug!(k, rows = dataset.len(), labels = votes.len(), "plurality vote done");
    Ok(Prediction { label: votes[winner].label.clone(), neighbors, votes })
}

/// Returns the label receiving the most votes among the `k` nearest rows.
///
/// # Errors
/// [`InvalidInput`] when the dataset is empty, `k` is 0 or larger than the
/// dataset, or a row's feature count differs from the query's.
pub fn classify<F, L>(k: usize, dataset: &[DataPoint<F, L>], query: &[F]) -> Result<L, InvalidInput>
where
    F: Float + AsPrimitive<f64>,
    L: Clone + Eq + Hash,
{
    explain(k, dataset, query).map(|prediction| prediction.label)
}

/// A reusable K-Nearest Neighbors classifier over an owned dataset.
#[derive(Debug, Clone)]
pub struct KnnClassifier<F = f64, L = String> {
    k: usize,
    training_data: Vec<DataPoint<F, L>>,
}

impl<F, L> KnnClassifier<F, L>
where
    F: Float + AsPrimitive<f64>,
    L: Clone + Eq + Hash,
{
    pub fn new(k: usize) -> Self {
        Self { k, training_data: Vec::new() }
    }

    /// Builds a classifier and fits it in one go.
    pub fn with_dataset(k: usize, training_data: Vec<DataPoint<F, L>>) -> Result<Self, InvalidInput> {
        let mut classifier = Self::new(k);
        classifier.fit(training_data)?;
        Ok(classifier)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn training_data(&self) -> &[DataPoint<F, L>] {
        &self.training_data
    }

    pub fn is_fitted(&self) -> bool {
        !self.training_data.is_empty()
    }

    /// Stores the training data after validating it.
    ///
    /// The data must be non-empty, hold at least `k` rows and have one
    /// feature count throughout. On error the previous training data is kept.
    pub fn fit(&mut self, training_data: Vec<DataPoint<F, L>>) -> Result<(), InvalidInput> {
        check_k(self.k, training_data.len())?;
        let dims = training_data[0].features.len();
        if let Some((index, point)) = training_data
            .iter()
            .enumerate()
            .find(|(_, point)| point.features.len() != dims)
        {
            return Err(InvalidInput::DimensionMismatch {
                expected: dims,
                found: point.features.len(),
                index: Some(index),
            });
        }
        debug!(rows = training_data.len(), dims, k = self.k, "classifier fitted");
        self.training_data = training_data;
        Ok(())
    }

    /// Predicts the label for a single query.
    pub fn predict_single(&self, test_sample_features: &[F]) -> Result<L, InvalidInput> {
        classify(self.k, &self.training_data, test_sample_features)
    }

    /// Predicts labels for a batch of queries, stopping at the first error.
    pub fn predict(&self, test_data: &[Vec<F>]) -> Result<Vec<L>, InvalidInput> {
        test_data.iter().map(|sample| self.predict_single(sample)).collect()
    }

    /// Like [`Self::predict_single`], with the neighbors and votes.
    pub fn explain(&self, test_sample_features: &[F]) -> Result<Prediction<L>, InvalidInput> {
        explain(self.k, &self.training_data, test_sample_features)
    }
}
