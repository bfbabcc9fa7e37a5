//! Bounded max-heap that keeps the k nearest neighbors seen so far.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat; // For using f64 in BinaryHeap

use super::Neighbor;

/// Heap entry ordered by `(distance, index)`.
///
/// The index takes part in the ordering so that, among equal distances, the
/// later dataset row is the one evicted first. The retained set is then
/// exactly the first k entries of a stable ascending sort.
#[derive(Debug, Clone, Copy)]
struct HeapElement {
    distance: OrderedFloat<f64>,
    index: usize,
}

impl HeapElement {
    fn key(&self) -> (OrderedFloat<f64>, usize) {
        (self.distance, self.index)
    }
}

impl PartialEq for HeapElement {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for HeapElement {}

impl PartialOrd for HeapElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the farthest retained neighbor sits on top.
        self.key().cmp(&other.key())
    }
}

/// Manages the `capacity` nearest neighbors offered so far.
#[derive(Debug)]
pub struct KBestNeighbors {
    capacity: usize,
    heap: BinaryHeap<HeapElement>,
}

impl KBestNeighbors {
    pub fn new(capacity: usize) -> Self {
        KBestNeighbors {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1), // +1 for easier logic
        }
    }

    pub fn add(&mut self, neighbor: Neighbor) {
        if self.capacity == 0 {
            return;
        }
        let item = HeapElement { distance: OrderedFloat(neighbor.distance), index: neighbor.index };
        if self.heap.len() < self.capacity {
            self.heap.push(item);
        } else if self.heap.peek().is_some_and(|farthest| item < *farthest) {
            self.heap.pop();
            self.heap.push(item);
        }
    }

    /// Distance of the farthest retained neighbor, once the heap is full.
    pub fn current_farthest_distance(&self) -> Option<f64> {
        if self.heap.len() == self.capacity {
            self.heap.peek().map(|heap_elem| heap_elem.distance.0)
        } else {
            None // Not full yet
        }
    }

    /// Consumes the heap, nearest first.
    pub fn into_sorted_neighbors(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|elem| Neighbor { index: elem.index, distance: elem.distance.0 })
            .collect()
    }

    /// Returns the current number of neighbors stored.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
