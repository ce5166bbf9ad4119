//! Helpers for index-based sorting
//!
//! Records are never compared directly: keys are extracted once, a permutation
//! of indices is sorted against those keys, and the records are then gathered
//! in that order.

use std::cmp::Ordering;

/// Stable permutation that orders `keys` by `compare`
pub fn sorted_indices_by<K, F>(keys: &[K], mut compare: F) -> Vec<usize>
where
    F: FnMut(&K, &K) -> Ordering,
{
    let mut indices: Vec<usize> = (0..keys.len()).collect();
    // `sort_by` is stable, so equal keys keep their input order
    indices.sort_by(|&a, &b| compare(&keys[a], &keys[b]));
    indices
}

/// Gather items in the order given by `indices`
pub fn collect_by_indices<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    debug_assert_eq!(
        items.len(),
        indices.len(),
        "Indices length must match items length"
    );

    indices
        .iter()
        .map(|&idx| {
            debug_assert!(idx < items.len(), "Index out of bounds");
            items[idx].clone()
        })
        .collect()
}

/// Check if a slice is already sorted according to a comparison function
pub fn is_sorted_by<T, F>(items: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .all(|w| matches!(compare(&w[0], &w[1]), Ordering::Less | Ordering::Equal))
}
