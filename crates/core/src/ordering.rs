//! Ordering engine for sibling collections.
//!
//! `sort_order` values are advisory sort keys: not required to be unique
//! or contiguous, ties broken by lowest id. These helpers compute the
//! values; persistence is the repositories' concern.

use crate::types::DbId;

/// Orders for a batch appended after all existing items.
///
/// `max_existing` is the current maximum order in the collection (or
/// `None` when empty, treated as 0). Item `i` of the batch gets
/// `max + 1 + i`, preserving submission order.
pub fn append_orders(max_existing: Option<i32>, count: usize) -> Vec<i32> {
    let base = max_existing.unwrap_or(0);
    (0..count as i32).map(|i| base + 1 + i).collect()
}

/// Orders for media attached at project creation: `0..count` in
/// submission order.
pub fn initial_orders(count: usize) -> Vec<i32> {
    (0..count as i32).collect()
}

/// Index of the cover candidate: the item with the minimum
/// `(sort_order, id)` key. `None` when the collection is empty, in which
/// case the caller leaves the existing cover untouched.
pub fn cover_index(keys: &[(i32, DbId)]) -> Option<usize> {
    keys.iter()
        .enumerate()
        .min_by_key(|(_, key)| **key)
        .map(|(idx, _)| idx)
}
