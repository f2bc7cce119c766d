//! Aggregations over a filtered [`TripTable`](crate::data::model::TripTable).
//!
//! Each submodule exposes one stateless function taking `&TripTable`. They do
//! not depend on each other and never mutate the table.

pub mod demographics;
pub mod duration;
pub mod report;
pub mod stations;
pub mod time;
pub mod users;

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Most frequent value and its count.
///
/// Ties go to the smallest key in `Ord` order, so the result does not depend
/// on row order. `None` for an empty input.
pub fn mode<K, I>(values: I) -> Option<(K, usize)>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((key, count));
        }
    }
    best
}

/// Count per distinct value, most frequent first.
///
/// Equal counts keep the order in which the values were first seen.
pub fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for v in values {
        match slots.get(&v) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(v.clone(), counts.len());
                counts.push((v, 1));
            }
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
