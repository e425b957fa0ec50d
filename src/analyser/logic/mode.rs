//! Frequency helpers shared by the statistics passes.
//!
//! Ties are always broken by first appearance, so every result is
//! deterministic for a given row order.

use super::types::FrequencyTable;
use std::collections::HashMap;
use std::hash::Hash;

/// Counts of each distinct value, in first-appearance order.
fn tally<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        if let Some(&pos) = positions.get(&value) {
            if let Some(entry) = counts.get_mut(pos) {
                entry.1 += 1;
            }
        } else {
            positions.insert(value.clone(), counts.len());
            counts.push((value, 1));
        }
    }
    counts
}

/// Most frequent value, or `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    for (value, count) in tally(values) {
        // strict `>` keeps the earliest value on ties
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Value counts sorted by descending count; equal counts keep first-appearance order.
pub fn frequency_table<I>(values: I) -> FrequencyTable
where
    I: IntoIterator<Item = String>,
{
    let mut entries = tally(values);
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    FrequencyTable { entries }
}
