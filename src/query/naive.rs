//! Brute-force substring counting
//!
//! Splits the text into maximal runs of letters and counts every substring of
//! every run. Quadratic in run length; only meant for small inputs and for
//! checking the tree-based results.

use super::{FrequencyReport, SubstringFrequency};
use crate::tree::alphabet::is_letter;
use rustc_hash::FxHashMap;

/// Count letter-only substrings of at least `min_length` symbols by
/// enumeration
///
/// Entries are sorted by descending occurrence count, ties by descending
/// text, and cut to `limit` unless it is zero. A `min_length` of zero is
/// treated as one.
pub fn naive_frequencies(text: &[u8], limit: usize, min_length: usize) -> FrequencyReport {
    let min_length = min_length.max(1);
    let mut counts: FxHashMap<&[u8], u64> = FxHashMap::default();
    let mut total = 0u64;

    for word in text
        .split(|&b| !is_letter(b))
        .filter(|word| word.len() >= min_length)
    {
        for len in min_length..=word.len() {
            for window in word.windows(len) {
                *counts.entry(window).or_insert(0) += 1;
                total += 1;
            }
        }
    }

    let mut entries: Vec<SubstringFrequency> = counts
        .into_iter()
        .map(|(substring, occurrences)| SubstringFrequency {
            substring: substring.iter().map(|&b| char::from(b)).collect(),
            occurrences,
            percentage: 100.0 * occurrences as f64 / total as f64,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| b.substring.cmp(&a.substring))
    });
    if limit > 0 {
        entries.truncate(limit);
    }

    FrequencyReport {
        entries,
        total,
        min_length,
    }
}
