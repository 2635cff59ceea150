//! Occurrence counting and substring frequency queries
//!
//! After construction every edge knows how many leaves hang below it, which
//! is how often the string spelled from the root to the edge's end occurs in
//! the text. Frequency queries only read those counts; all traversals use an
//! explicit stack because a tree can be as deep as its text is long.

use super::SubstringFrequency;
use crate::error::TreeError;
use crate::tree::alphabet::is_letter;
use crate::tree::{EdgeId, NodeId, SuffixTree};
use std::collections::BTreeMap;
use tracing::trace;

/// Fill in `occurrences` on every real edge
///
/// A leaf edge occurs once; any other edge occurs as often as all of its
/// children together.
pub(crate) fn count_occurrences(tree: &mut SuffixTree) -> Result<(), TreeError> {
    // Every edge and node is visited at most once, so neither vector grows
    // past its reservation
    let mut order: Vec<EdgeId> = Vec::new();
    order
        .try_reserve_exact(tree.arena.edge_count())
        .map_err(|_| TreeError::ResourceExhausted { what: "count order" })?;
    let mut stack: Vec<NodeId> = Vec::new();
    stack
        .try_reserve_exact(tree.arena.node_count())
        .map_err(|_| TreeError::ResourceExhausted { what: "count stack" })?;

    // Parents precede their children in `order`
    stack.push(tree.root);
    while let Some(node) = stack.pop() {
        for (_, edge) in tree.arena.node(node).children() {
            order.push(edge);
            if let Some(next) = tree.arena.edge(edge).end_node {
                stack.push(next);
            }
        }
    }

    for &edge in order.iter().rev() {
        let occurrences = match tree.arena.edge(edge).end_node {
            None => 1,
            Some(node) => tree
                .arena
                .node(node)
                .children()
                .map(|(_, child)| tree.arena.edge(child).occurrences)
                .sum(),
        };
        tree.arena.edge_mut(edge).occurrences = occurrences;
    }
    Ok(())
}

/// Number of leading letters in an edge label
#[inline]
fn letter_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| is_letter(b)).count()
}

/// Edge waiting in a frequency bucket
#[derive(Debug, Clone, Copy)]
struct Candidate {
    edge: EdgeId,
    /// Symbols from the root to the start of the edge
    depth: usize,
    /// Leading letters of the label that may be reported
    letters: usize,
    /// The label holds a non-letter after `letters`
    truncated: bool,
}

/// Candidates grouped by occurrence count; the largest count is served first
type Buckets = BTreeMap<u64, Vec<Candidate>>;

impl SuffixTree {
    /// Number of letter-only substring occurrences of length at least
    /// `min_length`
    ///
    /// Every occurrence counts, so a substring found three times adds three.
    pub fn count_at_least(&self, min_length: usize) -> u64 {
        let mut total = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            for (_, edge) in self.node(node).children() {
                let bytes = self.edge_bytes(edge);
                let letters = letter_run(bytes);
                let occurrences = self.edge(edge).occurrences();

                // Lengths depth+1 ..= depth+letters end on this edge
                let shortest = min_length.max(depth + 1);
                let longest = depth + letters;
                if longest >= shortest {
                    total += (longest - shortest + 1) as u64 * occurrences;
                }

                if letters == bytes.len() {
                    if let Some(next) = self.edge(edge).end_node() {
                        stack.push((next, depth + letters));
                    }
                }
            }
        }
        total
    }

    /// Most frequent letter-only substrings of length at least `min_length`
    ///
    /// Returns at most `limit` entries (`0` for all of them) ordered by
    /// non-increasing occurrence count. Equal counts keep discovery order:
    /// the last sibling pushed comes first, and one edge yields its
    /// substrings shortest first.
    pub fn top_substrings(&self, limit: usize, min_length: usize) -> Vec<SubstringFrequency> {
        let total = self.count_at_least(min_length);
        self.top_substrings_of(limit, min_length, total)
    }

    pub(crate) fn top_substrings_of(
        &self,
        limit: usize,
        min_length: usize,
        total: u64,
    ) -> Vec<SubstringFrequency> {
        let mut results = Vec::new();
        if total == 0 {
            return results;
        }

        let mut buckets = self.seed_buckets(min_length);

        loop {
            let (occurrences, candidate) = {
                let Some(mut bucket) = buckets.last_entry() else {
                    break;
                };
                let occurrences = *bucket.key();
                match bucket.get_mut().pop() {
                    Some(candidate) => (occurrences, candidate),
                    None => {
                        bucket.remove();
                        continue;
                    }
                }
            };

            let prefix = self.path_before(candidate.edge, candidate.depth);
            let label = self.edge_bytes(candidate.edge);
            let percentage = 100.0 * occurrences as f64 / total as f64;

            let shortest = min_length.saturating_sub(candidate.depth).max(1);
            for cutoff in shortest..=candidate.letters {
                let substring = prefix
                    .iter()
                    .chain(&label[..cutoff])
                    .map(|&b| char::from(b))
                    .collect();
                results.push(SubstringFrequency {
                    substring,
                    occurrences,
                    percentage,
                });
                if limit > 0 && results.len() >= limit {
                    return results;
                }
            }

            if candidate.truncated {
                continue;
            }
            if let Some(next) = self.edge(candidate.edge).end_node() {
                let depth = candidate.depth + candidate.letters;
                for (_, child) in self.node(next).children() {
                    let bytes = self.edge_bytes(child);
                    let letters = letter_run(bytes);
                    if letters == 0 {
                        continue;
                    }
                    buckets
                        .entry(self.edge(child).occurrences())
                        .or_default()
                        .push(Candidate {
                            edge: child,
                            depth,
                            letters,
                            truncated: letters < bytes.len(),
                        });
                }
            }
        }

        results
    }

    /// Bucket every edge on which a letter-only path first reaches
    /// `min_length`, visiting siblings in ascending symbol order
    fn seed_buckets(&self, min_length: usize) -> Buckets {
        let mut buckets = Buckets::new();
        let mut stack: Vec<(EdgeId, usize)> = self
            .node(self.root)
            .children()
            .rev()
            .map(|(_, edge)| (edge, 0))
            .collect();

        while let Some((edge, depth)) = stack.pop() {
            let bytes = self.edge_bytes(edge);
            let letters = letter_run(bytes);
            let truncated = letters < bytes.len();

            if depth + letters >= min_length {
                buckets
                    .entry(self.edge(edge).occurrences())
                    .or_default()
                    .push(Candidate {
                        edge,
                        depth,
                        letters,
                        truncated,
                    });
            } else if !truncated {
                if let Some(next) = self.edge(edge).end_node() {
                    for (_, child) in self.node(next).children().rev() {
                        stack.push((child, depth + letters));
                    }
                }
            }
        }

        trace!(
            buckets = buckets.len(),
            candidates = buckets.values().map(Vec::len).sum::<usize>(),
            "seeded frequency buckets"
        );
        buckets
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::construct;

    fn top(text: &str, limit: usize, min_length: usize) -> Vec<(String, u64)> {
        construct(text)
            .unwrap()
            .top_substrings(limit, min_length)
            .into_iter()
            .map(|f| (f.substring, f.occurrences))
            .collect()
    }

    #[test]
    fn test_root_counts_sum_to_suffix_count() {
        for text in ["", "a", "banana", "hall feels heels", "abab abab"] {
            let tree = construct(text).unwrap();
            let root = tree.node(tree.root());
            let sum: u64 = root
                .children()
                .map(|(_, edge)| tree.edge(edge).occurrences())
                .sum();
            assert_eq!(sum, text.len() as u64 + 1, "text {:?}", text);
        }
    }

    #[test]
    fn test_counts_equal_leaves_below() {
        let tree = construct("mississippi").unwrap();
        let node = tree.node(tree.root());
        let s = tree.edge(node.child(b's').unwrap());
        // "s" occurs 4 times
        assert_eq!(s.occurrences(), 4);
        let i = tree.edge(node.child(b'i').unwrap());
        assert_eq!(i.occurrences(), 4);
        let m = tree.edge(node.child(b'm').unwrap());
        assert_eq!(m.occurrences(), 1);
    }

    #[test]
    fn test_count_at_least_single_run() {
        let tree = construct("aaaa").unwrap();
        // lengths 4: 1, 3: 2, 2: 3, 1: 4
        assert_eq!(tree.count_at_least(4), 1);
        assert_eq!(tree.count_at_least(3), 3);
        assert_eq!(tree.count_at_least(2), 6);
        assert_eq!(tree.count_at_least(1), 10);
        assert_eq!(tree.count_at_least(5), 0);
    }

    #[test]
    fn test_count_at_least_stops_at_non_letters() {
        let tree = construct("ab cd, ef").unwrap();
        assert_eq!(tree.count_at_least(1), 9);
        assert_eq!(tree.count_at_least(2), 3);
        assert_eq!(tree.count_at_least(3), 0);
    }

    #[test]
    fn test_aaaa_boundary() {
        let tree = construct("aaaa").unwrap();
        let results = tree.top_substrings(10, 4);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].substring, "aaaa");
        assert_eq!(results[0].occurrences, 1);
        assert_eq!(results[0].percentage, 100.0);
    }

    #[test]
    fn test_hall_feels_heels() {
        assert_eq!(
            top("hall feels heels", 10, 4),
            vec![
                ("eels".to_string(), 2),
                ("heel".to_string(), 1),
                ("heels".to_string(), 1),
                ("hall".to_string(), 1),
                ("feel".to_string(), 1),
                ("feels".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_limit_stops_mid_edge() {
        let results = top("hall feels heels", 4, 4);
        assert_eq!(results.len(), 4);
        assert_eq!(results[3], ("hall".to_string(), 1));
    }

    #[test]
    fn test_unbounded_returns_every_distinct_substring() {
        // distinct substrings of "abcab" with length >= 2: ab, abc, abca, abcab,
        // bc, bca, bcab, ca, cab
        let results = top("abcab", 0, 2);
        assert_eq!(results.len(), 9);
        assert_eq!(results[0], ("ab".to_string(), 2));
        assert!(results[1..].iter().all(|(_, n)| *n == 1));
    }

    #[test]
    fn test_percentages_use_total() {
        let tree = construct("abab abab").unwrap();
        let total = tree.count_at_least(2);
        for entry in tree.top_substrings(0, 2) {
            assert_eq!(entry.percentage, 100.0 * entry.occurrences as f64 / total as f64);
        }
    }

    #[test]
    fn test_no_letters_no_results() {
        let tree = construct("12 34 ...").unwrap();
        assert_eq!(tree.count_at_least(1), 0);
        assert!(tree.top_substrings(10, 1).is_empty());
    }
}
