//! Frequency queries over a finished suffix tree
//!
//! - `frequency`: occurrence counting, qualifying totals and top-N ranking
//! - `naive`: brute-force enumeration used to cross-check the tree

pub mod frequency;
pub mod naive;

use crate::error::QueryError;
use crate::tree::SuffixTree;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One ranked substring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstringFrequency {
    pub substring: String,
    /// Times the substring occurs in the text
    pub occurrences: u64,
    /// `occurrences` as a share of all qualifying substring occurrences
    pub percentage: f64,
}

/// Result of a frequency query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    /// Ranked substrings, most frequent first
    pub entries: Vec<SubstringFrequency>,
    /// Occurrences of all letter-only substrings at least `min_length` long
    pub total: u64,
    pub min_length: usize,
}

/// Query parameters as read from a config file or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Maximum number of substrings to report; zero or negative means all
    pub top_n: i64,
    /// Shortest substring length to consider; must be positive
    pub min_length: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            min_length: 4,
        }
    }
}

impl QueryConfig {
    /// Check the parameters and turn them into `(limit, min_length)`, where a
    /// limit of zero means unbounded
    pub fn limits(&self) -> Result<(usize, usize), QueryError> {
        if self.min_length <= 0 {
            return Err(QueryError::InvalidMinimumLength(self.min_length));
        }
        let min_length = usize::try_from(self.min_length).unwrap_or(usize::MAX);
        let limit = if self.top_n <= 0 {
            0
        } else {
            usize::try_from(self.top_n).unwrap_or(usize::MAX)
        };
        Ok((limit, min_length))
    }

    pub fn run(&self, tree: &SuffixTree) -> Result<FrequencyReport, QueryError> {
        query(tree, self.top_n, self.min_length)
    }
}

/// Rank the most frequent letter-only substrings of at least `min_length`
/// symbols
///
/// `top_n <= 0` returns every qualifying substring. The tree is only read,
/// so repeated queries on one tree give identical reports.
pub fn query(tree: &SuffixTree, top_n: i64, min_length: i64) -> Result<FrequencyReport, QueryError> {
    let (limit, min_length) = QueryConfig { top_n, min_length }.limits()?;

    let total = tree.count_at_least(min_length);
    let entries = tree.top_substrings_of(limit, min_length, total);

    debug!(
        limit,
        min_length,
        total,
        returned = entries.len(),
        "frequency query done"
    );

    Ok(FrequencyReport {
        entries,
        total,
        min_length,
    })
}
