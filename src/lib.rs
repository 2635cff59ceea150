//! # suffreq - Substring Frequency Engine
//!
//! suffreq builds a suffix tree over a text with Ukkonen's online algorithm
//! and answers substring frequency questions from it: how many letter-only
//! substrings of at least a given length occur, and which of them occur most
//! often.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`tree`] - Alphabet validation, arena storage and tree construction
//! - [`query`] - Occurrence counting, qualifying totals and top-N ranking
//! - [`output`] - Table and bar chart rendering of reports
//! - [`error`] - Typed errors for construction and queries
//! - [`utils`] - Sample text generators and the construction spinner
//!
//! ## Quick Start
//!
//! ```
//! use suffreq::{construct, query};
//!
//! let tree = construct("hall feels heels").unwrap();
//! let report = query(&tree, 10, 4).unwrap();
//!
//! assert_eq!(report.total, 7);
//! assert_eq!(report.entries[0].substring, "eels");
//! ```
//!
//! ## Performance
//!
//! Construction is linear in the text length. Nodes and edges live in one
//! arena addressed by `u32` handles, and every traversal uses an explicit
//! stack, so deep trees built from repetitive text never recurse.

pub mod error;
pub mod output;
pub mod query;
pub mod tree;
pub mod utils;

pub use error::{QueryError, TreeError, ValidationError};
pub use query::{query, FrequencyReport, QueryConfig, SubstringFrequency};
pub use tree::{construct, SuffixTree};
