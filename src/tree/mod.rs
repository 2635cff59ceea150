//! Suffix tree construction module
//!
//! This module builds a suffix tree over one text in a single left-to-right
//! pass using Ukkonen's algorithm.
//!
//! ## Architecture
//!
//! - `alphabet`: Accepted symbols, the terminator and input validation
//! - `arena`: Index-addressed storage owning every node and edge
//! - `builder`: The online construction itself
//! - `suffix_tree`: The finished tree and read-only accessors
//! - `types`: Node, edge and label definitions
//!
//! ## Layout
//!
//! The text gets a `$` terminator, so every suffix ends in its own leaf. Above
//! the root sits a pre-root with one single-symbol virtual edge per alphabet
//! symbol; the root's suffix link points there.

pub mod alphabet;
pub mod arena;
pub mod builder;
pub mod suffix_tree;
pub mod types;

// Re-exports for convenience
pub use alphabet::{validate, ALPHABET, TERMINATOR};
pub use builder::{construct, TreeBuilder};
pub use suffix_tree::{SuffixTree, TreeStats};
pub use types::{Edge, EdgeEnd, EdgeId, Label, Node, NodeId};
