//! The finished, read-only suffix tree

use super::alphabet::ALPHABET;
use super::arena::Arena;
use super::types::*;
use serde::Serialize;
use std::io::{self, Write};

/// Suffix tree over one text plus its terminator
///
/// Built by [`construct`](super::construct); never mutated afterwards, so any
/// number of queries may run against it.
#[derive(Debug)]
pub struct SuffixTree {
    pub(crate) arena: Arena,
    /// Source text with the terminator appended
    pub(crate) text: Vec<u8>,
    pub(crate) root: NodeId,
    pub(crate) pre_root: NodeId,
    /// Index open edges resolve to
    pub(crate) frontier: usize,
}

/// Size figures of a built tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Length of the source text, terminator excluded
    pub text_len: usize,
    /// Root and internal nodes
    pub nodes: usize,
    /// Real edges
    pub edges: usize,
    /// Leaf edges, one per suffix
    pub leaves: usize,
    /// Bootstrap edges hanging off the pre-root
    pub virtual_edges: usize,
}

impl SuffixTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn pre_root(&self) -> NodeId {
        self.pre_root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.arena.edge(id)
    }

    /// Source text without the terminator
    pub fn text(&self) -> &[u8] {
        &self.text[..self.text.len() - 1]
    }

    /// Source text including the terminator
    pub fn terminated_text(&self) -> &[u8] {
        &self.text
    }

    #[inline]
    pub fn edge_len(&self, id: EdgeId) -> usize {
        self.arena.edge(id).label.len(self.frontier)
    }

    /// Symbols spelled by an edge
    pub fn edge_bytes(&self, id: EdgeId) -> &[u8] {
        match self.arena.edge(id).label {
            Label::Real { begin, end } => {
                let end = match end {
                    EdgeEnd::Open => self.frontier,
                    EdgeEnd::Closed(end) => end,
                };
                &self.text[begin..=end]
            }
            Label::Virtual { symbol } => ALPHABET
                .iter()
                .position(|&b| b == symbol)
                .map(|i| &ALPHABET[i..=i])
                .unwrap_or(&[]),
        }
    }

    /// The `depth` symbols spelled from the root down to the start of `id`
    ///
    /// Every edge label is an occurrence of its path in the text, so the
    /// path sits right before the label's begin index.
    pub fn path_before(&self, id: EdgeId, depth: usize) -> &[u8] {
        match self.arena.edge(id).label {
            Label::Real { begin, .. } => &self.text[begin - depth..begin],
            Label::Virtual { .. } => &[],
        }
    }

    /// String spelled from the root to `node`, following inbound edges upward
    pub fn path_of(&self, node: NodeId) -> Vec<u8> {
        let mut pieces = Vec::new();
        let mut current = node;
        while let Some(edge) = self.arena.node(current).in_edge {
            pieces.push(self.edge_bytes(edge));
            current = self.arena.edge(edge).begin_node;
        }
        pieces.iter().rev().flat_map(|piece| piece.iter().copied()).collect()
    }

    /// Every non-virtual edge
    pub fn real_edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.arena.edges().filter(|(_, edge)| !edge.label.is_virtual())
    }

    pub fn leaf_count(&self) -> usize {
        self.real_edges().filter(|(_, edge)| edge.is_leaf()).count()
    }

    pub fn stats(&self) -> TreeStats {
        let virtual_edges = self.node(self.pre_root).child_count();
        TreeStats {
            text_len: self.text.len() - 1,
            nodes: self.arena.node_count() - 1,
            edges: self.arena.edge_count() - virtual_edges,
            leaves: self.leaf_count(),
            virtual_edges,
        }
    }

    /// Write every edge below the root, indented by depth, in pre-order
    ///
    /// Each edge line shows its label, `(begin, end)`, its first symbol and
    /// its occurrence count.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        enum Frame {
            Node(NodeId, usize),
            Edge(EdgeId, u8, usize),
        }

        let mut stack = vec![Frame::Node(self.root, 0)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Node(node, depth) => {
                    writeln!(out, "{:depth$}*", "")?;
                    for (symbol, edge) in self.node(node).children().rev() {
                        stack.push(Frame::Edge(edge, symbol, depth));
                    }
                }
                Frame::Edge(edge, symbol, depth) => {
                    let e = self.edge(edge);
                    let (begin, end) = match e.label {
                        Label::Real { begin, end } => (
                            begin,
                            match end {
                                EdgeEnd::Open => self.frontier,
                                EdgeEnd::Closed(end) => end,
                            },
                        ),
                        Label::Virtual { .. } => continue,
                    };
                    writeln!(
                        out,
                        " {:depth$}{} ({}, {}) '{}' occurrences={}",
                        "",
                        self.edge_bytes(edge).escape_ascii(),
                        begin,
                        end,
                        symbol.escape_ascii(),
                        e.occurrences,
                    )?;
                    if let Some(next) = e.end_node {
                        stack.push(Frame::Node(next, depth + 1));
                    }
                }
            }
        }
        Ok(())
    }
}
