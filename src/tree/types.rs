//! Types for suffix tree storage
//!
//! Nodes and edges reference each other through arena indices, so suffix
//! links and parent pointers never own anything.

use crate::error::TreeError;

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

/// Index of an edge (real or virtual) in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Right end of an edge label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// Follows the construction frontier
    Open,
    /// Inclusive index into the text
    Closed(usize),
}

/// What an edge spells out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Inclusive range `[begin, end]` of the source text
    Real { begin: usize, end: EdgeEnd },
    /// Bootstrap edge from the pre-root to the root carrying one symbol
    Virtual { symbol: u8 },
}

impl Label {
    /// Inclusive end index, resolving an open end to `frontier`
    #[inline]
    pub fn end_index(&self, frontier: usize) -> Option<usize> {
        match *self {
            Label::Real { end: EdgeEnd::Closed(end), .. } => Some(end),
            Label::Real { end: EdgeEnd::Open, .. } => Some(frontier),
            Label::Virtual { .. } => None,
        }
    }

    /// Number of symbols on the edge
    #[inline]
    pub fn len(&self, frontier: usize) -> usize {
        match *self {
            Label::Real { begin, end } => {
                let end = match end {
                    EdgeEnd::Open => frontier,
                    EdgeEnd::Closed(end) => end,
                };
                end + 1 - begin
            }
            Label::Virtual { .. } => 1,
        }
    }

    /// Symbol at `offset` from the start of the edge
    #[inline]
    pub fn byte_at(&self, text: &[u8], offset: usize) -> u8 {
        match *self {
            Label::Real { begin, .. } => text[begin + offset],
            Label::Virtual { symbol } => symbol,
        }
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, Label::Virtual { .. })
    }
}

/// Branch point of the tree
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Outgoing edges with their first symbol, sorted by symbol
    pub(crate) children: Vec<(u8, EdgeId)>,
    /// Node spelling this node's path without its first symbol
    pub(crate) suffix_link: Option<NodeId>,
    /// The single edge leading here (none for the root and pre-root)
    pub(crate) in_edge: Option<EdgeId>,
}

impl Node {
    #[inline]
    pub fn child(&self, symbol: u8) -> Option<EdgeId> {
        self.children
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| self.children[i].1)
    }

    /// Outgoing edges in ascending symbol order
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (u8, EdgeId)> + '_ {
        self.children.iter().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Attach `edge` under `symbol`, replacing an existing child
    pub(crate) fn set_child(&mut self, symbol: u8, edge: EdgeId) -> Result<(), TreeError> {
        match self.children.binary_search_by_key(&symbol, |&(s, _)| s) {
            Ok(i) => self.children[i].1 = edge,
            Err(i) => {
                self.children
                    .try_reserve(1)
                    .map_err(|_| TreeError::ResourceExhausted { what: "child edges" })?;
                self.children.insert(i, (symbol, edge));
            }
        }
        Ok(())
    }

    pub fn suffix_link(&self) -> Option<NodeId> {
        self.suffix_link
    }

    pub fn in_edge(&self) -> Option<EdgeId> {
        self.in_edge
    }
}

/// Edge between two nodes, or from a node to a leaf
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) label: Label,
    pub(crate) begin_node: NodeId,
    /// `None` means the edge ends in a leaf
    pub(crate) end_node: Option<NodeId>,
    /// Leaves below this edge; zero until the count pass has run
    pub(crate) occurrences: u64,
}

impl Edge {
    pub fn label(&self) -> Label {
        self.label
    }

    pub fn begin_node(&self) -> NodeId {
        self.begin_node
    }

    pub fn end_node(&self) -> Option<NodeId> {
        self.end_node
    }

    pub fn is_leaf(&self) -> bool {
        self.end_node.is_none()
    }

    /// Occurrences of the string spelled from the root to this edge's end
    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }
}
