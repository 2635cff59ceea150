//! Online suffix tree construction (Ukkonen)
//!
//! The text is consumed one symbol per phase. Within a phase the active
//! point is extended until the symbol is already present below it:
//!
//! 1. Walk one symbol further along the current edge, or
//! 2. follow the child edge of the node the point rests on, or
//! 3. split the edge (or attach a leaf to the node), then jump along the
//!    suffix link to the next shorter suffix and try again.
//!
//! The pre-root with one virtual edge per alphabet symbol gives the root a
//! suffix link target, so the first extensions need no special case.

use super::alphabet::{validate, ALPHABET, TERMINATOR};
use super::arena::Arena;
use super::suffix_tree::SuffixTree;
use super::types::*;
use crate::error::TreeError;
use crate::query::frequency::count_occurrences;
use tracing::debug;

/// Validate `text`, build its suffix tree and count occurrences on every edge
pub fn construct(text: impl AsRef<[u8]>) -> Result<SuffixTree, TreeError> {
    TreeBuilder::new(text.as_ref())?.build()
}

/// Construction cursor: a position on an edge
///
/// `offset` is the index of the last matched symbol on the edge, so a point
/// at the last symbol of an edge stands for the edge's end node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePoint {
    edge: EdgeId,
    offset: usize,
}

/// Outcome of one extension step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extension {
    /// Symbol already present; carries the node the point hangs from
    Present(NodeId),
    /// A leaf was added; carries the node it was attached to
    Inserted(NodeId),
}

/// Builder state kept across phases
pub struct TreeBuilder {
    tree: SuffixTree,
    active: ActivePoint,
    previous: ActivePoint,
}

impl TreeBuilder {
    /// Validate the text and lay out the root, pre-root and virtual edges
    ///
    /// Fails before allocating anything if the text is rejected.
    pub fn new(text: &[u8]) -> Result<Self, TreeError> {
        validate(text)?;

        let mut owned = Vec::new();
        owned
            .try_reserve_exact(text.len() + 1)
            .map_err(|_| TreeError::ResourceExhausted { what: "source text" })?;
        owned.extend_from_slice(text);
        owned.push(TERMINATOR);

        let mut arena = Arena::with_text_len(owned.len(), ALPHABET.len())?;
        let root = arena.alloc_node()?;
        let pre_root = arena.alloc_node()?;
        arena.node_mut(root).suffix_link = Some(pre_root);
        arena.node_mut(pre_root).suffix_link = Some(pre_root);

        // The arena holds no edges yet, so this is the first virtual edge
        let start = EdgeId(arena.edge_count() as u32);
        for &symbol in ALPHABET {
            let edge = arena.alloc_edge(Label::Virtual { symbol }, pre_root, Some(root))?;
            arena.node_mut(pre_root).set_child(symbol, edge)?;
        }

        let active = ActivePoint { edge: start, offset: 0 };
        Ok(Self {
            tree: SuffixTree {
                arena,
                text: owned,
                root,
                pre_root,
                frontier: 0,
            },
            active,
            previous: active,
        })
    }

    /// Run every phase, close open edges and count occurrences
    pub fn build(mut self) -> Result<SuffixTree, TreeError> {
        // Node created by a split that still waits for its suffix link
        let mut pending: Option<NodeId> = None;

        for index in 0..self.tree.text.len() {
            self.tree.frontier = index;
            let symbol = self.tree.text[index];

            let last = loop {
                match self.extend(symbol)? {
                    Extension::Present(node) => break node,
                    Extension::Inserted(node) => {
                        if let Some(waiting) = pending {
                            self.link(waiting, node);
                        }
                        pending = Some(node);

                        self.previous = self.active;
                        self.active = self.next_point(self.active);

                        // Only happens on the virtual edges: every suffix of
                        // this phase is in the tree now
                        if self.previous == self.active {
                            break node;
                        }
                    }
                }
            };

            if let Some(waiting) = pending {
                self.link(waiting, last);
            }
        }

        // Open edges end at the terminator from now on
        self.tree.frontier = self.tree.text.len() - 1;

        let mut tree = self.tree;
        count_occurrences(&mut tree)?;

        let stats = tree.stats();
        debug!(
            text_len = stats.text_len,
            nodes = stats.nodes,
            edges = stats.edges,
            leaves = stats.leaves,
            "suffix tree built"
        );
        Ok(tree)
    }

    /// Set a suffix link unless the node already has one
    fn link(&mut self, from: NodeId, to: NodeId) {
        if from == to {
            return;
        }
        let node = self.tree.arena.node_mut(from);
        if node.suffix_link.is_none() {
            node.suffix_link = Some(to);
        }
    }

    /// Try to extend the active point by `symbol`
    ///
    /// On `Present` the point has moved; on `Inserted` it is left in place.
    fn extend(&mut self, symbol: u8) -> Result<Extension, TreeError> {
        let frontier = self.tree.frontier;
        let ActivePoint { edge, offset } = self.active;
        let (label, begin_node, end_node) = {
            let e = self.tree.arena.edge(edge);
            (e.label, e.begin_node, e.end_node)
        };

        if let Label::Real { begin, end } = label {
            if offset + 1 < label.len(frontier) {
                if self.tree.text[begin + offset + 1] == symbol {
                    self.active.offset += 1;
                    return Ok(Extension::Present(begin_node));
                }
                let node = self.split(edge, begin, end, offset, end_node)?;
                return Ok(Extension::Inserted(node));
            }
        }

        let node = end_node.expect("active point never rests on a leaf end");
        match self.tree.arena.node(node).child(symbol) {
            Some(child) => {
                self.active = ActivePoint { edge: child, offset: 0 };
                Ok(Extension::Present(node))
            }
            None => {
                let leaf = self.tree.arena.alloc_edge(
                    Label::Real { begin: frontier, end: EdgeEnd::Open },
                    node,
                    None,
                )?;
                self.tree.arena.node_mut(node).set_child(symbol, leaf)?;
                Ok(Extension::Inserted(node))
            }
        }
    }

    /// Split `edge` after `offset` and hang a new leaf for the frontier symbol
    /// off the new internal node
    fn split(
        &mut self,
        edge: EdgeId,
        begin: usize,
        end: EdgeEnd,
        offset: usize,
        end_node: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        let frontier = self.tree.frontier;
        let arena = &mut self.tree.arena;

        let node = arena.alloc_node()?;
        let remainder = arena.alloc_edge(
            Label::Real { begin: begin + offset + 1, end },
            node,
            end_node,
        )?;
        let leaf = arena.alloc_edge(
            Label::Real { begin: frontier, end: EdgeEnd::Open },
            node,
            None,
        )?;

        let upper = arena.edge_mut(edge);
        upper.label = Label::Real {
            begin,
            end: EdgeEnd::Closed(begin + offset),
        };
        upper.end_node = Some(node);

        if let Some(below) = end_node {
            arena.node_mut(below).in_edge = Some(remainder);
        }

        let text = &self.tree.text;
        let branch = arena.node_mut(node);
        branch.in_edge = Some(edge);
        branch.set_child(text[begin + offset + 1], remainder)?;
        branch.set_child(text[frontier], leaf)?;

        Ok(node)
    }

    /// Position of the active string with its first symbol removed
    ///
    /// Follows the suffix link of the edge's begin node, then skips down
    /// whole edges by length instead of comparing symbols.
    fn next_point(&self, point: ActivePoint) -> ActivePoint {
        let tree = &self.tree;
        let edge = tree.arena.edge(point.edge);
        if edge.label.is_virtual() && point.offset <= 1 {
            return point;
        }

        let mut node = tree
            .arena
            .node(edge.begin_node)
            .suffix_link
            .expect("every branching node has a suffix link");
        let mut walked = 0;
        let mut current = self.descend(node, edge.label.byte_at(&tree.text, 0));

        loop {
            let len = tree.edge_len(current);
            if walked + len > point.offset {
                break;
            }
            node = tree
                .arena
                .edge(current)
                .end_node
                .expect("skipped edges end in a node");
            walked += len;
            current = self.descend(node, edge.label.byte_at(&tree.text, walked));
        }

        ActivePoint {
            edge: current,
            offset: point.offset - walked,
        }
    }

    fn descend(&self, node: NodeId, symbol: u8) -> EdgeId {
        self.tree
            .arena
            .node(node)
            .child(symbol)
            .expect("suffix of a path in the tree is in the tree")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn leaf_paths(tree: &SuffixTree) -> Vec<Vec<u8>> {
        let mut paths = Vec::new();
        let mut stack = vec![(tree.root(), Vec::new())];
        while let Some((node, prefix)) = stack.pop() {
            for (_, edge) in tree.node(node).children() {
                let mut path = prefix.clone();
                path.extend_from_slice(tree.edge_bytes(edge));
                match tree.edge(edge).end_node() {
                    Some(next) => stack.push((next, path)),
                    None => paths.push(path),
                }
            }
        }
        paths.sort();
        paths
    }

    fn expected_suffixes(text: &[u8]) -> Vec<Vec<u8>> {
        let mut terminated = text.to_vec();
        terminated.push(TERMINATOR);
        let mut suffixes: Vec<Vec<u8>> =
            (0..terminated.len()).map(|i| terminated[i..].to_vec()).collect();
        suffixes.sort();
        suffixes
    }

    #[test]
    fn test_every_suffix_is_a_leaf() {
        for text in [
            &b"banana"[..],
            b"mississippi",
            b"abcabxabcd",
            b"aaaa",
            b"abababa",
            b"hall feels heels",
            b"xabxac",
            b"",
            b"a",
        ] {
            let tree = construct(text).unwrap();
            assert_eq!(leaf_paths(&tree), expected_suffixes(text), "text {:?}", text);
        }
    }

    #[test]
    fn test_branching_nodes_have_correct_suffix_links() {
        let text = b"abcabxabcd mississippi abab";
        let tree = construct(text).unwrap();

        let mut stack = vec![(tree.root(), Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if node != tree.root() {
                let link = tree.node(node).suffix_link().unwrap();
                assert_eq!(tree.path_of(link), path[1..].to_vec());
            }
            for (_, edge) in tree.node(node).children() {
                if let Some(next) = tree.edge(edge).end_node() {
                    let mut child = path.clone();
                    child.extend_from_slice(tree.edge_bytes(edge));
                    stack.push((next, child));
                }
            }
        }
    }

    #[test]
    fn test_in_edges_point_back() {
        let tree = construct(b"mississippi").unwrap();
        for (id, edge) in tree.real_edges() {
            if let Some(end) = edge.end_node() {
                assert_eq!(tree.node(end).in_edge(), Some(id));
            }
        }
        assert_eq!(tree.node(tree.root()).in_edge(), None);
    }

    #[test]
    fn test_open_edges_close_at_terminator() {
        let tree = construct(b"abc").unwrap();
        for (id, edge) in tree.real_edges() {
            if edge.is_leaf() {
                assert_eq!(edge.label().end_index(tree.frontier), Some(3));
                assert_eq!(*tree.edge_bytes(id).last().unwrap(), TERMINATOR);
            }
        }
    }

    #[test]
    fn test_rejects_before_building() {
        assert!(matches!(
            construct(b"price $5"),
            Err(TreeError::Validation(ValidationError::ReservedCharacterPresent { position: 6 }))
        ));
        assert!(matches!(
            construct(b"a|b"),
            Err(TreeError::Validation(ValidationError::InvalidCharacter { byte: b'|', position: 1 }))
        ));
    }

    #[test]
    fn test_next_point_is_identity_at_root() {
        let builder = TreeBuilder::new(b"ab").unwrap();
        let at_root = builder.active;
        assert_eq!(builder.next_point(at_root), at_root);
    }
}
