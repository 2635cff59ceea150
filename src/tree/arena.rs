//! Monotonic storage for one tree's nodes and edges
//!
//! Nothing is freed individually; dropping the arena releases the whole tree.

use super::types::*;
use crate::error::TreeError;

#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Arena {
    /// Create an arena sized for a text of `text_len` symbols
    ///
    /// A suffix tree over `n` symbols has at most `2n` real edges and `n`
    /// internal nodes, plus the bootstrap structure.
    pub fn with_text_len(text_len: usize, virtual_edges: usize) -> Result<Self, TreeError> {
        let mut arena = Self::default();
        arena
            .nodes
            .try_reserve(text_len.saturating_add(2))
            .map_err(|_| TreeError::ResourceExhausted { what: "tree nodes" })?;
        arena
            .edges
            .try_reserve(text_len.saturating_mul(2).saturating_add(virtual_edges))
            .map_err(|_| TreeError::ResourceExhausted { what: "tree edges" })?;
        Ok(arena)
    }

    pub fn alloc_node(&mut self) -> Result<NodeId, TreeError> {
        let id = u32::try_from(self.nodes.len())
            .map_err(|_| TreeError::ResourceExhausted { what: "node ids" })?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| TreeError::ResourceExhausted { what: "tree nodes" })?;
        self.nodes.push(Node::default());
        Ok(NodeId(id))
    }

    pub fn alloc_edge(
        &mut self,
        label: Label,
        begin_node: NodeId,
        end_node: Option<NodeId>,
    ) -> Result<EdgeId, TreeError> {
        let id = u32::try_from(self.edges.len())
            .map_err(|_| TreeError::ResourceExhausted { what: "edge ids" })?;
        self.edges
            .try_reserve(1)
            .map_err(|_| TreeError::ResourceExhausted { what: "tree edges" })?;
        self.edges.push(Edge {
            label,
            begin_node,
            end_node,
            occurrences: 0,
        });
        Ok(EdgeId(id))
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeId(i as u32), edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut arena = Arena::with_text_len(4, 2).unwrap();
        let a = arena.alloc_node().unwrap();
        let b = arena.alloc_node().unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);

        let label = Label::Real { begin: 0, end: EdgeEnd::Open };
        let e = arena.alloc_edge(label, a, Some(b)).unwrap();
        assert_eq!(e.index(), 0);
        assert_eq!(arena.edge(e).begin_node(), a);
        assert_eq!(arena.edge(e).end_node(), Some(b));
        assert_eq!(arena.edge(e).occurrences(), 0);
        assert_eq!(arena.node_count(), 2);
        assert_eq!(arena.edge_count(), 1);
    }

    #[test]
    fn test_mutation_through_ids() {
        let mut arena = Arena::default();
        let root = arena.alloc_node().unwrap();
        let other = arena.alloc_node().unwrap();
        arena.node_mut(other).suffix_link = Some(root);
        assert_eq!(arena.node(other).suffix_link(), Some(root));
        assert_eq!(arena.node(root).suffix_link(), None);
    }

    #[test]
    fn test_oversized_reservation_fails_cleanly() {
        let err = Arena::with_text_len(usize::MAX / 2, 0).unwrap_err();
        assert!(matches!(err, TreeError::ResourceExhausted { .. }));
    }
}
