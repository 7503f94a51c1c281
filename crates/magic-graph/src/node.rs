//! The symbol graph: one [`SymbolGraphNode`] per detected symbol,
//! linked by explicit and inferred parent/child edges, memoizing the
//! parsed [`AstNode`] once computed.

use std::collections::BTreeMap;

use magic_core::SymbolId;

use crate::ast::AstNode;

/// A single symbol's place in the graph: its connections to other
/// symbols and, once parsed, its cached AST node.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraphNode {
    /// Whether this node has already been folded into an AST node.
    pub visited: bool,
    /// The memoized parse result, set the first time this node is
    /// visited.
    pub ast_node: Option<AstNode>,
    /// The inferred or explicit parents, in attachment order. Most
    /// symbols have at most one; an operator can have two (its nearest
    /// operand squares, attached one `attach_child` call at a time).
    pub parents: Vec<SymbolId>,
    /// Children in graph-build order.
    pub children: Vec<SymbolId>,
}

/// An arena of [`SymbolGraphNode`]s keyed by [`SymbolId`], built from
/// the detected symbols and their explicit/inferred connections.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    nodes: BTreeMap<SymbolId, SymbolGraphNode>,
}

impl SymbolGraph {
    /// Builds an empty graph with one node per id in `symbol_ids`.
    pub fn new(symbol_ids: impl IntoIterator<Item = SymbolId>) -> Self {
        let nodes = symbol_ids.into_iter().map(|id| (id, SymbolGraphNode::default())).collect();
        SymbolGraph { nodes }
    }

    /// Returns the node for `id`, if present.
    pub fn get(&self, id: SymbolId) -> Option<&SymbolGraphNode> {
        self.nodes.get(&id)
    }

    /// Returns a mutable reference to the node for `id`, if present.
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut SymbolGraphNode> {
        self.nodes.get_mut(&id)
    }

    /// Iterates over all symbol ids currently in the graph, in id order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.nodes.keys().copied()
    }

    /// Links `child` under `parent`. `parent` is appended to `child`'s
    /// parent list rather than overwriting it, so a node attached from
    /// more than one parent (an operator claimed by two operand
    /// squares) keeps every edge.
    pub fn attach_child(&mut self, parent: SymbolId, child: SymbolId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            if !node.children.contains(&child) {
                node.children.push(child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            if !node.parents.contains(&parent) {
                node.parents.push(parent);
            }
        }
    }

    /// Whether `id` has already been folded into an AST node.
    pub fn is_visited(&self, id: SymbolId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.visited)
    }

    /// Caches `ast_node` for `id` and marks it visited.
    pub fn set_ast_node(&mut self, id: SymbolId, ast_node: AstNode) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.ast_node = Some(ast_node);
            node.visited = true;
        }
    }

    /// Marks `id` visited without caching an AST node, for nodes
    /// consumed purely as sub-expressions rather than folded into a
    /// statement of their own.
    pub fn mark_visited(&mut self, id: SymbolId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visited = true;
        }
    }

    /// Returns the memoized AST node for `id`, if already parsed.
    pub fn ast_node(&self, id: SymbolId) -> Option<&AstNode> {
        self.nodes.get(&id).and_then(|n| n.ast_node.as_ref())
    }

    /// The children of `id` in graph-build order, or an empty slice if
    /// `id` is unknown.
    pub fn children(&self, id: SymbolId) -> &[SymbolId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The first-attached parent of `id`, if any. Most symbols have at
    /// most one parent, so this is the common-case accessor; an
    /// operator's second operand is only visible through [`Self::parents`].
    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        self.nodes.get(&id).and_then(|n| n.parents.first().copied())
    }

    /// All parents of `id`, in attachment order, or an empty slice if
    /// `id` is unknown or has none.
    pub fn parents(&self, id: SymbolId) -> &[SymbolId] {
        self.nodes.get(&id).map(|n| n.parents.as_slice()).unwrap_or(&[])
    }

    /// Root nodes: those with no parent edge.
    pub fn roots(&self) -> Vec<SymbolId> {
        self.nodes.iter().filter(|(_, n)| n.parents.is_empty()).map(|(id, _)| *id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaching_a_child_links_both_directions() {
        let mut graph = SymbolGraph::new([SymbolId::from_index(0), SymbolId::from_index(1)]);
        graph.attach_child(SymbolId::from_index(0), SymbolId::from_index(1));
        assert_eq!(graph.children(SymbolId::from_index(0)), &[SymbolId::from_index(1)]);
        assert_eq!(graph.parent(SymbolId::from_index(1)), Some(SymbolId::from_index(0)));
    }

    #[test]
    fn attaching_from_two_parents_keeps_both_in_attachment_order() {
        let mut graph = SymbolGraph::new([SymbolId::from_index(0), SymbolId::from_index(1), SymbolId::from_index(2)]);
        graph.attach_child(SymbolId::from_index(0), SymbolId::from_index(2));
        graph.attach_child(SymbolId::from_index(1), SymbolId::from_index(2));
        assert_eq!(graph.parents(SymbolId::from_index(2)), &[SymbolId::from_index(0), SymbolId::from_index(1)]);
        assert_eq!(graph.parent(SymbolId::from_index(2)), Some(SymbolId::from_index(0)));
    }

    #[test]
    fn roots_are_nodes_without_a_parent() {
        let mut graph = SymbolGraph::new([SymbolId::from_index(0), SymbolId::from_index(1), SymbolId::from_index(2)]);
        graph.attach_child(SymbolId::from_index(0), SymbolId::from_index(1));
        assert_eq!(graph.roots(), vec![SymbolId::from_index(0), SymbolId::from_index(2)]);
    }

    #[test]
    fn memoization_marks_visited_and_caches_the_node() {
        use crate::ast::{DataType, Expression};

        let mut graph = SymbolGraph::new([SymbolId::from_index(0)]);
        assert!(!graph.is_visited(SymbolId::from_index(0)));
        graph.set_ast_node(
            SymbolId::from_index(0),
            AstNode::Expression(Expression::Identifier { name: "x".into(), data_type: DataType::Integer }),
        );
        assert!(graph.is_visited(SymbolId::from_index(0)));
        assert!(graph.ast_node(SymbolId::from_index(0)).is_some());
    }
}
