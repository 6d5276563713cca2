//! Bookkeeping graph of production applications

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Handle of an assembly node
pub type AssemblyNode = NodeIndex<u32>;

/// Records which production applies where and how applications are glued
///
/// Nodes are labelled by production, edges by gluing. An edge runs from a
/// dependent node to the node it depends on: the dependency's top pattern
/// is glued into the dependent's through the edge's gluing.
#[derive(Clone, Debug, Default)]
pub struct AssemblyGraph {
    inner: DiGraph<String, String>,
}

impl AssemblyGraph {
    /// Create an empty assembly graph
    pub fn new() -> Self {
        AssemblyGraph {
            inner: DiGraph::new(),
        }
    }

    /// Add a node applying `production`
    pub fn add_node(&mut self, production: impl Into<String>) -> AssemblyNode {
        self.inner.add_node(production.into())
    }

    /// Glue `dependency`'s pattern into `dependent`'s through `gluing`
    pub fn link(&mut self, dependent: AssemblyNode, dependency: AssemblyNode, gluing: impl Into<String>) {
        self.inner.add_edge(dependent, dependency, gluing.into());
    }

    /// Production label of a node
    pub fn production(&self, node: AssemblyNode) -> Option<&str> {
        self.inner.node_weight(node).map(String::as_str)
    }

    /// Nodes `node` depends on, with the gluing labels, in link order
    pub fn dependencies(&self, node: AssemblyNode) -> Vec<(AssemblyNode, String)> {
        let mut links: Vec<_> = self
            .inner
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), e.weight().clone()))
            .collect();
        links.sort_by_key(|(id, _, _)| *id);
        links.into_iter().map(|(_, target, label)| (target, label)).collect()
    }

    /// Nodes depending on `node`
    pub fn dependents(&self, node: AssemblyNode) -> Vec<AssemblyNode> {
        self.inner.neighbors_directed(node, Direction::Incoming).collect()
    }

    /// Iterate over nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = AssemblyNode> + '_ {
        self.inner.node_indices()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of links
    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Number of nodes applying `production`
    pub fn count_of(&self, production: &str) -> usize {
        self.inner.node_weights().filter(|p| p.as_str() == production).count()
    }

    /// True when no chain of dependencies returns to its start
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies_in_link_order() {
        let mut ag = AssemblyGraph::new();
        let a = ag.add_node("vertex");
        let b = ag.add_node("vertex");
        let e = ag.add_node("edge");
        ag.link(e, a, "left");
        ag.link(e, b, "right");

        assert_eq!(
            ag.dependencies(e),
            vec![(a, "left".to_string()), (b, "right".to_string())]
        );
        assert!(ag.dependencies(a).is_empty());
        assert_eq!(ag.dependents(a), vec![e]);
        assert_eq!(ag.count_of("vertex"), 2);
        assert_eq!(ag.link_count(), 2);
        assert!(ag.is_acyclic());
    }

    #[test]
    fn test_cycle_detected() {
        let mut ag = AssemblyGraph::new();
        let a = ag.add_node("edge");
        let b = ag.add_node("edge");
        ag.link(a, b, "left");
        ag.link(b, a, "left");
        assert!(!ag.is_acyclic());
    }
}
