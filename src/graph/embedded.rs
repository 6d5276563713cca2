//! Undirected simple graphs with optional planar embedding

use super::Point2;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Serialize, Deserialize};

/// Vertex handle, valid only inside the graph that created it
pub type Vertex = NodeIndex<u32>;

/// Attributes attached to every vertex
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexAttrs {
    /// Position in the plane, once laid out
    pub pos: Option<Point2>,
    /// Pattern-local coordinate recorded while assembling a refinement
    pub relpos: Option<Point2>,
}

/// An undirected simple graph whose vertices may carry positions
///
/// Vertices are never removed, so handles stay dense: the `i`-th added
/// vertex is `graph.vertex(i)`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: UnGraph<VertexAttrs, ()>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Graph {
            inner: UnGraph::default(),
        }
    }

    /// Create a graph with `n` unpositioned vertices and the given edges
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not below `n`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Graph::new();
        for _ in 0..n {
            graph.add_vertex();
        }
        for &(a, b) in edges {
            graph.add_edge(graph.vertex(a), graph.vertex(b));
        }
        graph
    }

    /// Create a graph with one positioned vertex per entry and the given edges
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not below `positions.len()`.
    pub fn from_positions(positions: &[(f64, f64)], edges: &[(usize, usize)]) -> Self {
        let mut graph = Graph::new();
        for &p in positions {
            graph.add_positioned_vertex(p.into());
        }
        for &(a, b) in edges {
            graph.add_edge(graph.vertex(a), graph.vertex(b));
        }
        graph
    }

    /// Add a vertex without attributes
    pub fn add_vertex(&mut self) -> Vertex {
        self.inner.add_node(VertexAttrs::default())
    }

    /// Add a vertex at the given position
    pub fn add_positioned_vertex(&mut self, pos: Point2) -> Vertex {
        self.inner.add_node(VertexAttrs {
            pos: Some(pos),
            relpos: None,
        })
    }

    /// Add a vertex carrying the given attributes
    pub fn add_vertex_with(&mut self, attrs: VertexAttrs) -> Vertex {
        self.inner.add_node(attrs)
    }

    /// Add the edge `{a, b}` unless it is already present
    ///
    /// Returns `true` if a new edge was created.
    pub fn add_edge(&mut self, a: Vertex, b: Vertex) -> bool {
        if self.inner.find_edge(a, b).is_some() {
            return false;
        }
        self.inner.add_edge(a, b, ());
        true
    }

    /// Check for the edge `{a, b}`
    pub fn has_edge(&self, a: Vertex, b: Vertex) -> bool {
        self.inner.find_edge(a, b).is_some()
    }

    /// Handle of the `i`-th vertex
    pub fn vertex(&self, i: usize) -> Vertex {
        NodeIndex::new(i)
    }

    /// Check that a handle refers to a vertex of this graph
    pub fn contains(&self, v: Vertex) -> bool {
        v.index() < self.inner.node_count()
    }

    /// Iterate over vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.inner.node_indices()
    }

    /// Iterate over edges as endpoint pairs
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.inner.edge_references().map(|e| (e.source(), e.target()))
    }

    /// Neighbours of a vertex
    pub fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.inner.neighbors(v)
    }

    /// Number of edges incident to a vertex
    pub fn degree(&self, v: Vertex) -> usize {
        self.inner.edges(v).count()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Attributes of a vertex
    pub fn attrs(&self, v: Vertex) -> Option<&VertexAttrs> {
        self.inner.node_weight(v)
    }

    /// Position of a vertex, if laid out
    pub fn position(&self, v: Vertex) -> Option<Point2> {
        self.attrs(v).and_then(|a| a.pos)
    }

    /// Set the position of a vertex; unknown handles are ignored
    pub fn set_position(&mut self, v: Vertex, pos: Point2) {
        if let Some(attrs) = self.inner.node_weight_mut(v) {
            attrs.pos = Some(pos);
        }
    }

    /// Pattern-local coordinate of a vertex
    pub fn relative_position(&self, v: Vertex) -> Option<Point2> {
        self.attrs(v).and_then(|a| a.relpos)
    }

    /// True when every vertex has a position
    pub fn is_positioned(&self) -> bool {
        self.inner.node_weights().all(|a| a.pos.is_some())
    }

    /// Positions of all vertices in insertion order
    pub fn positions(&self) -> Vec<Option<Point2>> {
        self.inner.node_weights().map(|a| a.pos).collect()
    }
}
