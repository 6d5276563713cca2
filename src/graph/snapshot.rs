//! Serializable export of a graph for external renderers

use super::{Graph, Point2};
use crate::{MarkovError, Result};
use ndarray::{Array1, Array2};
use serde::{Serialize, Deserialize};

/// Edge list representation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeList {
    /// First endpoint of each edge
    pub src: Vec<usize>,
    /// Second endpoint of each edge
    pub dst: Vec<usize>,
}

impl EdgeList {
    /// Create from endpoint pairs
    pub fn from_edges(edges: Vec<(usize, usize)>) -> Self {
        let (src, dst): (Vec<_>, Vec<_>) = edges.into_iter().unzip();
        EdgeList { src, dst }
    }

    /// Number of edges
    pub fn num_edges(&self) -> usize {
        self.src.len()
    }

    /// Adjacency lists, each edge recorded in both directions
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is not below `num_vertices`.
    pub fn to_adjacency_list(&self, num_vertices: usize) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); num_vertices];

        for (s, d) in self.src.iter().zip(&self.dst) {
            adj[*s].push(*d);
            adj[*d].push(*s);
        }

        adj
    }
}

/// Plain-data copy of a graph and its embedding
///
/// Missing positions are exported as `NaN`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Number of vertices
    pub num_vertices: usize,

    /// Edge connectivity
    pub edges: EdgeList,

    /// Vertex positions `[num_vertices, 2]`
    pub positions: Array2<f64>,
}

impl GraphSnapshot {
    /// Capture a graph
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let edges = EdgeList::from_edges(
            graph.edges().map(|(a, b)| (a.index(), b.index())).collect(),
        );

        let mut positions = Array2::from_elem((n, 2), f64::NAN);
        for (i, pos) in graph.positions().into_iter().enumerate() {
            if let Some(p) = pos {
                positions[[i, 0]] = p.x;
                positions[[i, 1]] = p.y;
            }
        }

        GraphSnapshot {
            num_vertices: n,
            edges,
            positions,
        }
    }

    /// Check that edges and positions agree with `num_vertices`
    ///
    /// Snapshots read back from JSON should pass this before
    /// [`adjacency_matrix`](GraphSnapshot::adjacency_matrix) or
    /// [`degrees`](GraphSnapshot::degrees) are called on them.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vertices;
        let malformed = |reason: String| MarkovError::MalformedPattern {
            owner: "snapshot".to_string(),
            reason,
        };

        if self.edges.src.len() != self.edges.dst.len() {
            return Err(malformed(format!(
                "{} edge sources but {} edge targets",
                self.edges.src.len(),
                self.edges.dst.len()
            )));
        }
        if let Some((i, (s, d))) = self
            .edges
            .src
            .iter()
            .zip(&self.edges.dst)
            .enumerate()
            .find(|&(_, (&s, &d))| s >= n || d >= n)
        {
            return Err(malformed(format!(
                "edge {} ({}, {}) leaves the {} vertices",
                i, s, d, n
            )));
        }
        if self.positions.dim() != (n, 2) {
            return Err(malformed(format!(
                "positions have shape {:?}, expected ({}, 2)",
                self.positions.dim(),
                n
            )));
        }
        Ok(())
    }

    /// Dense symmetric adjacency matrix
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not below `num_vertices`; see
    /// [`validate`](GraphSnapshot::validate).
    pub fn adjacency_matrix(&self) -> Array2<f32> {
        let n = self.num_vertices;
        let mut adj = Array2::zeros((n, n));

        for (s, d) in self.edges.src.iter().zip(&self.edges.dst) {
            adj[[*s, *d]] = 1.0;
            adj[[*d, *s]] = 1.0;
        }

        adj
    }

    /// Vertex degrees
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is not below `num_vertices`.
    pub fn degrees(&self) -> Array1<f32> {
        let mut degrees = Array1::zeros(self.num_vertices);

        for (s, d) in self.edges.src.iter().zip(&self.edges.dst) {
            degrees[*s] += 1.0;
            degrees[*d] += 1.0;
        }

        degrees
    }

    /// Smallest axis-aligned box containing every positioned vertex
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        let mut bounds: Option<(Point2, Point2)> = None;

        for row in self.positions.outer_iter() {
            let (x, y) = (row[0], row[1]);
            if x.is_nan() || y.is_nan() {
                continue;
            }
            bounds = Some(match bounds {
                None => (Point2::new(x, y), Point2::new(x, y)),
                Some((lo, hi)) => (
                    Point2::new(lo.x.min(x), lo.y.min(y)),
                    Point2::new(hi.x.max(x), hi.y.max(y)),
                ),
            });
        }

        bounds
    }
}

impl Graph {
    /// Export a plain-data snapshot
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from_graph(self)
    }
}
