//! Utility functions for Markov sequences

use crate::graph::{Graph, Point2};
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

/// Serialize to pretty JSON
pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

/// Parse from JSON
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Random positioned graph on `n` vertices
///
/// Vertices are placed uniformly in the unit square; each vertex pair is
/// joined with probability `p`. The same seed gives the same graph.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let p = p.clamp(0.0, 1.0);

    let mut graph = Graph::new();
    let vertices: Vec<_> = (0..n)
        .map(|_| graph.add_positioned_vertex(Point2::new(rng.gen(), rng.gen())))
        .collect();

    for (i, &a) in vertices.iter().enumerate() {
        for &b in &vertices[i + 1..] {
            if rng.gen_bool(p) {
                graph.add_edge(a, b);
            }
        }
    }

    graph
}

/// Timing utilities
pub mod timing {
    use log::debug;
    use std::time::Instant;

    /// Scope timer, reported through `log` when dropped
    pub struct Timer {
        start: Instant,
        name: String,
    }

    impl Timer {
        /// Start new timer
        pub fn new(name: &str) -> Self {
            Timer {
                start: Instant::now(),
                name: name.to_string(),
            }
        }

        /// Elapsed seconds
        pub fn elapsed(&self) -> f32 {
            self.start.elapsed().as_secs_f32()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            debug!("{}: {:.3}s", self.name, self.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphSnapshot;

    #[test]
    fn test_random_graph_is_seeded() {
        let a = random_graph(8, 0.5, 7);
        let b = random_graph(8, 0.5, 7);
        assert_eq!(a.vertex_count(), 8);
        assert!(a.is_positioned());
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_random_graph_extremes() {
        assert_eq!(random_graph(6, 0.0, 1).edge_count(), 0);
        assert_eq!(random_graph(6, 1.0, 1).edge_count(), 15);
        assert_eq!(random_graph(0, 1.0, 1).vertex_count(), 0);
    }

    #[test]
    fn test_json_helpers() {
        let snapshot = random_graph(4, 1.0, 3).snapshot();
        let json = to_json(&snapshot).unwrap();
        let back: GraphSnapshot = from_json(&json).unwrap();
        assert_eq!(back.num_vertices, 4);
        assert_eq!(back.edges.num_edges(), 6);
        assert!(from_json::<GraphSnapshot>("[]").is_err());
    }
}
