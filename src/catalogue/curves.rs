//! One-dimensional continua: Nöbeling, Menger and diamond curves

use super::{bonding, end};
use crate::grammar::{Grammar, Image, Production, EDGE, LEFT, RIGHT, VERTEX};
use crate::graph::Graph;
use crate::Result;

/// Approximations of the universal Nöbeling curve
///
/// Vertices become triangles, edges become the complete graph on the two
/// end triangles.
pub fn nobeling() -> Result<Grammar> {
    let triangle = [(0, 1), (1, 2), (0, 2)];

    let vertex = Production::new(
        Graph::from_positions(&[(0.0, 0.0), (1.0, 0.2), (0.8, 0.6)], &triangle),
        Graph::from_edges(1, &[]),
        bonding(&[
            (0, Image::single(0)),
            (1, Image::single(0)),
            (2, Image::single(0)),
        ]),
    );

    let mut k6 = Vec::with_capacity(15);
    for a in 0..6 {
        for b in a + 1..6 {
            k6.push((a, b));
        }
    }
    let edge = Production::new(
        Graph::from_positions(
            &[(-1.0, 0.0), (0.0, 0.2), (-0.2, 0.6), (1.0, 0.0), (2.0, 0.2), (1.8, 0.6)],
            &k6,
        ),
        Graph::from_edges(2, &[(0, 1)]),
        bonding(&[
            (0, Image::single(0)),
            (1, Image::single(0)),
            (2, Image::single(0)),
            (3, Image::single(1)),
            (4, Image::single(1)),
            (5, Image::single(1)),
        ]),
    );

    Grammar::builder("nobeling")
        .starting_graph(Graph::from_positions(&[(0.0, 1.0), (0.0, -1.0)], &[(0, 1)]))
        .production(VERTEX, vertex)
        .production(EDGE, edge)
        .gluing(LEFT, end(&[(0, 0), (1, 1), (2, 2)], 0))
        .gluing(RIGHT, end(&[(0, 3), (1, 4), (2, 5)], 1))
        .build()
}

/// The "18" approximations of the Menger curve
///
/// Vertices become segments, edges become a ladder of three rungs whose
/// outer rungs are the end segments.
pub fn menger18() -> Result<Grammar> {
    let vertex = Production::new(
        Graph::from_positions(&[(-1.0, 0.0), (1.0, 0.0)], &[(0, 1)]),
        Graph::from_edges(1, &[]),
        bonding(&[(0, Image::single(0)), (1, Image::single(0))]),
    );

    let edge = Production::new(
        Graph::from_positions(
            &[(-1.0, -1.0), (1.0, -1.0), (-1.0, 0.0), (1.0, 0.0), (-1.0, 1.0), (1.0, 1.0)],
            &[(0, 1), (4, 5), (0, 2), (1, 3), (2, 3), (2, 4), (3, 5)],
        ),
        Graph::from_edges(2, &[(0, 1)]),
        bonding(&[
            (0, Image::single(0)),
            (1, Image::single(0)),
            (2, Image::pair(0, 1)),
            (3, Image::pair(0, 1)),
            (4, Image::single(1)),
            (5, Image::single(1)),
        ]),
    );

    Grammar::builder("menger18")
        .starting_graph(Graph::from_positions(&[(-1.0, 0.0), (1.0, 0.0)], &[(0, 1)]))
        .production(VERTEX, vertex)
        .production(EDGE, edge)
        .gluing(LEFT, end(&[(0, 0), (1, 1)], 0))
        .gluing(RIGHT, end(&[(0, 4), (1, 5)], 1))
        .build()
}

/// The diamond fractal: every edge becomes a rhombus between its ends
pub fn diamond() -> Result<Grammar> {
    let vertex = Production::new(
        Graph::from_positions(&[(0.0, 0.0)], &[]),
        Graph::from_edges(1, &[]),
        bonding(&[(0, Image::single(0))]),
    );

    let edge = Production::new(
        Graph::from_positions(
            &[(0.0, 1.0), (-1.0, 0.0), (1.0, 0.0), (0.0, -1.0)],
            &[(0, 1), (0, 2), (1, 3), (2, 3)],
        ),
        Graph::from_edges(2, &[(0, 1)]),
        bonding(&[
            (0, Image::single(0)),
            (1, Image::pair(0, 1)),
            (2, Image::pair(0, 1)),
            (3, Image::single(1)),
        ]),
    );

    Grammar::builder("diamond")
        .starting_graph(Graph::from_positions(&[(0.0, -1.0), (0.0, 1.0)], &[(0, 1)]))
        .production(VERTEX, vertex)
        .production(EDGE, edge)
        .gluing(LEFT, end(&[(0, 0)], 0))
        .gluing(RIGHT, end(&[(0, 3)], 1))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nobeling_edge_pattern_is_complete() {
        let grammar = nobeling().unwrap();
        let top = grammar.production(EDGE).unwrap().top();
        assert_eq!(top.edge_count(), 15);
        assert!(top.vertices().all(|v| top.degree(v) == 5));
    }

    #[test]
    fn test_menger18_rungs() {
        let grammar = menger18().unwrap();
        let edge = grammar.production(EDGE).unwrap();
        let middle = edge.fibre(edge.bottom().vertex(0));
        assert_eq!(middle.len(), 2);
        assert_eq!(edge.top().degree(edge.top().vertex(2)), 3);
    }
}
