//! Cantor sets and their join

use super::{bonding, end};
use crate::grammar::{Grammar, Image, Production, EDGE, LEFT, RIGHT, VERTEX};
use crate::graph::Graph;
use crate::Result;

fn double_vertex() -> Production {
    Production::new(
        Graph::from_positions(&[(0.0, -1.0), (0.0, 1.0)], &[]),
        Graph::from_edges(1, &[]),
        bonding(&[(0, Image::single(0)), (1, Image::single(0))]),
    )
}

/// The middle-thirds Cantor set: every vertex splits in two, no edges
pub fn cantor() -> Result<Grammar> {
    Grammar::builder("cantor")
        .starting_graph(Graph::from_positions(&[(0.0, 0.0)], &[]))
        .production(VERTEX, double_vertex())
        .build()
}

/// Join of two Cantor sets
///
/// Vertices split in two as in [`cantor`]; every edge becomes the complete
/// bipartite graph between the two halves of its ends. Top vertices
/// `a`, `c` sit over the left end, `b`, `d` over the right one.
pub fn cantor_join() -> Result<Grammar> {
    let x_to_i = Production::new(
        Graph::from_positions(
            &[(0.0, 1.0), (1.0, 1.0), (0.0, 0.0), (1.0, 0.0)],
            &[(0, 1), (2, 3), (0, 3), (1, 2)],
        ),
        Graph::from_edges(2, &[(0, 1)]),
        bonding(&[
            (0, Image::single(0)),
            (1, Image::single(1)),
            (2, Image::single(0)),
            (3, Image::single(1)),
        ]),
    );

    Grammar::builder("cantor-join")
        .starting_graph(Graph::from_positions(&[(0.0, 0.0), (0.0, 1.0)], &[(0, 1)]))
        .production(VERTEX, double_vertex())
        .production(EDGE, x_to_i)
        .gluing(LEFT, end(&[(0, 0), (1, 2)], 0))
        .gluing(RIGHT, end(&[(0, 1), (1, 3)], 1))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::Decomposition;
    use crate::graph::Point2;

    #[test]
    fn test_cantor_doubles() {
        let grammar = cantor().unwrap();
        assert!(!grammar.has_edge_rules());

        let mut graph = grammar.starting_graph().clone();
        for level in 1..=4 {
            let m = 0.4f64.powi(level as i32 - 1);
            graph = Decomposition::refine(&grammar, graph, Point2::new(0.0, m), Point2::new(0.0, m)).unwrap();
            assert_eq!(graph.vertex_count(), 1 << level);
            assert_eq!(graph.edge_count(), 0);
        }

        // Points stay on the vertical axis and do not collide
        let mut ys: Vec<f64> = graph.positions().into_iter().map(|p| p.unwrap().y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(graph.positions().iter().all(|p| p.unwrap().x == 0.0));
        assert!(ys.windows(2).all(|w| w[1] - w[0] > 1e-9));
    }

    #[test]
    fn test_cantor_join_is_bipartite_between_ends() {
        let grammar = cantor_join().unwrap();
        let refined = Decomposition::refine(
            &grammar,
            grammar.starting_graph().clone(),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
        )
        .unwrap();

        assert_eq!((refined.vertex_count(), refined.edge_count()), (4, 4));
        assert!(refined.vertices().all(|v| refined.degree(v) == 2));
    }
}
