//! Ready-made grammars
//!
//! Every function returns a validated [`Grammar`] whose starting graph is
//! positioned, so it can be handed straight to a
//! [`MarkovSequence`](crate::MarkovSequence). Matching basis schedules live
//! in [`SequenceConfig`](crate::SequenceConfig).

mod cantor;
mod curves;

pub use cantor::{cantor, cantor_join};
pub use curves::{diamond, menger18, nobeling};

use crate::grammar::{Gluing, Grammar, Image, PartialMap, Production, EDGE, LEFT, RIGHT, VERTEX};
use crate::graph::Graph;
use crate::Result;

/// Every edge split into two triangles sharing its midpoint
///
/// The smallest grammar exercising both productions: each vertex becomes one
/// vertex, each edge a bow-tie of five vertices whose ends are the two
/// endpoint patterns.
pub fn split_triangle() -> Result<Grammar> {
    let vertex = Production::new(
        Graph::from_positions(&[(0.0, 0.0)], &[]),
        Graph::from_edges(1, &[]),
        bonding(&[(0, Image::single(0))]),
    );

    let edge = Production::new(
        Graph::from_positions(
            &[(-1.0, 0.0), (-0.5, 0.5), (0.0, 0.0), (0.5, 0.5), (1.0, 0.0)],
            &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (2, 4)],
        ),
        Graph::from_edges(2, &[(0, 1)]),
        bonding(&[
            (0, Image::single(0)),
            (1, Image::pair(0, 1)),
            (2, Image::pair(0, 1)),
            (3, Image::pair(0, 1)),
            (4, Image::single(1)),
        ]),
    );

    Grammar::builder("split-triangle")
        .starting_graph(Graph::from_positions(&[(-1.0, 0.0), (1.0, 0.0)], &[(0, 1)]))
        .production(VERTEX, vertex)
        .production(EDGE, edge)
        .gluing(LEFT, end(&[(0, 0)], 0))
        .gluing(RIGHT, end(&[(0, 4)], 1))
        .build()
}

/// Every grammar of the catalogue
pub fn all() -> Result<Vec<Grammar>> {
    Ok(vec![
        split_triangle()?,
        nobeling()?,
        menger18()?,
        diamond()?,
        cantor()?,
        cantor_join()?,
    ])
}

pub(crate) fn bonding(entries: &[(usize, Image)]) -> PartialMap {
    PartialMap::from_entries(entries.iter().copied())
}

/// Vertex-into-edge gluing: top vertices by index, the vertex bottom onto `bottom`
pub(crate) fn end(top: &[(usize, usize)], bottom: usize) -> Gluing {
    Gluing::new(
        VERTEX,
        EDGE,
        PartialMap::from_entries(top.iter().map(|&(u, v)| (u, Image::single(v)))),
        PartialMap::from_entries([(0, Image::single(bottom))]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::Decomposition;
    use crate::graph::Point2;

    fn check_levels(grammar: &Grammar, levels: usize) {
        let law = grammar.scaling_law().unwrap();
        let start = grammar.starting_graph();
        let expected = law.iterate(start.vertex_count(), start.edge_count(), levels);

        let mut graph = start.clone();
        for &(v, e) in &expected[1..] {
            graph = Decomposition::refine(grammar, graph, Point2::new(0.3, 0.0), Point2::new(0.0, 0.3)).unwrap();
            assert_eq!(
                (graph.vertex_count(), graph.edge_count()),
                (v, e),
                "grammar '{}'",
                grammar.name()
            );
            assert!(graph.is_positioned());
        }
    }

    #[test]
    fn test_catalogue_builds() {
        let names: Vec<String> = all().unwrap().iter().map(|g| g.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["split-triangle", "nobeling", "menger18", "diamond", "cantor", "cantor-join"]
        );
        for grammar in all().unwrap() {
            assert!(grammar.starting_graph().is_positioned());
        }
    }

    #[test]
    fn test_catalogue_counts_follow_scaling_law() {
        for grammar in all().unwrap() {
            check_levels(&grammar, 3);
        }
    }

    #[test]
    fn test_known_laws() {
        let law = |g: Result<Grammar>| {
            let law = g.unwrap().scaling_law().unwrap();
            (law.vertex_terms, law.edge_terms)
        };
        assert_eq!(law(split_triangle()), ((1, 3), (0, 6)));
        assert_eq!(law(menger18()), ((2, 2), (1, 5)));
        assert_eq!(law(diamond()), ((1, 2), (0, 4)));
        assert_eq!(law(cantor()), ((2, 0), (0, 0)));
        assert_eq!(law(cantor_join()), ((2, 0), (0, 4)));
    }

    #[test]
    fn test_diamond_sizes() {
        let grammar = diamond().unwrap();
        let law = grammar.scaling_law().unwrap();
        assert_eq!(law.iterate(2, 1, 3), vec![(2, 1), (4, 4), (12, 16), (44, 64)]);
    }
}
