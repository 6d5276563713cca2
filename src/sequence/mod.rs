//! Iteration driver producing the graphs of a Markov sequence

mod config;

pub use config::{LevelBasis, SequenceConfig};

use crate::decomposition::Decomposition;
use crate::grammar::Grammar;
use crate::graph::{Graph, Point2};
use crate::utils::timing::Timer;
use crate::{MarkovError, Result};
use log::info;

/// An inverse sequence of graphs generated by one grammar
///
/// Level 0 is the grammar's starting graph; level `i + 1` is the refinement
/// of level `i`. Only the graphs are kept; each step's decomposition is
/// dropped once its upper graph is extracted.
pub struct MarkovSequence<'g> {
    grammar: &'g Grammar,
    levels: Vec<Graph>,
}

impl<'g> MarkovSequence<'g> {
    /// Start a sequence at the grammar's starting graph
    pub fn new(grammar: &'g Grammar) -> Self {
        MarkovSequence {
            grammar,
            levels: vec![grammar.starting_graph().clone()],
        }
    }

    /// Start a sequence at an arbitrary positioned graph
    pub fn from_graph(grammar: &'g Grammar, graph: Graph) -> Self {
        MarkovSequence {
            grammar,
            levels: vec![graph],
        }
    }

    /// Refine the last level once, returning the new level
    pub fn refine(&mut self, d1: Point2, d2: Point2) -> Result<&Graph> {
        let last = self.last().clone();
        let level = self.levels.len();
        let refined = {
            let _timer = Timer::new(&format!("{} level {}", self.grammar.name(), level));
            Decomposition::refine(self.grammar, last, d1, d2)?
        };

        info!(
            "{} level {}: {} vertices, {} edges",
            self.grammar.name(),
            level,
            refined.vertex_count(),
            refined.edge_count()
        );

        self.levels.push(refined);
        Ok(self.last())
    }

    /// Refine once per configured level
    pub fn run(&mut self, config: &SequenceConfig) -> Result<&Graph> {
        if config.is_empty() {
            return Err(MarkovError::InvalidState(
                "sequence configuration has no levels".to_string(),
            ));
        }
        for basis in &config.levels {
            self.refine(basis.d1, basis.d2)?;
        }
        Ok(self.last())
    }

    /// The grammar generating this sequence
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// All graphs so far, starting graph first
    pub fn levels(&self) -> &[Graph] {
        &self.levels
    }

    /// Graph at level `i`
    pub fn level(&self, i: usize) -> Option<&Graph> {
        self.levels.get(i)
    }

    /// Most refined graph so far
    pub fn last(&self) -> &Graph {
        // Never empty: construction pushes level 0
        &self.levels[self.levels.len() - 1]
    }

    /// Number of refinements performed
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// `(vertices, edges)` per level
    pub fn counts(&self) -> Vec<(usize, usize)> {
        self.levels
            .iter()
            .map(|g| (g.vertex_count(), g.edge_count()))
            .collect()
    }

    /// Hand over all levels
    pub fn into_levels(self) -> Vec<Graph> {
        self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue;
    use crate::utils::random_graph;
    use proptest::prelude::*;

    #[test]
    fn test_sequence_counts() {
        let grammar = catalogue::split_triangle().unwrap();
        let mut sequence = MarkovSequence::new(&grammar);
        sequence.run(&SequenceConfig::split_triangle().truncated(3)).unwrap();

        assert_eq!(sequence.depth(), 3);
        assert_eq!(sequence.counts(), vec![(2, 1), (5, 6), (23, 36), (131, 216)]);
        assert!(sequence.levels().iter().all(Graph::is_positioned));
    }

    #[test]
    fn test_refine_appends() {
        let grammar = catalogue::diamond().unwrap();
        let mut sequence = MarkovSequence::new(&grammar);
        let v = sequence.refine(Point2::new(1.0, 0.0), Point2::new(1.0, 0.0)).unwrap().vertex_count();
        assert_eq!(v, 4);
        assert_eq!(sequence.levels().len(), 2);
        assert_eq!(sequence.level(0).unwrap().vertex_count(), 2);
    }

    #[test]
    fn test_presets_run_on_their_grammars() {
        for grammar in catalogue::all().unwrap() {
            let config = SequenceConfig::preset(grammar.name()).unwrap().truncated(3);
            let law = grammar.scaling_law().unwrap();
            let start = grammar.starting_graph();

            let mut sequence = MarkovSequence::new(&grammar);
            sequence.run(&config).unwrap();
            assert_eq!(
                sequence.counts(),
                law.iterate(start.vertex_count(), start.edge_count(), config.len())
            );
        }
    }

    #[test]
    fn test_empty_config_rejected() {
        let grammar = catalogue::cantor().unwrap();
        let mut sequence = MarkovSequence::new(&grammar);
        assert!(matches!(
            sequence.run(&SequenceConfig::new(Vec::new())),
            Err(MarkovError::InvalidState(_))
        ));
        assert_eq!(sequence.depth(), 0);
    }

    #[test]
    fn test_failed_refinement_keeps_levels() {
        let grammar = catalogue::split_triangle().unwrap();
        let unpositioned = Graph::from_edges(3, &[(0, 1), (1, 2)]);
        let mut sequence = MarkovSequence::from_graph(&grammar, unpositioned);
        assert!(matches!(
            sequence.refine(Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)),
            Err(MarkovError::MissingPosition { .. })
        ));
        assert_eq!(sequence.levels().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_split_triangle_scaling(n in 1usize..12, p in 0.0f64..1.0, seed in any::<u64>()) {
            let grammar = catalogue::split_triangle().unwrap();
            let graph = random_graph(n, p, seed);
            let (v, e) = (graph.vertex_count(), graph.edge_count());

            let mut sequence = MarkovSequence::from_graph(&grammar, graph);
            sequence.refine(Point2::new(0.2, 0.0), Point2::new(0.0, 0.2)).unwrap();
            prop_assert_eq!(sequence.counts()[1], (v + 3 * e, 6 * e));
        }

        #[test]
        fn prop_bonding_total_over_upper(n in 1usize..10, p in 0.0f64..1.0, seed in any::<u64>()) {
            let grammar = catalogue::menger18().unwrap();
            let graph = random_graph(n, p, seed);
            let bottom_size = graph.vertex_count();

            let mut decomposition = grammar.decompose(graph).unwrap();
            decomposition.assemble().unwrap();
            let upper = decomposition.upper_graph().unwrap();
            let bonding = decomposition.bonding_map().unwrap();

            prop_assert!(bonding.is_total_over(upper));
            for (_, image) in bonding.iter() {
                prop_assert!(image.vertices().iter().all(|v| v.index() < bottom_size));
            }
        }
    }
}
