//! One refinement step: decompose a graph, assemble its refinement, lay it out

mod assembly;
mod glue;

use crate::grammar::{Grammar, Image, PartialMap, EDGE, LEFT, RIGHT, VERTEX};
use crate::graph::{Graph, Point2, Vertex};
use crate::{MarkovError, Result};
use glue::{GlueIn, Refinement};
use log::debug;
use rayon::prelude::*;

pub use assembly::{AssemblyGraph, AssemblyNode};

/// Above this many upper vertices, positions are computed in parallel
const PARALLEL_LAYOUT_THRESHOLD: usize = 4096;

/// Working object for refining one graph with one grammar
///
/// Created by [`Decomposition::decompose`], populated by
/// [`assemble`](Decomposition::assemble), positioned once by
/// [`layout`](Decomposition::layout). Owns its graphs and charts; the
/// driver extracts the upper graph with
/// [`into_upper_graph`](Decomposition::into_upper_graph).
pub struct Decomposition<'g> {
    grammar: &'g Grammar,
    bottom_graph: Graph,
    assembly_graph: AssemblyGraph,
    lower_chart: Vec<PartialMap>,
    refinement: Option<Refinement>,
}

impl<'g> Decomposition<'g> {
    /// Build the assembly graph and lower charts of `graph`
    ///
    /// One vertex-production node per vertex; one edge-production node per
    /// edge, depending on its two endpoint nodes through the left and right
    /// gluings.
    pub fn decompose(grammar: &'g Grammar, graph: Graph) -> Result<Self> {
        let vertex = grammar.production(VERTEX)?;
        let base = vertex.bottom().vertex(0);

        let mut assembly_graph = AssemblyGraph::new();
        let mut lower_chart = Vec::with_capacity(graph.vertex_count() + graph.edge_count());
        let mut node_of = Vec::with_capacity(graph.vertex_count());

        for v in graph.vertices() {
            node_of.push(assembly_graph.add_node(VERTEX));
            let mut chart = PartialMap::new();
            chart.insert(base, v);
            lower_chart.push(chart);
        }

        if graph.edge_count() > 0 {
            grammar.production(EDGE)?;
            let end = |label: &str| -> Result<Vertex> {
                grammar
                    .gluing(label)?
                    .bottom_glue()
                    .single(base)
                    .ok_or_else(|| MarkovError::IncompletePattern {
                        owner: label.to_string(),
                        map: "bottom glue",
                        vertex: base.index(),
                    })
            };
            let (left, right) = (end(LEFT)?, end(RIGHT)?);

            for (v, w) in graph.edges() {
                let node = assembly_graph.add_node(EDGE);
                assembly_graph.link(node, node_of[v.index()], LEFT);
                assembly_graph.link(node, node_of[w.index()], RIGHT);

                let mut chart = PartialMap::new();
                chart.insert(left, v);
                chart.insert(right, w);
                lower_chart.push(chart);
            }
        }

        debug!(
            "decomposed {}V/{}E with '{}' into {} assembly nodes",
            graph.vertex_count(),
            graph.edge_count(),
            grammar.name(),
            assembly_graph.node_count()
        );

        Ok(Decomposition {
            grammar,
            bottom_graph: graph,
            assembly_graph,
            lower_chart,
            refinement: None,
        })
    }

    /// Assemble from a hand-built assembly graph and lower charts
    ///
    /// `lower_chart[i]` belongs to assembly node `i`.
    pub fn from_parts(
        grammar: &'g Grammar,
        bottom_graph: Graph,
        assembly_graph: AssemblyGraph,
        lower_chart: Vec<PartialMap>,
    ) -> Result<Self> {
        if lower_chart.len() != assembly_graph.node_count() {
            return Err(MarkovError::InvalidState(format!(
                "{} lower charts for {} assembly nodes",
                lower_chart.len(),
                assembly_graph.node_count()
            )));
        }

        Ok(Decomposition {
            grammar,
            bottom_graph,
            assembly_graph,
            lower_chart,
            refinement: None,
        })
    }

    /// Decompose, assemble and lay out in one call, returning the refined graph
    pub fn refine(grammar: &'g Grammar, graph: Graph, d1: Point2, d2: Point2) -> Result<Graph> {
        let mut decomposition = Decomposition::decompose(grammar, graph)?;
        decomposition.assemble()?;
        decomposition.layout(d1, d2)?;
        decomposition.into_upper_graph()
    }

    /// Glue every production pattern into a fresh upper graph
    ///
    /// Interface vertices shared by adjacent patterns are created once. On
    /// error nothing is kept; on an assembled decomposition this is a no-op.
    pub fn assemble(&mut self) -> Result<()> {
        if self.refinement.is_some() {
            return Ok(());
        }

        let mut glue = GlueIn::new(
            self.grammar,
            &self.assembly_graph,
            &self.lower_chart,
            &self.bottom_graph,
        );
        for node in self.assembly_graph.nodes() {
            glue.glue_in(node)?;
        }
        let refinement = glue.finish()?;

        debug!(
            "assembled {}V/{}E from {} assembly nodes",
            refinement.upper_graph.vertex_count(),
            refinement.upper_graph.edge_count(),
            self.assembly_graph.node_count()
        );

        self.refinement = Some(refinement);
        Ok(())
    }

    /// Position every upper vertex at `anchor + relpos.x * d1 + relpos.y * d2`
    ///
    /// The anchor is the bonded bottom vertex, or the midpoint of a bonded
    /// pair. Positions are fixed by the first call; later calls return them
    /// unchanged whatever the basis.
    pub fn layout(&mut self, d1: Point2, d2: Point2) -> Result<&Graph> {
        let bottom = &self.bottom_graph;
        let refinement = self
            .refinement
            .as_mut()
            .ok_or_else(|| MarkovError::InvalidState("layout before assemble".to_string()))?;

        if refinement.laid_out {
            return Ok(&refinement.upper_graph);
        }

        let vertices: Vec<Vertex> = refinement.upper_graph.vertices().collect();
        let bonding_map = &refinement.bonding_map;
        let upper = &refinement.upper_graph;

        let place = |x: Vertex| -> Result<Point2> {
            let anchor = match bonding_map.get(x) {
                Some(&Image::Single(p)) => position_of(bottom, p)?,
                Some(&Image::Pair(p, q)) => position_of(bottom, p)?.midpoint(position_of(bottom, q)?),
                None => {
                    return Err(MarkovError::InvalidState(format!(
                        "upper vertex {} is not bonded",
                        x.index()
                    )))
                }
            };
            let local = upper.relative_position(x).unwrap_or(Point2::ORIGIN);
            Ok(local.affine(anchor, d1, d2))
        };

        let positions: Vec<Point2> = if vertices.len() > PARALLEL_LAYOUT_THRESHOLD {
            vertices.par_iter().map(|&x| place(x)).collect::<Result<_>>()?
        } else {
            vertices.iter().map(|&x| place(x)).collect::<Result<_>>()?
        };

        for (x, p) in vertices.into_iter().zip(positions) {
            refinement.upper_graph.set_position(x, p);
        }
        refinement.laid_out = true;

        Ok(&refinement.upper_graph)
    }

    /// The grammar driving this step
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// The graph being refined
    pub fn bottom_graph(&self) -> &Graph {
        &self.bottom_graph
    }

    /// Production applications and their gluings
    pub fn assembly_graph(&self) -> &AssemblyGraph {
        &self.assembly_graph
    }

    /// Production-bottom to bottom-graph chart of an assembly node
    pub fn lower_chart(&self, node: AssemblyNode) -> Option<&PartialMap> {
        self.lower_chart.get(node.index())
    }

    /// The refined graph, once assembled
    pub fn upper_graph(&self) -> Option<&Graph> {
        self.refinement.as_ref().map(|r| &r.upper_graph)
    }

    /// Production-top to upper-graph chart of an assembly node, once assembled
    pub fn upper_chart(&self, node: AssemblyNode) -> Option<&PartialMap> {
        self.refinement.as_ref().and_then(|r| r.upper_chart.get(node.index()))
    }

    /// Upper vertex to bottom vertex (or pair), once assembled
    pub fn bonding_map(&self) -> Option<&PartialMap> {
        self.refinement.as_ref().map(|r| &r.bonding_map)
    }

    /// True after a successful [`assemble`](Decomposition::assemble)
    pub fn is_assembled(&self) -> bool {
        self.refinement.is_some()
    }

    /// True after a successful [`layout`](Decomposition::layout)
    pub fn is_laid_out(&self) -> bool {
        self.refinement.as_ref().is_some_and(|r| r.laid_out)
    }

    /// Hand over the refined graph
    pub fn into_upper_graph(self) -> Result<Graph> {
        self.refinement
            .map(|r| r.upper_graph)
            .ok_or_else(|| MarkovError::InvalidState("upper graph requested before assemble".to_string()))
    }
}

fn position_of(graph: &Graph, v: Vertex) -> Result<Point2> {
    graph
        .position(v)
        .ok_or(MarkovError::MissingPosition { vertex: v.index() })
}
