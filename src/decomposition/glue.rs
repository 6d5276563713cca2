//! Memoized glue-in of production patterns into the upper graph

use super::{AssemblyGraph, AssemblyNode};
use crate::grammar::{Grammar, PartialMap};
use crate::graph::{Graph, Vertex, VertexAttrs};
use crate::{MarkovError, Result};
use log::trace;

/// Progress of one assembly node
enum ChartState {
    Pending,
    InProgress,
    Done(PartialMap),
}

/// Output of a completed assembly
pub(super) struct Refinement {
    pub upper_graph: Graph,
    pub upper_chart: Vec<PartialMap>,
    pub bonding_map: PartialMap,
    pub laid_out: bool,
}

/// Working state while gluing patterns together
///
/// Nothing is written back to the decomposition until every node is done.
pub(super) struct GlueIn<'a> {
    grammar: &'a Grammar,
    assembly: &'a AssemblyGraph,
    lower_chart: &'a [PartialMap],
    bottom_graph: &'a Graph,
    upper_graph: Graph,
    charts: Vec<ChartState>,
    bonding_map: PartialMap,
}

impl<'a> GlueIn<'a> {
    pub fn new(
        grammar: &'a Grammar,
        assembly: &'a AssemblyGraph,
        lower_chart: &'a [PartialMap],
        bottom_graph: &'a Graph,
    ) -> Self {
        let charts = (0..assembly.node_count()).map(|_| ChartState::Pending).collect();
        GlueIn {
            grammar,
            assembly,
            lower_chart,
            bottom_graph,
            upper_graph: Graph::new(),
            charts,
            bonding_map: PartialMap::new(),
        }
    }

    /// Glue the top pattern of `node` into the upper graph, dependencies first
    pub fn glue_in(&mut self, node: AssemblyNode) -> Result<()> {
        let assembly = self.assembly;
        let grammar = self.grammar;
        let lower_chart = self.lower_chart;
        let bottom = self.bottom_graph;
        let i = node.index();

        let label = assembly
            .production(node)
            .ok_or_else(|| MarkovError::InvalidState(format!("assembly node {} does not exist", i)))?;

        match self.charts[i] {
            ChartState::Done(_) => return Ok(()),
            ChartState::InProgress => {
                return Err(MarkovError::CyclicAssembly {
                    node: i,
                    production: label.to_string(),
                })
            }
            ChartState::Pending => {}
        }
        self.charts[i] = ChartState::InProgress;

        let production = grammar.production(label).map_err(|e| e.at_node(i))?;
        let mut chart = PartialMap::new();

        // Interface vertices already realized by dependencies
        for (dependency, gluing_label) in assembly.dependencies(node) {
            self.glue_in(dependency)?;
            let gluing = grammar.gluing(&gluing_label).map_err(|e| e.at_node(i))?;

            let dependency_label = assembly.production(dependency).unwrap_or_default();
            if gluing.source() != dependency_label || gluing.target() != label {
                return Err(MarkovError::MalformedPattern {
                    owner: gluing_label,
                    reason: format!(
                        "links node {} ('{}') into node {} ('{}') but glues '{}' into '{}'",
                        dependency.index(),
                        dependency_label,
                        i,
                        label,
                        gluing.source(),
                        gluing.target()
                    ),
                });
            }

            let ChartState::Done(done) = &self.charts[dependency.index()] else {
                return Err(MarkovError::InvalidState(format!(
                    "dependency {} of node {} is unfinished",
                    dependency.index(),
                    i
                )));
            };

            for (u, image) in done.iter() {
                let t = gluing.top_glue().single(u).ok_or_else(|| MarkovError::IncompletePattern {
                    owner: gluing_label.clone(),
                    map: "top glue",
                    vertex: u.index(),
                })?;
                if !production.top().contains(t) {
                    return Err(MarkovError::MalformedPattern {
                        owner: gluing_label.clone(),
                        reason: format!(
                            "top glue sends vertex {} to {} outside the pattern of node {}",
                            u.index(),
                            t.index(),
                            i
                        ),
                    });
                }
                chart.insert(t, *image);
            }
        }

        let lower = lower_chart.get(i).ok_or_else(|| {
            MarkovError::InvalidState(format!("assembly node {} has no lower chart", i))
        })?;
        let resolve = |b: Vertex| {
            lower
                .single(b)
                .filter(|&v| bottom.contains(v))
                .ok_or_else(|| MarkovError::UnresolvedBottomReference {
                    node: i,
                    production: label.to_string(),
                    vertex: b.index(),
                })
        };

        // Vertices no neighbour has realized yet
        let mut created = 0;
        for t in production.top().vertices() {
            if chart.contains(t) {
                continue;
            }
            let bond = production.bonding().get(t).ok_or_else(|| MarkovError::IncompletePattern {
                owner: label.to_string(),
                map: "bonding",
                vertex: t.index(),
            })?;
            let anchor = bond.try_map(resolve)?;

            let relpos = production.top().position(t).ok_or_else(|| MarkovError::MalformedPattern {
                owner: label.to_string(),
                reason: format!("top vertex {} has no pattern-local position", t.index()),
            })?;

            let x = self.upper_graph.add_vertex_with(VertexAttrs {
                pos: None,
                relpos: Some(relpos),
            });
            self.bonding_map.insert(x, anchor);
            chart.insert(t, x);
            created += 1;
        }

        for (a, b) in production.top().edges() {
            let (Some(xa), Some(xb)) = (chart.single(a), chart.single(b)) else {
                return Err(MarkovError::InvalidState(format!(
                    "upper chart of node {} does not realize edge ({}, {})",
                    i,
                    a.index(),
                    b.index()
                )));
            };
            self.upper_graph.add_edge(xa, xb);
        }

        trace!("glued node {} ('{}'): {} new vertices", i, label, created);
        self.charts[i] = ChartState::Done(chart);
        Ok(())
    }

    /// Collect the finished charts
    pub fn finish(self) -> Result<Refinement> {
        let upper_chart = self
            .charts
            .into_iter()
            .enumerate()
            .map(|(i, state)| match state {
                ChartState::Done(chart) => Ok(chart),
                _ => Err(MarkovError::InvalidState(format!("assembly node {} was never glued in", i))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Refinement {
            upper_graph: self.upper_graph,
            upper_chart,
            bonding_map: self.bonding_map,
            laid_out: false,
        })
    }
}
