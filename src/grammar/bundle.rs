//! Named bundles of productions and gluings

use super::{Gluing, Production};
use crate::decomposition::Decomposition;
use crate::graph::Graph;
use crate::{LabelKind, MarkovError, Result};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Label of the production substituted for every vertex
pub const VERTEX: &str = "vertex";
/// Label of the production substituted for every edge
pub const EDGE: &str = "edge";
/// Label of the gluing attaching a vertex pattern to an edge's first end
pub const LEFT: &str = "left";
/// Label of the gluing attaching a vertex pattern to an edge's second end
pub const RIGHT: &str = "right";

/// A starting graph together with labelled productions and gluings
///
/// Built once through [`GrammarBuilder`], which validates every pattern;
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct Grammar {
    name: String,
    starting_graph: Graph,
    productions: BTreeMap<String, Production>,
    gluings: BTreeMap<String, Gluing>,
}

impl Grammar {
    /// Start building a grammar
    pub fn builder(name: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder {
            name: name.into(),
            starting_graph: Graph::new(),
            productions: BTreeMap::new(),
            gluings: BTreeMap::new(),
        }
    }

    /// Grammar name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The first graph of every sequence
    pub fn starting_graph(&self) -> &Graph {
        &self.starting_graph
    }

    /// Look up a production
    pub fn production(&self, label: &str) -> Result<&Production> {
        self.productions.get(label).ok_or_else(|| MarkovError::UnknownLabel {
            kind: LabelKind::Production,
            label: label.to_string(),
            node: None,
        })
    }

    /// Look up a gluing
    pub fn gluing(&self, label: &str) -> Result<&Gluing> {
        self.gluings.get(label).ok_or_else(|| MarkovError::UnknownLabel {
            kind: LabelKind::Gluing,
            label: label.to_string(),
            node: None,
        })
    }

    /// All productions by label
    pub fn productions(&self) -> &BTreeMap<String, Production> {
        &self.productions
    }

    /// All gluings by label
    pub fn gluings(&self) -> &BTreeMap<String, Gluing> {
        &self.gluings
    }

    /// True when edges can be refined
    pub fn has_edge_rules(&self) -> bool {
        self.productions.contains_key(EDGE)
    }

    /// Build the decomposition of `graph` for one refinement step
    pub fn decompose(&self, graph: Graph) -> Result<Decomposition<'_>> {
        Decomposition::decompose(self, graph)
    }

    /// Vertex and edge counts after one refinement, as linear forms
    pub fn scaling_law(&self) -> Result<ScalingLaw> {
        let vertex = self.production(VERTEX)?;
        let nv = vertex.top().vertex_count();
        let ev = vertex.top().edge_count();

        if !self.has_edge_rules() {
            return Ok(ScalingLaw {
                vertex_terms: (nv, 0),
                edge_terms: (ev, 0),
            });
        }

        let edge = self.production(EDGE)?;
        let mut own_vertices = edge.top().vertex_count() as isize;
        let mut own_edges = edge.top().edge_count() as isize;

        for label in [LEFT, RIGHT] {
            let glue = self.gluing(label)?.top_glue();
            let image: BTreeSet<_> = glue.iter().filter_map(|(_, i)| i.as_single()).collect();
            own_vertices -= image.len() as isize;

            let shared = vertex
                .top()
                .edges()
                .filter_map(|(a, b)| Some((glue.single(a)?, glue.single(b)?)))
                .filter(|&(a, b)| edge.top().has_edge(a, b))
                .count();
            own_edges -= shared as isize;
        }

        if own_vertices < 0 || own_edges < 0 {
            return Err(MarkovError::MalformedPattern {
                owner: EDGE.to_string(),
                reason: "left and right gluings overlap".to_string(),
            });
        }

        Ok(ScalingLaw {
            vertex_terms: (nv, own_vertices as usize),
            edge_terms: (ev, own_edges as usize),
        })
    }
}

/// Linear growth of vertex and edge counts under one refinement
///
/// Each refined vertex contributes a full vertex pattern; each refined
/// edge contributes the part of the edge pattern not glued onto its ends.
/// Exact when both gluings are injective with disjoint images and every
/// edge-pattern edge inside a gluing image is the image of a
/// vertex-pattern edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalingLaw {
    /// `(per vertex, per edge)` new vertices
    pub vertex_terms: (usize, usize),
    /// `(per vertex, per edge)` new edges
    pub edge_terms: (usize, usize),
}

impl ScalingLaw {
    /// Predicted `(vertices, edges)` after refining a graph of the given size
    pub fn predict(&self, vertices: usize, edges: usize) -> (usize, usize) {
        (
            self.vertex_terms.0 * vertices + self.vertex_terms.1 * edges,
            self.edge_terms.0 * vertices + self.edge_terms.1 * edges,
        )
    }

    /// Predicted sizes for `levels` successive refinements, starting size included
    pub fn iterate(&self, vertices: usize, edges: usize, levels: usize) -> Vec<(usize, usize)> {
        let mut sizes = Vec::with_capacity(levels + 1);
        sizes.push((vertices, edges));
        for _ in 0..levels {
            let (v, e) = sizes[sizes.len() - 1];
            sizes.push(self.predict(v, e));
        }
        sizes
    }
}

/// Incremental construction of a validated [`Grammar`]
pub struct GrammarBuilder {
    name: String,
    starting_graph: Graph,
    productions: BTreeMap<String, Production>,
    gluings: BTreeMap<String, Gluing>,
}

impl GrammarBuilder {
    /// Set the starting graph
    pub fn starting_graph(mut self, graph: Graph) -> Self {
        self.starting_graph = graph;
        self
    }

    /// Add a labelled production
    pub fn production(mut self, label: impl Into<String>, production: Production) -> Self {
        self.productions.insert(label.into(), production);
        self
    }

    /// Add a labelled gluing
    pub fn gluing(mut self, label: impl Into<String>, gluing: Gluing) -> Self {
        self.gluings.insert(label.into(), gluing);
        self
    }

    /// Validate every pattern and freeze the grammar
    pub fn build(self) -> Result<Grammar> {
        let vertex = self.productions.get(VERTEX).ok_or_else(|| MarkovError::UnknownLabel {
            kind: LabelKind::Production,
            label: VERTEX.to_string(),
            node: None,
        })?;

        for (label, production) in &self.productions {
            production.validate(label)?;
        }

        if vertex.bottom().vertex_count() != 1 {
            return Err(MarkovError::MalformedPattern {
                owner: VERTEX.to_string(),
                reason: format!(
                    "bottom pattern must be a single vertex, found {}",
                    vertex.bottom().vertex_count()
                ),
            });
        }

        let lookup = |label: &str| {
            self.productions.get(label).ok_or_else(|| MarkovError::UnknownLabel {
                kind: LabelKind::Production,
                label: label.to_string(),
                node: None,
            })
        };

        for (label, gluing) in &self.gluings {
            let source = lookup(gluing.source())?;
            let target = lookup(gluing.target())?;
            gluing.validate(label, source, target)?;
        }

        if self.productions.contains_key(EDGE) {
            let base = vertex.bottom().vertex(0);
            let mut ends = Vec::with_capacity(2);

            for label in [LEFT, RIGHT] {
                let gluing = self.gluings.get(label).ok_or_else(|| MarkovError::UnknownLabel {
                    kind: LabelKind::Gluing,
                    label: label.to_string(),
                    node: None,
                })?;
                if gluing.source() != VERTEX || gluing.target() != EDGE {
                    return Err(MarkovError::MalformedPattern {
                        owner: label.to_string(),
                        reason: format!(
                            "must glue '{}' into '{}', found '{}' into '{}'",
                            VERTEX,
                            EDGE,
                            gluing.source(),
                            gluing.target()
                        ),
                    });
                }
                ends.push(gluing.bottom_glue().single(base));
            }

            // Both ends of an edge must stay distinct in its lower chart
            if ends[0] == ends[1] {
                return Err(MarkovError::MalformedPattern {
                    owner: RIGHT.to_string(),
                    reason: format!(
                        "bottom glue sends the vertex bottom onto the same edge-bottom vertex as '{}'",
                        LEFT
                    ),
                });
            }
        }

        debug!(
            "grammar '{}': {} productions, {} gluings, starting graph {}V/{}E",
            self.name,
            self.productions.len(),
            self.gluings.len(),
            self.starting_graph.vertex_count(),
            self.starting_graph.edge_count()
        );

        Ok(Grammar {
            name: self.name,
            starting_graph: self.starting_graph,
            productions: self.productions,
            gluings: self.gluings,
        })
    }
}
