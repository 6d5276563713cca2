//! Serializable grammar descriptions

use super::{Gluing, Grammar, Image, PartialMap, Production};
use crate::graph::Graph;
use crate::{MarkovError, Result};
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

/// A small graph given by vertex count, optional positions and edges
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Number of vertices
    pub vertices: usize,
    /// Per-vertex positions; when present, one per vertex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<[f64; 2]>>,
    /// Edges as vertex index pairs
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
}

impl PatternDefinition {
    /// Build the graph, checking indices
    pub fn build(&self, owner: &str) -> Result<Graph> {
        let malformed = |reason: String| MarkovError::MalformedPattern {
            owner: owner.to_string(),
            reason,
        };

        if let Some(&(a, b)) = self
            .edges
            .iter()
            .find(|&&(a, b)| a >= self.vertices || b >= self.vertices)
        {
            return Err(malformed(format!(
                "edge ({}, {}) outside {} vertices",
                a, b, self.vertices
            )));
        }

        match &self.positions {
            Some(positions) if positions.len() != self.vertices => Err(malformed(format!(
                "{} positions for {} vertices",
                positions.len(),
                self.vertices
            ))),
            Some(positions) => {
                let coords: Vec<(f64, f64)> = positions.iter().map(|p| (p[0], p[1])).collect();
                Ok(Graph::from_positions(&coords, &self.edges))
            }
            None => Ok(Graph::from_edges(self.vertices, &self.edges)),
        }
    }
}

/// A bonding target: a vertex index or a pair of indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageDefinition {
    /// Single vertex
    Single(usize),
    /// Vertex pair
    Pair(usize, usize),
}

impl From<ImageDefinition> for Image {
    fn from(def: ImageDefinition) -> Self {
        match def {
            ImageDefinition::Single(v) => Image::single(v),
            ImageDefinition::Pair(a, b) => Image::pair(a, b),
        }
    }
}

/// Serializable form of a [`Production`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductionDefinition {
    /// Detailed pattern
    pub top: PatternDefinition,
    /// Abstract pattern
    pub bottom: PatternDefinition,
    /// Top vertex index to bottom image
    pub bonding: BTreeMap<usize, ImageDefinition>,
}

/// Serializable form of a [`Gluing`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GluingDefinition {
    /// Production attached
    pub source: String,
    /// Production attached to
    pub target: String,
    /// Source top vertex to target top vertex
    pub top_glue: BTreeMap<usize, usize>,
    /// Source bottom vertex to target bottom vertex
    pub bottom_glue: BTreeMap<usize, usize>,
}

/// Serializable form of a [`Grammar`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarDefinition {
    /// Grammar name
    pub name: String,
    /// First graph of the sequence
    pub starting_graph: PatternDefinition,
    /// Productions by label
    pub productions: BTreeMap<String, ProductionDefinition>,
    /// Gluings by label
    #[serde(default)]
    pub gluings: BTreeMap<String, GluingDefinition>,
}

impl GrammarDefinition {
    /// Build and validate the grammar
    pub fn build(&self) -> Result<Grammar> {
        let mut builder = Grammar::builder(self.name.clone())
            .starting_graph(self.starting_graph.build(&self.name)?);

        for (label, def) in &self.productions {
            let bonding = PartialMap::from_entries(
                def.bonding.iter().map(|(&k, &image)| (k, Image::from(image))),
            );
            let production = Production::new(def.top.build(label)?, def.bottom.build(label)?, bonding);
            builder = builder.production(label.clone(), production);
        }

        for (label, def) in &self.gluings {
            let single = |map: &BTreeMap<usize, usize>| {
                PartialMap::from_entries(map.iter().map(|(&k, &v)| (k, Image::single(v))))
            };
            let gluing = Gluing::new(
                def.source.clone(),
                def.target.clone(),
                single(&def.top_glue),
                single(&def.bottom_glue),
            );
            builder = builder.gluing(label.clone(), gluing);
        }

        builder.build()
    }
}

impl Grammar {
    /// Parse a JSON [`GrammarDefinition`] and build it
    pub fn from_json(json: &str) -> Result<Grammar> {
        let definition: GrammarDefinition = serde_json::from_str(json)?;
        definition.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{EDGE, VERTEX};

    const SPLIT_TRIANGLE: &str = r#"{
        "name": "split-triangle",
        "starting_graph": { "vertices": 2, "positions": [[-1, 0], [1, 0]], "edges": [[0, 1]] },
        "productions": {
            "vertex": {
                "top": { "vertices": 1, "positions": [[0, 0]] },
                "bottom": { "vertices": 1 },
                "bonding": { "0": 0 }
            },
            "edge": {
                "top": {
                    "vertices": 5,
                    "positions": [[-1, 0], [-0.5, 0.5], [0, 0], [0.5, 0.5], [1, 0]],
                    "edges": [[0, 1], [1, 2], [0, 2], [2, 3], [3, 4], [2, 4]]
                },
                "bottom": { "vertices": 2, "edges": [[0, 1]] },
                "bonding": { "0": 0, "1": [0, 1], "2": [0, 1], "3": [0, 1], "4": 1 }
            }
        },
        "gluings": {
            "left": { "source": "vertex", "target": "edge", "top_glue": { "0": 0 }, "bottom_glue": { "0": 0 } },
            "right": { "source": "vertex", "target": "edge", "top_glue": { "0": 4 }, "bottom_glue": { "0": 1 } }
        }
    }"#;

    #[test]
    fn test_grammar_from_json() {
        let grammar = Grammar::from_json(SPLIT_TRIANGLE).unwrap();
        assert_eq!(grammar.name(), "split-triangle");
        assert_eq!(grammar.starting_graph().edge_count(), 1);

        let edge = grammar.production(EDGE).unwrap();
        assert_eq!(edge.top().vertex_count(), 5);
        assert_eq!(
            edge.bonding().get(edge.top().vertex(1)),
            Some(&Image::pair(0, 1))
        );
        assert_eq!(grammar.production(VERTEX).unwrap().top().vertex_count(), 1);
    }

    #[test]
    fn test_omitted_bonding_rejected() {
        let json = SPLIT_TRIANGLE.replace(r#""3": [0, 1], "#, "");
        match Grammar::from_json(&json) {
            Err(MarkovError::IncompletePattern { owner, map, vertex }) => {
                assert_eq!(owner, "edge");
                assert_eq!(map, "bonding");
                assert_eq!(vertex, 3);
            }
            other => panic!("expected IncompletePattern, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_edge_index_rejected() {
        let json = SPLIT_TRIANGLE.replacen(r#""edges": [[0, 1]]"#, r#""edges": [[0, 2]]"#, 1);
        assert!(matches!(
            Grammar::from_json(&json),
            Err(MarkovError::MalformedPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Grammar::from_json("{ \"name\": 3 }"),
            Err(MarkovError::Serialization(_))
        ));
    }

    #[test]
    fn test_definition_roundtrip_shape() {
        let def: GrammarDefinition = serde_json::from_str(SPLIT_TRIANGLE).unwrap();
        let json = serde_json::to_string(&def).unwrap();
        let again: GrammarDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, again);
    }
}
