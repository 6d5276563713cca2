//! # Markov sequences of graphs
//!
//! This library generates inverse sequences of finite graphs approximating
//! self-similar continua (Cantor sets, Menger and Nöbeling curves, diamond
//! fractals) by graph substitution: every vertex and every edge of the
//! current graph is replaced by a small pattern, and the patterns are glued
//! together along shared boundary vertices.
//!
//! ## Features
//!
//! - **Grammars**: productions, gluings and load-time validation
//! - **Decomposition**: assembly graph, memoized glue-in, affine layout
//! - **Sequences**: an iteration driver with per-level basis schedules
//! - **Catalogue**: ready-made grammars for classic continua
//!
//! ```
//! use markov_sequence::prelude::*;
//!
//! let grammar = catalogue::split_triangle().unwrap();
//! let mut decomposition = grammar.decompose(grammar.starting_graph().clone()).unwrap();
//! decomposition.assemble().unwrap();
//! decomposition.layout(Point2::new(0.5, 0.0), Point2::new(0.0, 0.5)).unwrap();
//! let refined = decomposition.into_upper_graph().unwrap();
//! assert_eq!((refined.vertex_count(), refined.edge_count()), (5, 6));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Graphs with planar embeddings
pub mod graph;

/// Productions, gluings and grammars
pub mod grammar;

/// One refinement step: decompose, assemble, layout
pub mod decomposition;

/// Iteration driver and its configuration
pub mod sequence;

/// Hand-authored grammars for classic continua
pub mod catalogue;

/// Utility functions and helpers
pub mod utils;

use std::fmt;

// Re-export commonly used types
pub use graph::{Graph, Point2, Vertex, GraphSnapshot};
pub use grammar::{Grammar, GrammarBuilder, Production, Gluing, PartialMap, Image, ScalingLaw};
pub use decomposition::{Decomposition, AssemblyGraph};
pub use sequence::{MarkovSequence, SequenceConfig, LevelBasis};

/// Which table a label was looked up in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    /// Production table
    Production,
    /// Gluing table
    Gluing,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Production => write!(f, "production"),
            LabelKind::Gluing => write!(f, "gluing"),
        }
    }
}

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum MarkovError {
    /// A production or gluing label is absent from the grammar
    #[error("Unknown {kind} label '{label}'{}", at_node(.node))]
    UnknownLabel {
        /// Table searched
        kind: LabelKind,
        /// Missing label
        label: String,
        /// Assembly node that referenced the label, when raised while assembling
        node: Option<usize>,
    },

    /// A bonding map or glue map has no entry for a required vertex
    #[error("Incomplete pattern: {map} of '{owner}' has no entry for vertex {vertex}")]
    IncompletePattern {
        /// Production or gluing label
        owner: String,
        /// Which map is incomplete
        map: &'static str,
        /// Source vertex without an image
        vertex: usize,
    },

    /// A gluing disagrees with the identifications of its productions
    #[error("Inconsistent gluing '{gluing}': top vertex {vertex} bonds to {found} but the target bonds it to {expected}")]
    InconsistentGluing {
        /// Gluing label
        gluing: String,
        /// Source top vertex
        vertex: usize,
        /// Bottom image obtained through the source production
        found: String,
        /// Bottom image required by the target production
        expected: String,
    },

    /// A pattern map points outside its target or has the wrong shape
    #[error("Malformed pattern '{owner}': {reason}")]
    MalformedPattern {
        /// Production or gluing label
        owner: String,
        /// What is wrong
        reason: String,
    },

    /// A lower chart does not resolve into the bottom graph
    #[error("Unresolved bottom reference: assembly node {node} ('{production}') cannot resolve bottom vertex {vertex}")]
    UnresolvedBottomReference {
        /// Assembly node
        node: usize,
        /// Production labelling the node
        production: String,
        /// Unresolved vertex
        vertex: usize,
    },

    /// An assembly node was revisited while being glued in
    #[error("Cyclic assembly: node {node} ('{production}') revisited while being glued in")]
    CyclicAssembly {
        /// Assembly node
        node: usize,
        /// Production labelling the node
        production: String,
    },

    /// Layout needs a bottom-graph position that is absent
    #[error("Bottom vertex {vertex} has no position")]
    MissingPosition {
        /// Unpositioned bottom vertex
        vertex: usize,
    },

    /// Operation called out of lifecycle order
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// JSON error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MarkovError {
    /// Attach the assembly node that referenced an unknown label
    pub(crate) fn at_node(self, node: usize) -> Self {
        match self {
            MarkovError::UnknownLabel { kind, label, .. } => MarkovError::UnknownLabel {
                kind,
                label,
                node: Some(node),
            },
            other => other,
        }
    }
}

fn at_node(node: &Option<usize>) -> String {
    node.map(|n| format!(" at assembly node {}", n)).unwrap_or_default()
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, MarkovError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        graph::{Graph, Point2, Vertex, GraphSnapshot},
        grammar::{Grammar, GrammarBuilder, Production, Gluing, PartialMap, Image, ScalingLaw, VERTEX, EDGE, LEFT, RIGHT},
        decomposition::Decomposition,
        sequence::{MarkovSequence, SequenceConfig, LevelBasis},
        catalogue,
        Result, MarkovError, LabelKind,
    };
}
