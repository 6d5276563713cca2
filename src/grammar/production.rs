//! Substitution rules

use super::PartialMap;
use crate::graph::{Graph, Vertex};
use crate::{MarkovError, Result};

/// A substitution rule replacing the `bottom` pattern by the `top` pattern
///
/// `bonding` sends every top vertex to the bottom vertex (or vertex pair)
/// it collapses onto. Top vertices carry pattern-local positions.
#[derive(Clone, Debug)]
pub struct Production {
    top: Graph,
    bottom: Graph,
    bonding: PartialMap,
}

impl Production {
    /// Create a production; checked when the owning grammar is built
    pub fn new(top: Graph, bottom: Graph, bonding: PartialMap) -> Self {
        Production { top, bottom, bonding }
    }

    /// The detailed pattern
    pub fn top(&self) -> &Graph {
        &self.top
    }

    /// The abstract pattern
    pub fn bottom(&self) -> &Graph {
        &self.bottom
    }

    /// Top vertex to bottom vertex (or pair) map
    pub fn bonding(&self) -> &PartialMap {
        &self.bonding
    }

    /// Top vertices collapsing onto exactly `bottom_vertex`
    pub fn fibre(&self, bottom_vertex: Vertex) -> Vec<Vertex> {
        self.bonding.inverse(bottom_vertex)
    }

    /// Check that the bonding is total over `top` and lands in `bottom`,
    /// and that every top vertex has a position
    pub fn validate(&self, label: &str) -> Result<()> {
        if let Some(&missing) = self.bonding.missing(&self.top).first() {
            return Err(MarkovError::IncompletePattern {
                owner: label.to_string(),
                map: "bonding",
                vertex: missing.index(),
            });
        }

        if let Some((key, _)) = self.bonding.iter().find(|(key, _)| !self.top.contains(*key)) {
            return Err(MarkovError::MalformedPattern {
                owner: label.to_string(),
                reason: format!("bonding binds vertex {} which is not in the top pattern", key.index()),
            });
        }

        if let Some((key, target)) = self.bonding.out_of_range(&self.bottom) {
            return Err(MarkovError::MalformedPattern {
                owner: label.to_string(),
                reason: format!(
                    "bonding sends top vertex {} to {} which is not in the bottom pattern",
                    key.index(),
                    target.index()
                ),
            });
        }

        if let Some(v) = self.top.vertices().find(|&v| self.top.position(v).is_none()) {
            return Err(MarkovError::MalformedPattern {
                owner: label.to_string(),
                reason: format!("top vertex {} has no pattern-local position", v.index()),
            });
        }

        Ok(())
    }
}
