//! Attachments of one production's patterns to another's

use super::{PartialMap, Production};
use crate::{MarkovError, Result};

/// Attaches the patterns of a source production into those of a target
/// production, at the detailed (top) and abstract (bottom) levels
#[derive(Clone, Debug)]
pub struct Gluing {
    source: String,
    target: String,
    top_glue: PartialMap,
    bottom_glue: PartialMap,
}

impl Gluing {
    /// Create a gluing of `source` into `target`
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        top_glue: PartialMap,
        bottom_glue: PartialMap,
    ) -> Self {
        Gluing {
            source: source.into(),
            target: target.into(),
            top_glue,
            bottom_glue,
        }
    }

    /// Label of the production being attached
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Label of the production attached to
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Source top vertex to target top vertex
    pub fn top_glue(&self) -> &PartialMap {
        &self.top_glue
    }

    /// Source bottom vertex to target bottom vertex
    pub fn bottom_glue(&self) -> &PartialMap {
        &self.bottom_glue
    }

    /// Check totality, range and compatibility with both bondings
    ///
    /// For every source top vertex `u`, pushing `bonding_source(u)` through
    /// `bottom_glue` must give `bonding_target(top_glue(u))`.
    pub fn validate(&self, label: &str, source: &Production, target: &Production) -> Result<()> {
        check_glue(label, "top glue", &self.top_glue, source.top(), target.top())?;
        check_glue(label, "bottom glue", &self.bottom_glue, source.bottom(), target.bottom())?;

        for (u, image) in self.top_glue.iter() {
            let v = image.as_single().ok_or_else(|| MarkovError::MalformedPattern {
                owner: label.to_string(),
                reason: format!("top glue sends vertex {} to a pair", u.index()),
            })?;

            let (Some(source_bond), Some(target_bond)) =
                (source.bonding().get(u), target.bonding().get(v))
            else {
                continue;
            };

            let found = source_bond
                .try_map(|b| self.bottom_glue.single(b).ok_or(()))
                .map_err(|_| MarkovError::IncompletePattern {
                    owner: label.to_string(),
                    map: "bottom glue",
                    vertex: u.index(),
                })?;

            if !found.same_identity(target_bond) {
                return Err(MarkovError::InconsistentGluing {
                    gluing: label.to_string(),
                    vertex: u.index(),
                    found: found.to_string(),
                    expected: target_bond.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_glue(
    label: &str,
    map: &'static str,
    glue: &PartialMap,
    from: &crate::graph::Graph,
    into: &crate::graph::Graph,
) -> Result<()> {
    if let Some(&missing) = glue.missing(from).first() {
        return Err(MarkovError::IncompletePattern {
            owner: label.to_string(),
            map,
            vertex: missing.index(),
        });
    }

    for (key, image) in glue.iter() {
        if !from.contains(key) {
            return Err(MarkovError::MalformedPattern {
                owner: label.to_string(),
                reason: format!("{} binds vertex {} outside its source pattern", map, key.index()),
            });
        }
        match image.as_single() {
            Some(v) if into.contains(v) => {}
            Some(v) => {
                return Err(MarkovError::MalformedPattern {
                    owner: label.to_string(),
                    reason: format!("{} sends vertex {} to {} outside its target pattern", map, key.index(), v.index()),
                })
            }
            None => {
                return Err(MarkovError::MalformedPattern {
                    owner: label.to_string(),
                    reason: format!("{} sends vertex {} to a pair", map, key.index()),
                })
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::grammar::Image;

    fn point() -> Production {
        Production::new(
            Graph::from_positions(&[(0.0, 0.0)], &[]),
            Graph::from_edges(1, &[]),
            PartialMap::from_entries([(0, Image::single(0))]),
        )
    }

    fn edge() -> Production {
        Production::new(
            Graph::from_positions(&[(-1.0, 0.0), (0.0, 0.5), (1.0, 0.0)], &[(0, 1), (1, 2)]),
            Graph::from_edges(2, &[(0, 1)]),
            PartialMap::from_entries([
                (0, Image::single(0)),
                (1, Image::pair(0, 1)),
                (2, Image::single(1)),
            ]),
        )
    }

    #[test]
    fn test_consistent_gluing() {
        let right = Gluing::new(
            "vertex",
            "edge",
            PartialMap::from_entries([(0, Image::single(2))]),
            PartialMap::from_entries([(0, Image::single(1))]),
        );
        assert!(right.validate("right", &point(), &edge()).is_ok());
        assert_eq!(right.source(), "vertex");
        assert_eq!(right.target(), "edge");
    }

    #[test]
    fn test_inconsistent_gluing() {
        // Top glue lands on the right end while the bottom glue names the left end
        let bad = Gluing::new(
            "vertex",
            "edge",
            PartialMap::from_entries([(0, Image::single(2))]),
            PartialMap::from_entries([(0, Image::single(0))]),
        );
        match bad.validate("right", &point(), &edge()) {
            Err(MarkovError::InconsistentGluing { gluing, vertex, found, expected }) => {
                assert_eq!(gluing, "right");
                assert_eq!(vertex, 0);
                assert_eq!(found, "0");
                assert_eq!(expected, "1");
            }
            other => panic!("expected InconsistentGluing, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_top_glue() {
        let bad = Gluing::new(
            "vertex",
            "edge",
            PartialMap::new(),
            PartialMap::from_entries([(0, Image::single(0))]),
        );
        assert!(matches!(
            bad.validate("left", &point(), &edge()),
            Err(MarkovError::IncompletePattern { map: "top glue", .. })
        ));
    }

    #[test]
    fn test_pair_glue_rejected() {
        let bad = Gluing::new(
            "vertex",
            "edge",
            PartialMap::from_entries([(0, Image::pair(0, 2))]),
            PartialMap::from_entries([(0, Image::single(0))]),
        );
        assert!(matches!(
            bad.validate("left", &point(), &edge()),
            Err(MarkovError::MalformedPattern { .. })
        ));
    }
}
