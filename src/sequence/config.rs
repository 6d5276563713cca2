//! Per-level layout schedules for Markov sequences

use crate::graph::Point2;
use crate::Result;
use serde::{Serialize, Deserialize};

/// Layout basis used when refining one level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelBasis {
    /// Image of the pattern x axis
    pub d1: Point2,
    /// Image of the pattern y axis
    pub d2: Point2,
}

impl LevelBasis {
    /// Basis from two vectors
    pub fn new(d1: Point2, d2: Point2) -> Self {
        LevelBasis { d1, d2 }
    }

    /// Both vectors multiplied by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        LevelBasis {
            d1: self.d1 * factor,
            d2: self.d2 * factor,
        }
    }
}

/// Sequence configuration
///
/// One [`LevelBasis`] per refinement; the sequence runs as many levels as
/// there are entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Bases in refinement order
    pub levels: Vec<LevelBasis>,
}

impl SequenceConfig {
    /// Configuration from explicit bases
    pub fn new(levels: Vec<LevelBasis>) -> Self {
        SequenceConfig { levels }
    }

    /// `levels` refinements, each basis `ratio` times the previous one
    pub fn geometric(levels: usize, ratio: f64, d1: Point2, d2: Point2) -> Self {
        let first = LevelBasis::new(d1, d2);
        let levels = (0..levels)
            .map(|i| first.scaled(ratio.powi(i as i32)))
            .collect();
        SequenceConfig { levels }
    }

    /// Create config for the Nöbeling curve
    pub fn nobeling() -> Self {
        let m = [1.0, 0.4, 0.4 * 0.4];
        let lay = [
            ((1.0, 0.0), (0.0, 0.8)),
            ((1.0, 0.0), (0.0, 0.8)),
            ((0.0, 1.0), (0.8, 0.0)),
        ];
        let levels = m
            .iter()
            .zip(lay)
            .map(|(&m, (d1, d2))| LevelBasis::new(Point2::from(d1), Point2::from(d2)).scaled(m))
            .collect();
        SequenceConfig { levels }
    }

    /// Create config for the Menger "18" curve
    ///
    /// Both vectors point along a fixed per-level direction, so each pattern
    /// collapses onto a line through its anchor.
    pub fn menger18() -> Self {
        let m = [1.0, 0.4, 0.4 * 0.4, 0.4 * 0.4 * 0.3, 0.4 * 0.4 * 0.3 * 0.3];
        let directions = [(0.0, 1.0), (2.0, 3.0), (1.0, 4.0), (-1.0, 3.0), (-3.0, 2.0)];
        let levels = m
            .iter()
            .zip(directions)
            .map(|(&m, z)| {
                let z = Point2::from(z).with_length(m);
                LevelBasis::new(z, z)
            })
            .collect();
        SequenceConfig { levels }
    }

    /// Create config for the diamond fractal
    pub fn diamond() -> Self {
        let z = Point2::new(1.0, 0.0);
        SequenceConfig::geometric(5, 0.2, z, z)
    }

    /// Create config for the Cantor set
    pub fn cantor() -> Self {
        let z = Point2::new(0.0, 1.0);
        SequenceConfig::from_scales(&CANTOR_SCALES, |m| LevelBasis::new(z, z).scaled(m))
    }

    /// Create config for the join of two Cantor sets
    pub fn cantor_join() -> Self {
        let z = Point2::new(1.0, 0.0);
        SequenceConfig::from_scales(&CANTOR_SCALES, |m| LevelBasis::new(z, z).scaled(m))
    }

    /// Create config for the split-triangle grammar
    pub fn split_triangle() -> Self {
        SequenceConfig::geometric(4, 0.5, Point2::new(0.5, 0.0), Point2::new(0.0, 0.5))
    }

    /// Configuration for a catalogue grammar by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "nobeling" => Some(SequenceConfig::nobeling()),
            "menger18" => Some(SequenceConfig::menger18()),
            "diamond" => Some(SequenceConfig::diamond()),
            "cantor" => Some(SequenceConfig::cantor()),
            "cantor-join" => Some(SequenceConfig::cantor_join()),
            "split-triangle" => Some(SequenceConfig::split_triangle()),
            _ => None,
        }
    }

    /// Number of refinements
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when no refinement is configured
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Only the first `levels` refinements
    pub fn truncated(mut self, levels: usize) -> Self {
        self.levels.truncate(levels);
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_scales(scales: &[f64], basis: impl Fn(f64) -> LevelBasis) -> Self {
        SequenceConfig {
            levels: scales.iter().map(|&m| basis(m)).collect(),
        }
    }
}

const CANTOR_SCALES: [f64; 6] = [
    1.0,
    0.4,
    0.4 * 0.4,
    0.4 * 0.4 * 0.4,
    0.4 * 0.4 * 0.4 * 0.3,
    0.4 * 0.4 * 0.4 * 0.3 * 0.3,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric() {
        let config = SequenceConfig::geometric(3, 0.5, Point2::new(2.0, 0.0), Point2::new(0.0, 2.0));
        assert_eq!(config.len(), 3);
        assert_eq!(config.levels[2].d1, Point2::new(0.5, 0.0));
        assert_eq!(config.levels[2].d2, Point2::new(0.0, 0.5));
    }

    #[test]
    fn test_menger18_directions_are_scaled() {
        let config = SequenceConfig::menger18();
        assert_eq!(config.len(), 5);
        assert!((config.levels[1].d1.norm() - 0.4).abs() < 1e-12);
        assert_eq!(config.levels[1].d1, config.levels[1].d2);
    }

    #[test]
    fn test_nobeling_swaps_axes_last() {
        let config = SequenceConfig::nobeling();
        let last = config.levels[2];
        assert!((last.d1.y - 0.16).abs() < 1e-12);
        assert!((last.d2.x - 0.128).abs() < 1e-12);
    }

    #[test]
    fn test_presets_by_name() {
        for name in ["nobeling", "menger18", "diamond", "cantor", "cantor-join", "split-triangle"] {
            assert!(!SequenceConfig::preset(name).unwrap().is_empty());
        }
        assert!(SequenceConfig::preset("sierpinski").is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SequenceConfig::diamond().truncated(2);
        let json = config.to_json().unwrap();
        assert_eq!(SequenceConfig::from_json(&json).unwrap(), config);
    }
}
