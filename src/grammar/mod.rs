//! Productions, gluings and the grammars bundling them

mod partial_map;
mod production;
mod gluing;
mod bundle;
mod definition;

pub use partial_map::{PartialMap, Image};
pub use production::Production;
pub use gluing::Gluing;
pub use bundle::{Grammar, GrammarBuilder, ScalingLaw, VERTEX, EDGE, LEFT, RIGHT};
pub use definition::{GrammarDefinition, PatternDefinition, ProductionDefinition, GluingDefinition, ImageDefinition};
