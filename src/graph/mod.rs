//! Graphs with planar embeddings

mod point;
mod embedded;
mod snapshot;

pub use point::Point2;
pub use embedded::{Graph, Vertex, VertexAttrs};
pub use snapshot::{GraphSnapshot, EdgeList};
