//! Representation of undirected graphs over
//! labelled vertices with integer edge weights.
//! Labels are interned to dense indices so that
//! the property checks can work on plain vectors.

mod internal_graph;
pub use internal_graph::Graph;

pub type VertexIndex = usize;
pub type Weight = u32;

pub const DEFAULT_WEIGHT: Weight = 1;

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("vertex labels must not be blank")]
    EmptyLabel,
    #[error("self-loop at vertex {0:?}")]
    SelfLoop(String),
}
