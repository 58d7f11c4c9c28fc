//! Error kinds surfaced by the adjacency store and the name-keyed facade.
//!
//! One enum covers both layers: the adjacency store (`store::AdjacencyStore`) raises the
//! index-keyed variants (`UnknownEndpoint`, `DuplicateEdge`, `EdgeNotFound`, `NodeNotFound`),
//! the facade (`graph::Graph`) raises the name-keyed variants on top of those. Validation always
//! runs before any mutation, so a returned error means the graph was left unchanged.

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("node `{name}` already exists")]
    NodeExists { name: String },

    #[error("node `{name}` does not exist")]
    NodeMissing { name: String },

    #[error("edge `{src}` -> `{dst}` already exists")]
    EdgeExists { src: String, dst: String },

    #[error("edge `{src}` -> `{dst}` does not exist")]
    EdgeMissing { src: String, dst: String },

    /// Internal inconsistency between the name registry and the adjacency store; should not
    /// occur as long as every facade mutation keeps both in sync.
    #[error("adjacency store has no live node at index {index}")]
    UnknownEndpoint { index: usize },

    #[error("edge {src} -> {dst} already exists in the adjacency store")]
    DuplicateEdge { src: usize, dst: usize },

    #[error("no edge {src} -> {dst} in the adjacency store")]
    EdgeNotFound { src: usize, dst: usize },

    #[error("no live node {id} in the adjacency store")]
    NodeNotFound { id: usize },

    #[error("invalid input to run_pagerank: {reason}")]
    InvalidInput { reason: String },

    #[error("node `{name}` has no attribute `{key}`")]
    AttributeMissing { name: String, key: String },
}
