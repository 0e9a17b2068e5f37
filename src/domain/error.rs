//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural defects found while assembling a tree from an edge list.
///
/// Vertex ids are reported 0-based, after index normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTreeError {
    #[error("expected {expected} edges for {vertices} vertices, got {actual}")]
    EdgeCount {
        vertices: usize,
        expected: usize,
        actual: usize,
    },

    #[error("edge {edge} references vertex {vertex}, outside of 0..{vertices}")]
    VertexOutOfRange {
        edge: usize,
        vertex: i64,
        vertices: usize,
    },

    #[error("edge {edge} is a self-loop on vertex {vertex}")]
    SelfLoop { edge: usize, vertex: usize },

    #[error("edge {edge} duplicates edge {first} between {a} and {b}")]
    DuplicateEdge {
        edge: usize,
        first: usize,
        a: usize,
        b: usize,
    },

    /// With exactly N-1 edges, a disconnected graph always contains a cycle,
    /// so disconnection is reported through this variant.
    #[error("edge {edge} between {a} and {b} closes a cycle")]
    Cycle { edge: usize, a: usize, b: usize },
}

/// Domain errors represent violations of the tree and evaluation contracts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed tree: {0}")]
    MalformedTree(#[from] MalformedTreeError),

    #[error("root {root} is outside of 0..{vertices}")]
    RootOutOfRange { root: usize, vertices: usize },

    #[error("weight sum overflows i64 at vertex {vertex}")]
    WeightOverflow { vertex: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
