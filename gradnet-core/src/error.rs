use crate::node::NodeId;
use thiserror::Error;

/// Construction-time defects detected while ordering a graph.
///
/// These are never raised by the forward, backward or update passes: those assume a
/// valid order and do not re-validate it.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum StructuralError {
    #[error("Topological sort failed: dependency cycle leaves {unresolved} node(s) unordered")]
    Cycle { unresolved: usize },

    #[error("Topological sort failed: node {node:?} depends on {dependency:?}, which this graph does not own")]
    DanglingReference { node: NodeId, dependency: NodeId },
}

/// Custom error type for the gradnet engine and the helpers built on it.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradNetError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("Node {node:?} does not belong to this graph")]
    UnknownNode { node: NodeId },

    #[error("Node {node:?} is computed from its dependencies; only inputs and parameters can be set")]
    NotALeaf { node: NodeId },

    #[error("Node {node:?} does not take (a, b) terms")]
    TermsNotSupported { node: NodeId },

    #[error("Invalid parameter initialization: {0}")]
    InvalidInitialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("Label {label} is out of range for {classes} classes")]
    LabelOutOfRange { label: usize, classes: usize },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
