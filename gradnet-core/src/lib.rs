// Modules principaux de la crate
pub mod error;
pub mod graph;
pub mod node;

pub mod grad_check;
pub mod nn;
pub mod train;

// Ré-exporte les types centraux pour qu'ils soient accessibles via `gradnet_core::Graph`, etc.
pub use error::{GradNetError, StructuralError};
pub use graph::Graph;
pub use node::{Node, NodeId, Operation};
pub use train::Sample;
