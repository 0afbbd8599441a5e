// src/nn/mod.rs
// Parameter initialization and the fully-connected network built on the graph.

pub mod init;
pub mod mlp;

pub use mlp::{Mlp, MlpConfig};
