//! Data sources for `gradnet-core` networks: in-memory datasets, the IDX/MNIST reader,
//! a synthetic two-cluster set and index samplers.

pub mod datasets;
pub mod error;
pub mod samplers;

pub use datasets::{Dataset, VecDataset};
pub use error::DataError;
pub use gradnet_core::Sample;
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
