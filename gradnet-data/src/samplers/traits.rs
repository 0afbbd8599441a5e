// gradnet-data/src/samplers/traits.rs

use std::fmt::Debug;

/// Decides the order in which a training epoch visits a dataset.
pub trait Sampler: Debug {
    /// Returns the indices to visit for a dataset of `dataset_len` items.
    ///
    /// Takes `&mut self` so random samplers can advance their generator between epochs.
    fn indices(&mut self, dataset_len: usize) -> Vec<usize>;

    /// Returns how many indices [`Sampler::indices`] will yield for `dataset_len` items.
    fn len(&self, dataset_len: usize) -> usize;
}
