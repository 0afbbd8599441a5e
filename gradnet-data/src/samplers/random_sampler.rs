// gradnet-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::Debug;

/// A sampler that randomly samples indices from a dataset.
///
/// The generator is supplied by the caller, so a seeded generator gives a
/// reproducible sequence of epochs.
#[derive(Debug, Clone)]
pub struct RandomSampler<R> {
    rng: R,
    replacement: bool,
    num_samples: Option<usize>,
}

impl<R: Rng> RandomSampler<R> {
    /// Creates a new `RandomSampler`.
    ///
    /// # Arguments
    ///
    /// * `rng`: The generator the indices are drawn from.
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The number of indices to draw. If `None`, it defaults to the dataset size.
    pub fn new(rng: R, replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            rng,
            replacement,
            num_samples,
        }
    }

    /// A full permutation of the dataset on every call.
    pub fn shuffled(rng: R) -> Self {
        Self::new(rng, false, None)
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: Rng + Debug> Sampler for RandomSampler<R> {
    fn indices(&mut self, dataset_len: usize) -> Vec<usize> {
        if dataset_len == 0 {
            return Vec::new();
        }
        let count = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            return (0..count)
                .map(|_| self.rng.gen_range(0..dataset_len))
                .collect();
        }
        if count > dataset_len {
            warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement, yielding no indices",
                count, dataset_len
            );
            return Vec::new();
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut self.rng);
        indices.truncate(count);
        indices
    }

    fn len(&self, dataset_len: usize) -> usize {
        if dataset_len == 0 {
            return 0;
        }
        let count = self.num_samples.unwrap_or(dataset_len);
        if !self.replacement && count > dataset_len {
            0
        } else {
            count
        }
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
