use super::traits::Dataset;
use crate::error::DataError;

/// A simple dataset that wraps a `Vec` of items.
///
/// Training code usually wants the whole slice (see [`VecDataset::as_slice`]);
/// [`Dataset::get`] clones a single item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VecDataset<T> {
    data: Vec<T>,
}

impl<T> VecDataset<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<Vec<T>> for VecDataset<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T: Clone> Dataset for VecDataset<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<Self::Item, DataError> {
        self.data
            .get(index)
            .cloned()
            .ok_or(DataError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
