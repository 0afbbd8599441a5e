//! The MNIST handwritten digit set, read from its four IDX files.

use super::idx::{read_images, read_labels, IdxImages};
use super::vec_dataset::VecDataset;
use crate::error::DataError;
use gradnet_core::Sample;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const ROWS: usize = 28;
pub const COLS: usize = 28;
pub const NUM_FEATURES: usize = ROWS * COLS;
pub const NUM_CLASSES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnistSplit {
    Train,
    Test,
}

impl MnistSplit {
    /// `(images, labels)` file names as distributed.
    pub fn file_names(self) -> (&'static str, &'static str) {
        match self {
            MnistSplit::Train => ("train-images-idx3-ubyte", "train-labels-idx1-ubyte"),
            MnistSplit::Test => ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte"),
        }
    }
}

/// Pairs decoded images with their labels, scaling pixels to `[0, 1]`.
pub fn samples_from_idx(images: &IdxImages, labels: &[u8]) -> Result<Vec<Sample>, DataError> {
    if images.count != labels.len() {
        return Err(DataError::LengthMismatch {
            images: images.count,
            labels: labels.len(),
        });
    }
    if images.rows != ROWS || images.cols != COLS {
        return Err(DataError::UnexpectedDimensions {
            rows: images.rows,
            cols: images.cols,
            expected_rows: ROWS,
            expected_cols: COLS,
        });
    }
    if images.pixels.len() != images.count * NUM_FEATURES {
        return Err(DataError::UnexpectedEof { what: "image pixels" });
    }

    let pixels = images.pixels.chunks_exact(NUM_FEATURES);
    labels
        .iter()
        .zip(pixels)
        .enumerate()
        .map(|(index, (&label, image))| {
            if usize::from(label) >= NUM_CLASSES {
                return Err(DataError::LabelOutOfRange {
                    label,
                    index,
                    classes: NUM_CLASSES,
                });
            }
            let features = image.iter().map(|&p| f64::from(p) / 255.0).collect();
            Ok(Sample::new(features, usize::from(label)))
        })
        .collect()
}

pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
    images_path: P,
    labels_path: Q,
) -> Result<VecDataset<Sample>, DataError> {
    let images = read_images(BufReader::new(File::open(images_path.as_ref())?))?;
    let labels = read_labels(BufReader::new(File::open(labels_path.as_ref())?))?;
    let samples = samples_from_idx(&images, &labels)?;
    info!(
        "Loaded {} MNIST sample(s) from {}",
        samples.len(),
        images_path.as_ref().display()
    );
    Ok(VecDataset::new(samples))
}

/// Loads one split from a directory holding the standard file names.
pub fn load_split<P: AsRef<Path>>(dir: P, split: MnistSplit) -> Result<VecDataset<Sample>, DataError> {
    let (images, labels) = split.file_names();
    let dir = dir.as_ref();
    load(dir.join(images), dir.join(labels))
}

#[cfg(test)]
#[path = "mnist_test.rs"]
mod tests;
