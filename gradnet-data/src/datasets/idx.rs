//! Reader for the IDX container used by the MNIST files.
//!
//! Both formats start with a big-endian `u32` magic number and item count. Image files
//! follow with the row and column counts, then one byte per pixel, row-major. Label
//! files follow with one byte per label.

use crate::error::DataError;
use log::debug;
use std::io::Read;

pub const IMAGES_MAGIC: u32 = 0x0000_0803;
pub const LABELS_MAGIC: u32 = 0x0000_0801;

/// Raw images as stored in an IDX image file.
#[derive(Debug, Clone, PartialEq)]
pub struct IdxImages {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<u8>,
}

impl IdxImages {
    pub fn pixels_per_image(&self) -> usize {
        self.rows * self.cols
    }

    /// The pixels of image `index`, row-major.
    pub fn image(&self, index: usize) -> Option<&[u8]> {
        if index >= self.count {
            return None;
        }
        let size = self.pixels_per_image();
        self.pixels.get(index * size..(index + 1) * size)
    }
}

fn read_u32<R: Read>(reader: &mut R, what: &'static str) -> Result<u32, DataError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(|e| eof_or_io(e, what))?;
    Ok(u32::from_be_bytes(buf))
}

fn eof_or_io(err: std::io::Error, what: &'static str) -> DataError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        DataError::UnexpectedEof { what }
    } else {
        DataError::Io(err)
    }
}

fn read_magic<R: Read>(reader: &mut R, what: &'static str, expected: u32) -> Result<(), DataError> {
    let found = read_u32(reader, what)?;
    if found != expected {
        return Err(DataError::BadMagic {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

/// Reads exactly `len` bytes without trusting `len` for the allocation up front.
fn read_payload<R: Read>(reader: &mut R, len: usize, what: &'static str) -> Result<Vec<u8>, DataError> {
    let mut payload = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if payload.len() < len {
        return Err(DataError::UnexpectedEof { what });
    }
    Ok(payload)
}

pub fn read_images<R: Read>(mut reader: R) -> Result<IdxImages, DataError> {
    const WHAT: &str = "image file";
    read_magic(&mut reader, WHAT, IMAGES_MAGIC)?;
    let count = read_u32(&mut reader, WHAT)? as usize;
    let rows = read_u32(&mut reader, WHAT)? as usize;
    let cols = read_u32(&mut reader, WHAT)? as usize;

    let len = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| {
            DataError::InvalidParameter(format!(
                "image file header {}x{}x{} overflows",
                count, rows, cols
            ))
        })?;
    let pixels = read_payload(&mut reader, len, WHAT)?;
    debug!("read_images: {} image(s) of {}x{}", count, rows, cols);
    Ok(IdxImages {
        count,
        rows,
        cols,
        pixels,
    })
}

pub fn read_labels<R: Read>(mut reader: R) -> Result<Vec<u8>, DataError> {
    const WHAT: &str = "label file";
    read_magic(&mut reader, WHAT, LABELS_MAGIC)?;
    let count = read_u32(&mut reader, WHAT)? as usize;
    let labels = read_payload(&mut reader, count, WHAT)?;
    debug!("read_labels: {} label(s)", count);
    Ok(labels)
}

#[cfg(test)]
#[path = "idx_test.rs"]
mod tests;
