use thiserror::Error;

/// Errors raised while reading or indexing data.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad magic number in {what}: expected {expected:#010x}, found {found:#010x}")]
    BadMagic {
        what: &'static str,
        expected: u32,
        found: u32,
    },

    #[error("Unexpected end of input while reading {what}")]
    UnexpectedEof { what: &'static str },

    #[error("Length mismatch: {images} image(s) but {labels} label(s)")]
    LengthMismatch { images: usize, labels: usize },

    #[error("Unexpected image dimensions {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    UnexpectedDimensions {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("Label {label} at index {index} is out of range for {classes} classes")]
    LabelOutOfRange {
        label: u8,
        index: usize,
        classes: usize,
    },

    #[error("Index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
