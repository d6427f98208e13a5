//! Error types for memblock
//!
//! Every failure is raised at the point of detection, before any byte is
//! touched. Errors carry the numbers that caused them.

use thiserror::Error;

/// Errors raised by blocks, views, codecs and typed arrays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Malformed input shape (incoherent copy plan, zero element width, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An offset/length pair escapes the addressable window.
    #[error("range {offset}+{length} exceeds window of {limit} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        limit: usize,
    },

    /// Two lengths that must agree do not.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A byte length is not an exact multiple of an element width.
    #[error("byte length {byte_length} is not a multiple of element width {element_width}")]
    MisalignedLength {
        byte_length: usize,
        element_width: usize,
    },

    /// Element index outside `[0, length)`.
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    /// Value outside the representable domain of a codec.
    #[error("value {value} out of range for {codec}")]
    OutOfRange { codec: &'static str, value: String },

    /// Capability not available in the current environment.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Result type for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

impl MemoryError {
    pub(crate) fn out_of_range(codec: &'static str, value: impl ToString) -> Self {
        MemoryError::OutOfRange {
            codec,
            value: value.to_string(),
        }
    }
}
