//! Error handling for the DCL codec.
//!
//! Every failure mode has its own discriminant so callers can tell a corrupt
//! stream apart from bad parameters or plain I/O trouble. The codec never
//! tries to resynchronise; the first error ends the operation.

use thiserror::Error;

/// Error type for implode/explode operations.
#[derive(Debug, Error)]
pub enum DclError {
    /// First header byte is not 0 (Binary) or 1 (ASCII).
    #[error("invalid header: literal-coding flag {0} (expected 0 or 1)")]
    InvalidHeader(u8),

    /// Second header byte is not a valid dictionary exponent.
    #[error("invalid dictionary bits: {0} (expected 4, 5, or 6)")]
    InvalidDictionary(u8),

    /// A back-reference reached before the start of the output stream.
    #[error("distance is too far back")]
    DistanceTooFar,

    /// A Huffman code did not resolve within the maximum code length.
    #[error("invalid literal code in compressed stream")]
    InvalidCode,

    /// Input ended in the middle of a compressed item.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Compression mode value is not Binary (0) or ASCII (1).
    #[error("invalid compression mode: {0}")]
    InvalidMode(u8),

    /// Dictionary size in bytes is not 1024, 2048, or 4096.
    #[error("invalid dictionary size: {0} (expected 1024, 2048, or 4096)")]
    InvalidDictSize(u32),

    /// Error propagated from the input source or output sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DclError>;

impl From<DclError> for std::io::Error {
    fn from(err: DclError) -> Self {
        match err {
            DclError::Io(inner) => inner,
            DclError::UnexpectedEof => {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, err)
            }
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
