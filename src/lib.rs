//! PKWARE Data Compression Library (DCL) "implode/explode" codec.
//!
//! This crate reads and writes the stream format produced by PKWARE's DCL
//! `implode()` entry point, the legacy format found in MPQ archives and other
//! DOS-era containers. Note that PKWARE overused the "implode" verb: the DCL
//! format is unrelated to and incompatible with PKZIP's implode method.
//!
//! Two streaming transforms are provided: [`ExplodeReader`] decompresses an
//! imploded stream while you read from it, and [`ImplodeWriter`] collects raw
//! bytes and emits a compressed stream that is bit-for-bit identical to the
//! output of PKWARE's original `implode()`.
//!
//! # Decompression
//!
//! ```no_run
//! use pkdcl::{explode_bytes, ExplodeReader};
//! use std::io::Read;
//!
//! let compressed = std::fs::read("data.imploded")?;
//! let decompressed = explode_bytes(&compressed)?;
//!
//! // Or stream it:
//! let mut reader = ExplodeReader::new(std::io::Cursor::new(compressed))?;
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Compression
//!
//! ```
//! use pkdcl::{implode_bytes, CompressionMode, DictionarySize, ImplodeWriter};
//! use std::io::Write;
//!
//! let data = b"Hello, World! This is a test.";
//! let compressed = implode_bytes(data, CompressionMode::ASCII, DictionarySize::Size2K)?;
//!
//! // Or stream it:
//! let mut writer = ImplodeWriter::new(Vec::new(), CompressionMode::ASCII, DictionarySize::Size2K)?;
//! writer.write_all(data)?;
//! let streamed = writer.finish()?;
//! assert_eq!(streamed, compressed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod bits;
mod huffman;

pub mod common;
pub mod error;
pub mod explode;
pub mod implode;
pub mod tables;

pub use common::{CompressionHeader, CompressionMode, DictionarySize, MAX_REP_LENGTH};
pub use error::{DclError, Result};
pub use explode::ExplodeReader;
pub use implode::ImplodeWriter;

/// Compress a byte slice with the PKWARE implode algorithm.
///
/// The output stream carries its own 2-byte header, so `mode` and `dict_size`
/// do not need to be communicated out of band.
pub fn implode_bytes(
    data: &[u8],
    mode: CompressionMode,
    dict_size: DictionarySize,
) -> Result<Vec<u8>> {
    implode::implode_bytes(data, mode, dict_size)
}

/// Decompress a PKWARE imploded byte slice.
pub fn explode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    explode::explode_bytes(data)
}
