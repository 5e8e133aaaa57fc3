//! Implode: compression into the DCL format.
//!
//! The imploder drives raw input through a work buffer holding the dictionary
//! history ahead of a lookahead region, indexes every 2-byte window by a
//! deliberately lossy pair hash, and greedily encodes the longest, most
//! recent repetition at each position (with a one-byte lookahead heuristic
//! borrowed from PKLib). Output is bit-for-bit identical to PKWARE's
//! original `implode()`.

mod finder;
mod hash;
mod state;
mod writer;

pub use writer::ImplodeWriter;

use crate::common::{CompressionMode, DictionarySize};
use crate::error::Result;

/// Hash of a byte pair: deliberately non-injective, small enough to index a
/// 0x900-entry table. An exact byte comparison always follows a hash hit.
pub(crate) const fn pair_hash(b0: u8, b1: u8) -> usize {
    (b0 as usize) * 4 + (b1 as usize) * 5
}

/// Compress a byte slice into a fresh vector.
pub fn implode_bytes(
    data: &[u8],
    mode: CompressionMode,
    dict_size: DictionarySize,
) -> Result<Vec<u8>> {
    use std::io::Write;

    let mut writer = ImplodeWriter::new(Vec::new(), mode, dict_size)?;
    writer.write_all(data).map_err(crate::DclError::Io)?;
    writer.finish()
}
