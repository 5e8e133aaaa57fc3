//! Explode: decompression of DCL imploded streams.
//!
//! The exploder reads the 2-byte header, then alternates between literals and
//! length/distance pairs, replaying back-references through a 4096-byte
//! sliding window until the reserved terminator length (519) is decoded.

mod reader;

pub use reader::ExplodeReader;

use crate::error::Result;

/// Decompress a complete imploded stream held in memory.
pub fn explode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    ExplodeReader::new(std::io::Cursor::new(data))?.into_bytes()
}
