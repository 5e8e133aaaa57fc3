//! Streaming decompression reader.

use crate::bits::BitReader;
use crate::common::{STREAM_END_LENGTH, WINDOW_SIZE};
use crate::error::{DclError, Result};
use crate::huffman::Huffman;
use crate::tables::{
    DIST_CODE_LENGTHS, LENGTH_CODE_LENGTHS, LEN_BASE, LEN_EXTRA_BITS, LITERAL_CODE_LENGTHS,
};
use std::io::Read;

/// Streaming decompressor for DCL imploded data.
///
/// Construction reads and validates the 2-byte stream header; the body is
/// decoded on demand as the caller reads. Decoded bytes are released a full
/// window at a time, matching the sliding-window flush of the format.
#[derive(Debug)]
pub struct ExplodeReader<R: Read> {
    bits: BitReader<R>,
    /// True when literals are Huffman coded (ASCII mode).
    coded_literals: bool,
    /// Explicit low bits in a distance encoding (4, 5, or 6).
    dict_bits: u32,
    literals: Huffman,
    lengths: Huffman,
    distances: Huffman,
    window: Box<[u8; WINDOW_SIZE]>,
    cursor: usize,
    /// Set until the window has wrapped once; while set, distances must not
    /// reach before the start of the output stream.
    first: bool,
    finished: bool,
    out: Vec<u8>,
    out_pos: usize,
}

impl<R: Read> ExplodeReader<R> {
    /// Create a reader over an imploded stream, validating its header.
    pub fn new(reader: R) -> Result<Self> {
        let mut bits = BitReader::new(reader);

        let lit = bits.pull(8)?;
        if lit > 1 {
            return Err(DclError::InvalidHeader(lit as u8));
        }
        let dict = bits.pull(8)?;
        if !(4..=6).contains(&dict) {
            return Err(DclError::InvalidDictionary(dict as u8));
        }

        Ok(Self {
            bits,
            coded_literals: lit == 1,
            dict_bits: dict,
            literals: Huffman::new(&LITERAL_CODE_LENGTHS),
            lengths: Huffman::new(&LENGTH_CODE_LENGTHS),
            distances: Huffman::new(&DIST_CODE_LENGTHS),
            window: Box::new([0; WINDOW_SIZE]),
            cursor: 0,
            first: true,
            finished: false,
            out: Vec::new(),
            out_pos: 0,
        })
    }

    /// Decode one literal or one length/distance pair.
    ///
    /// Returns `false` once the terminator has been decoded; at that point
    /// the remaining window prefix has been flushed to the output queue.
    fn step(&mut self) -> Result<bool> {
        if self.bits.pull(1)? == 0 {
            let byte = if self.coded_literals {
                self.literals.decode(&mut self.bits)? as u8
            } else {
                self.bits.pull(8)? as u8
            };
            self.emit(byte);
            return Ok(true);
        }

        let symbol = self.lengths.decode(&mut self.bits)? as usize;
        let extra = self.bits.pull(LEN_EXTRA_BITS[symbol] as u32)?;
        let length = LEN_BASE[symbol] as u32 + extra;
        if length == STREAM_END_LENGTH {
            self.out.extend_from_slice(&self.window[..self.cursor]);
            self.finished = true;
            return Ok(false);
        }

        let low_bits = if length == 2 { 2 } else { self.dict_bits };
        let code = self.distances.decode(&mut self.bits)? as u32;
        let distance = ((code << low_bits) | self.bits.pull(low_bits)?) as usize + 1;

        if self.first && distance > self.cursor {
            return Err(DclError::DistanceTooFar);
        }

        // Forward byte-at-a-time copy; overlapping source and destination
        // intentionally replicate the trailing bytes.
        let mut from = if self.cursor >= distance {
            self.cursor - distance
        } else {
            self.cursor + WINDOW_SIZE - distance
        };
        for _ in 0..length {
            let byte = self.window[from];
            self.emit(byte);
            from += 1;
            if from == WINDOW_SIZE {
                from = 0;
            }
        }
        Ok(true)
    }

    fn emit(&mut self, byte: u8) {
        self.window[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor == WINDOW_SIZE {
            self.out.extend_from_slice(&self.window[..]);
            self.cursor = 0;
            self.first = false;
        }
    }

    /// Decode the whole stream into a vector.
    pub(super) fn into_bytes(mut self) -> Result<Vec<u8>> {
        while !self.finished {
            self.step()?;
        }
        Ok(self.out)
    }
}

impl<R: Read> Read for ExplodeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.out_pos == self.out.len() && !self.finished {
            self.out.clear();
            self.out_pos = 0;
            self.step()?;
        }

        let available = &self.out[self.out_pos..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.out_pos += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // Documented in the original format description: this stream decodes to
    // thirteen bytes of alternating A and I.
    const SAMPLE: [u8; 8] = [0x00, 0x04, 0x82, 0x24, 0x25, 0x8F, 0x80, 0x7F];

    #[test]
    fn sample_stream() {
        let mut reader = ExplodeReader::new(Cursor::new(SAMPLE)).unwrap();
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"AIAIAIAIAIAIA");
    }

    #[test]
    fn header_is_validated_eagerly() {
        assert!(matches!(
            ExplodeReader::new(Cursor::new([0x02, 0x04, 0x82])),
            Err(DclError::InvalidHeader(2))
        ));
        assert!(matches!(
            ExplodeReader::new(Cursor::new([0x00, 0x07, 0x82])),
            Err(DclError::InvalidDictionary(7))
        ));
        assert!(matches!(
            ExplodeReader::new(Cursor::new([0x00])),
            Err(DclError::UnexpectedEof)
        ));
    }

    #[test]
    fn small_reads_drain_the_stream() {
        let mut reader = ExplodeReader::new(Cursor::new(SAMPLE)).unwrap();
        let mut out = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match reader.read(&mut byte).unwrap() {
                0 => break,
                n => out.extend_from_slice(&byte[..n]),
            }
        }
        assert_eq!(out, b"AIAIAIAIAIAIA");
    }
}
