//! Streaming compression writer.

use super::state::{ImplodeState, CODE_TABLE_SIZE, LOOKAHEAD, STREAM_END_SLOT};
use crate::bits::BitWriter;
use crate::common::{CompressionMode, DictionarySize, INPUT_BLOCK_SIZE};
use crate::error::Result;
use crate::tables::{DIST_BITS, DIST_CODES};
use std::io::Write;

/// Streaming compressor producing a DCL imploded stream.
///
/// Input is buffered as it is written; the compression itself runs when
/// [`finish`](Self::finish) is called and emits the complete stream,
/// header and terminator included. Dropping the writer without calling
/// `finish` writes nothing to the sink.
#[derive(Debug)]
pub struct ImplodeWriter<W: Write> {
    sink: W,
    out: BitWriter,
    state: ImplodeState,
    input: Vec<u8>,
}

impl<W: Write> ImplodeWriter<W> {
    /// Create a writer compressing into `sink`.
    pub fn new(sink: W, mode: CompressionMode, dict_size: DictionarySize) -> Result<Self> {
        Ok(Self {
            sink,
            out: BitWriter::new(),
            state: ImplodeState::new(mode, dict_size),
            input: Vec::new(),
        })
    }

    /// Compress everything written so far and return the sink.
    pub fn finish(mut self) -> Result<W> {
        let input = std::mem::take(&mut self.input);
        self.compress(&input)?;
        Ok(self.sink)
    }

    fn put_code(&mut self, slot: usize) -> Result<()> {
        debug_assert!(slot < CODE_TABLE_SIZE);
        self.out.push(
            &mut self.sink,
            self.state.nch_bits[slot] as u32,
            self.state.nch_codes[slot] as u32,
        )
    }

    /// Emit one length/distance pair. The stored distance is already
    /// decremented by one; length 2 carries two explicit distance bits,
    /// longer copies carry the full dictionary width.
    fn put_pair(&mut self, rep_len: usize) -> Result<()> {
        self.put_code(rep_len + 0xFE)?;
        let distance = self.state.distance;
        if rep_len == 2 {
            self.out.push(
                &mut self.sink,
                DIST_BITS[distance >> 2] as u32,
                DIST_CODES[distance >> 2] as u32,
            )?;
            self.out.push(&mut self.sink, 2, (distance & 3) as u32)
        } else {
            let index = distance >> self.state.dsize_bits;
            self.out.push(
                &mut self.sink,
                DIST_BITS[index] as u32,
                DIST_CODES[index] as u32,
            )?;
            self.out.push(
                &mut self.sink,
                self.state.dsize_bits,
                distance as u32 & self.state.dsize_mask,
            )
        }
    }

    /// Run the whole compression over `input`.
    ///
    /// Input is consumed in 0x1000-byte blocks through the work buffer, with
    /// the last `LOOKAHEAD` bytes of each full block deferred to the next so
    /// repetitions can always run to full length. The pair-hash index is
    /// rebuilt per block over a phase-dependent window.
    fn compress(&mut self, input: &[u8]) -> Result<()> {
        let dsize = self.state.dsize_bytes;

        // Header: literal coding flag and dictionary exponent.
        self.out.push(&mut self.sink, 8, self.state.ctype as u32)?;
        self.out.push(&mut self.sink, 8, self.state.dsize_bits)?;

        let mut in_pos = 0usize;
        let mut pos = dsize + LOOKAHEAD;
        let mut phase = 0u32;
        let mut ended = false;

        while !ended {
            // Load the next block behind the lookahead margin.
            let loaded = INPUT_BLOCK_SIZE.min(input.len() - in_pos);
            let load_base = dsize + LOOKAHEAD;
            self.state.work_buff[load_base..load_base + loaded]
                .copy_from_slice(&input[in_pos..in_pos + loaded]);
            in_pos += loaded;

            if loaded < INPUT_BLOCK_SIZE {
                ended = true;
                if loaded == 0 && phase == 0 {
                    break;
                }
            }

            let mut end_idx = dsize + loaded;
            if ended {
                end_idx += LOOKAHEAD;
            }

            match phase {
                0 => {
                    self.state.sort_buffer(dsize + LOOKAHEAD, end_idx + 1);
                    phase = if dsize == INPUT_BLOCK_SIZE { 1 } else { 2 };
                }
                1 => {
                    self.state.sort_buffer(pos - dsize + LOOKAHEAD, end_idx + 1);
                    phase = 2;
                }
                _ => self.state.sort_buffer(pos - dsize, end_idx + 1),
            }

            while pos < end_idx {
                let mut rep_len = self.state.find_rep(pos);
                let emitted = loop {
                    if rep_len == 0 {
                        break false;
                    }
                    // A 2-byte repetition 0x100 or further back costs more
                    // than two literals.
                    if rep_len == 2 && self.state.distance >= 0x100 {
                        break false;
                    }
                    if ended && pos + rep_len > end_idx {
                        // Shorten so the copy stays within real input.
                        rep_len = end_idx - pos;
                        if rep_len < 2 {
                            break false;
                        }
                        if rep_len == 2 && self.state.distance >= 0x100 {
                            break false;
                        }
                        self.put_pair(rep_len)?;
                        pos += rep_len;
                        break true;
                    }

                    if rep_len < 8 && pos + 1 < end_idx {
                        // A short match may shadow a longer one starting on
                        // the next byte ("ARROCKFORT" vs "ROCKFORT"): peek
                        // ahead and prefer the later match when it is more
                        // than one byte better, or one byte better with the
                        // current distance already expensive.
                        let save_len = rep_len;
                        let save_dist = self.state.distance;
                        rep_len = self.state.find_rep(pos + 1);
                        if rep_len > save_len && (rep_len > save_len + 1 || save_dist > 0x80) {
                            let byte = self.state.work_buff[pos];
                            self.put_code(byte as usize)?;
                            pos += 1;
                            continue;
                        }
                        rep_len = save_len;
                        self.state.distance = save_dist;
                    }

                    self.put_pair(rep_len)?;
                    pos += rep_len;
                    break true;
                };

                if !emitted {
                    let byte = self.state.work_buff[pos];
                    self.put_code(byte as usize)?;
                    pos += 1;
                }
            }

            if !ended {
                // Slide the processed block out, keeping dictionary history
                // and the lookahead margin.
                pos -= INPUT_BLOCK_SIZE;
                self.state
                    .work_buff
                    .copy_within(INPUT_BLOCK_SIZE..INPUT_BLOCK_SIZE + dsize + LOOKAHEAD, 0);
            }
        }

        self.put_code(STREAM_END_SLOT)?;
        self.out.finish(&mut self.sink)?;
        Ok(())
    }
}

impl<W: Write> Write for ImplodeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.input.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // Compression only runs in finish(); there is nothing to push yet.
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CompressionMode, DictionarySize};

    #[test]
    fn sample_stream_is_bit_exact() {
        let mut writer = ImplodeWriter::new(
            Vec::new(),
            CompressionMode::Binary,
            DictionarySize::Size1K,
        )
        .unwrap();
        writer.write_all(b"AIAIAIAIAIAIA").unwrap();
        let out = writer.finish().unwrap();
        assert_eq!(out, [0x00, 0x04, 0x82, 0x24, 0x25, 0x8F, 0x80, 0x7F]);
    }

    #[test]
    fn empty_input_is_header_plus_terminator() {
        let writer = ImplodeWriter::new(
            Vec::new(),
            CompressionMode::Binary,
            DictionarySize::Size1K,
        )
        .unwrap();
        let out = writer.finish().unwrap();
        assert_eq!(out, [0x00, 0x04, 0x01, 0xFF]);
    }

    #[test]
    fn header_reflects_mode_and_dictionary() {
        for (mode, mode_byte) in [(CompressionMode::Binary, 0u8), (CompressionMode::ASCII, 1u8)] {
            for (dict, dict_byte) in [
                (DictionarySize::Size1K, 4u8),
                (DictionarySize::Size2K, 5u8),
                (DictionarySize::Size4K, 6u8),
            ] {
                let mut writer = ImplodeWriter::new(Vec::new(), mode, dict).unwrap();
                writer.write_all(b"header check").unwrap();
                let out = writer.finish().unwrap();
                assert_eq!(&out[..2], &[mode_byte, dict_byte]);
            }
        }
    }
}
