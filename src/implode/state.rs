//! Compression state: work buffer, pair-hash index, and encode tables.

use crate::common::{
    CompressionMode, DictionarySize, HASH_TABLE_SIZE, INPUT_BLOCK_SIZE, MAX_REP_LENGTH,
};
use crate::tables::{CH_BITS_ASC, CH_CODE_ASC, LEN_BITS, LEN_CODES, LEN_EXTRA_BITS};

/// Lookahead margin kept beyond each input block so repetitions found near a
/// block boundary can run to full length.
pub(crate) const LOOKAHEAD: usize = MAX_REP_LENGTH;

/// Entries in the literal/length code table: 256 literals plus one slot per
/// encodable copy length (2..=519, the last being the terminator).
pub(crate) const CODE_TABLE_SIZE: usize = 0x306;

/// Table slot of the end-of-stream code.
pub(crate) const STREAM_END_SLOT: usize = 0x305;

/// Working state of one compression run.
///
/// The work buffer is laid out as `[history dict | lookahead]` with absolute
/// indices, so pair-hash entries are direct buffer positions. It is zeroed up
/// front: the index builder hashes two bytes past the end of valid data, and
/// match extension may run into the tail, so the tail has to be deterministic.
#[derive(Debug)]
pub(crate) struct ImplodeState {
    pub ctype: CompressionMode,
    pub dsize_bytes: usize,
    pub dsize_bits: u32,
    pub dsize_mask: u32,

    /// Backward distance of the most recent repetition, minus one.
    pub distance: usize,

    /// Bit count per literal/length slot, selector bit included.
    pub nch_bits: [u8; CODE_TABLE_SIZE],
    /// Pre-reversed wire code per literal/length slot.
    pub nch_codes: [u16; CODE_TABLE_SIZE],

    /// Dictionary history, lookahead, sentinel pair, and comparison slack.
    pub work_buff: Vec<u8>,
    /// For each pair hash, the lower bound of its range in `pair_offs`.
    pub hash_to_index: [u16; HASH_TABLE_SIZE],
    /// Buffer positions grouped by pair hash, ascending within each group.
    pub pair_offs: Vec<u16>,
    /// Prefix-function table for the repetition finder's refinement scan.
    pub rep_fail: [u16; MAX_REP_LENGTH],
}

impl ImplodeState {
    pub fn new(mode: CompressionMode, dict_size: DictionarySize) -> Self {
        let dsize_bytes = dict_size.bytes();
        // The sentinel pair read needs two bytes past the data end, and match
        // extension can overshoot by one repetition length.
        let buff_len = dsize_bytes + LOOKAHEAD + INPUT_BLOCK_SIZE + 2 + MAX_REP_LENGTH;

        let (nch_bits, nch_codes) = build_code_table(mode);

        Self {
            ctype: mode,
            dsize_bytes,
            dsize_bits: dict_size.bits() as u32,
            dsize_mask: dict_size.mask(),
            distance: 0,
            nch_bits,
            nch_codes,
            work_buff: vec![0; buff_len],
            hash_to_index: [0; HASH_TABLE_SIZE],
            pair_offs: vec![0; buff_len],
            rep_fail: [0; MAX_REP_LENGTH],
        }
    }
}

/// Build the combined literal/length encode table.
///
/// Slots 0..0x100 encode literal bytes with a 0 selector bit folded into the
/// code; slots 0x100..0x306 encode copy lengths 2..=519 with a 1 selector
/// bit, the length code, and the extra-bits value packed together so a single
/// bit-writer push emits the whole item prefix.
fn build_code_table(mode: CompressionMode) -> ([u8; CODE_TABLE_SIZE], [u16; CODE_TABLE_SIZE]) {
    let mut bits = [0u8; CODE_TABLE_SIZE];
    let mut codes = [0u16; CODE_TABLE_SIZE];

    match mode {
        CompressionMode::Binary => {
            for byte in 0..0x100 {
                bits[byte] = 9;
                codes[byte] = (byte as u16) << 1;
            }
        }
        CompressionMode::ASCII => {
            for byte in 0..0x100 {
                bits[byte] = CH_BITS_ASC[byte] + 1;
                codes[byte] = CH_CODE_ASC[byte] << 1;
            }
        }
    }

    let mut slot = 0x100;
    for i in 0..0x10 {
        for value in 0..(1u16 << LEN_EXTRA_BITS[i]) {
            bits[slot] = LEN_EXTRA_BITS[i] + LEN_BITS[i] + 1;
            codes[slot] = (value << (LEN_BITS[i] + 1)) | ((LEN_CODES[i] as u16) << 1) | 1;
            slot += 1;
        }
    }
    debug_assert_eq!(slot, CODE_TABLE_SIZE);

    (bits, codes)
}
