//! Repetition search over the pair-hash index.
//!
//! `find_rep` returns the length of the best repetition starting at `pos`
//! (0 when there is none worth encoding) and leaves its backward distance,
//! decremented by one, in the state. Candidates come from the pair-hash
//! chain, most recent last; a match is taken on `>=` so that among equal
//! lengths the most recent occurrence wins, which minimises the distance
//! and with it the encoded bits.
//!
//! Matches longer than ten bytes switch to a refinement scan that reuses a
//! KMP prefix-function table to align later candidates against the end of
//! the match found so far, looking for an occurrence that extends further.

use super::pair_hash;
use super::state::ImplodeState;
use crate::common::MAX_REP_LENGTH;

/// Prefix-function sentinel standing in for "no proper prefix".
const NO_PREFIX: u16 = u16::MAX;

impl ImplodeState {
    pub fn find_rep(&mut self, pos: usize) -> usize {
        let hash = pair_hash(self.work_buff[pos], self.work_buff[pos + 1]);
        let min_offs = (pos - self.dsize_bytes + 1) as u16;

        // Skip chain entries that fell out of the dictionary window. The
        // advance is persisted so the next lookup starts past them; the
        // chain always contains `pos` itself, so this terminates.
        let mut chain = self.hash_to_index[hash] as usize;
        if self.pair_offs[chain] < min_offs {
            while self.pair_offs[chain] < min_offs {
                chain += 1;
            }
            self.hash_to_index[hash] = chain as u16;
        }

        // A usable candidate must start at least two bytes back.
        let limit = pos - 1;
        let mut cand = self.pair_offs[chain] as usize;
        if cand >= limit {
            return 0;
        }

        let buf = &self.work_buff;
        let mut rep_len: usize = 1;
        let mut equal: usize = 0;

        loop {
            if buf[pos] == buf[cand] && buf[pos + rep_len - 1] == buf[cand + rep_len - 1] {
                // The second byte is implied: equal hash plus equal first
                // byte pins it. Count matching bytes from offset two on;
                // source and probe may overlap.
                let mut src = cand + 1;
                let mut dst = pos + 1;
                equal = 2;
                while equal < MAX_REP_LENGTH {
                    src += 1;
                    dst += 1;
                    if buf[src] != buf[dst] {
                        break;
                    }
                    equal += 1;
                }

                if equal >= rep_len {
                    self.distance = pos + equal - src - 1;
                    rep_len = equal;
                    if rep_len > 10 {
                        break;
                    }
                }
            }

            chain += 1;
            cand = self.pair_offs[chain] as usize;
            if cand >= limit {
                return if rep_len >= 2 { rep_len } else { 0 };
            }
        }

        // A full-length match cannot be improved; the comparison loop above
        // overshot the source cursor by one byte less than usual.
        if equal == MAX_REP_LENGTH {
            self.distance -= 1;
            return equal;
        }

        if self.pair_offs[chain + 1] as usize >= limit {
            return rep_len;
        }

        // Prefix-function table over the match found so far.
        self.rep_fail[0] = NO_PREFIX;
        self.rep_fail[1] = 0;
        let mut fail_idx: usize = 1;
        let mut prefix: u16 = 0;
        while fail_idx < rep_len {
            if self.work_buff[pos + fail_idx] != self.work_buff[pos + prefix as usize] {
                prefix = self.rep_fail[prefix as usize];
                if prefix != NO_PREFIX {
                    continue;
                }
            }
            fail_idx += 1;
            prefix = prefix.wrapping_add(1);
            self.rep_fail[fail_idx] = prefix;
        }

        let buf = &self.work_buff;
        let mut cand = self.pair_offs[chain] as usize;
        let mut cand_end = cand + rep_len;
        let mut len2 = rep_len;

        loop {
            // Shift to the longest prefix of the current match that could
            // re-align at a later candidate.
            len2 = self.rep_fail[len2] as usize;
            if len2 == NO_PREFIX as usize {
                len2 = 0;
            }

            // Skip candidates that cannot reach the end of the match found
            // so far.
            loop {
                chain += 1;
                cand = self.pair_offs[chain] as usize;
                if cand >= limit {
                    return rep_len;
                }
                if cand + len2 >= cand_end {
                    break;
                }
            }

            let pre_last = buf[pos + rep_len - 2];
            if pre_last == buf[cand + rep_len - 2] {
                if cand + len2 != cand_end {
                    // Candidate is aligned differently; restart it from zero.
                    cand_end = cand;
                    len2 = 0;
                }
            } else {
                // Wrong tail byte: scan ahead for a candidate that matches
                // both the first and the last-but-one byte.
                loop {
                    chain += 1;
                    cand = self.pair_offs[chain] as usize;
                    if cand >= limit {
                        return rep_len;
                    }
                    if buf[cand + rep_len - 2] == pre_last && buf[cand] == buf[pos] {
                        break;
                    }
                }
                cand_end = cand + 2;
                len2 = 2;
            }

            // Extend the aligned candidate forward.
            while buf[cand_end] == buf[pos + len2] {
                len2 += 1;
                if len2 >= MAX_REP_LENGTH {
                    break;
                }
                cand_end += 1;
            }

            if len2 >= rep_len {
                self.distance = pos - cand - 1;
                rep_len = len2;
                if rep_len == MAX_REP_LENGTH {
                    return rep_len;
                }

                // Grow the prefix-function table to the new match length.
                while fail_idx < len2 {
                    if buf[pos + fail_idx] != buf[pos + prefix as usize] {
                        prefix = self.rep_fail[prefix as usize];
                        if prefix != NO_PREFIX {
                            continue;
                        }
                    }
                    fail_idx += 1;
                    prefix = prefix.wrapping_add(1);
                    self.rep_fail[fail_idx] = prefix;
                }
            }
        }
    }
}
