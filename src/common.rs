//! Shared types and constants for the DCL implode/explode codec.
//!
//! Both directions of the codec agree on the 2-byte stream header, the
//! repetition limits, and the buffer geometry defined here.

use crate::error::{DclError, Result};

/// Literal coding mode carried in the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Literals are raw 8-bit bytes.
    Binary = 0,
    /// Literals use the fixed Huffman code over 256 symbols.
    ASCII = 1,
}

impl CompressionMode {
    /// Parse a raw header byte into a mode.
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CompressionMode::Binary),
            1 => Ok(CompressionMode::ASCII),
            _ => Err(DclError::InvalidMode(value)),
        }
    }
}

/// Dictionary (sliding window) size carried in the second header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionarySize {
    /// 1024-byte dictionary, 4 explicit distance bits.
    Size1K = 1024,
    /// 2048-byte dictionary, 5 explicit distance bits.
    Size2K = 2048,
    /// 4096-byte dictionary, 6 explicit distance bits.
    Size4K = 4096,
}

impl DictionarySize {
    /// Number of explicit low bits in a distance encoding; this is also the
    /// raw value of the second header byte.
    pub fn bits(self) -> u8 {
        match self {
            DictionarySize::Size1K => 4,
            DictionarySize::Size2K => 5,
            DictionarySize::Size4K => 6,
        }
    }

    /// Bit mask covering the explicit distance bits.
    pub fn mask(self) -> u32 {
        (1 << self.bits()) - 1
    }

    /// Dictionary size in bytes.
    pub fn bytes(self) -> usize {
        self as usize
    }

    /// Parse the raw header byte (4, 5, or 6).
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            4 => Ok(DictionarySize::Size1K),
            5 => Ok(DictionarySize::Size2K),
            6 => Ok(DictionarySize::Size4K),
            _ => Err(DclError::InvalidDictionary(bits)),
        }
    }

    /// Select a dictionary size by its size in bytes.
    pub fn from_bytes(bytes: u32) -> Result<Self> {
        match bytes {
            1024 => Ok(DictionarySize::Size1K),
            2048 => Ok(DictionarySize::Size2K),
            4096 => Ok(DictionarySize::Size4K),
            _ => Err(DclError::InvalidDictSize(bytes)),
        }
    }
}

/// Parsed form of the 2-byte stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionHeader {
    /// Literal coding mode.
    pub mode: CompressionMode,
    /// Dictionary size.
    pub dict_size: DictionarySize,
}

impl CompressionHeader {
    /// Parse the header from the first bytes of a compressed stream.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(DclError::UnexpectedEof);
        }
        if data[0] > 1 {
            return Err(DclError::InvalidHeader(data[0]));
        }
        Ok(Self {
            mode: CompressionMode::from_u8(data[0])?,
            dict_size: DictionarySize::from_bits(data[1])?,
        })
    }
}

// Format constants shared by both pipelines.

/// Longest allowed repetition, in bytes.
pub const MAX_REP_LENGTH: usize = 0x204;

/// Decoded length value reserved as the end-of-stream marker.
pub const STREAM_END_LENGTH: u32 = 519;

/// Size of the exploder's sliding window.
pub(crate) const WINDOW_SIZE: usize = 0x1000;

/// Bytes of raw input loaded into the imploder's work buffer per block.
pub(crate) const INPUT_BLOCK_SIZE: usize = 0x1000;

/// Number of distinct pair-hash values (`4*0xFF + 5*0xFF`, rounded up).
pub(crate) const HASH_TABLE_SIZE: usize = 0x900;

/// Longest Huffman code length in any of the three alphabets.
pub(crate) const MAX_CODE_BITS: usize = 13;
