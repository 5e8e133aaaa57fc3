//! Property-based tests over randomized inputs.

use pkdcl::{explode_bytes, implode_bytes, CompressionMode, DictionarySize};
use proptest::prelude::*;

const ALL_MODES: [CompressionMode; 2] = [CompressionMode::Binary, CompressionMode::ASCII];
const ALL_DICTS: [DictionarySize; 3] = [
    DictionarySize::Size1K,
    DictionarySize::Size2K,
    DictionarySize::Size4K,
];

proptest! {
    #[test]
    fn arbitrary_data_round_trips(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        for mode in ALL_MODES {
            for dict in ALL_DICTS {
                let packed = implode_bytes(&data, mode, dict).unwrap();
                let unpacked = explode_bytes(&packed).unwrap();
                prop_assert_eq!(&data[..], &unpacked[..]);
            }
        }
    }

    #[test]
    fn low_entropy_data_round_trips(data in prop::collection::vec(0u8..20, 0..1000)) {
        let packed = implode_bytes(&data, CompressionMode::Binary, DictionarySize::Size1K).unwrap();
        let unpacked = explode_bytes(&packed).unwrap();
        prop_assert_eq!(&data[..], &unpacked[..]);
    }

    #[test]
    fn repeated_patterns_round_trip(
        pattern in prop::collection::vec(any::<u8>(), 1..20),
        repeats in 2usize..200,
    ) {
        let mut data = Vec::with_capacity(pattern.len() * repeats);
        for _ in 0..repeats {
            data.extend_from_slice(&pattern);
        }
        for dict in ALL_DICTS {
            let packed = implode_bytes(&data, CompressionMode::Binary, dict).unwrap();
            let unpacked = explode_bytes(&packed).unwrap();
            prop_assert_eq!(&data[..], &unpacked[..]);
        }
    }

    #[test]
    fn single_byte_runs_round_trip(byte in any::<u8>(), len in 0usize..1500) {
        let data = vec![byte; len];
        let packed = implode_bytes(&data, CompressionMode::Binary, DictionarySize::Size2K).unwrap();
        let unpacked = explode_bytes(&packed).unwrap();
        prop_assert_eq!(&data[..], &unpacked[..]);
    }

    #[test]
    fn printable_text_round_trips(
        text in prop::collection::vec(prop::char::range(' ', '~'), 0..1200)
    ) {
        let data: Vec<u8> = text.into_iter().map(|c| c as u8).collect();
        let packed = implode_bytes(&data, CompressionMode::ASCII, DictionarySize::Size4K).unwrap();
        let unpacked = explode_bytes(&packed).unwrap();
        prop_assert_eq!(&data[..], &unpacked[..]);
    }

    #[test]
    fn encoding_is_a_pure_function(data in prop::collection::vec(any::<u8>(), 0..600)) {
        for mode in ALL_MODES {
            for dict in ALL_DICTS {
                let first = implode_bytes(&data, mode, dict).unwrap();
                let second = implode_bytes(&data, mode, dict).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn decoder_never_panics_on_garbage(data in prop::collection::vec(any::<u8>(), 0..400)) {
        // Arbitrary bytes are rarely a valid stream; any failure must be a
        // clean error rather than a panic.
        let _ = explode_bytes(&data);
    }

    #[test]
    fn decoder_never_panics_on_mangled_streams(
        data in prop::collection::vec(any::<u8>(), 1..300),
        flip in any::<u16>(),
    ) {
        // Start from a valid stream, then flip one bit somewhere.
        let mut packed =
            implode_bytes(&data, CompressionMode::ASCII, DictionarySize::Size1K).unwrap();
        let bit = flip as usize % (packed.len() * 8);
        packed[bit / 8] ^= 1 << (bit % 8);
        let _ = explode_bytes(&packed);
    }
}
