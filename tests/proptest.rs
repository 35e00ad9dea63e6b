// Copyright 2025 the lzav crate authors
// Property-based tests using proptest

use lzav::{compress, compress_bound, compress_to_vec, decompress, decompress_to_vec};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_roundtrip(data: Vec<u8>) {
        prop_assume!(data.len() <= 100_000);

        let compressed = compress_to_vec(&data);
        let decompressed = decompress_to_vec(&compressed, data.len()).expect("decode failed");
        prop_assert_eq!(data, decompressed);
    }

    #[test]
    fn prop_roundtrip_with_external_buffer(data: Vec<u8>, fill: u32) {
        prop_assume!(data.len() <= 50_000 && !data.is_empty());

        let mut ext = vec![fill; (1 << 16) * 4];
        let mut dst = vec![0u8; compress_bound(data.len())];
        let n = compress(&data, &mut dst, Some(&mut ext[..]));
        prop_assert!(n > 0);

        let decompressed = decompress_to_vec(&dst[..n], data.len()).expect("decode failed");
        prop_assert_eq!(data, decompressed);
    }

    #[test]
    fn prop_bound_holds(data: Vec<u8>) {
        prop_assume!(data.len() <= 100_000);

        let compressed = compress_to_vec(&data);
        if !data.is_empty() {
            prop_assert!(compressed.len() <= compress_bound(data.len()));
            prop_assert!(compressed.len() >= 2);
        }
    }

    #[test]
    fn prop_decode_never_panics(data: Vec<u8>, dstl in 0usize..8192) {
        prop_assume!(data.len() <= 10_000);

        // Decoding arbitrary bytes must return a result, never panic,
        // and success means the full destination was produced.
        let mut out = vec![0u8; dstl];
        if let Ok(n) = decompress(&data, &mut out) {
            prop_assert_eq!(n, dstl);
        }
    }

    #[test]
    fn prop_decode_never_panics_with_prefix(data: Vec<u8>, dstl in 0usize..8192) {
        prop_assume!(data.len() <= 10_000 && !data.is_empty());

        let mut data = data;
        data[0] = 0x16;

        let mut out = vec![0u8; dstl];
        if let Ok(n) = decompress(&data, &mut out) {
            prop_assert_eq!(n, dstl);
        }
    }

    #[test]
    fn prop_truncated_is_rejected(data: Vec<u8>, cut in 1usize..8) {
        prop_assume!(data.len() >= 64 && data.len() <= 20_000);

        let compressed = compress_to_vec(&data);
        prop_assume!(cut < compressed.len());

        let truncated = &compressed[..compressed.len() - cut];
        prop_assert!(decompress_to_vec(truncated, data.len()).is_err());
    }

    #[test]
    fn prop_empty_and_small(size in 0usize..100) {
        let data = vec![b'x'; size];
        let compressed = compress_to_vec(&data);
        let decompressed = decompress_to_vec(&compressed, size).expect("decode failed");
        prop_assert_eq!(data, decompressed);
    }

    #[test]
    fn prop_all_same_byte(byte: u8, size in 1usize..10000) {
        let data = vec![byte; size];
        let compressed = compress_to_vec(&data);
        let decompressed = decompress_to_vec(&compressed, size).expect("decode failed");
        prop_assert_eq!(&data, &decompressed);

        // Repeated bytes must collapse to references.
        if size > 200 {
            prop_assert!(compressed.len() < size / 5);
        }
    }

    #[test]
    fn prop_repeated_data_compresses(data in prop::collection::vec(any::<u8>(), 100..1000)) {
        let repeated = data.repeat(10);
        let compressed = compress_to_vec(&repeated);

        prop_assert!(compressed.len() < repeated.len() / 2);

        let decompressed =
            decompress_to_vec(&compressed, repeated.len()).expect("decode failed");
        prop_assert_eq!(repeated, decompressed);
    }
}
