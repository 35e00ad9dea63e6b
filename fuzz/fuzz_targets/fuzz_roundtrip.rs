#![no_main]

use libfuzzer_sys::fuzz_target;
use lzav::{compress_to_vec, decompress_to_vec};

fuzz_target!(|data: &[u8]| {
    // Skip very large inputs to avoid OOM
    if data.len() > 1_000_000 {
        return;
    }

    let compressed = compress_to_vec(data);
    if data.is_empty() {
        assert!(compressed.is_empty());
        return;
    }

    assert!(!compressed.is_empty(), "compression of non-empty input failed");

    let decompressed = decompress_to_vec(&compressed, data.len()).expect("decode failed");
    assert_eq!(data, &decompressed[..], "roundtrip failed");
});
