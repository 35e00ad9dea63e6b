#![no_main]

use libfuzzer_sys::fuzz_target;
use lzav::decompress;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes against several destination lengths: must never
    // panic, and a success must fill the destination exactly.
    for dstl in [0usize, 1, 5, 64, 4096, 20000] {
        let mut out = vec![0u8; dstl];
        if let Ok(n) = decompress(data, &mut out) {
            assert_eq!(n, dstl);
        }
    }
});
