#![no_main]

use libfuzzer_sys::fuzz_target;
use lzav::{compress_bound, compress_default};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000_000 {
        return;
    }

    // A destination sized exactly at the bound must always be enough.
    let mut dst = vec![0u8; compress_bound(data.len())];
    let n = compress_default(data, &mut dst);

    if data.is_empty() {
        assert_eq!(n, 0);
    } else {
        assert!(n > 0, "compression failed with a bound-sized destination");
        assert!(n <= dst.len());
    }
});
