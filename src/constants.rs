// Copyright 2025 the lzav crate authors
// Based on the LZAV compression format by Aleksey Vaneev
// Use of this source code is governed by the MIT license
// that can be found in the LICENSE file.

/// LZ77 window length, in bytes (exclusive upper bound on reference offsets)
pub const WIN_LEN: usize = 1 << 24;

/// Maximum literal run length carried by a single literal block
pub const LIT_LEN: usize = 1 + 15 + 255 + 255;

/// Minimum reference length written by the compressor
pub const REF_MIN: usize = 6;

/// Maximum reference length
pub const REF_LEN: usize = REF_MIN + 15 + 255;

/// Number of literal bytes every stream must end with
pub const LIT_FIN: usize = 5;

/// Stream format identifier written into the prefix byte's high nibble
pub const FMT_CUR: u8 = 1;
