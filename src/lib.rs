// Copyright 2025 the lzav crate authors
// Based on the LZAV compression format by Aleksey Vaneev
// Use of this source code is governed by the MIT license
// that can be found in the LICENSE file.

//! # LZAV Compression
//!
//! This library implements the LZAV in-memory compression algorithm and
//! its stream format 1, binary compatible with the reference C
//! implementation at github.com/avaneev/lzav.
//!
//! LZAV provides:
//! - Fast single-shot compression of byte buffers
//! - Bounds-checked decompression that rejects malformed input
//! - An optional caller-supplied hash-table buffer for allocation-free
//!   compression
//!
//! The streams are "raw": they carry no length header, identifier or
//! checksum, so the caller must convey the decompressed length out of
//! band.
//!
//! ## Example
//!
//! ```rust
//! use lzav::{compress_to_vec, decompress_to_vec};
//!
//! let data = b"Hello, World! This is a test of LZAV compression.";
//! let compressed = compress_to_vec(data);
//! let decompressed =
//!     decompress_to_vec(&compressed, data.len()).expect("decompression failed");
//! assert_eq!(data, &decompressed[..]);
//! ```

mod constants;
mod decode;
mod encode;
mod error;

pub use decode::{decompress, decompress_to_vec};
pub use encode::{compress, compress_bound, compress_default, compress_to_vec};
pub use error::{Error, Result};
