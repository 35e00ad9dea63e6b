// Copyright 2025 the lzav crate authors
// Based on the LZAV compression format by Aleksey Vaneev
// Use of this source code is governed by the MIT license
// that can be found in the LICENSE file.

use std::fmt;

/// Result type for LZAV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for LZAV decompression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Incorrect function parameters
    Params,

    /// Attempted source buffer read past its end
    SrcOob,

    /// Attempted destination buffer write past its end
    DstOob,

    /// Back-reference offset points before the start of the output
    RefOob,

    /// Decompressed length differs from the expected length
    DstLen,

    /// The stream prefix carries an unknown format identifier
    UnknownFormat,
}

impl Error {
    /// Returns the numeric error code of the reference C API.
    ///
    /// Callers ported from the C library match on these values.
    pub const fn code(self) -> i32 {
        match self {
            Error::Params => -1,
            Error::SrcOob => -2,
            Error::DstOob => -3,
            Error::RefOob => -4,
            Error::DstLen => -5,
            Error::UnknownFormat => -6,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Params => write!(f, "lzav: incorrect function parameters"),
            Error::SrcOob => write!(f, "lzav: source buffer out of bounds"),
            Error::DstOob => write!(f, "lzav: destination buffer out of bounds"),
            Error::RefOob => write!(f, "lzav: back-reference out of bounds"),
            Error::DstLen => write!(f, "lzav: decompressed length mismatch"),
            Error::UnknownFormat => write!(f, "lzav: unknown stream format"),
        }
    }
}

impl std::error::Error for Error {}
