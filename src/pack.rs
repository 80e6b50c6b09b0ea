//! Packing pipelines — typed value or raw bytes to identifier string.
//!
//! Two pipelines, both ending in standard base64 text:
//!   - raw:        marshal → base64
//!   - compressed: marshal → gzip → base64
//!
//! The compressed form of a zero-mtime gzip stream always starts with
//! [`GZIP_BASE64_PREFIX`], which downstream code uses to tell the two
//! variants apart before attempting a decode.

use crate::codec::{self, CodecError};
use crate::marshal::{self, FixedLayout};

/// Base64 prefix shared by every zero-mtime gzip stream.
///
/// These 12 characters cover the 9 fixed header bytes (magic `1f 8b`,
/// deflate method, no flags, zero mtime, zero XFL).  The 13th character
/// encodes the emitting runtime's OS byte and varies — historical emitters
/// produced the longer literal `H4sIAAAAAAAAC` — so detection keys on the
/// stable 12 only.
pub const GZIP_BASE64_PREFIX: &str = "H4sIAAAAAAAA";

/// Heuristic: does this identifier look like the compressed variant?
/// Works on both the base64 and the filename-safe spelling, since the
/// prefix contains neither `/` nor `-`.
pub fn looks_gzip_base64(encoded: &str) -> bool {
    encoded.starts_with(GZIP_BASE64_PREFIX)
}

/// Replaces `/` with `-` so a base64 identifier can be used as a file
/// name.  Not an escaping scheme: an input already containing `-` will not
/// survive [`from_filename_safe`] unchanged.
pub fn to_filename_safe(encoded: &str) -> String {
    encoded.replace('/', "-")
}

/// Reverses [`to_filename_safe`], mapping `-` back to `/`.
pub fn from_filename_safe(name: &str) -> String {
    name.replace('-', "/")
}

/// Packs a value into a base64 string (raw pipeline).
#[inline]
pub fn base64<T: FixedLayout>(value: &T) -> String {
    codec::base64_encode(&marshal::encode(value))
}

/// Packs caller-supplied bytes into a base64 string.
#[inline]
pub fn bytes_base64(data: &[u8]) -> String {
    codec::base64_encode(data)
}

/// Packs a value into a gzipped base64 string (compressed pipeline).
#[inline]
pub fn gzip_base64<T: FixedLayout>(value: &T) -> Result<String, CodecError> {
    bytes_gzip_base64(&marshal::encode(value))
}

/// Packs caller-supplied bytes into a gzipped base64 string.
#[inline]
pub fn bytes_gzip_base64(data: &[u8]) -> Result<String, CodecError> {
    Ok(codec::base64_encode(&codec::gzip_compress(data)?))
}
