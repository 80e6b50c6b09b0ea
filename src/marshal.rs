//! Fixed-layout marshalling — raw memory image of a value, in and out.
//!
//! # Layout contract
//! A [`FixedLayout`] type is a plain value type whose byte footprint is
//! constant and whose compiled representation contains no padding and no
//! references.  The `zerocopy` bounds enforce this at compile time, so
//! [`size_of`] is exactly the sum of the declared field widths and the
//! encoded form is the raw in-memory image of the value.  No per-type
//! registration, no field enumeration at call time.
//!
//! # Failure contract
//! [`decode`] and [`decode_at`] are strict: a source of the wrong length or
//! an out-of-bounds start index is a caller bug and surfaces as a
//! [`MarshalError`].  [`reinterpret`] is the one deliberately soft
//! operation: a size mismatch yields the all-zero output value, never an
//! error — callers use it only when the two sizes are known to be equal.

use thiserror::Error;
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Marker for types the marshaller accepts: fixed size, zero padding, any
/// bit pattern valid.  Blanket-implemented; deriving the `zerocopy` traits
/// on a `#[repr(C, packed)]` struct is all a new type needs.
pub trait FixedLayout: IntoBytes + FromBytes + Immutable + Sized {}
impl<T: IntoBytes + FromBytes + Immutable + Sized> FixedLayout for T {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    #[error("Source is {actual} bytes, but expected type is {expected} bytes in size")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Source is {len} bytes, start at {start}, and target is {need} bytes in size, out of range")]
    OutOfRange { start: usize, need: usize, len: usize },
}

/// Byte footprint of one `T`.  A compile-time constant: the packed layout
/// guarantee makes the runtime stride-measurement (and a per-type size
/// cache) unnecessary.
#[inline]
pub const fn size_of<T: FixedLayout>() -> usize {
    std::mem::size_of::<T>()
}

/// Extracts the raw bytes of a value.  Always exactly `size_of::<T>()`
/// bytes.
#[inline]
pub fn encode<T: FixedLayout>(value: &T) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Writes the raw image of `value` into `buf` starting at `offset`.
///
/// Writes only up to the buffer's remaining capacity — the buffer is never
/// grown, so a caller that wants the whole image must pre-size it.
/// Returns the number of bytes written.
pub fn encode_into<T: FixedLayout>(value: &T, buf: &mut [u8], offset: usize) -> usize {
    if offset >= buf.len() {
        return 0;
    }
    let src = value.as_bytes();
    let n = src.len().min(buf.len() - offset);
    buf[offset..offset + n].copy_from_slice(&src[..n]);
    n
}

/// Reconstructs a `T` from exactly `size_of::<T>()` source bytes.
pub fn decode<T: FixedLayout>(source: &[u8]) -> Result<T, MarshalError> {
    let expected = size_of::<T>();
    if source.len() != expected {
        return Err(MarshalError::SizeMismatch {
            expected,
            actual: source.len(),
        });
    }
    T::read_from_bytes(source).map_err(|_| MarshalError::SizeMismatch {
        expected,
        actual: source.len(),
    })
}

/// Reconstructs a `T` from `source` starting at index `start`.
pub fn decode_at<T: FixedLayout>(source: &[u8], start: usize) -> Result<T, MarshalError> {
    let need = size_of::<T>();
    let out_of_range = MarshalError::OutOfRange {
        start,
        need,
        len: source.len(),
    };
    let end = match start.checked_add(need) {
        Some(end) if end <= source.len() => end,
        _ => return Err(out_of_range),
    };
    decode(&source[start..end])
}

/// Reinterprets the raw bytes of a `TIn` as a `TOut`.
///
/// The two sizes must be equal; on mismatch the all-zero `TOut` is returned
/// rather than an error.
pub fn reinterpret<TIn: FixedLayout, TOut: FixedLayout>(value: &TIn) -> TOut {
    if size_of::<TIn>() != size_of::<TOut>() {
        return TOut::new_zeroed();
    }
    TOut::read_from_bytes(value.as_bytes()).unwrap_or_else(|_| TOut::new_zeroed())
}

/// Hexdump of a byte slice, `stride` bytes per line, each line prefixed
/// `0x`.  Diagnostics only — never parsed.
pub fn hex_dump(bytes: &[u8], stride: usize) -> String {
    let stride = stride.max(1);
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(stride).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("0x");
        out.push_str(&hex::encode_upper(chunk));
    }
    out
}
