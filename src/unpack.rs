//! Unpacking pipelines — identifier string back to typed value or bytes.
//!
//! Identifiers arrive from untrusted sources, so no path here panics: every
//! internal fault (bad base64, corrupt gzip stream, size mismatch) becomes
//! an [`UnpackError`].  Callers that want the legacy "default on failure"
//! shape use the `_or_default` variants, which collapse any failure into
//! the all-zero value.

use crate::codec::{self, CodecError};
use crate::marshal::{self, FixedLayout, MarshalError};

#[derive(thiserror::Error, Debug)]
pub enum UnpackError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// Unpacks a base64 string into a value (raw pipeline).
pub fn base64<T: FixedLayout>(encoded: &str) -> Result<T, UnpackError> {
    let bytes = codec::base64_decode(encoded)?;
    Ok(marshal::decode(&bytes)?)
}

/// Raw-pipeline unpack that yields the all-zero value on any failure.
pub fn base64_or_default<T: FixedLayout>(encoded: &str) -> T {
    base64(encoded).unwrap_or_else(|_| T::new_zeroed())
}

/// Unpacks a gzipped base64 string into a value (compressed pipeline).
pub fn gzip_base64<T: FixedLayout>(encoded: &str) -> Result<T, UnpackError> {
    let bytes = gzip_base64_bytes(encoded)?;
    Ok(marshal::decode(&bytes)?)
}

/// Compressed-pipeline unpack that yields the all-zero value on any
/// failure.
pub fn gzip_base64_or_default<T: FixedLayout>(encoded: &str) -> T {
    gzip_base64(encoded).unwrap_or_else(|_| T::new_zeroed())
}

/// Unpacks a base64 string back into its raw bytes.
pub fn raw_base64(encoded: &str) -> Result<Vec<u8>, UnpackError> {
    Ok(codec::base64_decode(encoded)?)
}

/// Unpacks a base64 string holding gzipped data back into the
/// decompressed bytes.
pub fn gzip_base64_bytes(encoded: &str) -> Result<Vec<u8>, UnpackError> {
    let compressed = codec::base64_decode(encoded)?;
    Ok(codec::gzip_decompress(&compressed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack;

    #[test]
    fn invalid_base64_is_an_error_not_a_panic() {
        assert!(base64::<u64>("not valid base64!!").is_err());
        assert_eq!(base64_or_default::<u64>("not valid base64!!"), 0);
    }

    #[test]
    fn size_mismatch_is_reported() {
        // 4 bytes of payload, 8-byte target
        let encoded = pack::bytes_base64(&[1, 2, 3, 4]);
        assert!(matches!(
            base64::<u64>(&encoded),
            Err(UnpackError::Marshal(MarshalError::SizeMismatch { expected: 8, actual: 4 }))
        ));
    }

    #[test]
    fn mismatched_pipeline_fails_soft() {
        // Raw-packed data fed to the compressed unpacker: the payload is
        // not a gzip container, so this must fail rather than yield junk.
        let raw = pack::base64(&0xABCD_EF01_2345_6789u64);
        assert!(gzip_base64::<u64>(&raw).is_err());
        assert_eq!(gzip_base64_or_default::<u64>(&raw), 0);
    }

    #[test]
    fn byte_level_roundtrips() {
        let data = b"opaque payload".to_vec();
        assert_eq!(raw_base64(&pack::bytes_base64(&data)).unwrap(), data);
        let packed = pack::bytes_gzip_base64(&data).unwrap();
        assert_eq!(gzip_base64_bytes(&packed).unwrap(), data);
    }
}
