//! Byte-stage codecs: gzip compression and base64 text encoding.
//!
//! Both stages are general-purpose and lossless.  Compression always
//! succeeds for in-memory input; decompression fails on anything that is
//! not a well-formed gzip container (wrong magic, truncated stream) and is
//! bounded by [`MAX_DECOMPRESSED_SIZE`] since inputs arrive from untrusted
//! sources (filenames, API payloads).

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

/// Upper bound on decompressed output.  Packed identifiers decompress to
/// well under a kilobyte; anything approaching this limit is a bomb.
pub const MAX_DECOMPRESSED_SIZE: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Compression error: {0}")]
    Compression(String),
    #[error("Decompression error: {0}")]
    Decompression(String),
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Decompressed payload exceeds {max} bytes")]
    TooLarge { max: usize },
}

/// Compresses `data` into a gzip container.
pub fn gzip_compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| CodecError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| CodecError::Compression(e.to_string()))
}

/// Decompresses a gzip container, with bounded output size.
pub fn gzip_decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = decoder
            .read(&mut buf)
            .map_err(|e| CodecError::Decompression(e.to_string()))?;
        if n == 0 {
            break;
        }
        if out.len() + n > MAX_DECOMPRESSED_SIZE {
            return Err(CodecError::TooLarge {
                max: MAX_DECOMPRESSED_SIZE,
            });
        }
        out.extend_from_slice(&buf[..n]);
    }
    Ok(out)
}

/// Standard-alphabet base64 text of `data`.
pub fn base64_encode(data: &[u8]) -> String {
    base64::Engine::encode(&base64::engine::general_purpose::STANDARD, data)
}

/// Decodes standard-alphabet base64 text.
pub fn base64_decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(base64::Engine::decode(
        &base64::engine::general_purpose::STANDARD,
        text,
    )?)
}
