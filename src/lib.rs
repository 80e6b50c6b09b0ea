//! seedpack — compact packed-seed identifiers.
//!
//! A [`Seed`] is the fixed 92-byte identity of one generated image.  This
//! crate marshals any fixed-layout value to its raw byte image and back
//! ([`marshal`]), runs those bytes through gzip and base64 stages
//! ([`codec`]), and composes the stages into the raw and compressed
//! identifier pipelines ([`pack`] / [`unpack`]) whose output doubles as a
//! content-addressable cache key and file name.
//!
//! ```
//! use seedpack::{pack, unpack, Seed};
//!
//! let seed = Seed::ZERO;
//! let id = pack::gzip_base64(&seed)?;
//! assert_eq!(unpack::gzip_base64::<Seed>(&id)?, seed);
//!
//! // Identifiers arrive from untrusted filenames; decoding never panics.
//! assert_eq!(unpack::gzip_base64_or_default::<Seed>("not an id"), Seed::ZERO);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod marshal;
pub mod pack;
pub mod seed;
pub mod unpack;

pub use codec::CodecError;
pub use marshal::{FixedLayout, MarshalError};
pub use pack::{from_filename_safe, looks_gzip_base64, to_filename_safe, GZIP_BASE64_PREFIX};
pub use seed::{Seed, SEED_SIZE};
pub use unpack::UnpackError;
