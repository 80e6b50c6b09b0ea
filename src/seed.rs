//! The [`Seed`] record — the compact identity of one generated image.
//!
//! # Layout
//! `Seed` is `#[repr(C, packed)]`: 16 × i32, one i32, 3 × f64, in that
//! order, 92 bytes, zero padding.  The packed layout is the marshalling
//! contract — the raw byte image produced by [`crate::marshal`] is exactly
//! these fields back to back.
//!
//! # External array form
//! The generation API exchanges seeds as an 18-element JSON array: 16
//! numbers, the opaque `extra` number, and a trailing 3-element color
//! array.  [`Seed::from_array`] accepts exactly that shape and falls back
//! to [`Seed::ZERO`] on anything else — a malformed array is a defined
//! degraded input, never an error.
//!
//! # Identifiers
//! [`Seed::raw_id`] and [`Seed::compressed_id`] derive the raw and
//! compressed packed-identifier strings used as cache keys / file names;
//! [`Seed::from_filename_stem`] reverses the compressed one.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::codec::CodecError;
use crate::pack;
use crate::unpack::{self, UnpackError};

/// Number of primary seed numbers.
pub const SEED_NUMS: usize = 16;
/// Number of color-summary components.
pub const SEED_COLOR: usize = 3;
/// Element count of the external array form: the numbers, `extra`, and
/// one nested color array.
pub const SEED_ARRAY_LEN: usize = SEED_NUMS + 2;
/// Packed byte footprint of a [`Seed`]: 16 × 4 + 4 + 3 × 8.
pub const SEED_SIZE: usize = std::mem::size_of::<Seed>();

/// Tightly packed seed record.
#[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C, packed)]
pub struct Seed {
    /// Primary numbers.  The generation API keeps them in [1, 1_000_000);
    /// the codec does not enforce that at decode time.
    pub nums: [i32; SEED_NUMS],
    /// Opaque passthrough — observed always zero, meaning unknown.
    pub extra: i32,
    /// Color summary; acts as a uniquifier.
    pub color: [f64; SEED_COLOR],
}

impl Seed {
    /// The all-zero seed, also the fallback for malformed input.
    pub const ZERO: Seed = Seed {
        nums: [0; SEED_NUMS],
        extra: 0,
        color: [0.0; SEED_COLOR],
    };

    /// Builds a seed from the external 18-element array form.
    ///
    /// The value must be an array of exactly [`SEED_ARRAY_LEN`] elements
    /// whose last element is itself a 3-element array; anything else
    /// yields [`Seed::ZERO`].  Float-valued numbers truncate toward zero;
    /// non-numeric elements coerce to zero.
    pub fn from_array(data: &Value) -> Seed {
        let Some(items) = data.as_array() else {
            return Seed::ZERO;
        };
        if items.len() != SEED_ARRAY_LEN {
            return Seed::ZERO;
        }
        let Some(col) = items[SEED_ARRAY_LEN - 1].as_array() else {
            return Seed::ZERO;
        };
        if col.len() != SEED_COLOR {
            return Seed::ZERO;
        }

        let mut nums = [0i32; SEED_NUMS];
        for (i, slot) in nums.iter_mut().enumerate() {
            *slot = int_val(&items[i]);
        }
        let extra = int_val(&items[SEED_NUMS]);
        let mut color = [0.0f64; SEED_COLOR];
        for (i, slot) in color.iter_mut().enumerate() {
            *slot = col[i].as_f64().unwrap_or(0.0);
        }
        Seed { nums, extra, color }
    }

    /// Converts this seed back into its external array form.
    pub fn to_array(&self) -> Value {
        // Copy out of the packed struct before borrowing anything.
        let nums = self.nums;
        let extra = self.extra;
        let color = self.color;

        let mut main: Vec<Value> = nums.iter().map(|n| json!(n)).collect();
        main.push(json!(extra));
        main.push(json!(color.to_vec()));
        Value::Array(main)
    }

    /// Raw-pipeline packed identifier (base64 of the 92-byte image).
    pub fn raw_id(&self) -> String {
        pack::base64(self)
    }

    /// Compressed, filename-safe packed identifier — the string used as a
    /// cache key and on-disk file stem.
    pub fn compressed_id(&self) -> Result<String, CodecError> {
        Ok(pack::to_filename_safe(&pack::gzip_base64(self)?))
    }

    /// Recovers a seed from a filename stem produced by
    /// [`Seed::compressed_id`].
    pub fn from_filename_stem(stem: &str) -> Result<Seed, UnpackError> {
        unpack::gzip_base64(&pack::from_filename_safe(stem))
    }
}

/// Integer view of a JSON number: integers pass through, floats truncate
/// toward zero, anything else is zero.
fn int_val(value: &Value) -> i32 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0) as i32
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_array())
    }
}

/// Serializes as the external array form, not as a struct.
impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

/// Deserializes from the external array form, with the same zero-seed
/// fallback as [`Seed::from_array`] — a malformed array is degraded input,
/// not a deserialization error.
impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Seed::from_array(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Seed {
        let mut nums = [0i32; SEED_NUMS];
        for (i, slot) in nums.iter_mut().enumerate() {
            *slot = (i as i32 + 1) * 31337 % 1_000_000;
        }
        Seed {
            nums,
            extra: 0,
            color: [0.25, 0.5, 0.75],
        }
    }

    #[test]
    fn packed_size_is_92() {
        assert_eq!(SEED_SIZE, 92);
    }

    #[test]
    fn array_roundtrip() {
        let seed = sample();
        assert_eq!(Seed::from_array(&seed.to_array()), seed);
    }

    #[test]
    fn from_array_accepts_the_wire_shape() {
        let arr = json!([
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
            0,
            [0.1, 0.2, 0.3]
        ]);
        let seed = Seed::from_array(&arr);
        assert_eq!(seed.to_array(), arr);
    }

    #[test]
    fn malformed_arrays_yield_zero_seed() {
        for bad in [
            json!(null),
            json!("seeds"),
            json!([1, 2, 3]),
            // 18 elements but no trailing color array
            json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 0, 17]),
            // trailing array of the wrong arity
            json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 0, [0.1, 0.2]]),
        ] {
            assert_eq!(Seed::from_array(&bad), Seed::ZERO);
        }
    }

    #[test]
    fn non_numeric_elements_coerce_to_zero() {
        let arr = json!([
            "x", 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
            null,
            [0.1, "y", 0.3]
        ]);
        let seed = Seed::from_array(&arr);
        let (nums, extra, color) = (seed.nums, seed.extra, seed.color);
        assert_eq!(nums[0], 0);
        assert_eq!(nums[1], 2);
        assert_eq!(extra, 0);
        assert_eq!(color[1], 0.0);
    }

    #[test]
    fn float_valued_numbers_truncate() {
        let arr = json!([
            712933.5, 2.9, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
            1.75,
            [0.1, 0.2, 0.3]
        ]);
        let seed = Seed::from_array(&arr);
        let (nums, extra) = (seed.nums, seed.extra);
        assert_eq!(nums[0], 712933);
        assert_eq!(nums[1], 2);
        assert_eq!(extra, 1);
    }

    #[test]
    fn display_is_json_array_text() {
        let text = Seed::ZERO.to_string();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(Seed::from_array(&parsed), Seed::ZERO);
    }

    #[test]
    fn serde_uses_the_array_form() {
        let seed = sample();
        let text = serde_json::to_string(&seed).unwrap();
        assert!(text.starts_with('['));
        let back: Seed = serde_json::from_str(&text).unwrap();
        assert_eq!(back, seed);
    }

    #[test]
    fn serde_malformed_input_falls_back_to_zero() {
        let back: Seed = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(back, Seed::ZERO);
    }

    #[test]
    fn compressed_id_roundtrips_through_filename() {
        let seed = sample();
        let stem = seed.compressed_id().unwrap();
        assert!(!stem.contains('/'));
        assert_eq!(Seed::from_filename_stem(&stem).unwrap(), seed);
    }

    #[test]
    fn compressed_id_is_detectable() {
        let stem = sample().compressed_id().unwrap();
        assert!(pack::looks_gzip_base64(&stem));
        assert!(!pack::looks_gzip_base64(&sample().raw_id()));
    }
}
