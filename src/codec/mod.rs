//! Codec Layer: Fixed-Width Scalar Encoding
//!
//! Prinsip desain:
//! - One trait, many zero-sized codecs: width, byte order and domain are
//!   fixed per type at compile time
//! - No storage: a `Scalar` decodes from / encodes into its view on every access
//! - Validate, then write: a rejected value never touches the bytes

use std::fmt;

use crate::core::View;
use crate::error::Result;

mod numeric;
mod scalar;
mod time;

pub use numeric::{
    Float32BE, Float32LE, Float64BE, Float64LE, Sint16BE, Sint16LE, Sint32BE, Sint32LE, Sint64BE,
    Sint64LE, Sint8, Uint16BE, Uint16LE, Uint32BE, Uint32LE, Uint64BE, Uint64LE, Uint8,
    Uint8Clamped,
};
pub use scalar::Scalar;
pub use time::{TimePosixS32BE, TimePosixS32LE, TimePosixS64BE, TimePosixS64LE};

/// Fixed-width scalar interpretation of `WIDTH` bytes
pub trait Codec {
    /// Type name, used in error messages
    const NAME: &'static str;
    /// Encoded size in bytes
    const WIDTH: usize;

    /// `[u8; WIDTH]`
    type Raw: Copy + Default + AsRef<[u8]> + AsMut<[u8]>;
    type Value: Copy + PartialEq + fmt::Debug;

    fn decode(raw: Self::Raw) -> Self::Value;

    /// Validate `value` against the codec's domain and encode it.
    fn encode(value: Self::Value) -> Result<Self::Raw>;

    /// Convert a loosely typed number into the codec's domain.
    ///
    /// Integer codecs reject non-integers (`InvalidArgument`) and values
    /// outside their range (`OutOfRange`).
    fn from_number(value: f64) -> Result<Self::Value>;

    /// Bind the codec to a view of exactly `WIDTH` bytes.
    fn bind(view: View<'_>) -> Result<Scalar<'_, Self>>
    where
        Self: Sized,
    {
        Scalar::new(view)
    }
}

/// Codecs in the platform's byte order, used by the view projections
pub mod native {
    pub use super::{Sint8 as Int8, Uint8, Uint8Clamped};

    #[cfg(target_endian = "little")]
    pub use super::{
        Float32LE as Float32, Float64LE as Float64, Sint16LE as Int16, Sint32LE as Int32,
        Sint64LE as BigInt64, Uint16LE as Uint16, Uint32LE as Uint32, Uint64LE as BigUint64,
    };

    #[cfg(target_endian = "big")]
    pub use super::{
        Float32BE as Float32, Float64BE as Float64, Sint16BE as Int16, Sint32BE as Int32,
        Sint64BE as BigInt64, Uint16BE as Uint16, Uint32BE as Uint32, Uint64BE as BigUint64,
    };
}
