//! Integer and IEEE-754 codecs
//!
//! Every type is generated from one macro invocation. Width-1 types have a
//! single variant; wider ones come as `BE` / `LE` pairs.

use super::Codec;
use crate::error::{MemoryError, Result};

#[inline(always)]
fn check_integer(codec: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(MemoryError::InvalidArgument(format!(
            "{} requires an integer, got {}",
            codec, value
        )));
    }
    Ok(())
}

macro_rules! int_codec {
    ($(#[$meta:meta])* $name:ident, $t:ty, $width:literal, $from:ident, $to:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Codec for $name {
            const NAME: &'static str = stringify!($name);
            const WIDTH: usize = $width;

            type Raw = [u8; $width];
            type Value = $t;

            #[inline(always)]
            fn decode(raw: Self::Raw) -> $t {
                <$t>::$from(raw)
            }

            #[inline(always)]
            fn encode(value: $t) -> Result<Self::Raw> {
                Ok(value.$to())
            }

            fn from_number(value: f64) -> Result<$t> {
                check_integer(Self::NAME, value)?;
                // 64-bit MAX rounds up to 2^63 / 2^64, still the exclusive bound
                if value < <$t>::MIN as f64 || value >= <$t>::MAX as f64 + 1.0 {
                    return Err(MemoryError::out_of_range(Self::NAME, value));
                }
                Ok(value as $t)
            }
        }
    };
}

macro_rules! float_codec {
    ($(#[$meta:meta])* $name:ident, $t:ty, $width:literal, $from:ident, $to:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Codec for $name {
            const NAME: &'static str = stringify!($name);
            const WIDTH: usize = $width;

            type Raw = [u8; $width];
            type Value = $t;

            #[inline(always)]
            fn decode(raw: Self::Raw) -> $t {
                <$t>::$from(raw)
            }

            #[inline(always)]
            fn encode(value: $t) -> Result<Self::Raw> {
                Ok(value.$to())
            }

            fn from_number(value: f64) -> Result<$t> {
                Ok(value as $t)
            }
        }
    };
}

int_codec!(
    /// Unsigned 8-bit integer
    Uint8, u8, 1, from_le_bytes, to_le_bytes
);
int_codec!(
    /// Signed 8-bit integer
    Sint8, i8, 1, from_le_bytes, to_le_bytes
);

int_codec!(Uint16BE, u16, 2, from_be_bytes, to_be_bytes);
int_codec!(Uint16LE, u16, 2, from_le_bytes, to_le_bytes);
int_codec!(Sint16BE, i16, 2, from_be_bytes, to_be_bytes);
int_codec!(Sint16LE, i16, 2, from_le_bytes, to_le_bytes);

int_codec!(Uint32BE, u32, 4, from_be_bytes, to_be_bytes);
int_codec!(Uint32LE, u32, 4, from_le_bytes, to_le_bytes);
int_codec!(Sint32BE, i32, 4, from_be_bytes, to_be_bytes);
int_codec!(Sint32LE, i32, 4, from_le_bytes, to_le_bytes);

int_codec!(Uint64BE, u64, 8, from_be_bytes, to_be_bytes);
int_codec!(Uint64LE, u64, 8, from_le_bytes, to_le_bytes);
int_codec!(Sint64BE, i64, 8, from_be_bytes, to_be_bytes);
int_codec!(Sint64LE, i64, 8, from_le_bytes, to_le_bytes);

float_codec!(
    /// IEEE-754 binary32, big-endian
    Float32BE, f32, 4, from_be_bytes, to_be_bytes
);
float_codec!(
    /// IEEE-754 binary32, little-endian
    Float32LE, f32, 4, from_le_bytes, to_le_bytes
);
float_codec!(
    /// IEEE-754 binary64, big-endian
    Float64BE, f64, 8, from_be_bytes, to_be_bytes
);
float_codec!(
    /// IEEE-754 binary64, little-endian
    Float64LE, f64, 8, from_le_bytes, to_le_bytes
);

/// Unsigned byte whose numeric conversion saturates instead of failing
///
/// `from_number` maps NaN to 0, clamps to `[0, 255]` and rounds
/// half-to-even.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uint8Clamped;

impl Codec for Uint8Clamped {
    const NAME: &'static str = "Uint8Clamped";
    const WIDTH: usize = 1;

    type Raw = [u8; 1];
    type Value = u8;

    #[inline(always)]
    fn decode(raw: Self::Raw) -> u8 {
        raw[0]
    }

    #[inline(always)]
    fn encode(value: u8) -> Result<Self::Raw> {
        Ok([value])
    }

    fn from_number(value: f64) -> Result<u8> {
        if value.is_nan() || value <= 0.0 {
            return Ok(0);
        }
        if value >= 255.0 {
            return Ok(255);
        }
        let floor = value.floor();
        let rounded = match value - floor {
            d if d > 0.5 => floor + 1.0,
            d if d < 0.5 => floor,
            _ if floor % 2.0 == 0.0 => floor,
            _ => floor + 1.0,
        };
        Ok(rounded as u8)
    }
}
