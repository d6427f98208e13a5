//! POSIX time codecs
//!
//! The stored integer counts whole seconds since the Unix epoch. Values are
//! `Option<DateTime<Utc>>`: `None` is the not-a-time sentinel, which the
//! setters reject and the 64-bit getters return for second counts beyond
//! the calendar range.

use chrono::{DateTime, Utc};

use super::Codec;
use crate::error::{MemoryError, Result};

/// Instant from a millisecond count since the epoch
fn instant_from_millis(codec: &'static str, millis: f64) -> Result<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(MemoryError::InvalidArgument(format!(
            "{} requires a valid instant, got {}",
            codec, millis
        )));
    }
    let millis = millis.floor();
    if millis < i64::MIN as f64 || millis >= i64::MAX as f64 {
        return Err(MemoryError::out_of_range(codec, millis));
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .ok_or_else(|| MemoryError::out_of_range(codec, millis))
}

macro_rules! time_codec {
    ($(#[$meta:meta])* $name:ident, $t:ty, $width:literal, $from:ident, $to:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Codec for $name {
            const NAME: &'static str = stringify!($name);
            const WIDTH: usize = $width;

            type Raw = [u8; $width];
            type Value = Option<DateTime<Utc>>;

            fn decode(raw: Self::Raw) -> Self::Value {
                DateTime::<Utc>::from_timestamp(i64::from(<$t>::$from(raw)), 0)
            }

            fn encode(value: Self::Value) -> Result<Self::Raw> {
                let instant = value.ok_or_else(|| {
                    MemoryError::InvalidArgument(format!("{} requires a valid instant", Self::NAME))
                })?;
                // timestamp() floors: sub-second parts never round up
                let seconds = <$t>::try_from(instant.timestamp())
                    .map_err(|_| MemoryError::out_of_range(Self::NAME, instant))?;
                Ok(seconds.$to())
            }

            /// `value` is milliseconds since the epoch.
            fn from_number(value: f64) -> Result<Self::Value> {
                instant_from_millis(Self::NAME, value).map(Some)
            }
        }
    };
}

time_codec!(
    /// Seconds since epoch, signed 32-bit big-endian
    TimePosixS32BE, i32, 4, from_be_bytes, to_be_bytes
);
time_codec!(
    /// Seconds since epoch, signed 32-bit little-endian
    TimePosixS32LE, i32, 4, from_le_bytes, to_le_bytes
);
time_codec!(
    /// Seconds since epoch, signed 64-bit big-endian
    TimePosixS64BE, i64, 8, from_be_bytes, to_be_bytes
);
time_codec!(
    /// Seconds since epoch, signed 64-bit little-endian
    TimePosixS64LE, i64, 8, from_le_bytes, to_le_bytes
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(0, 0).unwrap()
    }

    #[test]
    fn test_one_second_after_epoch() {
        let t = epoch() + Duration::seconds(1);
        assert_eq!(TimePosixS32LE::encode(Some(t)).unwrap(), [1, 0, 0, 0]);
        assert_eq!(TimePosixS32BE::encode(Some(t)).unwrap(), [0, 0, 0, 1]);

        let decoded = TimePosixS32LE::decode([1, 0, 0, 0]).unwrap();
        assert_eq!((decoded - epoch()).num_milliseconds(), 1000);
    }

    #[test]
    fn test_sub_second_floors() {
        let before_epoch = epoch() - Duration::milliseconds(1);
        assert_eq!(
            TimePosixS32BE::encode(Some(before_epoch)).unwrap(),
            (-1i32).to_be_bytes()
        );

        let t = epoch() + Duration::milliseconds(2999);
        assert_eq!(TimePosixS64LE::encode(Some(t)).unwrap(), 2i64.to_le_bytes());
    }

    #[test]
    fn test_not_a_time_rejected() {
        assert!(matches!(
            TimePosixS32LE::encode(None),
            Err(MemoryError::InvalidArgument(_))
        ));
        assert!(matches!(
            TimePosixS64BE::from_number(f64::NAN),
            Err(MemoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_s32_range_checked() {
        let beyond = DateTime::<Utc>::from_timestamp(i64::from(i32::MAX) + 1, 0);
        assert!(matches!(
            TimePosixS32LE::encode(beyond),
            Err(MemoryError::OutOfRange { .. })
        ));
        assert!(TimePosixS64LE::encode(beyond).is_ok());

        let last = DateTime::<Utc>::from_timestamp(i64::from(i32::MAX), 0);
        assert_eq!(TimePosixS32LE::decode(TimePosixS32LE::encode(last).unwrap()), last);
    }

    #[test]
    fn test_s64_unrepresentable_decodes_to_none() {
        assert_eq!(TimePosixS64BE::decode(i64::MAX.to_be_bytes()), None);
        assert!(TimePosixS64BE::decode(0i64.to_be_bytes()).is_some());
    }

    #[test]
    fn test_from_number_is_milliseconds() {
        let value = TimePosixS32BE::from_number(1500.0).unwrap().unwrap();
        assert_eq!(value.timestamp_millis(), 1500);
        assert_eq!(TimePosixS32BE::encode(Some(value)).unwrap(), [0, 0, 0, 1]);
    }
}
