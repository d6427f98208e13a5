//! A codec bound to one view

use std::fmt;
use std::marker::PhantomData;

use super::Codec;
use crate::core::View;
use crate::error::{MemoryError, Result};

/// Typed value living in a view of exactly `C::WIDTH` bytes
pub struct Scalar<'a, C> {
    view: View<'a>,
    codec: PhantomData<fn() -> C>,
}

impl<C> Clone for Scalar<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Scalar<'_, C> {}

impl<'a, C: Codec> Scalar<'a, C> {
    /// Fails with `LengthMismatch` unless `view.byte_length() == C::WIDTH`.
    pub fn new(view: View<'a>) -> Result<Self> {
        if view.byte_length() != C::WIDTH {
            return Err(MemoryError::LengthMismatch {
                expected: C::WIDTH,
                actual: view.byte_length(),
            });
        }
        Ok(Self {
            view,
            codec: PhantomData,
        })
    }

    #[inline(always)]
    pub fn view(&self) -> View<'a> {
        self.view
    }

    /// Decode the current bytes.
    #[inline(always)]
    pub fn get(&self) -> C::Value {
        let mut raw = C::Raw::default();
        self.view.read_into(0, raw.as_mut());
        C::decode(raw)
    }

    /// Validate and encode `value` in place.
    #[inline(always)]
    pub fn set(&self, value: C::Value) -> Result<()> {
        let raw = C::encode(value)?;
        self.view.write_from(0, raw.as_ref());
        Ok(())
    }

    pub fn set_number(&self, value: f64) -> Result<()> {
        self.set(C::from_number(value)?)
    }
}

impl<C: Codec> fmt::Debug for Scalar<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", C::NAME, self.get())
    }
}
