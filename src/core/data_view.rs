//! Raw typed accessor over a view
//!
//! Reads and writes any codec at any byte offset inside the window, without
//! alignment requirements. The codec picks width and byte order.

use super::view::View;
use crate::codec::{Codec, Scalar};
use crate::error::Result;

/// Typed get/set at arbitrary offsets of a view
#[derive(Debug, Clone, Copy)]
pub struct DataView<'a> {
    view: View<'a>,
}

impl<'a> DataView<'a> {
    pub fn new(view: View<'a>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> View<'a> {
        self.view
    }

    pub fn byte_length(&self) -> usize {
        self.view.byte_length()
    }

    /// Codec bound to `[byte_offset, byte_offset + C::WIDTH)`.
    pub fn scalar<C: Codec>(&self, byte_offset: usize) -> Result<Scalar<'a, C>> {
        Scalar::new(self.view.slice(byte_offset, C::WIDTH)?)
    }

    #[inline(always)]
    pub fn get<C: Codec>(&self, byte_offset: usize) -> Result<C::Value> {
        Ok(self.scalar::<C>(byte_offset)?.get())
    }

    #[inline(always)]
    pub fn set<C: Codec>(&self, byte_offset: usize, value: C::Value) -> Result<()> {
        self.scalar::<C>(byte_offset)?.set(value)
    }

    pub fn set_number<C: Codec>(&self, byte_offset: usize, value: f64) -> Result<()> {
        self.scalar::<C>(byte_offset)?.set_number(value)
    }
}
