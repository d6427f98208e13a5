//! Bounded Windows into a Block
//!
//! A view is `(block, byte_offset, byte_length)` and nothing else:
//! - No copy on construction or slicing
//! - Every window is checked against its parent when created
//! - Views alias freely; a write through one is seen by all others

use std::fmt;

use super::block::Block;
use super::copy::CopyPlan;
use super::data_view::DataView;
use crate::array::DataArray;
use crate::codec::native;
use crate::error::{MemoryError, Result};

/// Offset + length window into a block
#[derive(Clone, Copy)]
pub struct View<'a> {
    block: &'a Block,
    byte_offset: usize,
    byte_length: usize,
}

/// `offset + length <= limit`, overflow included
#[inline(always)]
pub(crate) fn check_window(offset: usize, length: usize, limit: usize) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= limit => Ok(()),
        _ => Err(MemoryError::OutOfBounds {
            offset,
            length,
            limit,
        }),
    }
}

impl<'a> View<'a> {
    /// View over the whole block.
    #[inline(always)]
    pub fn new(block: &'a Block) -> Self {
        Self {
            block,
            byte_offset: 0,
            byte_length: block.byte_length(),
        }
    }

    /// View over `[byte_offset, byte_offset + byte_length)` of `block`.
    ///
    /// A zero-length view at `byte_offset == block.byte_length()` is valid.
    pub fn range(block: &'a Block, byte_offset: usize, byte_length: usize) -> Result<Self> {
        check_window(byte_offset, byte_length, block.byte_length())?;
        Ok(Self {
            block,
            byte_offset,
            byte_length,
        })
    }

    /// View from `byte_offset` to the end of `block`.
    pub fn from_offset(block: &'a Block, byte_offset: usize) -> Result<Self> {
        let limit = block.byte_length();
        let byte_length = limit
            .checked_sub(byte_offset)
            .ok_or(MemoryError::OutOfBounds {
                offset: byte_offset,
                length: 0,
                limit,
            })?;
        Self::range(block, byte_offset, byte_length)
    }

    /// Sub-window relative to this view; cannot escape it.
    pub fn slice(&self, byte_offset: usize, byte_length: usize) -> Result<View<'a>> {
        check_window(byte_offset, byte_length, self.byte_length)?;
        Ok(View {
            block: self.block,
            byte_offset: self.byte_offset + byte_offset,
            byte_length,
        })
    }

    /// Sub-window from `byte_offset` to the end of this view.
    pub fn slice_from(&self, byte_offset: usize) -> Result<View<'a>> {
        let byte_length =
            self.byte_length
                .checked_sub(byte_offset)
                .ok_or(MemoryError::OutOfBounds {
                    offset: byte_offset,
                    length: 0,
                    limit: self.byte_length,
                })?;
        self.slice(byte_offset, byte_length)
    }

    /// Absolute offset into the block.
    #[inline(always)]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    #[inline(always)]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.byte_length == 0
    }

    #[inline(always)]
    pub fn block(&self) -> &'a Block {
        self.block
    }

    pub fn is_shared(&self) -> bool {
        self.block.is_shared()
    }

    /// Whether this view addresses `block`'s region.
    pub fn is_view_of(&self, block: &Block) -> bool {
        self.block.same_region(block)
    }

    /// Copy of the window's bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.byte_length];
        self.read_into(0, &mut bytes);
        bytes
    }

    pub fn copy_to_slice(&self, dst: &mut [u8]) -> Result<()> {
        self.check_len(dst.len())?;
        self.read_into(0, dst);
        Ok(())
    }

    pub fn copy_from_slice(&self, src: &[u8]) -> Result<()> {
        self.check_len(src.len())?;
        self.write_from(0, src);
        Ok(())
    }

    /// Copy `from`'s bytes verbatim into this window.
    ///
    /// Both windows may overlap inside the same region.
    pub fn set(&self, from: &View<'_>) -> Result<()> {
        self.check_len(from.byte_length)?;
        self.block.transfer(
            self.byte_offset,
            from.block,
            from.byte_offset,
            self.byte_length,
        );
        Ok(())
    }

    /// Move bytes `[from_start, from_end)` to `to_start`, memmove style.
    pub fn copy_within(&self, to_start: usize, from_start: usize, from_end: usize) -> Result<()> {
        if from_start > from_end {
            return Err(MemoryError::InvalidArgument(format!(
                "from end {} precedes from start {}",
                from_end, from_start
            )));
        }
        let len = from_end - from_start;
        check_window(from_start, len, self.byte_length)?;
        check_window(to_start, len, self.byte_length)?;

        self.block.transfer(
            self.byte_offset + to_start,
            self.block,
            self.byte_offset + from_start,
            len,
        );
        Ok(())
    }

    /// `copy_within` driven by a partially specified plan.
    pub fn copy_with(&self, plan: CopyPlan) -> Result<()> {
        let copy = plan.resolve()?;
        let from_end = copy
            .from_start
            .checked_add(copy.byte_length)
            .ok_or(MemoryError::OutOfBounds {
                offset: copy.from_start,
                length: copy.byte_length,
                limit: self.byte_length,
            })?;
        self.copy_within(copy.to_start, copy.from_start, from_end)
    }

    pub fn fill(&self, value: u8) {
        self.block
            .fill_range(self.byte_offset, self.byte_length, value);
    }

    /// Reverse the window's bytes in place.
    pub fn reverse(&self) {
        self.block
            .reverse_range(self.byte_offset, self.byte_length);
    }

    pub fn as_int8(&self) -> Result<DataArray<'a, native::Int8>> {
        DataArray::new(*self, None)
    }

    pub fn as_uint8(&self) -> Result<DataArray<'a, native::Uint8>> {
        DataArray::new(*self, None)
    }

    pub fn as_uint8_clamped(&self) -> Result<DataArray<'a, native::Uint8Clamped>> {
        DataArray::new(*self, None)
    }

    pub fn as_int16(&self) -> Result<DataArray<'a, native::Int16>> {
        DataArray::new(*self, None)
    }

    pub fn as_uint16(&self) -> Result<DataArray<'a, native::Uint16>> {
        DataArray::new(*self, None)
    }

    pub fn as_int32(&self) -> Result<DataArray<'a, native::Int32>> {
        DataArray::new(*self, None)
    }

    pub fn as_uint32(&self) -> Result<DataArray<'a, native::Uint32>> {
        DataArray::new(*self, None)
    }

    pub fn as_float32(&self) -> Result<DataArray<'a, native::Float32>> {
        DataArray::new(*self, None)
    }

    pub fn as_float64(&self) -> Result<DataArray<'a, native::Float64>> {
        DataArray::new(*self, None)
    }

    pub fn as_big_int64(&self) -> Result<DataArray<'a, native::BigInt64>> {
        DataArray::new(*self, None)
    }

    pub fn as_big_uint64(&self) -> Result<DataArray<'a, native::BigUint64>> {
        DataArray::new(*self, None)
    }

    /// Raw accessor for typed reads/writes at arbitrary offsets.
    pub fn as_data_view(&self) -> DataView<'a> {
        DataView::new(*self)
    }

    // Unchecked window access for codecs and arrays; `offset` is relative
    // to this view and the caller guarantees the range fits.

    #[inline(always)]
    pub(crate) fn read_into(&self, offset: usize, dst: &mut [u8]) {
        self.block.read_into(self.byte_offset + offset, dst);
    }

    #[inline(always)]
    pub(crate) fn write_from(&self, offset: usize, src: &[u8]) {
        self.block.write_from(self.byte_offset + offset, src);
    }

    #[inline(always)]
    pub(crate) fn sub(&self, offset: usize, byte_length: usize) -> View<'a> {
        View {
            block: self.block,
            byte_offset: self.byte_offset + offset,
            byte_length,
        }
    }

    #[inline(always)]
    fn check_len(&self, other: usize) -> Result<()> {
        if other != self.byte_length {
            return Err(MemoryError::LengthMismatch {
                expected: self.byte_length,
                actual: other,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("byte_offset", &self.byte_offset)
            .field("byte_length", &self.byte_length)
            .field("shared", &self.is_shared())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_of(bytes: &[u8]) -> Block {
        let block = Block::new(bytes.len());
        block.view().copy_from_slice(bytes).unwrap();
        block
    }

    #[test]
    fn test_range_bounds() {
        let block = Block::new(16);
        assert_eq!(View::range(&block, 4, 8).unwrap().byte_length(), 8);
        assert_eq!(View::range(&block, 0, 16).unwrap().byte_length(), 16);
        assert!(matches!(
            View::range(&block, 10, 7),
            Err(MemoryError::OutOfBounds {
                offset: 10,
                length: 7,
                limit: 16
            })
        ));
        assert!(View::range(&block, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_zero_length_view_at_end() {
        let block = Block::new(8);
        let view = View::range(&block, 8, 0).unwrap();
        assert!(view.is_empty());
        assert_eq!(View::from_offset(&block, 8).unwrap().byte_length(), 0);
        assert!(View::from_offset(&block, 9).is_err());
    }

    #[test]
    fn test_slice_composes_offsets() {
        let block = Block::new(32);
        let view = View::range(&block, 4, 20).unwrap();
        let child = view.slice(6, 10).unwrap();
        assert_eq!(child.byte_offset(), 10);
        let grandchild = child.slice(2, 3).unwrap();
        assert_eq!(grandchild.byte_offset(), 12);

        // Slices cannot escape their parent window
        assert!(view.slice(16, 5).is_err());
        assert!(child.slice_from(11).is_err());
    }

    #[test]
    fn test_aliasing_views_share_bytes() {
        let block = Block::new(8);
        let a = View::range(&block, 0, 6).unwrap();
        let b = View::range(&block, 4, 4).unwrap();
        a.copy_from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(b.to_vec(), vec![5, 6, 0, 0]);
    }

    #[test]
    fn test_set_requires_equal_length() {
        let block = Block::new(8);
        let a = View::range(&block, 0, 4).unwrap();
        let b = View::range(&block, 4, 3).unwrap();
        assert_eq!(
            a.set(&b),
            Err(MemoryError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_set_across_blocks() {
        let src = block_of(&[9, 8, 7, 6]);
        let dst = Block::new(6);
        View::range(&dst, 1, 4)
            .unwrap()
            .set(&src.view())
            .unwrap();
        assert_eq!(dst.view().to_vec(), vec![0, 9, 8, 7, 6, 0]);
    }

    #[test]
    fn test_set_overlapping_windows() {
        let block = block_of(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let from = View::range(&block, 0, 5).unwrap();
        let to = View::range(&block, 3, 5).unwrap();
        to.set(&from).unwrap();
        assert_eq!(block.view().to_vec(), vec![1, 2, 3, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_copy_within_is_memmove() {
        let block = block_of(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let view = View::range(&block, 1, 8).unwrap(); // 1..=8

        // forward shift
        view.copy_within(2, 0, 5).unwrap();
        assert_eq!(block.view().to_vec(), vec![0, 1, 2, 1, 2, 3, 4, 5, 8, 9]);

        // backward shift
        view.copy_within(0, 3, 7).unwrap();
        assert_eq!(block.view().to_vec(), vec![0, 2, 3, 4, 5, 3, 4, 5, 8, 9]);
    }

    #[test]
    fn test_copy_within_rejects_escaping_ranges() {
        let block = Block::new(8);
        let view = View::range(&block, 2, 4).unwrap();
        assert!(matches!(
            view.copy_within(2, 0, 3),
            Err(MemoryError::OutOfBounds { .. })
        ));
        assert!(matches!(
            view.copy_within(0, 3, 5),
            Err(MemoryError::OutOfBounds { .. })
        ));
        assert!(matches!(
            view.copy_within(0, 3, 2),
            Err(MemoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_copy_with_plan() {
        let block = block_of(&[1, 2, 3, 4, 5, 6]);
        let view = block.view();
        view.copy_with(CopyPlan::new().from_end(6).byte_length(2).to_start(0))
            .unwrap();
        assert_eq!(view.to_vec(), vec![5, 6, 3, 4, 5, 6]);
    }

    #[test]
    fn test_fill_and_reverse() {
        let block = block_of(&[1, 2, 3, 4, 5, 6]);
        let view = View::range(&block, 1, 4).unwrap();
        view.reverse();
        assert_eq!(block.view().to_vec(), vec![1, 5, 4, 3, 2, 6]);
        view.slice(1, 2).unwrap().fill(0xEE);
        assert_eq!(block.view().to_vec(), vec![1, 5, 0xEE, 0xEE, 2, 6]);
    }

    #[test]
    fn test_projection_alignment() {
        let block = Block::new(12);
        let view = block.view();
        assert_eq!(view.as_uint32().unwrap().len(), 3);
        assert_eq!(view.as_int16().unwrap().len(), 6);
        assert!(matches!(
            view.as_float64(),
            Err(MemoryError::MisalignedLength {
                byte_length: 12,
                element_width: 8
            })
        ));
        assert_eq!(view.slice(0, 8).unwrap().as_big_uint64().unwrap().len(), 1);
    }

    #[test]
    fn test_projection_shares_bytes() {
        let block = Block::new(4);
        let view = block.view();
        view.as_uint32().unwrap().set(0, 0x0102_0304).unwrap();
        assert_eq!(view.to_vec(), 0x0102_0304u32.to_ne_bytes().to_vec());
        assert_eq!(view.as_uint8().unwrap().get(0).unwrap(), 0x0102_0304u32.to_ne_bytes()[0]);
    }

    #[test]
    fn test_is_view_of() {
        let a = Block::new(4);
        let b = Block::new(4);
        assert!(a.view().is_view_of(&a));
        assert!(!a.view().is_view_of(&b));
    }

    #[test]
    fn test_is_view_of_empty_blocks() {
        let a = Block::new(0);
        let b = Block::new(0);
        assert!(a.view().is_view_of(&a));
        assert!(!a.view().is_view_of(&b));
        assert!(!View::range(&b, 0, 0).unwrap().is_view_of(&a));
    }
}
