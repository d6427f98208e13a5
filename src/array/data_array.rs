//! Typed arrays: a codec applied element-wise over a view

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::view_array::ViewArray;
use crate::codec::{Codec, Scalar};
use crate::core::View;
use crate::error::Result;

/// Fixed-length sequence of `C`-encoded values
pub struct DataArray<'a, C> {
    elements: ViewArray<'a>,
    codec: PhantomData<fn() -> C>,
}

impl<C> Clone for DataArray<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for DataArray<'_, C> {}

impl<'a, C: Codec> DataArray<'a, C> {
    pub const BYTES_PER_ELEMENT: usize = C::WIDTH;

    /// Lay `C` over `view`; see `ViewArray::new` for the failure modes.
    pub fn new(view: View<'a>, expected_length: Option<usize>) -> Result<Self> {
        Ok(Self {
            elements: ViewArray::new(view, C::WIDTH, expected_length)?,
            codec: PhantomData,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn view(&self) -> View<'a> {
        self.elements.view()
    }

    /// Same elements as raw sub-views.
    pub fn elements(&self) -> ViewArray<'a> {
        self.elements
    }

    /// Codec bound to element `index`.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Result<Scalar<'a, C>> {
        Scalar::new(self.elements.at(index)?)
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Result<C::Value> {
        Ok(self.at(index)?.get())
    }

    #[inline(always)]
    pub fn set(&self, index: usize, value: C::Value) -> Result<()> {
        self.at(index)?.set(value)
    }

    pub fn set_number(&self, index: usize, value: f64) -> Result<()> {
        self.at(index)?.set_number(value)
    }

    pub fn copy_within(&self, to_index: usize, from_index: usize, count: usize) -> Result<()> {
        self.elements.copy_within(to_index, from_index, count)
    }

    /// Write `value` into every element of `[start, end)`.
    ///
    /// Range and value are both validated before the first write.
    pub fn fill(&self, value: C::Value, start: usize, end: usize) -> Result<()> {
        self.elements.check_range(start, end)?;
        let raw = C::encode(value)?;
        for index in start..end {
            self.elements.element(index).write_from(0, raw.as_ref());
        }
        Ok(())
    }

    pub fn fill_number(&self, value: f64, start: usize, end: usize) -> Result<()> {
        self.elements.check_range(start, end)?;
        self.fill(C::from_number(value)?, start, end)
    }

    pub fn iter(&self) -> Iter<'a, C> {
        Iter {
            array: *self,
            front: 0,
            back: self.len(),
        }
    }

    pub fn to_vec(&self) -> Vec<C::Value> {
        self.iter().collect()
    }

    /// Unchecked; `index < len`.
    #[inline(always)]
    fn decode(&self, index: usize) -> C::Value {
        let mut raw = C::Raw::default();
        self.elements.element(index).read_into(0, raw.as_mut());
        C::decode(raw)
    }
}

impl<C: Codec> fmt::Debug for DataArray<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataArray")
            .field("codec", &C::NAME)
            .field("len", &self.len())
            .field("view", &self.view())
            .finish()
    }
}

impl<'a, C: Codec> IntoIterator for DataArray<'a, C> {
    type Item = C::Value;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, C: Codec> IntoIterator for &DataArray<'a, C> {
    type Item = C::Value;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over decoded values
///
/// Reads happen on `next`, so writes made while iterating are observed.
pub struct Iter<'a, C> {
    array: DataArray<'a, C>,
    front: usize,
    back: usize,
}

impl<C> Clone for Iter<'_, C> {
    fn clone(&self) -> Self {
        Self {
            array: self.array,
            front: self.front,
            back: self.back,
        }
    }
}

impl<C: Codec> Iterator for Iter<'_, C> {
    type Item = C::Value;

    fn next(&mut self) -> Option<C::Value> {
        if self.front == self.back {
            return None;
        }
        let value = self.array.decode(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<C: Codec> DoubleEndedIterator for Iter<'_, C> {
    fn next_back(&mut self) -> Option<C::Value> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.array.decode(self.back))
    }
}

impl<C: Codec> ExactSizeIterator for Iter<'_, C> {}
impl<C: Codec> FusedIterator for Iter<'_, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Sint16LE, TimePosixS32BE, Uint16BE, Uint32BE, Uint8};
    use crate::core::Block;
    use crate::error::MemoryError;

    #[test]
    fn test_at_and_index_range() {
        let block = Block::new(8);
        let array = DataArray::<Uint16BE>::new(block.view(), Some(4)).unwrap();
        assert_eq!(DataArray::<Uint16BE>::BYTES_PER_ELEMENT, 2);

        array.at(3).unwrap().set(0xABCD).unwrap();
        assert_eq!(block.view().to_vec()[6..], [0xAB, 0xCD]);
        assert_eq!(
            array.at(4).unwrap_err(),
            MemoryError::IndexOutOfRange {
                index: 4,
                length: 4
            }
        );
    }

    #[test]
    fn test_misaligned_view() {
        let block = Block::new(10);
        assert_eq!(
            DataArray::<Uint32BE>::new(block.view(), None).unwrap_err(),
            MemoryError::MisalignedLength {
                byte_length: 10,
                element_width: 4
            }
        );
        assert!(matches!(
            DataArray::<Uint8>::new(block.view(), Some(9)),
            Err(MemoryError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_fill_validates_before_writing() {
        let block = Block::new(6);
        let array = DataArray::<Sint16LE>::new(block.view(), None).unwrap();

        array.fill(-1, 0, 2).unwrap();
        assert_eq!(array.to_vec(), vec![-1, -1, 0]);

        assert_eq!(
            array.fill(7, 1, 4).unwrap_err(),
            MemoryError::IndexOutOfRange {
                index: 3,
                length: 3
            }
        );
        assert!(array.fill_number(40000.0, 0, 3).is_err());
        assert_eq!(array.to_vec(), vec![-1, -1, 0]);

        array.fill_number(5.0, 1, 3).unwrap();
        assert_eq!(array.to_vec(), vec![-1, 5, 5]);
    }

    #[test]
    fn test_fill_invalid_time_leaves_bytes() {
        let block = Block::new(8);
        let array = DataArray::<TimePosixS32BE>::new(block.view(), None).unwrap();
        assert!(matches!(
            array.fill(None, 0, 2),
            Err(MemoryError::InvalidArgument(_))
        ));
        assert_eq!(block.view().to_vec(), vec![0; 8]);
    }

    #[test]
    fn test_copy_within_overlapping() {
        let block = Block::new(5);
        let array = DataArray::<Uint8>::new(block.view(), None).unwrap();
        for (i, v) in [10u8, 20, 30, 40, 50].into_iter().enumerate() {
            array.set(i, v).unwrap();
        }
        array.copy_within(0, 1, 4).unwrap();
        assert_eq!(array.to_vec(), vec![20, 30, 40, 50, 50]);
        assert!(array.copy_within(3, 0, 3).is_err());
    }

    #[test]
    fn test_iteration_is_lazy_and_restartable() {
        let block = Block::new(3);
        let array = DataArray::<Uint8>::new(block.view(), None).unwrap();
        let iter = array.iter();
        assert_eq!(iter.len(), 3);

        array.set(2, 9).unwrap();
        assert_eq!(iter.clone().collect::<Vec<_>>(), vec![0, 0, 9]);
        assert_eq!((&array).into_iter().rev().collect::<Vec<_>>(), vec![9, 0, 0]);
        assert_eq!(array.iter().sum::<u8>(), 9);
    }
}
