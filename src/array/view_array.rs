//! Raw element arrays: fixed-width sub-views over a backing view

use std::iter::FusedIterator;

use crate::core::View;
use crate::error::{MemoryError, Result};

/// Fixed-length sequence of `element_width`-byte sub-views
#[derive(Debug, Clone, Copy)]
pub struct ViewArray<'a> {
    view: View<'a>,
    element_width: usize,
    length: usize,
}

impl<'a> ViewArray<'a> {
    /// Split `view` into elements of `element_width` bytes.
    ///
    /// Fails with `MisalignedLength` when the view is not an exact multiple
    /// of the width, and with `LengthMismatch` when `expected_length`
    /// disagrees with the derived length.
    pub fn new(
        view: View<'a>,
        element_width: usize,
        expected_length: Option<usize>,
    ) -> Result<Self> {
        if element_width == 0 {
            return Err(MemoryError::InvalidArgument(
                "element width must be non-zero".into(),
            ));
        }
        if view.byte_length() % element_width != 0 {
            return Err(MemoryError::MisalignedLength {
                byte_length: view.byte_length(),
                element_width,
            });
        }
        let length = view.byte_length() / element_width;
        if let Some(expected) = expected_length {
            if expected != length {
                return Err(MemoryError::LengthMismatch {
                    expected,
                    actual: length,
                });
            }
        }
        Ok(Self {
            view,
            element_width,
            length,
        })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline(always)]
    pub fn element_width(&self) -> usize {
        self.element_width
    }

    #[inline(always)]
    pub fn view(&self) -> View<'a> {
        self.view
    }

    /// Sub-view of element `index`.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Result<View<'a>> {
        if index >= self.length {
            return Err(MemoryError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok(self.element(index))
    }

    /// Move `count` elements from `from_index` to `to_index`, memmove style.
    pub fn copy_within(&self, to_index: usize, from_index: usize, count: usize) -> Result<()> {
        self.check_span(from_index, count)?;
        self.check_span(to_index, count)?;

        let w = self.element_width;
        self.view
            .copy_within(to_index * w, from_index * w, (from_index + count) * w)
    }

    pub fn iter(&self) -> ViewIter<'a> {
        ViewIter {
            array: *self,
            front: 0,
            back: self.length,
        }
    }

    /// `[start, end)` must lie inside `[0, len]`.
    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end {
            return Err(MemoryError::InvalidArgument(format!(
                "end index {} precedes start index {}",
                end, start
            )));
        }
        self.check_span(start, end - start)
    }

    fn check_span(&self, start: usize, count: usize) -> Result<()> {
        match start.checked_add(count) {
            Some(end) if end <= self.length => Ok(()),
            // first index of the span that falls outside the array
            _ => Err(MemoryError::IndexOutOfRange {
                index: start.max(self.length),
                length: self.length,
            }),
        }
    }

    /// Unchecked; `index < len`.
    #[inline(always)]
    pub(crate) fn element(&self, index: usize) -> View<'a> {
        self.view
            .sub(index * self.element_width, self.element_width)
    }
}

impl<'a> IntoIterator for ViewArray<'a> {
    type Item = View<'a>;
    type IntoIter = ViewIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &ViewArray<'a> {
    type Item = View<'a>;
    type IntoIter = ViewIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over element sub-views
#[derive(Debug, Clone)]
pub struct ViewIter<'a> {
    array: ViewArray<'a>,
    front: usize,
    back: usize,
}

impl<'a> Iterator for ViewIter<'a> {
    type Item = View<'a>;

    fn next(&mut self) -> Option<View<'a>> {
        if self.front == self.back {
            return None;
        }
        let view = self.array.element(self.front);
        self.front += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a> DoubleEndedIterator for ViewIter<'a> {
    fn next_back(&mut self) -> Option<View<'a>> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.array.element(self.back))
    }
}

impl ExactSizeIterator for ViewIter<'_> {}
impl FusedIterator for ViewIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Block;

    #[test]
    fn test_length_derivation() {
        let block = Block::new(12);
        let array = ViewArray::new(block.view(), 3, Some(4)).unwrap();
        assert_eq!(array.len(), 4);
        assert_eq!(array.element_width(), 3);

        assert_eq!(
            ViewArray::new(block.view(), 5, None).unwrap_err(),
            MemoryError::MisalignedLength {
                byte_length: 12,
                element_width: 5
            }
        );
        assert_eq!(
            ViewArray::new(block.view(), 4, Some(4)).unwrap_err(),
            MemoryError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(matches!(
            ViewArray::new(block.view(), 0, None),
            Err(MemoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_at_yields_element_windows() {
        let block = Block::new(8);
        let view = block.view().slice(2, 6).unwrap();
        let array = ViewArray::new(view, 2, None).unwrap();

        let second = array.at(1).unwrap();
        assert_eq!(second.byte_offset(), 4);
        assert_eq!(second.byte_length(), 2);
        assert_eq!(
            array.at(3).unwrap_err(),
            MemoryError::IndexOutOfRange {
                index: 3,
                length: 3
            }
        );
    }

    #[test]
    fn test_copy_within_elements() {
        let block = Block::new(8);
        block
            .view()
            .copy_from_slice(&[1, 1, 2, 2, 3, 3, 4, 4])
            .unwrap();
        let array = ViewArray::new(block.view(), 2, None).unwrap();

        array.copy_within(1, 0, 3).unwrap();
        assert_eq!(block.view().to_vec(), vec![1, 1, 1, 1, 2, 2, 3, 3]);

        assert_eq!(
            array.copy_within(2, 0, 3).unwrap_err(),
            MemoryError::IndexOutOfRange {
                index: 4,
                length: 4
            }
        );
        assert_eq!(
            array.copy_within(0, 5, 0).unwrap_err(),
            MemoryError::IndexOutOfRange {
                index: 5,
                length: 4
            }
        );
    }

    #[test]
    fn test_iteration_is_restartable() {
        let block = Block::new(6);
        let array = ViewArray::new(block.view(), 2, None).unwrap();

        let offsets: Vec<usize> = array.iter().map(|v| v.byte_offset()).collect();
        assert_eq!(offsets, vec![0, 2, 4]);
        assert_eq!(array.iter().len(), 3);
        assert_eq!(array.iter().rev().next().unwrap().byte_offset(), 4);
        assert_eq!(array.into_iter().count(), 3);
    }
}
