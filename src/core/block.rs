//! Fixed-Size Memory Blocks
//!
//! A block owns one contiguous, zero-initialized byte region that never
//! resizes. Two storage flavors exist:
//! - Exclusive: heap cells owned by exactly one `Block` (Send, not Sync)
//! - Shared: anonymous mapping co-owned by every handle from `Block::share`
//!
//! Blocks expose no byte slices. All access goes through `View`, which
//! borrows the block and bounds-checks every window.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::Ordering;

use super::shared::SharedRegion;
use super::view::View;
use crate::error::{MemoryError, Result};

/// Backing storage of a block
enum Storage {
    Exclusive(Box<[Cell<u8>]>),
    Shared(SharedRegion),
}

/// Raw buffer handed to / taken back from a block
#[derive(Debug)]
pub enum RawBuffer {
    Exclusive(Vec<u8>),
    Shared(SharedRegion),
}

impl RawBuffer {
    pub fn len(&self) -> usize {
        match self {
            RawBuffer::Exclusive(bytes) => bytes.len(),
            RawBuffer::Shared(region) => region.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, RawBuffer::Shared(_))
    }
}

/// Options for allocating a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockOptions {
    /// Size of the region in bytes
    pub byte_length: usize,
    /// Allocate a region other threads may observe
    pub shared: bool,
}

impl BlockOptions {
    pub fn new(byte_length: usize) -> Self {
        Self {
            byte_length,
            shared: false,
        }
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }
}

/// Expectations cross-checked against a wrapped raw buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapExpectations {
    pub byte_length: Option<usize>,
    pub shared: Option<bool>,
}

/// Owned, fixed-length, zero-initialized byte region
pub struct Block {
    storage: Storage,
}

impl Block {
    /// Allocate an exclusive block of `byte_length` zero bytes.
    pub fn new(byte_length: usize) -> Self {
        Self {
            storage: Storage::Exclusive(vec![Cell::new(0u8); byte_length].into_boxed_slice()),
        }
    }

    /// Allocate a shared block of `byte_length` zero bytes.
    pub fn new_shared(byte_length: usize) -> Result<Self> {
        let region = SharedRegion::new(byte_length).map_err(|e| {
            MemoryError::UnsupportedOperation(format!("shared memory unavailable: {}", e))
        })?;
        Ok(Self {
            storage: Storage::Shared(region),
        })
    }

    /// Allocate a block as described by `options`.
    pub fn create(options: BlockOptions) -> Result<Self> {
        if options.shared {
            Self::new_shared(options.byte_length)
        } else {
            Ok(Self::new(options.byte_length))
        }
    }

    /// Adopt an existing raw buffer.
    ///
    /// Fails with `InvalidArgument` when the buffer's actual length or
    /// shared-ness disagrees with a supplied expectation.
    pub fn wrap(raw: RawBuffer, expect: WrapExpectations) -> Result<Self> {
        if let Some(expected) = expect.byte_length {
            if expected != raw.len() {
                return Err(MemoryError::InvalidArgument(format!(
                    "expected byte length {}, raw buffer holds {}",
                    expected,
                    raw.len()
                )));
            }
        }
        if let Some(expected) = expect.shared {
            if expected != raw.is_shared() {
                return Err(MemoryError::InvalidArgument(format!(
                    "expected shared = {}, raw buffer is {}",
                    expected,
                    if raw.is_shared() { "shared" } else { "exclusive" }
                )));
            }
        }

        let storage = match raw {
            RawBuffer::Exclusive(bytes) => {
                Storage::Exclusive(bytes.into_iter().map(Cell::new).collect())
            }
            RawBuffer::Shared(region) => Storage::Shared(region),
        };
        Ok(Self { storage })
    }

    /// New exclusive block holding a copy of `view`'s bytes.
    pub fn copy_of(view: &View<'_>) -> Self {
        Self::wrap_bytes(view.to_vec())
    }

    /// New exclusive block holding the concatenation of `views`.
    pub fn concat<'b>(views: impl IntoIterator<Item = View<'b>>) -> Self {
        let views: Vec<View<'b>> = views.into_iter().collect();
        let total = views.iter().map(View::byte_length).sum();

        let block = Self::new(total);
        let mut cursor = 0;
        for view in &views {
            block.transfer(cursor, view.block(), view.byte_offset(), view.byte_length());
            cursor += view.byte_length();
        }
        block
    }

    fn wrap_bytes(bytes: Vec<u8>) -> Self {
        Self {
            storage: Storage::Exclusive(bytes.into_iter().map(Cell::new).collect()),
        }
    }

    #[inline(always)]
    pub fn byte_length(&self) -> usize {
        match &self.storage {
            Storage::Exclusive(cells) => cells.len(),
            Storage::Shared(region) => region.len(),
        }
    }

    #[inline(always)]
    pub fn is_shared(&self) -> bool {
        matches!(self.storage, Storage::Shared(_))
    }

    /// Whole-block view.
    #[inline(always)]
    pub fn view(&self) -> View<'_> {
        View::new(self)
    }

    /// Co-owning handle to a shared block's region.
    ///
    /// The handle can be moved to another thread; writes through either
    /// side are visible to the other without synchronization.
    pub fn share(&self) -> Result<Block> {
        match &self.storage {
            Storage::Shared(region) => Ok(Block {
                storage: Storage::Shared(region.clone()),
            }),
            Storage::Exclusive(_) => Err(MemoryError::UnsupportedOperation(
                "exclusive block cannot be co-owned".into(),
            )),
        }
    }

    /// Give the underlying raw buffer back.
    pub fn into_raw(self) -> RawBuffer {
        match self.storage {
            Storage::Exclusive(cells) => RawBuffer::Exclusive(
                cells.into_vec().into_iter().map(Cell::into_inner).collect(),
            ),
            Storage::Shared(region) => RawBuffer::Shared(region),
        }
    }

    // Byte-level access. Indices are bounds-checked by View.

    #[inline(always)]
    pub(crate) fn load(&self, index: usize) -> u8 {
        match &self.storage {
            Storage::Exclusive(cells) => cells[index].get(),
            Storage::Shared(region) => region.cells()[index].load(Ordering::Relaxed),
        }
    }

    #[inline(always)]
    pub(crate) fn store(&self, index: usize, value: u8) {
        match &self.storage {
            Storage::Exclusive(cells) => cells[index].set(value),
            Storage::Shared(region) => region.cells()[index].store(value, Ordering::Relaxed),
        }
    }

    #[inline(always)]
    pub(crate) fn read_into(&self, offset: usize, dst: &mut [u8]) {
        let end = offset + dst.len();
        match &self.storage {
            Storage::Exclusive(cells) => {
                for (d, c) in dst.iter_mut().zip(&cells[offset..end]) {
                    *d = c.get();
                }
            }
            Storage::Shared(region) => {
                for (d, c) in dst.iter_mut().zip(&region.cells()[offset..end]) {
                    *d = c.load(Ordering::Relaxed);
                }
            }
        }
    }

    #[inline(always)]
    pub(crate) fn write_from(&self, offset: usize, src: &[u8]) {
        let end = offset + src.len();
        match &self.storage {
            Storage::Exclusive(cells) => {
                for (c, &s) in cells[offset..end].iter().zip(src) {
                    c.set(s);
                }
            }
            Storage::Shared(region) => {
                for (c, &s) in region.cells()[offset..end].iter().zip(src) {
                    c.store(s, Ordering::Relaxed);
                }
            }
        }
    }

    /// Copy `len` bytes from `src[src_offset..]` into `self[dst_offset..]`.
    ///
    /// Behaves like memmove when both ranges live in the same region: the
    /// copy runs backwards when the destination starts after the source.
    pub(crate) fn transfer(&self, dst_offset: usize, src: &Block, src_offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        if self.same_region(src) && dst_offset > src_offset {
            for i in (0..len).rev() {
                self.store(dst_offset + i, src.load(src_offset + i));
            }
        } else {
            for i in 0..len {
                self.store(dst_offset + i, src.load(src_offset + i));
            }
        }
    }

    pub(crate) fn fill_range(&self, offset: usize, len: usize, value: u8) {
        match &self.storage {
            Storage::Exclusive(cells) => cells[offset..offset + len].iter().for_each(|c| c.set(value)),
            Storage::Shared(region) => region.cells()[offset..offset + len]
                .iter()
                .for_each(|c| c.store(value, Ordering::Relaxed)),
        }
    }

    pub(crate) fn reverse_range(&self, offset: usize, len: usize) {
        if len < 2 {
            return;
        }
        let (mut lo, mut hi) = (offset, offset + len - 1);
        while lo < hi {
            let a = self.load(lo);
            self.store(lo, self.load(hi));
            self.store(hi, a);
            lo += 1;
            hi -= 1;
        }
    }

    /// Whether both blocks address one region.
    ///
    /// Exclusive storage cannot be co-owned and is only ever its own region.
    pub(crate) fn same_region(&self, other: &Block) -> bool {
        match (&self.storage, &other.storage) {
            (Storage::Shared(a), Storage::Shared(b)) => a.same_mapping(b),
            (Storage::Exclusive(_), Storage::Exclusive(_)) => std::ptr::eq(self, other),
            _ => false,
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("byte_length", &self.byte_length())
            .field("shared", &self.is_shared())
            .finish()
    }
}
