//! Anonymous Shared Memory Regions
//!
//! A shared region is an anonymous mmap that several threads may observe at
//! the same time:
//! - Zero-filled by the kernel at creation
//! - Co-owned through `Arc`, unmapped when the last handle drops
//! - Accessed only as `AtomicU8`, never through `&[u8]` / `&mut [u8]`

use memmap2::{MmapMut, MmapOptions};
use std::io;
use std::sync::atomic::AtomicU8;
use std::sync::Arc;

/// Mapping plus the logical length requested by the caller.
///
/// The mapping is at least one byte long because zero-length maps are
/// rejected by some kernels.
struct Region {
    mmap: MmapMut,
    len: usize,
}

/// Co-owned handle to an anonymous shared mapping.
#[derive(Clone)]
pub struct SharedRegion {
    region: Arc<Region>,
}

impl SharedRegion {
    /// Map a fresh zero-filled region of `len` bytes.
    pub fn new(len: usize) -> io::Result<Self> {
        let mmap = MmapOptions::new().len(len.max(1)).map_anon()?;
        Ok(Self {
            region: Arc::new(Region { mmap, len }),
        })
    }

    /// Logical length in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.region.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.region.len == 0
    }

    /// Number of handles currently co-owning the mapping.
    pub fn owners(&self) -> usize {
        Arc::strong_count(&self.region)
    }

    /// Byte cells of the region.
    #[inline(always)]
    pub(crate) fn cells(&self) -> &[AtomicU8] {
        // SAFETY: AtomicU8 has the same size and alignment as u8. The mapping
        // lives as long as `self.region`, holds at least `len` bytes, and is
        // never exposed as a plain byte slice, so every access goes through
        // atomics.
        unsafe {
            std::slice::from_raw_parts(self.region.mmap.as_ptr() as *const AtomicU8, self.region.len)
        }
    }

    /// Whether both handles co-own one mapping.
    #[inline(always)]
    pub(crate) fn same_mapping(&self, other: &SharedRegion) -> bool {
        Arc::ptr_eq(&self.region, &other.region)
    }
}

impl std::fmt::Debug for SharedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegion")
            .field("len", &self.len())
            .field("owners", &self.owners())
            .finish()
    }
}

/// Probe whether this environment can provide anonymous shared mappings.
pub fn shared_memory_supported() -> bool {
    SharedRegion::new(1).is_ok()
}
