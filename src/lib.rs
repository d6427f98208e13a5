//! Memblock - Typed Zero-Copy Views over Fixed-Size Memory Blocks
//!
//! Arsitektur:
//! - Blocks: fixed-length byte regions, heap-owned or mmap-backed and shared
//! - Views: bounds-checked windows that alias their block, never copy it
//! - Codecs: fixed-width scalar encodings with explicit byte order
//! - Arrays: element-wise sequences of raw or decoded sub-views
//!
//! ```
//! use memblock::{Block, Codec, Uint32BE};
//!
//! let block = Block::new(8);
//! let view = block.view();
//! Uint32BE::bind(view.slice(4, 4)?)?.set(0x0102_0304)?;
//! assert_eq!(view.to_vec(), [0, 0, 0, 0, 1, 2, 3, 4]);
//! # Ok::<(), memblock::MemoryError>(())
//! ```

pub mod array;
pub mod codec;
pub mod core;
pub mod error;

pub use crate::array::{DataArray, ViewArray};
pub use crate::codec::{
    Codec, Float32BE, Float32LE, Float64BE, Float64LE, Scalar, Sint16BE, Sint16LE, Sint32BE,
    Sint32LE, Sint64BE, Sint64LE, Sint8, TimePosixS32BE, TimePosixS32LE, TimePosixS64BE,
    TimePosixS64LE, Uint16BE, Uint16LE, Uint32BE, Uint32LE, Uint64BE, Uint64LE, Uint8,
    Uint8Clamped,
};
pub use crate::core::{Block, BlockOptions, CopyPlan, DataView, RawBuffer, View, WrapExpectations};
pub use crate::error::{MemoryError, Result};
