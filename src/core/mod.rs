//! Core module: blocks and the views that address them
//!
//! Prinsip desain:
//! - Zero-Copy: views are windows, never copies
//! - Fixed-Size: a block's length is set once at allocation
//! - Fail-Fast: every window is bounds-checked before any byte moves

mod block;
mod copy;
mod data_view;
mod shared;
mod view;

pub use block::{Block, BlockOptions, RawBuffer, WrapExpectations};
pub use copy::{CopyPlan, ResolvedCopy};
pub use data_view::DataView;
pub use shared::{shared_memory_supported, SharedRegion};
pub use view::View;
