//! Typed arrays over views
//!
//! Two flavors share one element layout:
//! - `ViewArray`: element `i` is the raw sub-view `[i*w, (i+1)*w)`
//! - `DataArray<C>`: element `i` is that sub-view decoded through codec `C`

mod data_array;
mod view_array;

pub use data_array::{DataArray, Iter};
pub use view_array::{ViewArray, ViewIter};
