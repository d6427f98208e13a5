//! Copy plans for `View::copy_with`
//!
//! A plan names any coherent subset of source start/end, destination
//! start/end and byte length. Missing values are derived from the ones
//! given; contradicting or insufficient combinations are rejected.

use crate::error::{MemoryError, Result};

/// Partially specified intra-view copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyPlan {
    from_start: Option<usize>,
    from_end: Option<usize>,
    to_start: Option<usize>,
    to_end: Option<usize>,
    byte_length: Option<usize>,
}

/// Fully resolved copy: `byte_length` bytes from `from_start` to `to_start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCopy {
    pub from_start: usize,
    pub to_start: usize,
    pub byte_length: usize,
}

impl CopyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_start(mut self, offset: usize) -> Self {
        self.from_start = Some(offset);
        self
    }

    pub fn from_end(mut self, offset: usize) -> Self {
        self.from_end = Some(offset);
        self
    }

    pub fn to_start(mut self, offset: usize) -> Self {
        self.to_start = Some(offset);
        self
    }

    pub fn to_end(mut self, offset: usize) -> Self {
        self.to_end = Some(offset);
        self
    }

    pub fn byte_length(mut self, len: usize) -> Self {
        self.byte_length = Some(len);
        self
    }

    /// Derive the missing values.
    pub fn resolve(&self) -> Result<ResolvedCopy> {
        let from_span = span(self.from_start, self.from_end, "from")?;
        let to_span = span(self.to_start, self.to_end, "to")?;

        let mut byte_length = None;
        for candidate in [self.byte_length, from_span, to_span].into_iter().flatten() {
            match byte_length {
                None => byte_length = Some(candidate),
                Some(len) if len != candidate => {
                    return Err(MemoryError::InvalidArgument(format!(
                        "incoherent copy lengths: {} and {}",
                        len, candidate
                    )))
                }
                Some(_) => {}
            }
        }
        let byte_length = byte_length.ok_or_else(|| {
            MemoryError::InvalidArgument("insufficient arguments to derive byte length".into())
        })?;

        Ok(ResolvedCopy {
            from_start: start(self.from_start, self.from_end, byte_length, "from")?,
            to_start: start(self.to_start, self.to_end, byte_length, "to")?,
            byte_length,
        })
    }
}

fn span(start: Option<usize>, end: Option<usize>, side: &str) -> Result<Option<usize>> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(MemoryError::InvalidArgument(format!(
            "{side} end {e} precedes {side} start {s}"
        ))),
        (Some(s), Some(e)) => Ok(Some(e - s)),
        _ => Ok(None),
    }
}

fn start(start: Option<usize>, end: Option<usize>, len: usize, side: &str) -> Result<usize> {
    match (start, end) {
        (Some(s), _) => Ok(s),
        (None, Some(e)) => e.checked_sub(len).ok_or_else(|| {
            MemoryError::InvalidArgument(format!("{side} end {e} is shorter than length {len}"))
        }),
        (None, None) => Err(MemoryError::InvalidArgument(format!(
            "{side} start or {side} end is required"
        ))),
    }
}
