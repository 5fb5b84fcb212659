//! Chunk planning
//!
//! Partitions the retained page list into fixed-size output chunks. Pure and
//! deterministic: the concatenation of the planned chunks always equals the
//! input, in order.

use crate::error::{SplitError, SplitResult};

/// One planned output document: original page indices in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub pages: Vec<usize>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Partition `retained` into contiguous runs of `chunk_size`, the last run
/// shorter if the input does not divide evenly.
///
/// An empty input yields an empty plan. `chunk_size == 0` is rejected with
/// [`SplitError::InvalidConfiguration`].
pub fn plan_chunks(retained: &[usize], chunk_size: usize) -> SplitResult<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(SplitError::InvalidConfiguration(
            "pages per chunk must be at least 1".to_string(),
        ));
    }

    Ok(retained
        .chunks(chunk_size)
        .map(|pages| Chunk {
            pages: pages.to_vec(),
        })
        .collect())
}
