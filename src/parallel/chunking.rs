//! Chunk partitioning for parallel aggregation
//!
//! Splits a sequence of `len` records into at most `workers` contiguous chunks
//! of `ceil(len / workers)` records. Trailing workers that would receive an
//! empty range are not given a chunk at all, so the last chunk may be short and
//! the chunk count may be lower than the worker count.

use super::types::Chunk;

/// Number of records per chunk for a sequence of `len` records over `workers` workers
pub fn chunk_size(len: usize, workers: usize) -> usize {
    assert!(workers > 0, "worker count must be at least 1");
    len.div_ceil(workers)
}

/// Partition `[0, len)` into contiguous, non-empty chunks, at most `workers` of them
pub fn partition(len: usize, workers: usize) -> Vec<Chunk> {
    if len == 0 {
        return Vec::new();
    }

    let size = chunk_size(len, workers);
    let mut chunks = Vec::with_capacity(workers.min(len));

    for id in 0..workers {
        let start = id * size;
        if start >= len {
            break;
        }
        let end = (start + size).min(len);
        chunks.push(Chunk { id, start, end });
    }

    chunks
}
