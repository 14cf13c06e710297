//! Parallel aggregation module for chunksum
//!
//! This module splits a record sequence into contiguous chunks, sums every
//! chunk on its own thread, and combines the partial sums once all workers
//! have finished.
//!
//! # Module Structure
//!
//! - `types`: Chunks, partial results, configuration, and run outcome
//! - `chunking`: Ceil-division partitioning of the record sequence
//! - `worker`: Per-chunk summation thread
//! - `sink`: Draining and combining partial sums
//! - `processor`: Main ParallelProcessor orchestration

mod chunking;
mod processor;
mod sink;
mod types;
mod worker;

// Re-export public types
pub use chunking::{chunk_size, partition};
pub use processor::{process_chunks, ParallelProcessor};
pub use types::{AggregateOutcome, AggregatePhase, Chunk, ParallelConfig, PartialSum};
pub use worker::chunk_sum;
