//! Type definitions for parallel aggregation
//!
//! Contains chunk ranges, partial results, configuration, and the per-run outcome.

use std::fmt;
use std::ops::Range;

/// Configuration for parallel aggregation
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Upper bound on the number of chunks (and therefore worker threads)
    pub num_workers: usize,
}

impl ParallelConfig {
    pub fn with_workers(num_workers: usize) -> Self {
        Self { num_workers }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
        }
    }
}

/// A contiguous, non-empty index range of the record sequence owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub id: usize,
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Result produced by a worker for its chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialSum {
    pub chunk_id: usize,
    pub sum: i64,
}

/// Result of one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOutcome {
    pub total: i64,
    pub chunks_spawned: usize,
    pub workers_requested: usize,
}

/// Phases a single aggregation passes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatePhase {
    Idle,
    Partitioning,
    Dispatching,
    WaitingForAll,
    Combining,
    Done,
}

impl fmt::Display for AggregatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregatePhase::Idle => "idle",
            AggregatePhase::Partitioning => "partitioning",
            AggregatePhase::Dispatching => "dispatching",
            AggregatePhase::WaitingForAll => "waiting-for-all",
            AggregatePhase::Combining => "combining",
            AggregatePhase::Done => "done",
        };
        f.write_str(name)
    }
}
