//! Main parallel processor
//!
//! Contains the ParallelProcessor struct that orchestrates the fan-out/fan-in
//! aggregation: partition, spawn one worker per chunk, wait for all of them,
//! then combine their partial sums.

use crossbeam_channel::bounded;
use std::panic;
use std::thread;
use std::time::Instant;

use crate::debug::{DebugConfig, DebugLogger};
use crate::record::Record;

use super::chunking::partition;
use super::sink::{combine_partial_sums, CombinedSum};
use super::types::{AggregateOutcome, AggregatePhase, Chunk, ParallelConfig};
use super::worker::{chunk_sum, worker_thread};

/// Main parallel processor
pub struct ParallelProcessor {
    config: ParallelConfig,
    logger: DebugLogger,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            logger: DebugLogger::default(),
        }
    }

    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.logger = DebugLogger::new(debug);
        self
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Sum `a + b` over all records using up to `num_workers` threads.
    ///
    /// Blocks until every worker has finished. A panicking worker is re-raised
    /// on the calling thread.
    pub fn process(&self, records: &[Record]) -> AggregateOutcome {
        let workers_requested = self.config.num_workers;
        let started = Instant::now();
        self.enter(AggregatePhase::Idle);

        self.enter(AggregatePhase::Partitioning);
        let chunks = partition(records.len(), workers_requested);

        if chunks.is_empty() {
            self.logger
                .log_basic("no records to aggregate, skipping worker dispatch");
            self.enter(AggregatePhase::Done);
            return AggregateOutcome {
                total: 0,
                chunks_spawned: 0,
                workers_requested,
            };
        }

        let combined = self.fan_out(&chunks, records, chunk_sum);
        assert_eq!(
            combined.partials,
            chunks.len(),
            "every chunk must report exactly one partial sum"
        );
        self.enter(AggregatePhase::Done);

        self.logger.log_basic(&format!(
            "aggregated {} records in {} chunks ({} workers requested)",
            records.len(),
            chunks.len(),
            workers_requested
        ));
        self.logger.log_timing("aggregation", started.elapsed());

        AggregateOutcome {
            total: combined.total,
            chunks_spawned: chunks.len(),
            workers_requested,
        }
    }

    /// Run `sum_chunk` over every chunk on its own scoped thread and combine
    /// the partial sums once all threads have been joined.
    fn fan_out<F>(&self, chunks: &[Chunk], records: &[Record], sum_chunk: F) -> CombinedSum
    where
        F: Fn(&[Record]) -> i64 + Sync,
    {
        // Capacity covers every worker so no send blocks before the join barrier
        let (result_sender, result_receiver) = bounded(chunks.len());
        let sum_chunk = &sum_chunk;

        thread::scope(|scope| {
            self.enter(AggregatePhase::Dispatching);
            let handles: Vec<_> = chunks
                .iter()
                .map(|&chunk| {
                    self.logger.log_trace(&format!(
                        "dispatching chunk {} [{}, {}) ({} records)",
                        chunk.id,
                        chunk.start,
                        chunk.end,
                        chunk.len()
                    ));
                    let result_sender = result_sender.clone();
                    scope.spawn(move || worker_thread(chunk, records, result_sender, sum_chunk))
                })
                .collect();

            // Only worker clones remain, so the channel disconnects when the last worker exits
            drop(result_sender);

            self.enter(AggregatePhase::WaitingForAll);
            for handle in handles {
                if let Err(payload) = handle.join() {
                    panic::resume_unwind(payload);
                }
            }

            self.enter(AggregatePhase::Combining);
            combine_partial_sums(result_receiver)
        })
    }

    fn enter(&self, phase: AggregatePhase) {
        self.logger.log_trace(&format!("aggregation phase: {}", phase));
    }
}

/// Sum `a + b` over all records with up to `num_workers` concurrent workers
pub fn process_chunks(records: &[Record], num_workers: usize) -> i64 {
    ParallelProcessor::new(ParallelConfig::with_workers(num_workers))
        .process(records)
        .total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    fn records(pairs: &[(i64, i64)]) -> Vec<Record> {
        pairs.iter().copied().map(Record::from).collect()
    }

    fn sequential_sum(records: &[Record]) -> i64 {
        records.iter().map(|r| r.a + r.b).sum()
    }

    #[test]
    fn test_three_records_two_workers() {
        let data = records(&[(1, 2), (3, 4), (5, 6)]);
        let outcome = ParallelProcessor::new(ParallelConfig::with_workers(2)).process(&data);

        assert_eq!(outcome.total, 21);
        assert_eq!(outcome.chunks_spawned, 2);
        assert_eq!(outcome.workers_requested, 2);
    }

    #[test]
    fn test_empty_input_spawns_nothing() {
        let outcome = ParallelProcessor::new(ParallelConfig::with_workers(4)).process(&[]);

        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.chunks_spawned, 0);
    }

    #[test]
    fn test_fewer_chunks_than_workers() {
        let data = records(&[(1, 1), (1, 1), (1, 1), (1, 1), (1, 1)]);
        let outcome = ParallelProcessor::new(ParallelConfig::with_workers(4)).process(&data);

        assert_eq!(outcome.total, 10);
        assert_eq!(outcome.chunks_spawned, 3);
    }

    #[test]
    fn test_more_workers_than_records() {
        let data = records(&[(7, 8), (-1, 1)]);
        assert_eq!(process_chunks(&data, 64), 15);
    }

    #[test]
    fn test_single_worker_matches_many() {
        let data: Vec<Record> = (0..10_000).map(|i| Record::new(i, 2 * i - 5)).collect();
        let single = process_chunks(&data, 1);

        for workers in [2, 3, 7, 16, 10_000, 20_000] {
            assert_eq!(process_chunks(&data, workers), single, "workers = {}", workers);
        }
        assert_eq!(single, sequential_sum(&data));
    }

    #[test]
    fn test_overflow_wraps() {
        let data = records(&[(i64::MAX, 0), (1, 0)]);
        assert_eq!(process_chunks(&data, 2), i64::MIN);
    }

    #[test]
    fn test_processor_is_reusable() {
        let processor = ParallelProcessor::new(ParallelConfig::with_workers(3));
        let data = records(&[(1, 2), (3, 4)]);

        assert_eq!(processor.process(&data).total, 10);
        assert_eq!(processor.process(&data).total, 10);
        assert_eq!(processor.config().num_workers, 3);
    }

    #[test]
    fn test_trace_logging_does_not_change_result() {
        let data = records(&[(1, 2), (3, 4), (5, 6)]);
        let outcome = ParallelProcessor::new(ParallelConfig::with_workers(2))
            .with_debug(DebugConfig::new(2))
            .process(&data);
        assert_eq!(outcome.total, 21);
    }

    #[test]
    fn test_slow_workers_are_all_combined() {
        // Chunk 0 finishes last; its partial must still be part of the total
        let data: Vec<Record> = (0..8).map(|i| Record::new(i, 0)).collect();
        let chunks = partition(data.len(), 4);
        let finished = AtomicUsize::new(0);
        let processor = ParallelProcessor::new(ParallelConfig::with_workers(4));

        let combined = processor.fan_out(&chunks, &data, |slice| {
            if slice.first().map(|r| r.a) == Some(0) {
                thread::sleep(Duration::from_millis(50));
            }
            finished.fetch_add(1, Ordering::SeqCst);
            chunk_sum(slice)
        });

        assert_eq!(finished.load(Ordering::SeqCst), chunks.len());
        assert_eq!(combined.partials, 4);
        assert_eq!(combined.total, 28);
    }

    #[test]
    fn test_every_chunk_runs_concurrently() {
        // The barrier only releases once all chunk threads are alive at the same time
        let data: Vec<Record> = (0..6).map(|i| Record::new(i, i)).collect();
        let chunks = partition(data.len(), 3);
        let barrier = Barrier::new(chunks.len());
        let processor = ParallelProcessor::new(ParallelConfig::with_workers(3));

        let combined = processor.fan_out(&chunks, &data, |slice| {
            barrier.wait();
            chunk_sum(slice)
        });

        assert_eq!(combined.partials, 3);
        assert_eq!(combined.total, 30);
    }

    #[test]
    fn test_worker_panic_is_propagated() {
        let data = records(&[(1, 2), (3, 4)]);
        let chunks = partition(data.len(), 2);
        let processor = ParallelProcessor::new(ParallelConfig::with_workers(2));

        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            processor.fan_out(&chunks, &data, |slice| {
                if slice[0].a == 3 {
                    panic!("chunk failed");
                }
                chunk_sum(slice)
            })
        }));
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_total_independent_of_worker_count(
            pairs in proptest::collection::vec((-1_000_000i64..1_000_000, -1_000_000i64..1_000_000), 0..500),
            workers in 1usize..40,
        ) {
            let data = records(&pairs);
            let outcome = ParallelProcessor::new(ParallelConfig::with_workers(workers)).process(&data);

            prop_assert_eq!(outcome.total, sequential_sum(&data));
            prop_assert!(outcome.chunks_spawned <= workers);
            prop_assert_eq!(outcome.chunks_spawned == 0, data.is_empty());
        }
    }
}
