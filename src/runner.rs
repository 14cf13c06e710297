//! Run execution module
//!
//! Loads the record file, fans the records out to the parallel processor and
//! collects the run statistics used for reporting.

use anyhow::Result;
use std::time::Instant;

use crate::config::ChunksumConfig;
use crate::debug::DebugLogger;
use crate::parallel::ParallelProcessor;
use crate::readers;
use crate::stats::RunStats;

/// Load the configured input and aggregate it.
///
/// The aggregation time excludes file loading; that is tracked separately in
/// `RunStats::load_time`.
pub fn run_with_config(config: &ChunksumConfig) -> Result<RunStats> {
    let logger = DebugLogger::new(config.debug.clone());

    if config.is_oversubscribed() {
        logger.log_basic(&format!(
            "{} workers requested on {} logical CPUs",
            config.performance.workers,
            num_cpus::get()
        ));
    }

    let load_start = Instant::now();
    let records = readers::load_records(&config.input.file)?;
    let load_time = load_start.elapsed();
    logger.log_basic(&format!(
        "loaded {} records from {}",
        records.len(),
        config.input.file.display()
    ));
    logger.log_timing("load", load_time);

    let processor =
        ParallelProcessor::new(config.parallel_config()).with_debug(config.debug.clone());

    let aggregate_start = Instant::now();
    let outcome = processor.process(&records);
    let aggregate_time = aggregate_start.elapsed();
    logger.log_timing("aggregate", aggregate_time);

    let mut stats = RunStats::new(records.len(), load_time);
    stats.record_outcome(&outcome, aggregate_time);
    Ok(stats)
}
