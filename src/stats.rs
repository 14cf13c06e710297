use serde_json::json;
use std::time::Duration;

use crate::cli::OutputFormat;
use crate::parallel::AggregateOutcome;

/// Statistics collected during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub workers_requested: usize,
    pub chunks_spawned: usize,
    pub total_sum: i64,
    pub load_time: Duration,
    pub aggregate_time: Duration,
}

impl RunStats {
    pub fn new(records: usize, load_time: Duration) -> Self {
        Self {
            records,
            load_time,
            ..Default::default()
        }
    }

    pub fn record_outcome(&mut self, outcome: &AggregateOutcome, aggregate_time: Duration) {
        self.total_sum = outcome.total;
        self.workers_requested = outcome.workers_requested;
        self.chunks_spawned = outcome.chunks_spawned;
        self.aggregate_time = aggregate_time;
    }

    /// Result lines printed to stdout
    pub fn render_result(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Default => format!(
                "Total Sum: {}\nTime taken with {} workers: {:?}",
                self.total_sum, self.workers_requested, self.aggregate_time
            ),
            OutputFormat::Json => json!({
                "total_sum": self.total_sum,
                "workers": self.workers_requested,
                "chunks": self.chunks_spawned,
                "records": self.records,
                "elapsed_ms": self.aggregate_time.as_nanos() as f64 / 1_000_000.0,
            })
            .to_string(),
        }
    }

    /// One-line summary for stderr
    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Records processed: {} in {} chunks ({} workers requested)",
            self.records, self.chunks_spawned, self.workers_requested
        );

        output.push_str(&format!(
            "; load {}ms, aggregate {}ms",
            self.load_time.as_millis(),
            self.aggregate_time.as_millis()
        ));

        let aggregate_ms = self.aggregate_time.as_secs_f64() * 1000.0;
        if aggregate_ms > 0.0 && self.records > 0 {
            let records_per_sec = self.records as f64 * 1000.0 / aggregate_ms;
            output.push_str(&format!(" ({:.0} records/s)", records_per_sec));
        }

        output
    }
}
