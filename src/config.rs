use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::debug::DebugConfig;
use crate::parallel::ParallelConfig;

/// Main configuration struct for chunksum
#[derive(Debug, Clone)]
pub struct ChunksumConfig {
    pub input: InputConfig,
    pub performance: PerformanceConfig,
    pub output: OutputConfig,
    pub debug: DebugConfig,
}

/// Input configuration
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub file: PathBuf,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub workers: usize,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub stats: bool,
}

impl ChunksumConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            input: InputConfig {
                file: PathBuf::from(&cli.file),
            },
            performance: PerformanceConfig {
                workers: cli.workers,
            },
            output: OutputConfig {
                format: cli.output_format,
                stats: cli.stats,
            },
            debug: DebugConfig::new(cli.verbose),
        }
    }

    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig::with_workers(self.performance.workers)
    }

    /// More workers requested than logical CPUs available
    pub fn is_oversubscribed(&self) -> bool {
        self.performance.workers > num_cpus::get()
    }
}
