// Core library for chunksum: parallel fan-out/fan-in summation of JSON records.
// The binary in main.rs is a thin wrapper around `runner::run_with_config`.

pub mod args;
pub mod cli;
pub mod config;
pub mod config_file;
pub mod debug;
pub mod decompression;
pub mod error_handling;
pub mod parallel;
pub mod platform;
pub mod readers;
pub mod record;
pub mod runner;
pub mod stats;

pub use config::ChunksumConfig;
pub use parallel::{process_chunks, ParallelConfig, ParallelProcessor};
pub use readers::{load_records, LoadError};
pub use record::Record;
pub use stats::RunStats;
