// CLI-specific types and structures
// This module contains the command-line interface definitions and parsing logic

use clap::Parser;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Default,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "chunksum")]
#[command(about = "Sum two-field integer records from a JSON file across parallel workers")]
#[command(
    long_about = "Sum two-field integer records from a JSON file across parallel workers\n\nThe input is a JSON array of {\"a\": int, \"b\": int} objects, optionally gzip or zstd compressed.\nRecords are split into at most WORKERS contiguous chunks that are summed concurrently."
)]
#[command(version)]
pub struct Cli {
    /// JSON file containing an array of {"a": int, "b": int} records
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Number of concurrent workers (positive integer)
    #[arg(
        value_name = "WORKERS",
        allow_negative_numbers = true,
        value_parser = parse_worker_count
    )]
    pub workers: usize,

    /// Output format for the result
    #[arg(
        short = 'F',
        long = "output-format",
        value_enum,
        default_value = "default",
        help_heading = "Output Options"
    )]
    pub output_format: OutputFormat,

    /// Print run statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    /// Diagnostic output on stderr (-v phases and timings, -vv per-chunk tracing)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Output Options")]
    pub verbose: u8,

    /// Read defaults from this config file instead of the standard locations
    #[arg(long = "config-file", value_name = "PATH", help_heading = "Configuration")]
    pub config_file: Option<String>,

    /// Do not read any config file
    #[arg(long = "ignore-config", help_heading = "Configuration")]
    pub ignore_config: bool,

    /// Show config file locations and active defaults, then exit
    #[arg(long = "show-config", help_heading = "Configuration")]
    pub show_config: bool,
}

/// Parse the worker count positional; only positive integers are accepted
pub fn parse_worker_count(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => {
            usize::try_from(n).map_err(|_| format!("Invalid number of workers: {}", raw))
        }
        _ => Err(format!("Invalid number of workers: {}", raw)),
    }
}
