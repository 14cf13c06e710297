//! CLI argument processing module
//!
//! This module applies config file defaults to the raw command line, handles
//! `--show-config`, and parses the result into a `Cli`.

use clap::Parser;

use crate::cli::Cli;
use crate::config_file::ConfigFile;
use crate::error_handling::{create_fatal_error, create_usage_error, ErrorInfo, ErrorOrigin};
use crate::platform::{ExitCode, SafeStderr};

/// Extract the --config-file argument from raw args (both `--config-file P` and `--config-file=P`)
pub fn extract_config_file_arg(args: &[String]) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config-file" {
            return iter.next().cloned();
        }
        if let Some(path) = arg.strip_prefix("--config-file=") {
            return Some(path.to_string());
        }
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

/// Apply config file defaults to `raw_args` unless `--ignore-config` is present
pub fn resolve_args(raw_args: Vec<String>) -> Result<Vec<String>, ErrorInfo> {
    if has_flag(&raw_args, "--ignore-config") {
        return Ok(raw_args);
    }

    let config_file_path = extract_config_file_arg(&raw_args);
    let config_file = ConfigFile::load_with_custom_path(config_file_path.as_deref())
        .map_err(|e| create_fatal_error(ErrorOrigin::Config, format!("{:#}", e)))?;

    config_file
        .process_args(raw_args)
        .map_err(|e| create_fatal_error(ErrorOrigin::Config, format!("{:#}", e)))
}

/// Parse the process command line with config file support.
///
/// Exits the process for `--show-config`, `--help`, `--version`, config
/// errors, and usage errors; no file is touched before this returns.
pub fn process_args_with_config(stderr: &mut SafeStderr) -> Cli {
    let raw_args: Vec<String> = std::env::args().collect();

    if has_flag(&raw_args, "--show-config") {
        ConfigFile::show_config(extract_config_file_arg(&raw_args).as_deref());
        ExitCode::Success.exit();
    }

    let processed_args = match resolve_args(raw_args) {
        Ok(args) => args,
        Err(info) => {
            stderr.writeln(&info.render()).unwrap_or(());
            info.exit_code().exit();
        }
    };

    match Cli::try_parse_from(processed_args) {
        Ok(cli) => cli,
        // --help and --version are reported by clap on stdout with exit code 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let info = create_usage_error(&e);
            stderr.writeln(&info.render()).unwrap_or(());
            info.exit_code().exit();
        }
    }
}
