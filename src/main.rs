use chunksum::args::process_args_with_config;
use chunksum::config::ChunksumConfig;
use chunksum::error_handling::classify;
use chunksum::platform::{ExitCode, SafeStderr, SafeStdout};
use chunksum::runner::run_with_config;

fn main() {
    let mut stderr = SafeStderr::new();

    // Usage errors exit here, before the input file is opened
    let cli = process_args_with_config(&mut stderr);
    let config = ChunksumConfig::from_cli(&cli);

    let stats = match run_with_config(&config) {
        Ok(stats) => stats,
        Err(e) => {
            let info = classify(&e);
            stderr.writeln(&info.render()).unwrap_or(());
            info.exit_code().exit();
        }
    };

    let mut stdout = SafeStdout::new();
    let written = stats
        .render_result(config.output.format)
        .lines()
        .try_for_each(|line| stdout.writeln(line))
        .and_then(|()| stdout.flush());
    if let Err(e) = written {
        let info = classify(&e);
        stderr.writeln(&info.render()).unwrap_or(());
        info.exit_code().exit();
    }

    if config.output.stats {
        stderr.writeln(&stats.format_stats()).unwrap_or(());
    }

    ExitCode::Success.exit();
}
