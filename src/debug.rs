use std::time::Duration;

/// Verbosity-gated diagnostics written to stderr.
///
/// Level 1 reports run phases and timings, level 2 adds per-chunk dispatch
/// and aggregation state transitions.
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub verbosity: u8,
    pub show_timing: bool,
    pub trace_chunks: bool,
}

impl DebugConfig {
    pub fn new(verbose_count: u8) -> Self {
        DebugConfig {
            verbosity: verbose_count,
            show_timing: verbose_count >= 1,
            trace_chunks: verbose_count >= 2,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.verbosity > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct DebugLogger {
    pub config: DebugConfig,
}

impl DebugLogger {
    pub fn new(config: DebugConfig) -> Self {
        DebugLogger { config }
    }

    pub fn log_basic(&self, message: &str) {
        if self.config.is_enabled() {
            eprintln!("{}", format_debug_line(message));
        }
    }

    pub fn log_trace(&self, message: &str) {
        if self.config.trace_chunks {
            eprintln!("{}", format_debug_line(message));
        }
    }

    pub fn log_timing(&self, label: &str, elapsed: Duration) {
        if self.config.show_timing {
            eprintln!("{}", format_debug_line(&format!("{} took {:?}", label, elapsed)));
        }
    }
}

fn format_debug_line(message: &str) -> String {
    format!("chunksum: debug: {}", message)
}
