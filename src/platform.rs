use anyhow::Result;
use std::io::{self, Write};
use std::process;

/// Standard Unix exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidUsage = 2,
    SignalPipe = 141, // 128 + SIGPIPE (13)
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        process::exit(self.code())
    }
}

/// Stdout writer for result lines.
///
/// A closed pipe (e.g. `chunksum data.json 4 | head -0`) ends the process with
/// exit code 141; any other write failure is returned to the caller.
pub struct SafeStdout {
    stdout: io::Stdout,
}

impl SafeStdout {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn writeln(&mut self, data: &str) -> Result<()> {
        exit_on_broken_pipe(writeln!(self.stdout, "{}", data), "write to")
    }

    pub fn flush(&mut self) -> Result<()> {
        exit_on_broken_pipe(self.stdout.flush(), "flush")
    }
}

impl Default for SafeStdout {
    fn default() -> Self {
        Self::new()
    }
}

fn exit_on_broken_pipe(result: io::Result<()>, action: &str) -> Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SignalPipe.exit(),
        Err(e) => Err(anyhow::anyhow!("Failed to {} stdout: {}", action, e)),
        Ok(()) => Ok(()),
    }
}

/// Safe wrapper for writing to stderr
pub struct SafeStderr {
    stderr: io::Stderr,
}

impl SafeStderr {
    pub fn new() -> Self {
        Self {
            stderr: io::stderr(),
        }
    }

    /// Write a line to stderr; if stderr itself is gone there is nobody left to tell
    pub fn writeln(&mut self, data: &str) -> Result<()> {
        match writeln!(self.stderr, "{}", data) {
            Ok(()) => Ok(()),
            Err(_) => ExitCode::GeneralError.exit(),
        }
    }
}

impl Default for SafeStderr {
    fn default() -> Self {
        Self::new()
    }
}
