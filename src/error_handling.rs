use crate::platform::ExitCode;
use crate::readers::LoadError;

/// Which stage of the run a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    Usage,
    Config,
    Read,
    Parse,
    Output,
}

/// Error information for reporting and exit code selection
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub origin: ErrorOrigin,
    pub message: String,
}

impl ErrorInfo {
    pub fn exit_code(&self) -> ExitCode {
        match self.origin {
            ErrorOrigin::Usage => ExitCode::InvalidUsage,
            ErrorOrigin::Config | ErrorOrigin::Read | ErrorOrigin::Parse | ErrorOrigin::Output => {
                ExitCode::GeneralError
            }
        }
    }

    /// Stderr text for this error
    pub fn render(&self) -> String {
        match self.origin {
            // clap has already formatted usage errors, including the usage line
            ErrorOrigin::Usage => self.message.trim_end().to_string(),
            ErrorOrigin::Config => format!("chunksum: Config error: {}", self.message),
            _ => format!("chunksum: Error: {}", self.message),
        }
    }
}

pub fn create_fatal_error(origin: ErrorOrigin, message: String) -> ErrorInfo {
    ErrorInfo { origin, message }
}

/// Wrap a command line parse failure
pub fn create_usage_error(err: &clap::Error) -> ErrorInfo {
    ErrorInfo {
        origin: ErrorOrigin::Usage,
        message: err.render().to_string(),
    }
}

/// Classify an error raised after argument parsing.
///
/// Loader failures keep their read/parse distinction; anything else is
/// treated as an output failure.
pub fn classify(err: &anyhow::Error) -> ErrorInfo {
    match err.downcast_ref::<LoadError>() {
        // LoadError's Display already carries its source
        Some(load_error) => {
            let origin = if load_error.is_parse_error() {
                ErrorOrigin::Parse
            } else {
                ErrorOrigin::Read
            };
            create_fatal_error(origin, load_error.to_string())
        }
        None => create_fatal_error(ErrorOrigin::Output, format!("{:#}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_read_error_classification() {
        let err = anyhow::Error::new(LoadError::Read {
            path: PathBuf::from("data.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        let info = classify(&err);

        assert_eq!(info.origin, ErrorOrigin::Read);
        assert_eq!(info.exit_code(), ExitCode::GeneralError);
        assert!(info.render().starts_with("chunksum: Error: failed to read file data.json"));
        assert_eq!(info.message.matches("entity not found").count(), 1);
    }

    #[test]
    fn test_parse_error_classification() {
        let source = serde_json::from_str::<Vec<crate::record::Record>>("{").unwrap_err();
        let err = anyhow::Error::new(LoadError::Parse {
            path: PathBuf::from("data.json"),
            source,
        });
        let info = classify(&err);

        assert_eq!(info.origin, ErrorOrigin::Parse);
        assert!(info.message.contains("failed to parse records from data.json"));
    }

    #[test]
    fn test_other_errors_are_fatal() {
        let info = classify(&anyhow::anyhow!("Failed to write to stdout"));
        assert_eq!(info.origin, ErrorOrigin::Output);
        assert_eq!(info.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_usage_error_exit_code() {
        use crate::cli::Cli;
        use clap::Parser;

        let err = Cli::try_parse_from(["chunksum", "data.json", "0"]).unwrap_err();
        let info = create_usage_error(&err);

        assert_eq!(info.origin, ErrorOrigin::Usage);
        assert_eq!(info.exit_code(), ExitCode::InvalidUsage);
        let rendered = info.render();
        assert!(rendered.contains("Invalid number of workers: 0"));
        assert!(!rendered.starts_with("chunksum: Error:"));
    }

    #[test]
    fn test_config_error_render() {
        let info = create_fatal_error(ErrorOrigin::Config, "bad defaults".to_string());
        assert_eq!(info.render(), "chunksum: Config error: bad defaults");
    }
}
