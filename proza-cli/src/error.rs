//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input file matched the given patterns
    NoInputFiles(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// One or more files failed to process
    ProcessingFailed {
        /// Files that failed
        failed: usize,
        /// Files attempted
        total: usize,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInputFiles(patterns) => {
                write!(f, "No files found matching: {patterns}")
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingFailed { failed, total } => {
                write!(f, "Failed to process {failed} of {total} files")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_files_display() {
        let error = CliError::NoInputFiles("*.xml, *.gz".to_string());
        assert_eq!(error.to_string(), "No files found matching: *.xml, *.gz");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("--id needs exactly one input file".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: --id needs exactly one input file"
        );
    }

    #[test]
    fn test_processing_failed_display() {
        let error = CliError::ProcessingFailed {
            failed: 2,
            total: 7,
        };
        assert_eq!(error.to_string(), "Failed to process 2 of 7 files");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::InvalidPattern("**[".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("**["));
    }
}
