#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate. A rejected request or response is not an
//! error here: it is a regular outcome reported on stdout.

use derive_more::{Display, From};
use oasgate_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The description could not be loaded or resolved.
    #[display("Description Error: {}", _0)]
    Description(AppError),

    /// An input file is not valid YAML/JSON for the expected shape.
    #[display("Input Error: {}", _0)]
    Input(serde_yaml::Error),

    /// Output could not be serialized.
    #[display("Output Error: {}", _0)]
    Output(serde_json::Error),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// Implemented manually because `General(String)` has no `source()`.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_converts() {
        let err: CliError = AppError::InvalidDescription("bad".into()).into();
        assert_eq!(err.to_string(), "Description Error: Invalid description: bad");
    }

    #[test]
    fn test_string_converts_to_general() {
        let err: CliError = String::from("boom").into();
        assert!(matches!(err, CliError::General(_)));
    }
}
