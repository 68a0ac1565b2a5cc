//! Error handling for the platelet application.
//! Defines custom error types and results used throughout the application.

use crate::constants::exit_codes;
use thiserror::Error;

/// Custom error types for platelet operations.
///
/// Every variant is fatal for the current invocation; nothing is retried and
/// partially written files are left in place.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// A `name=value` assignment supplied on the command line is malformed.
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    /// A decoded structured template holds something other than a mapping,
    /// a string or null.
    #[error("Malformed template element: {value}.")]
    MalformedTemplateError { value: String },

    /// A flat template line breaks the indentation or token rules.
    #[error("{message} at line {line}: '{content}'.")]
    ParseError { message: String, line: usize, content: String },

    #[error("Cannot proceed: '{path}' does not exist or is not a {expected}.")]
    PathError { path: String, expected: String },

    #[error("Failed to process YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to read user input. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),
}

impl Error {
    pub(crate) fn parse<S: Into<String>>(message: &str, line: usize, content: S) -> Self {
        Error::ParseError { message: message.to_string(), line, content: content.into() }
    }
}

/// Convenience type alias for Results with platelet's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(exit_codes::FAILURE);
}
