//! platelet creates a file structure from a template and can read an existing
//! directory back into one. Templates are either key-nested YAML or a flat,
//! indentation based text format, and may reference `$variables`.

/// Command-line interface module for the platelet application
pub mod cli;

/// Common constants used throughout the application
pub mod constants;

/// Error types and handling for the platelet application
pub mod error;

/// A set of helpers for working with the file system
pub mod ioutils;

/// Logger setup
pub mod logger;

/// Flat, indentation based template format
pub mod parser;

/// Explicit configuration and orchestration of one invocation
pub mod pipeline;

/// Writes template trees to the file system
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Reads directories back into template text
pub mod serializer;

/// Template tree and the structured (YAML) template format
pub mod template;

/// Variable discovery, resolution and substitution
pub mod variables;
