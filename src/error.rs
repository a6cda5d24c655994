//! Error handling for the kitgen application.
//! Defines the error taxonomy and result type used throughout the generator.

use std::io;
use thiserror::Error;

/// Errors raised while generating a project.
///
/// Every variant is fatal: generation stops at the first error and whatever was already
/// written to the output directory stays on disk.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or incomplete answer file.
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    /// The template tree could not be walked.
    #[error("Failed to scan '{path}': {source}.")]
    ScanError {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    /// A scanned path could not be turned into a destination path.
    #[error("Failed to classify '{path}': {reason}.")]
    ClassificationError { path: String, reason: String },

    /// A template file failed to render.
    #[error("Failed to render template '{path}': {source}.")]
    RenderError {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A selected file could not be read, copied or written.
    #[error("Failed to process '{path}': {source}.")]
    FileError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Two source files resolve to the same destination.
    #[error("Write conflict: '{first}' and '{second}' both resolve to '{destination}'.")]
    WriteConflict {
        destination: String,
        first: String,
        second: String,
    },

    /// A conditional file or folder carries a tag no rule recognizes.
    #[error("Unknown tag '{tag}' in '{path}' (use --legacy-tags to ignore unknown tags).")]
    UnknownTag { tag: String, path: String },

    /// A rule was registered twice.
    #[error("Duplicate predicate tag '{0}'.")]
    DuplicateTag(String),

    #[error("Output directory '{output_dir}' is not empty (use --force to generate into it).")]
    OutputDirectoryExistsError { output_dir: String },

    /// The dependency installation step failed. Generated files are kept.
    #[error("Installation error: {0}.")]
    InstallError(String),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
