//! Error handling for newfile.
//! Defines the error taxonomy and the result alias used throughout the crate.

use std::io;
use thiserror::Error;

use crate::signal::Abort;

/// Errors that can terminate an invocation.
///
/// Resolution and configuration errors are reported before any I/O happens.
/// `Aborted` is the expected, user-facing termination path raised by plugins
/// or by a declined confirmation; it is not a bug.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while loading or reading configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// No creator plugin matches the requested name or file extension
    #[error("Not a valid file type (not supported): {0}. Use --plugins to list available plugins.")]
    NoMatchingPlugin(String),

    /// Two creator plugins claim the same file extension
    #[error("Configuration error: extension '{extension}' is claimed by both '{existing}' and '{conflicting}'.")]
    AmbiguousExtension {
        extension: String,
        existing: String,
        conflicting: String,
    },

    /// Two plugins claim the same name or alias
    #[error("Configuration error: name '{name}' is claimed by both '{existing}' and '{conflicting}'.")]
    ConflictingName {
        name: String,
        existing: String,
        conflicting: String,
    },

    /// A plugin (or the user) stopped the operation
    #[error("{0}")]
    Aborted(Abort),

    /// A creator plugin failed with something other than a control signal
    #[error("Unexpected error in plugin '{plugin}': {cause:#}")]
    PluginError {
        plugin: String,
        cause: anyhow::Error,
    },

    /// A creator produced no content and does not allow blank files
    #[error("Failed to create file: {0} (plugin returned no content).")]
    EmptyContent(String),

    /// Represents errors that occur during template rendering
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Aborted(abort) => abort.code,
            _ => 1,
        }
    }
}

impl From<Abort> for Error {
    fn from(abort: Abort) -> Self {
        Error::Aborted(abort)
    }
}

/// Convenience type alias for Results with newfile's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// An abort with exit code 0 and no message exits silently.
pub fn default_error_handler(err: Error) {
    let code = err.exit_code();
    let silent = matches!(&err, Error::Aborted(abort) if abort.code == 0 && abort.message.is_none());
    if !silent {
        eprintln!("{err}");
    }
    std::process::exit(code);
}
