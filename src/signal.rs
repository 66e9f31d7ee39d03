//! Control-flow signals plugins use to influence the outcome of a dispatch.
//!
//! Plugins have exactly two sanctioned ways to change what the core does:
//! - [`Abort`] stops the operation. It travels on the error side.
//! - [`Override`] replaces the filename and content that get written. It is a
//!   success, so it travels on the success side as [`Creation::Override`].
//!
//! Anything else a plugin returns as an error is a defect and is contained at
//! the boundary where the plugin was invoked.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Stop the current invocation and surface `message` to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abort {
    pub message: Option<String>,
    /// Exit code for the process. Defaults to 1.
    pub code: i32,
}

impl Abort {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: Some(message.into()),
            code: 1,
        }
    }

    /// An abort that exits quietly with status 0.
    pub fn quiet() -> Self {
        Self {
            message: None,
            code: 0,
        }
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "Operation cancelled."),
        }
    }
}

/// Write `content` to `filename` instead of what was originally requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub message: String,
    pub filename: PathBuf,
    pub content: String,
}

/// What a creator plugin hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creation {
    /// Content for the requested file.
    Content(String),
    /// The real deliverable is a different file.
    Override(Override),
}

impl From<String> for Creation {
    fn from(content: String) -> Self {
        Creation::Content(content)
    }
}

/// Errors a plugin may return from `create` or `process`.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Control signal: stop everything that remains.
    #[error("{0}")]
    Abort(Abort),
    /// Unexpected failure inside the plugin.
    #[error("{0:#}")]
    Failed(#[from] anyhow::Error),
}

impl From<Abort> for PluginError {
    fn from(abort: Abort) -> Self {
        PluginError::Abort(abort)
    }
}

impl From<crate::error::Error> for PluginError {
    fn from(err: crate::error::Error) -> Self {
        match err {
            crate::error::Error::Aborted(abort) => PluginError::Abort(abort),
            other => PluginError::Failed(other.into()),
        }
    }
}

impl From<std::io::Error> for PluginError {
    fn from(err: std::io::Error) -> Self {
        PluginError::Failed(err.into())
    }
}
