//! newfile creates new files from plugin-based templates.
//! A creator plugin, chosen by name or file extension, produces the content;
//! post-processing plugins then act on the written file.

/// Command-line interface module
pub mod cli;

/// Configuration loading and per-plugin settings
pub mod config;

/// Resolves the creator, writes the file and runs the post plugins
pub mod dispatch;

/// Error types and handling
pub mod error;

/// Fire-and-forget process launching
pub mod launcher;

/// Plugin listings, help and config dumps
pub mod listing;

/// Logger setup
pub mod logger;

/// File permission changes
pub mod permissions;

/// Post-processing pipeline
pub mod pipeline;

/// Creator and post plugin contracts
pub mod plugin;

/// Built-in plugins
pub mod plugins;

/// User confirmation prompts
pub mod prompt;

/// Plugin registration and lookup
pub mod registry;

/// Template rendering for plugin content
pub mod renderer;

/// Abort and override control signals
pub mod signal;
