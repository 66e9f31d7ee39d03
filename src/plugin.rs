//! Plugin contracts.
//!
//! Creator plugins produce the content of a new file. Post plugins run after
//! the file was written. Per-run state (arguments, config, dry-run) is handed
//! to plugins explicitly through [`CreateContext`] and [`PostContext`]; the
//! plugin objects themselves stay immutable after registration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::config::ConfigProvider;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::signal::{Creation, PluginError};

/// A plugin that generates the content of a new file.
pub trait CreatorPlugin {
    /// Names and aliases. The first one is the proper name.
    fn names(&self) -> &[&'static str];

    /// File extensions claimed by this plugin, including the leading dot.
    /// The first one is the default extension.
    fn extensions(&self) -> &[&'static str];

    fn version(&self) -> &str {
        "0.0.1"
    }

    fn description(&self) -> &str;

    /// Usage text for plugin-specific arguments.
    fn usage(&self) -> Option<&str> {
        None
    }

    /// Post plugins that never run for files created by this plugin.
    fn ignore_post(&self) -> &[&'static str] {
        &[]
    }

    /// Whether empty content is acceptable.
    fn allow_blank(&self) -> bool {
        false
    }

    /// Produces the file content, or a control signal.
    fn create(&self, ctx: &mut CreateContext<'_>) -> std::result::Result<Creation, PluginError>;

    /// The proper name of this plugin.
    fn name(&self) -> &str {
        self.names().first().copied().unwrap_or_default()
    }

    /// Case-insensitive name/alias check.
    fn is_named(&self, name: &str) -> bool {
        self.names().iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive extension check. `ext` includes the leading dot.
    fn claims_extension(&self, ext: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A plugin that runs after the primary file was written.
pub trait PostPlugin {
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "0.0.1"
    }

    fn description(&self) -> &str;

    /// Deferred plugins run after every immediate plugin has run.
    fn deferred(&self) -> bool {
        false
    }

    /// Config section handed to `process`. Defaults to the plugin's name.
    fn config_section(&self) -> &str {
        self.name()
    }

    fn process(&self, ctx: &PostContext<'_>) -> std::result::Result<(), PluginError>;
}

/// Everything a creator needs for one invocation.
pub struct CreateContext<'a> {
    filename: PathBuf,
    args: Vec<String>,
    config: &'a dyn ConfigProvider,
    dry_run: bool,
    prompter: &'a dyn Prompter,
    renderer: &'a dyn TemplateRenderer,
    suppressed: BTreeSet<String>,
}

impl<'a> CreateContext<'a> {
    /// Builds a context. When `args` is empty the plugin's `default_args`
    /// config is used instead.
    pub fn new(
        filename: PathBuf,
        args: Vec<String>,
        config: &'a dyn ConfigProvider,
        dry_run: bool,
        prompter: &'a dyn Prompter,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        let args = if args.is_empty() {
            let defaults = config.get_strings("default_args");
            if !defaults.is_empty() {
                debug!("Got default args: {defaults:?}");
            }
            defaults
        } else {
            args
        };
        Self {
            filename,
            args,
            config,
            dry_run,
            prompter,
            renderer,
            suppressed: BTreeSet::new(),
        }
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// File name without directories.
    pub fn basename(&self) -> String {
        self.filename
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> String {
        self.filename
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// True if any argument matches `pattern`. An invalid pattern matches nothing.
    pub fn has_arg(&self, pattern: &str) -> bool {
        if self.args.is_empty() {
            return false;
        }
        match Regex::new(pattern) {
            Ok(re) => self.args.iter().any(|a| re.is_match(a)),
            Err(e) => {
                debug!("Invalid argument pattern {pattern}: {e}");
                false
            }
        }
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn confirm(&self, message: &str) -> Result<bool> {
        self.prompter.confirm(message)
    }

    pub fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.renderer.render(template, context)
    }

    pub fn renderer(&self) -> &dyn TemplateRenderer {
        self.renderer
    }

    /// Skips the named post plugin for this invocation only.
    pub fn suppress<S: Into<String>>(&mut self, post_plugin: S) {
        self.suppressed.insert(post_plugin.into());
    }

    /// Post plugins suppressed during `create`.
    pub fn into_suppressed(self) -> BTreeSet<String> {
        self.suppressed
    }
}

/// Everything a post plugin needs for one invocation.
pub struct PostContext<'a> {
    pub creator: &'a dyn CreatorPlugin,
    pub filename: &'a Path,
    pub config: &'a dyn ConfigProvider,
    pub dry_run: bool,
    pub renderer: &'a dyn TemplateRenderer,
}
