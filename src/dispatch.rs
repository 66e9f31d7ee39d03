//! Dispatch core.
//!
//! Resolves the creator plugin for a request, invokes it, interprets the
//! control signals it may raise, writes the file and hands off to the
//! post-processing pipeline:
//!
//! Resolving -> Creating -> Writing -> PostImmediate -> PostDeferred -> Done
//!
//! Every step may end the invocation with an error instead; nothing loops.

use log::debug;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{Config, PluginsSettings, DEFAULT_FILENAME};
use crate::error::{Error, Result};
use crate::pipeline::{Pipeline, PipelineReport};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::prompt::Prompter;
use crate::registry::{extension_of, Registry};
use crate::renderer::TemplateRenderer;
use crate::signal::{Abort, Creation, PluginError};

/// What the caller asked for. Scoped to a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub filename: PathBuf,
    /// Explicit creator name or alias.
    pub plugin: Option<String>,
    /// Free-form arguments passed through to the creator.
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<P: Into<PathBuf>>(filename: P) -> Self {
        Self {
            filename: filename.into(),
            plugin: None,
            args: Vec::new(),
        }
    }

    pub fn with_plugin<S: Into<String>>(mut self, plugin: S) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Builds an invocation from command-line positionals.
    ///
    /// If the first positional names a creator it selects that creator. The
    /// next positional is then the file name if the creator claims its
    /// extension, or if the creator claims no extensions at all and it has
    /// one. Otherwise `default_filename` is used and every remaining
    /// positional is an argument. If the first positional is not a creator
    /// name it is the file name and the rest are arguments.
    pub fn from_positionals(
        positionals: &[String],
        registry: &Registry,
        default_filename: &str,
    ) -> Result<Self> {
        let (first, rest) = positionals
            .split_first()
            .ok_or_else(|| Error::NoMatchingPlugin("no file name or file type given".to_string()))?;

        let Some(creator) = registry.find_by_name(first) else {
            return Ok(Self::new(first).with_args(rest.to_vec()));
        };
        let names_file = |candidate: &String| match extension_of(candidate) {
            Some(ext) => creator.extensions().is_empty() || creator.claims_extension(&ext),
            None => false,
        };

        match rest.split_first() {
            Some((candidate, args)) if names_file(candidate) => {
                debug!("Plugin loaded by name with args, file name given.");
                Ok(Self::new(candidate)
                    .with_plugin(first)
                    .with_args(args.to_vec()))
            }
            _ => {
                debug!("Plugin loaded by name, using default file name.");
                Ok(Self::new(default_filename)
                    .with_plugin(first)
                    .with_args(rest.to_vec()))
            }
        }
    }
}

/// How the written file relates to the requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The requested file was created.
    Created,
    /// The creator chose a different file.
    Overridden { message: String, requested: PathBuf },
}

/// A file produced by a creator, before post-processing.
pub struct Created<'a> {
    pub creator: &'a dyn CreatorPlugin,
    /// The file that was (or, in dry-run, would have been) written.
    pub filename: PathBuf,
    pub content: String,
    pub outcome: Outcome,
    pub dry_run: bool,
    /// Post plugins suppressed for this invocation.
    pub suppressed: BTreeSet<String>,
}

#[derive(Debug)]
pub struct DispatchResult {
    /// Proper name of the creator that produced the content.
    pub creator: String,
    pub filename: PathBuf,
    pub content: String,
    pub outcome: Outcome,
    pub dry_run: bool,
    pub suppressed: BTreeSet<String>,
    pub report: PipelineReport,
}

/// Appends the creator's default extension when `filename` has none of its extensions.
pub fn ensure_extension(filename: &Path, creator: &dyn CreatorPlugin) -> PathBuf {
    let Some(default_ext) = creator.extensions().first() else {
        return filename.to_path_buf();
    };
    let lowered = filename.to_string_lossy().to_lowercase();
    if creator
        .extensions()
        .iter()
        .any(|ext| lowered.ends_with(&ext.to_lowercase()))
    {
        return filename.to_path_buf();
    }
    let mut fixed = OsString::from(filename.as_os_str());
    fixed.push(default_ext);
    PathBuf::from(fixed)
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_file<P: AsRef<Path>>(content: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let base_path = std::env::current_dir().unwrap_or_default();
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_path.join(path)
    };

    if let Some(parent) = abs_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(abs_path, content).map_err(Error::IoError)
}

pub struct Dispatcher<'a> {
    registry: &'a Registry,
    config: &'a Config,
    settings: PluginsSettings,
    prompter: &'a dyn Prompter,
    renderer: &'a dyn TemplateRenderer,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a Registry,
        config: &'a Config,
        prompter: &'a dyn Prompter,
        renderer: &'a dyn TemplateRenderer,
    ) -> Result<Self> {
        Ok(Self {
            registry,
            config,
            settings: config.settings()?,
            prompter,
            renderer,
            dry_run: false,
        })
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// File name used when a creator is named without a file name.
    pub fn default_filename(&self) -> &str {
        self.settings
            .default_filename
            .as_deref()
            .unwrap_or(DEFAULT_FILENAME)
    }

    /// Finds the creator for `invocation` and the file name to hand it.
    ///
    /// # Errors
    /// * `Error::NoMatchingPlugin` if no creator matches
    pub fn resolve(&self, invocation: &Invocation) -> Result<(&'a dyn CreatorPlugin, PathBuf)> {
        if let Some(name) = &invocation.plugin {
            let creator = self
                .registry
                .find_by_name(name)
                .ok_or_else(|| Error::NoMatchingPlugin(name.clone()))?;
            debug!("Plugin loaded by given name: {}", creator.name());
            return Ok((creator, ensure_extension(&invocation.filename, creator)));
        }

        match extension_of(&invocation.filename) {
            Some(ext) => {
                let creator = self
                    .registry
                    .find_by_extension(&ext)
                    .ok_or(Error::NoMatchingPlugin(ext))?;
                debug!("Plugin determined by file extension: {}", creator.name());
                Ok((creator, invocation.filename.clone()))
            }
            None => {
                let default = self.settings.default_plugin.as_deref().ok_or_else(|| {
                    Error::NoMatchingPlugin(invocation.filename.display().to_string())
                })?;
                let creator = self
                    .registry
                    .find_by_name(default)
                    .ok_or_else(|| Error::NoMatchingPlugin(default.to_string()))?;
                debug!("Plugin loaded by default: {}", creator.name());
                Ok((creator, ensure_extension(&invocation.filename, creator)))
            }
        }
    }

    /// Runs one invocation end to end.
    ///
    /// # Errors
    /// * Everything [`Dispatcher::create`] returns
    /// * `Error::Aborted` if a post plugin aborts (the primary file stays written)
    pub fn dispatch(&self, invocation: Invocation) -> Result<DispatchResult> {
        let created = self.create(invocation)?;
        let report = self.post_process(&created)?;
        Ok(DispatchResult {
            creator: created.creator.name().to_string(),
            filename: created.filename,
            content: created.content,
            outcome: created.outcome,
            dry_run: created.dry_run,
            suppressed: created.suppressed,
            report,
        })
    }

    /// Resolves the creator, invokes it and writes the file.
    ///
    /// # Errors
    /// * `Error::NoMatchingPlugin` before any I/O if no creator matches
    /// * `Error::Aborted` if the creator aborts or the user declines to overwrite
    /// * `Error::PluginError` if the creator fails unexpectedly
    /// * `Error::EmptyContent` if the creator returned nothing
    pub fn create(&self, invocation: Invocation) -> Result<Created<'a>> {
        let (creator, requested) = self.resolve(&invocation)?;
        let plugin_config = self.config.for_plugin(creator.name());

        let mut ctx = CreateContext::new(
            requested.clone(),
            invocation.args,
            &plugin_config,
            self.dry_run,
            self.prompter,
            self.renderer,
        );
        let creation = creator.create(&mut ctx);
        let mut suppressed = ctx.into_suppressed();
        suppressed.extend(creator.ignore_post().iter().map(|name| name.to_string()));

        let (filename, content, outcome) = match creation {
            Ok(Creation::Content(content)) => (requested, content, Outcome::Created),
            Ok(Creation::Override(signal)) => {
                debug!(
                    "{} redirected {} -> {}",
                    creator.name(),
                    requested.display(),
                    signal.filename.display()
                );
                (
                    signal.filename,
                    signal.content,
                    Outcome::Overridden {
                        message: signal.message,
                        requested,
                    },
                )
            }
            Err(PluginError::Abort(abort)) => return Err(Error::Aborted(abort)),
            Err(PluginError::Failed(cause)) => {
                return Err(Error::PluginError {
                    plugin: creator.name().to_string(),
                    cause,
                })
            }
        };
        if content.is_empty() && !creator.allow_blank() {
            return Err(Error::EmptyContent(filename.display().to_string()));
        }

        if !self.dry_run {
            if filename.exists() {
                let question = format!(
                    "File exists!: {}\n\nOverwrite the file?",
                    filename.display()
                );
                if !self.prompter.confirm(&question)? {
                    return Err(Error::Aborted(Abort::new("User cancelled.")));
                }
            }
            write_file(&content, &filename)?;
            debug!("Wrote {}", filename.display());
        }

        Ok(Created {
            creator,
            filename,
            content,
            outcome,
            dry_run: self.dry_run,
            suppressed,
        })
    }

    /// Runs the post plugins for a file returned by [`Dispatcher::create`].
    ///
    /// # Errors
    /// * `Error::Aborted` if a post plugin aborts; the file is left as written
    pub fn post_process(&self, created: &Created<'_>) -> Result<PipelineReport> {
        let pipeline = Pipeline::new(self.registry, self.config, self.renderer, self.dry_run);
        pipeline.run(created.creator, &created.suppressed, &created.filename)
    }
}
