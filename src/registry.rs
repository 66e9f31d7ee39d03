//! Plugin registration and lookup.
//! The registry is filled once at startup and is read-only afterwards.

use indexmap::IndexMap;
use log::debug;
use std::path::Path;

use crate::config::PluginsSettings;
use crate::error::{Error, Result};
use crate::plugin::{CreatorPlugin, PostPlugin};
use crate::plugins;

/// Index of creator plugins by name/extension, plus the ordered post plugins.
#[derive(Default)]
pub struct Registry {
    creators: Vec<Box<dyn CreatorPlugin>>,
    /// Lowercased name or alias -> index into `creators`
    by_name: IndexMap<String, usize>,
    /// Lowercased extension (with leading dot) -> index into `creators`
    by_extension: IndexMap<String, usize>,
    post: Vec<Box<dyn PostPlugin>>,
}

/// Returns the extension of `filename` with its leading dot, e.g. `.c`.
pub fn extension_of<P: AsRef<Path>>(filename: P) -> Option<String> {
    filename
        .as_ref()
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every built-in plugin that is not disabled in `settings`.
    pub fn with_builtins(settings: &PluginsSettings) -> Result<Self> {
        let mut registry = Self::new();
        for creator in plugins::builtin_creators() {
            if settings.disabled_types.iter().any(|d| creator.is_named(d)) {
                debug!("Skipping disabled type plugin: {}", creator.name());
                continue;
            }
            registry.register(creator)?;
        }
        for post in plugins::builtin_post_plugins() {
            let (disabled, kind) = if post.deferred() {
                (&settings.disabled_deferred, "deferred-post")
            } else {
                (&settings.disabled_post, "post")
            };
            if disabled.iter().any(|d| d == post.name()) {
                debug!("Skipping disabled {kind} plugin: {}", post.name());
                continue;
            }
            registry.register_post(post)?;
        }
        Ok(registry)
    }

    /// Adds a creator plugin.
    ///
    /// # Errors
    /// * `Error::ConflictingName` if a name or alias is already taken
    /// * `Error::AmbiguousExtension` if an extension is already claimed
    ///
    /// Nothing is registered when an error is returned.
    pub fn register(&mut self, creator: Box<dyn CreatorPlugin>) -> Result<()> {
        if creator.names().is_empty() {
            return Err(Error::ConfigError(
                "creator plugin has an empty name".to_string(),
            ));
        }
        let proper_name = creator.name().to_string();

        for name in creator.names() {
            if let Some(&existing) = self.by_name.get(&name.to_lowercase()) {
                return Err(Error::ConflictingName {
                    name: name.to_string(),
                    existing: self.creators[existing].name().to_string(),
                    conflicting: proper_name,
                });
            }
        }
        for ext in creator.extensions() {
            if let Some(&existing) = self.by_extension.get(&ext.to_lowercase()) {
                return Err(Error::AmbiguousExtension {
                    extension: ext.to_string(),
                    existing: self.creators[existing].name().to_string(),
                    conflicting: proper_name,
                });
            }
        }

        let index = self.creators.len();
        for name in creator.names() {
            self.by_name.insert(name.to_lowercase(), index);
        }
        for ext in creator.extensions() {
            self.by_extension.insert(ext.to_lowercase(), index);
        }
        debug!("Loaded: {proper_name} (creator)");
        self.creators.push(creator);
        Ok(())
    }

    /// Adds a post plugin. Registration order is the run order.
    pub fn register_post(&mut self, post: Box<dyn PostPlugin>) -> Result<()> {
        if post.name().is_empty() {
            return Err(Error::ConfigError("post plugin has an empty name".to_string()));
        }
        if let Some(existing) = self.find_post(post.name()) {
            return Err(Error::ConflictingName {
                name: post.name().to_string(),
                existing: existing.name().to_string(),
                conflicting: post.name().to_string(),
            });
        }
        debug!(
            "Loaded: {} ({})",
            post.name(),
            if post.deferred() { "deferred post" } else { "post" }
        );
        self.post.push(post);
        Ok(())
    }

    /// Case-insensitive lookup by name or alias.
    pub fn find_by_name(&self, name: &str) -> Option<&dyn CreatorPlugin> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| self.creators[i].as_ref())
    }

    /// Case-insensitive lookup by extension, including the leading dot.
    pub fn find_by_extension(&self, ext: &str) -> Option<&dyn CreatorPlugin> {
        self.by_extension
            .get(&ext.to_lowercase())
            .map(|&i| self.creators[i].as_ref())
    }

    /// Looks up the creator claiming the extension of `filename`.
    pub fn find_by_filename<P: AsRef<Path>>(&self, filename: P) -> Option<&dyn CreatorPlugin> {
        extension_of(filename).and_then(|ext| self.find_by_extension(&ext))
    }

    pub fn find_post(&self, name: &str) -> Option<&dyn PostPlugin> {
        self.post
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .map(|p| p.as_ref())
    }

    /// Post plugins in registration order.
    pub fn all_post_plugins(&self) -> impl Iterator<Item = &dyn PostPlugin> {
        self.post.iter().map(|p| p.as_ref())
    }

    /// Creators sorted by proper name.
    pub fn creators(&self) -> Vec<&dyn CreatorPlugin> {
        let mut creators: Vec<&dyn CreatorPlugin> =
            self.creators.iter().map(|c| c.as_ref()).collect();
        creators.sort_by(|a, b| a.name().cmp(b.name()));
        creators
    }
}
