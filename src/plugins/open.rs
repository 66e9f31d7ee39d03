//! Opens the new file in an editor once everything else has run.

use anyhow::anyhow;
use log::{debug, warn};

use crate::launcher::{ProcessLauncher, SystemLauncher};
use crate::plugin::{PostContext, PostPlugin};
use crate::signal::PluginError;

pub const OPEN: &str = "open";

pub struct OpenPlugin {
    launcher: Box<dyn ProcessLauncher>,
    /// Fallback when the config has no `editor`, normally `$EDITOR`.
    env_editor: Option<String>,
}

impl OpenPlugin {
    pub fn new(launcher: Box<dyn ProcessLauncher>, env_editor: Option<String>) -> Self {
        Self {
            launcher,
            env_editor,
        }
    }
}

impl Default for OpenPlugin {
    fn default() -> Self {
        Self::new(
            Box::new(SystemLauncher::new()),
            std::env::var("EDITOR").ok().filter(|e| !e.is_empty()),
        )
    }
}

impl PostPlugin for OpenPlugin {
    fn name(&self) -> &str {
        OPEN
    }

    fn description(&self) -> &str {
        "Opens the file after creation."
    }

    fn deferred(&self) -> bool {
        true
    }

    fn process(&self, ctx: &PostContext<'_>) -> Result<(), PluginError> {
        let Some(editor) = ctx
            .config
            .get_opt_str("editor")
            .or_else(|| self.env_editor.clone())
        else {
            warn!("open: No editor could be found! Set one in config ({OPEN}: {{\"editor\": \"/path/editor\"}}).");
            return Ok(());
        };
        debug!("open: using editor: {editor}");

        if ctx.dry_run {
            println!("Would've opened editor: {editor} {}", ctx.filename.display());
            return Ok(());
        }

        let filename = ctx.filename.display().to_string();
        println!("Opening editor: {editor} {filename}");
        self.launcher
            .launch(&editor, &[filename.clone()])
            .map_err(|e| anyhow!("Error opening editor: {editor} {filename}: {e}"))?;
        Ok(())
    }
}
