//! Post-processing pipeline.
//!
//! Runs the registered post plugins after the primary file was written.
//! Immediate plugins run first, deferred plugins strictly after them; both
//! keep registration order. A plugin failure is logged and isolated, while an
//! `Abort` stops everything that remains.

use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::plugin::{CreatorPlugin, PostContext, PostPlugin};
use crate::registry::Registry;
use crate::renderer::TemplateRenderer;
use crate::signal::PluginError;

/// Outcome of a pipeline run that was not aborted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Plugins that completed, in run order.
    pub ran: Vec<String>,
    /// Plugins skipped because the creator suppressed them.
    pub skipped: Vec<String>,
    /// One message per isolated plugin failure.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Immediate,
    Deferred,
}

pub struct Pipeline<'a> {
    registry: &'a Registry,
    config: &'a Config,
    renderer: &'a dyn TemplateRenderer,
    dry_run: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        registry: &'a Registry,
        config: &'a Config,
        renderer: &'a dyn TemplateRenderer,
        dry_run: bool,
    ) -> Self {
        Self {
            registry,
            config,
            renderer,
            dry_run,
        }
    }

    /// Runs every post plugin not in `suppressed` for `filename`.
    ///
    /// # Errors
    /// * `Error::Aborted` if a post plugin aborts; no further plugin runs
    pub fn run(
        &self,
        creator: &dyn CreatorPlugin,
        suppressed: &BTreeSet<String>,
        filename: &Path,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let mut immediate = Vec::new();
        let mut deferred = Vec::new();

        for post in self.registry.all_post_plugins() {
            if suppressed.contains(post.name()) {
                debug!("Skipping post-plugin {} for {}.", post.name(), creator.name());
                report.skipped.push(post.name().to_string());
            } else if post.deferred() {
                deferred.push(post);
            } else {
                immediate.push(post);
            }
        }

        self.run_phase(Phase::Immediate, &immediate, creator, filename, &mut report)?;
        self.run_phase(Phase::Deferred, &deferred, creator, filename, &mut report)?;

        if !report.warnings.is_empty() {
            let count = report.warnings.len();
            debug!(
                "Post-processing finished with {count} error{}.",
                if count == 1 { "" } else { "s" }
            );
        }
        Ok(report)
    }

    fn run_phase(
        &self,
        phase: Phase,
        plugins: &[&dyn PostPlugin],
        creator: &dyn CreatorPlugin,
        filename: &Path,
        report: &mut PipelineReport,
    ) -> Result<()> {
        if !plugins.is_empty() {
            debug!("Running {} {phase:?} post plugin(s)", plugins.len());
        }
        for post in plugins {
            let config = self.config.for_plugin(post.config_section());
            let ctx = PostContext {
                creator,
                filename,
                config: &config,
                dry_run: self.dry_run,
                renderer: self.renderer,
            };
            match post.process(&ctx) {
                Ok(()) => report.ran.push(post.name().to_string()),
                Err(PluginError::Abort(abort)) => {
                    warn!(
                        "Fatal error in post-processing plugin '{}', cancelling all post plugins.",
                        post.name()
                    );
                    return Err(Error::Aborted(abort));
                }
                Err(PluginError::Failed(err)) => {
                    let message = format!(
                        "Error in post-processing plugin '{}': {err:#}",
                        post.name()
                    );
                    warn!("{message}");
                    report.warnings.push(message);
                }
            }
        }
        Ok(())
    }
}
