//! Makes newly created files executable.

use log::{debug, warn};
use std::io::ErrorKind;

use crate::permissions::{PermissionSetter, SystemPermissions};
use crate::plugin::{PostContext, PostPlugin};
use crate::signal::{Abort, PluginError};

pub const CHMODX: &str = "chmodx";

pub struct ChmodxPlugin {
    permissions: Box<dyn PermissionSetter>,
}

impl ChmodxPlugin {
    pub fn new(permissions: Box<dyn PermissionSetter>) -> Self {
        Self { permissions }
    }
}

impl Default for ChmodxPlugin {
    fn default() -> Self {
        Self::new(Box::new(SystemPermissions::new()))
    }
}

impl PostPlugin for ChmodxPlugin {
    fn name(&self) -> &str {
        CHMODX
    }

    fn description(&self) -> &str {
        "Makes the newly created file executable."
    }

    fn process(&self, ctx: &PostContext<'_>) -> Result<(), PluginError> {
        if ctx.dry_run {
            debug!("Would make executable: {}", ctx.filename.display());
            return Ok(());
        }
        match self.permissions.set_executable(ctx.filename) {
            Ok(()) => {
                debug!("Made executable: {}", ctx.filename.display());
                Ok(())
            }
            // The file was never created, every other plugin would fail too.
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PluginError::Abort(Abort::new(
                format!("No file was created: {}", ctx.filename.display()),
            ))),
            Err(e) => {
                warn!("Error during chmod: {}: {e}", ctx.filename.display());
                Ok(())
            }
        }
    }
}

