//! Launching external programs, such as an editor, without waiting on them.

use log::debug;
use std::io;
use std::process::{Command, Stdio};

/// Starts an external process. Fire-and-forget: nothing is awaited.
pub trait ProcessLauncher {
    fn launch(&self, command: &str, args: &[String]) -> io::Result<()>;
}

/// Launches processes through `std::process::Command`.
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &str, args: &[String]) -> io::Result<()> {
        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;
        debug!("Launched {command} (pid {})", child.id());
        Ok(())
    }
}
