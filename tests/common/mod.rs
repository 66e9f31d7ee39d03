#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use newfile::error::Result;
use newfile::launcher::ProcessLauncher;
use newfile::permissions::PermissionSetter;
use newfile::plugin::{CreateContext, CreatorPlugin, PostContext, PostPlugin};
use newfile::prompt::Prompter;
use newfile::signal::{Abort, Creation, Override, PluginError};

/// Always gives the same answer and remembers every question.
pub struct ScriptedPrompter {
    answer: bool,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        self.asked.borrow_mut().push(message.to_string());
        Ok(self.answer)
    }
}

#[derive(Clone)]
pub enum Creates {
    Content(&'static str),
    Abort(&'static str),
    Override(PathBuf, &'static str),
    Fail(&'static str),
}

/// Creator with canned behaviour.
pub struct StubCreator {
    pub names: Vec<&'static str>,
    pub extensions: Vec<&'static str>,
    pub ignore: Vec<&'static str>,
    pub creates: Creates,
    pub seen_args: Rc<RefCell<Vec<Vec<String>>>>,
}

impl StubCreator {
    pub fn new(names: &[&'static str], extensions: &[&'static str], creates: Creates) -> Self {
        Self {
            names: names.to_vec(),
            extensions: extensions.to_vec(),
            ignore: Vec::new(),
            creates,
            seen_args: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn ignoring(mut self, ignore: &[&'static str]) -> Self {
        self.ignore = ignore.to_vec();
        self
    }
}

impl CreatorPlugin for StubCreator {
    fn names(&self) -> &[&'static str] {
        &self.names
    }

    fn extensions(&self) -> &[&'static str] {
        &self.extensions
    }

    fn description(&self) -> &str {
        "Stub creator."
    }

    fn ignore_post(&self) -> &[&'static str] {
        &self.ignore
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> std::result::Result<Creation, PluginError> {
        self.seen_args.borrow_mut().push(ctx.args().to_vec());
        match self.creates.clone() {
            Creates::Content(content) => Ok(Creation::Content(content.to_string())),
            Creates::Abort(message) => Err(Abort::new(message).into()),
            Creates::Override(filename, content) => Ok(Creation::Override(Override {
                message: "redirected".to_string(),
                filename,
                content: content.to_string(),
            })),
            Creates::Fail(message) => Err(anyhow::anyhow!(message).into()),
        }
    }
}

#[derive(Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Fail,
    Abort,
}

/// Post plugin that appends its name to a shared log when it runs.
pub struct RecordingPost {
    pub name: &'static str,
    pub deferred: bool,
    pub behaviour: Behaviour,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl RecordingPost {
    pub fn boxed(
        name: &'static str,
        deferred: bool,
        behaviour: Behaviour,
        log: &Rc<RefCell<Vec<String>>>,
    ) -> Box<dyn PostPlugin> {
        Box::new(Self {
            name,
            deferred,
            behaviour,
            log: Rc::clone(log),
        })
    }
}

impl PostPlugin for RecordingPost {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Records that it ran."
    }

    fn deferred(&self) -> bool {
        self.deferred
    }

    fn process(&self, ctx: &PostContext<'_>) -> std::result::Result<(), PluginError> {
        let marker = if ctx.dry_run { " (dry run)" } else { "" };
        self.log.borrow_mut().push(format!("{}{marker}", self.name));
        match self.behaviour {
            Behaviour::Succeed => Ok(()),
            Behaviour::Fail => Err(anyhow::anyhow!("{} broke", self.name).into()),
            Behaviour::Abort => Err(Abort::new(format!("{} stopped everything", self.name)).into()),
        }
    }
}

/// Launcher that records what it was asked to start.
#[derive(Default)]
pub struct FakeLauncher {
    pub launched: Rc<RefCell<Vec<(String, Vec<String>)>>>,
    pub fail: bool,
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&self, command: &str, args: &[String]) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such editor"));
        }
        self.launched
            .borrow_mut()
            .push((command.to_string(), args.to_vec()));
        Ok(())
    }
}

/// Permission setter that fails with a fixed error kind, or records paths.
#[derive(Default)]
pub struct FakePermissions {
    pub error: Option<io::ErrorKind>,
    pub changed: Rc<RefCell<Vec<PathBuf>>>,
}

impl PermissionSetter for FakePermissions {
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        if let Some(kind) = self.error {
            return Err(io::Error::new(kind, "chmod failed"));
        }
        self.changed.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
