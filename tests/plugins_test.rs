mod common;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::rc::Rc;

use common::{FakeLauncher, FakePermissions, ScriptedPrompter};
use newfile::config::{Config, PluginConfig};
use newfile::dispatch::{Dispatcher, Invocation, Outcome};
use newfile::error::Error;
use newfile::plugin::{PostContext, PostPlugin};
use newfile::plugins::bash::BashPlugin;
use newfile::plugins::chmodx::ChmodxPlugin;
use newfile::plugins::open::OpenPlugin;
use newfile::registry::Registry;
use newfile::renderer::MiniJinjaRenderer;
use newfile::signal::PluginError;
use serde_json::json;
use tempfile::TempDir;

/// Built-in plugins without the editor launcher.
fn builtins(config: &Config) -> Registry {
    let mut settings = config.settings().unwrap();
    settings.disabled_deferred.push("open".to_string());
    Registry::with_builtins(&settings).unwrap()
}

#[test]
fn test_c_file_gets_makefile_and_skips_chmodx() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::parse(r#"{"global": {"author": "Cj Welborn"}}"#).unwrap();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let source = temp_dir.path().join("prog.c");
    let result = dispatcher.dispatch(Invocation::new(&source)).unwrap();

    let content = fs::read_to_string(&source).unwrap();
    assert!(content.starts_with("/*  prog.c\n"));
    assert!(content.contains("-Cj Welborn "));
    assert!(content.contains("#include <stdio.h>"));
    assert!(content.contains("int main(int argc, char *argv[]) {"));

    assert!(result.suppressed.contains("chmodx"));
    assert!(!result.suppressed.contains("automakefile"));
    assert_eq!(result.report.ran, vec!["automakefile".to_string()]);

    let makefile = fs::read_to_string(temp_dir.path().join("Makefile")).unwrap();
    assert!(makefile.contains("source=prog.c"));
    assert!(makefile.contains("CC=gcc"));
}

#[test]
fn test_cpp_file_uses_iostream() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let source = temp_dir.path().join("prog.cpp");
    dispatcher.dispatch(Invocation::new(&source)).unwrap();

    let content = fs::read_to_string(&source).unwrap();
    assert!(content.contains("#include <iostream>"));
    assert!(content.contains("using std::cout;"));
    let makefile = fs::read_to_string(temp_dir.path().join("Makefile")).unwrap();
    assert!(makefile.contains("CXX=g++"));
}

#[test]
fn test_c_library_mode_suppresses_automakefile() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let source = temp_dir.path().join("util.c");
    let result = dispatcher
        .dispatch(Invocation::new(&source).with_args(vec!["lib".to_string()]))
        .unwrap();

    assert!(result.suppressed.contains("automakefile"));
    assert!(result.report.ran.is_empty());
    assert!(!temp_dir.path().join("Makefile").exists());
    assert!(!fs::read_to_string(&source).unwrap().contains("int main"));
}

#[test]
fn test_library_suppression_does_not_leak_into_next_invocation() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let library = dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("util.c")).with_args(vec!["lib".to_string()]))
        .unwrap();
    assert!(library.suppressed.contains("automakefile"));
    assert!(!temp_dir.path().join("Makefile").exists());

    let program = dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("prog.c")))
        .unwrap();
    assert!(!program.suppressed.contains("automakefile"));
    assert_eq!(program.report.ran, vec!["automakefile".to_string()]);
    assert!(temp_dir.path().join("Makefile").exists());
}

#[test]
fn test_automakefile_uses_makefile_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::parse(
        r#"{"makefile": {"default_filename": "GNUmakefile"}, "automakefile": {"default_filename": "ignored"}}"#,
    )
    .unwrap();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("prog.c")))
        .unwrap();

    assert!(temp_dir.path().join("GNUmakefile").exists());
    assert!(!temp_dir.path().join("ignored").exists());
}

#[test]
fn test_existing_makefile_is_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("makefile"), "custom").unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("prog.c")))
        .unwrap();

    assert_eq!(fs::read_to_string(temp_dir.path().join("makefile")).unwrap(), "custom");
}

#[test]
fn test_makefile_creator_overrides_target() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("main.rs");
    fs::write(&source, "fn main() {}\n").unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let result = dispatcher
        .dispatch(Invocation::new(&source).with_plugin("make"))
        .unwrap();

    let makefile = temp_dir.path().join("Makefile");
    assert_eq!(result.filename, makefile);
    assert!(matches!(result.outcome, Outcome::Overridden { .. }));
    assert!(fs::read_to_string(&makefile).unwrap().contains("RUSTC=rustc"));
    assert_eq!(fs::read_to_string(&source).unwrap(), "fn main() {}\n");
    assert!(prompt.asked.borrow().is_empty());
}

#[test]
fn test_makefile_creator_aborts_when_source_missing_and_declined() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(false);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let err = dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("missing.c")).with_plugin("makefile"))
        .unwrap_err();

    assert!(matches!(err, Error::Aborted(_)));
    assert_eq!(err.to_string(), "User cancelled.");
    assert!(!temp_dir.path().join("Makefile").exists());
}

#[test]
fn test_text_plugin_allows_blank_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let target = temp_dir.path().join("notes.txt");
    let result = dispatcher.dispatch(Invocation::new(&target)).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "");
    assert!(result.suppressed.contains("chmodx"));
}

#[test]
fn test_python_plugin_adds_imports() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::parse(r#"{"python": {"shebangexe": "/usr/bin/python3"}}"#).unwrap();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let target = temp_dir.path().join("tool.py");
    let args = vec!["normal".to_string(), "json".to_string(), "os.path.join".to_string()];
    dispatcher
        .dispatch(Invocation::new(&target).with_args(args))
        .unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.starts_with("#!/usr/bin/python3\n"));
    assert!(content.contains("from os.path import join\nimport json\nimport os\nimport sys\n"));
    assert!(content.contains("NAME = 'tool'"));
    assert!(content.contains("def main(args):"));
}

#[test]
fn test_python_defaults_to_docopt_template() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let target = temp_dir.path().join("tool.py");
    dispatcher.dispatch(Invocation::new(&target)).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("from docopt import docopt\n"));
    assert!(content.contains("USAGESTR = \"\"\"{versionstr}"));
    assert!(content.contains("def main(argd):"));
}

#[test]
fn test_python_unittest_template_renames_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let requested = temp_dir.path().join("parser.py");
    let result = dispatcher
        .dispatch(Invocation::new(&requested).with_args(vec!["test".to_string()]))
        .unwrap();

    let renamed = temp_dir.path().join("test_parser.py");
    assert_eq!(result.filename, renamed);
    assert!(matches!(result.outcome, Outcome::Overridden { .. }));
    assert!(!requested.exists());
    let content = fs::read_to_string(&renamed).unwrap();
    assert!(content.contains("Unit tests for parser.py v. 0.0.1"));
    assert!(content.contains("class TestCase(unittest.TestCase):"));

    let result = dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("test_lexer.py")).with_args(vec!["unittest".to_string()]))
        .unwrap();
    assert_eq!(result.outcome, Outcome::Created);
    assert!(result.content.contains("Unit tests for lexer.py"));
}

#[test]
fn test_python_unknown_template_is_plugin_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let target = temp_dir.path().join("tool.py");
    match dispatcher.dispatch(Invocation::new(&target).with_args(vec!["flask".to_string()])) {
        Err(Error::PluginError { plugin, cause }) => {
            assert_eq!(plugin, "python");
            assert_eq!(cause.to_string(), "No template by that name: flask");
        }
        other => panic!("Expected PluginError, got {other:?}"),
    }
    assert!(!target.exists());
}

#[test]
fn test_js_short_header() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let short = dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("app.js")).with_args(vec!["-s".to_string()]))
        .unwrap();
    assert!(short.content.starts_with("/*  app\n"));
    assert!(!short.content.contains("docopt"));

    let full = dispatcher
        .dispatch(Invocation::new(temp_dir.path().join("cli.js")))
        .unwrap();
    assert!(full.content.starts_with("#!/usr/bin/env node\n\n/*  cli\n"));
    assert!(full.content.contains("var name = 'cli';"));
}

#[test]
fn test_script_creators_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::parse(r#"{"global": {"author": "Cj"}}"#).unwrap();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    for (file, creator, first_line) in [
        ("t.bats", "bats", "#!/usr/bin/env bats"),
        ("s.pl", "perl", "#!/usr/bin/perl"),
        ("p.php", "php", "#!/usr/bin/env php"),
        ("l.lisp", "lisp", "#!/usr/bin/env clisp"),
    ] {
        let result = dispatcher
            .dispatch(Invocation::new(temp_dir.path().join(file)))
            .unwrap();
        assert_eq!(result.creator, creator);
        assert!(result.content.starts_with(first_line), "{file}");
        assert!(result.content.contains("-Cj "), "{file}");
        assert!(result.report.ran.contains(&"chmodx".to_string()), "{file}");
    }
}

#[test]
fn test_named_plugin_keeps_unclaimed_extension_as_argument() {
    let registry = builtins(&Config::default());
    let positionals = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let invocation =
        Invocation::from_positionals(&positionals(&["py", "os.path"]), &registry, "new_file").unwrap();
    assert_eq!(
        invocation,
        Invocation::new("new_file").with_plugin("py").with_args(positionals(&["os.path"]))
    );

    let invocation =
        Invocation::from_positionals(&positionals(&["py", "tool.py", "normal"]), &registry, "new_file")
            .unwrap();
    assert_eq!(
        invocation,
        Invocation::new("tool.py").with_plugin("py").with_args(positionals(&["normal"]))
    );

    let invocation =
        Invocation::from_positionals(&positionals(&["makefile", "prog.c"]), &registry, "new_file").unwrap();
    assert_eq!(invocation, Invocation::new("prog.c").with_plugin("makefile"));
}

#[cfg(unix)]
#[test]
fn test_bash_script_is_made_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let registry = builtins(&config);
    let prompt = ScriptedPrompter::answering(true);
    let renderer = MiniJinjaRenderer::new();
    let dispatcher = Dispatcher::new(&registry, &config, &prompt, &renderer).unwrap();

    let target = temp_dir.path().join("run.sh");
    let result = dispatcher.dispatch(Invocation::new(&target)).unwrap();

    assert!(result.report.ran.contains(&"chmodx".to_string()));
    let mode = fs::metadata(&target).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o774);
    assert!(fs::read_to_string(&target)
        .unwrap()
        .starts_with("#!/usr/bin/env bash\n"));
}

fn post_context<'a>(
    filename: &'a Path,
    config: &'a PluginConfig,
    renderer: &'a MiniJinjaRenderer,
    dry_run: bool,
) -> PostContext<'a> {
    PostContext {
        creator: &BashPlugin,
        filename,
        config,
        dry_run,
        renderer,
    }
}

#[test]
fn test_chmodx_missing_file_aborts() {
    let plugin = ChmodxPlugin::new(Box::new(FakePermissions {
        error: Some(ErrorKind::NotFound),
        ..Default::default()
    }));
    let config = PluginConfig::default();
    let renderer = MiniJinjaRenderer::new();

    match plugin.process(&post_context(Path::new("gone.sh"), &config, &renderer, false)) {
        Err(PluginError::Abort(abort)) => {
            assert_eq!(abort.message.as_deref(), Some("No file was created: gone.sh"))
        }
        other => panic!("Expected Abort, got {other:?}"),
    }
}

#[test]
fn test_chmodx_other_errors_are_not_fatal() {
    let plugin = ChmodxPlugin::new(Box::new(FakePermissions {
        error: Some(ErrorKind::PermissionDenied),
        ..Default::default()
    }));
    let config = PluginConfig::default();
    let renderer = MiniJinjaRenderer::new();

    assert!(plugin
        .process(&post_context(Path::new("run.sh"), &config, &renderer, false))
        .is_ok());
}

#[test]
fn test_chmodx_dry_run_changes_nothing() {
    let permissions = FakePermissions::default();
    let changed = Rc::clone(&permissions.changed);
    let plugin = ChmodxPlugin::new(Box::new(permissions));
    let config = PluginConfig::default();
    let renderer = MiniJinjaRenderer::new();

    plugin
        .process(&post_context(Path::new("run.sh"), &config, &renderer, true))
        .unwrap();
    assert!(changed.borrow().is_empty());

    plugin
        .process(&post_context(Path::new("run.sh"), &config, &renderer, false))
        .unwrap();
    assert_eq!(changed.borrow().len(), 1);
}

#[test]
fn test_open_uses_configured_editor() {
    let launcher = FakeLauncher::default();
    let launched = Rc::clone(&launcher.launched);
    let plugin = OpenPlugin::new(Box::new(launcher), Some("nano".to_string()));
    let config = PluginConfig::from_value(json!({"editor": "vim"}));
    let renderer = MiniJinjaRenderer::new();

    assert!(plugin.deferred());
    plugin
        .process(&post_context(Path::new("run.sh"), &config, &renderer, false))
        .unwrap();
    assert_eq!(
        *launched.borrow(),
        vec![("vim".to_string(), vec!["run.sh".to_string()])]
    );
}

#[test]
fn test_open_falls_back_to_environment_editor() {
    let launcher = FakeLauncher::default();
    let launched = Rc::clone(&launcher.launched);
    let plugin = OpenPlugin::new(Box::new(launcher), Some("nano".to_string()));
    let config = PluginConfig::default();
    let renderer = MiniJinjaRenderer::new();

    plugin
        .process(&post_context(Path::new("run.sh"), &config, &renderer, false))
        .unwrap();
    assert_eq!(launched.borrow()[0].0, "nano");
}

#[test]
fn test_open_without_editor_is_not_an_error() {
    let launcher = FakeLauncher::default();
    let launched = Rc::clone(&launcher.launched);
    let plugin = OpenPlugin::new(Box::new(launcher), None);
    let config = PluginConfig::default();
    let renderer = MiniJinjaRenderer::new();

    assert!(plugin
        .process(&post_context(Path::new("run.sh"), &config, &renderer, false))
        .is_ok());
    assert!(launched.borrow().is_empty());
}

#[test]
fn test_open_launch_failure_is_plugin_failure() {
    let plugin = OpenPlugin::new(
        Box::new(FakeLauncher {
            fail: true,
            ..Default::default()
        }),
        Some("nope".to_string()),
    );
    let config = PluginConfig::default();
    let renderer = MiniJinjaRenderer::new();

    assert!(matches!(
        plugin.process(&post_context(Path::new("run.sh"), &config, &renderer, false)),
        Err(PluginError::Failed(_))
    ));
}
