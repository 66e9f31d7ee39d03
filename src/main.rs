//! newfile's main application entry point.
//! Parses arguments, loads config and plugins, and runs a single dispatch.

use std::path::PathBuf;

use newfile::{
    cli::{get_args, Args},
    config::Config,
    dispatch::{Dispatcher, Invocation, Outcome},
    error::{default_error_handler, Result},
    listing::{dump_config, list_plugins, plugin_help},
    logger::init_logger,
    prompt::DialoguerPrompter,
    registry::Registry,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn load_config(dir: Option<PathBuf>) -> Result<Config> {
    match dir.or_else(Config::default_dir) {
        Some(dir) => Config::load(dir),
        None => Ok(Config::default()),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads config and registers plugins
/// 2. Handles the informational flags (--plugins, --plugin-help, --dump-config)
/// 3. Builds the invocation from the positionals
/// 4. Creates and writes the file, reports it, then post-processes it
fn run(args: Args) -> Result<()> {
    let config = load_config(args.config)?;
    let registry = Registry::with_builtins(&config.settings()?)?;

    if args.plugins {
        print!("{}", list_plugins(&registry));
        return Ok(());
    }
    if args.dump_config {
        println!("{}", dump_config(&config, args.positionals.first().map(String::as_str))?);
        return Ok(());
    }
    if args.plugin_help {
        let name = args.positionals.first().map(String::as_str).unwrap_or_default();
        print!("{}", plugin_help(&registry, name)?);
        return Ok(());
    }

    let prompt = DialoguerPrompter::new();
    let renderer = MiniJinjaRenderer::new();
    let dispatcher =
        Dispatcher::new(&registry, &config, &prompt, &renderer)?.dry_run(args.dry_run);

    let invocation =
        Invocation::from_positionals(&args.positionals, &registry, dispatcher.default_filename())?;
    let created = dispatcher.create(invocation)?;

    if let Outcome::Overridden { message, .. } = &created.outcome {
        println!("{message}");
    }
    if created.dry_run {
        println!("Would've written: {}", created.filename.display());
        println!("{}", created.content);
    } else {
        println!("Created: {}", created.filename.display());
    }

    let report = dispatcher.post_process(&created)?;
    for warning in &report.warnings {
        eprintln!("{warning}");
    }
    Ok(())
}
