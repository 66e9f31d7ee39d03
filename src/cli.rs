//! Command-line interface implementation for newfile.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for newfile.
#[derive(Parser, Debug)]
#[command(author, version, about = "newfile: creates new files from plugin-based templates", long_about = None)]
pub struct Args {
    /// File type (plugin name or alias) and/or file name, followed by
    /// arguments for the plugin
    #[arg(
        value_name = "FILETYPE_OR_FILENAME",
        required_unless_present_any = ["plugins", "dump_config"],
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub positionals: Vec<String>,

    /// Just show what would be written, don't write anything
    #[arg(short, long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// List all available plugins
    #[arg(short, long)]
    pub plugins: bool,

    /// Show help for the plugin named by the first argument
    #[arg(short = 'H', long)]
    pub plugin_help: bool,

    /// Print the loaded config, or the config of the plugin named by the
    /// first argument
    #[arg(long)]
    pub dump_config: bool,

    /// Directory containing newfile.json, newfile.yml or newfile.yaml
    #[arg(short, long, value_name = "DIR")]
    pub config: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
