//! Command-line interface implementation for platelet.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::constants::exit_codes;
use crate::template::TemplateFormat;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Command-line arguments structure for platelet.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "platelet: create a file structure based on the given template",
    long_about = None,
    after_help = "Variables referenced as $name in the template are taken from NAME=VALUE \
                  arguments; any that are missing are asked for interactively."
)]
pub struct Args {
    /// Template file (YAML or flat text), or the file to write with --read
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Output directory, or the directory to read with --read
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Values for template variables
    #[arg(value_name = "NAME=VALUE")]
    pub variables: Vec<String>,

    /// Read the given path into the template file
    #[arg(long)]
    pub read: bool,

    /// Print the variables used in the template, then exit
    #[arg(long, conflicts_with = "read")]
    pub vars: bool,

    /// Print the file tree as it is written
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the file tree without changing the filesystem
    #[arg(short, long)]
    pub dryrun: bool,

    /// Template syntax; `auto` picks YAML for .yml/.yaml files
    #[arg(short, long, value_enum, default_value_t = TemplateFormat::Auto)]
    pub format: TemplateFormat,

    /// Skip confirmation prompts before overwriting files
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}
