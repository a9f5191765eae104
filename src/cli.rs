//! Command-line interface implementation for take-flight.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for take-flight.
#[derive(Parser, Debug)]
#[command(
    name = "take-flight",
    author,
    version,
    about = "Generate project boilerplates with this tool",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new project from a template
    Init(InitArgs),
}

/// Options of the `init` subcommand. Anything left out is asked interactively.
#[derive(clap::Args, Debug, Default)]
pub struct InitArgs {
    /// Base template (express, react or nextjs)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Authentication provider (none, supabase, firebase, nextauth)
    #[arg(long)]
    pub auth: Option<String>,

    /// Database provider (none, sqlite, postgresql, mongodb)
    #[arg(long)]
    pub db: Option<String>,

    /// Directory holding the base templates and provider fragments
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Directory the project is created in
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Generator configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Validate the sanitized project name instead of the name as typed
    #[arg(long)]
    pub lenient_names: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if the subcommand is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingSubcommand
            | ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
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
            }
            _ => e.exit(),
        },
    }
}
