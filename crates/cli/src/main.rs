mod commands;
mod logging;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use yamavel_core::{Result, YamavelError};

#[derive(Parser)]
#[command(name = "yamavel", version)]
#[command(about = "Generate Laravel migrations, models and Filament resources from a YAML schema")]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args)]
struct GenerateArgs {
    /// Path to the YAML schema
    #[arg(long, required = true)]
    yaml: Option<PathBuf>,

    /// Root of the Laravel project to generate into
    #[arg(long, required = true)]
    laravel_root: Option<PathBuf>,

    /// Project configuration file (defaults to <laravel-root>/.yamavel.yaml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema without generating anything
    Check {
        /// Path to the YAML schema
        #[arg(long)]
        yaml: PathBuf,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Check { yaml }) => commands::check::run(&yaml),
        None => {
            // clap enforces both flags when no subcommand is given
            let (Some(yaml), Some(root)) = (cli.generate.yaml, cli.generate.laravel_root) else {
                return Ok(());
            };
            commands::generate::run(&yaml, &root, cli.generate.config.as_deref()).map(|_| ())
        }
    }
}

/// Every failure prints one line on stdout and exits 1.
fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            println!("{}", error_line(&e));
            1
        }
    }
}

fn error_line(error: &YamavelError) -> String {
    format!("Error: {error}")
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    ExitCode::from(exit_status(run(cli)))
}
