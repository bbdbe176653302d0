//! ARBOR CLI
//!
//! Validates agent definition documents and compiles them into the
//! submission format.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod commands;
mod report;

use arbor_compiler::LoadError;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::Result;
use commands::{CommandError, EXIT_INVALID, Session, load_config};
use report::Format;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arbor", version)]
#[command(about = "ARBOR - agent definition compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Compiler configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat warnings as blocking
    #[arg(long, global = true)]
    strict: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a definition document
    Validate {
        /// Path to the definition document
        file: PathBuf,
    },
    /// Validate and, if usable, write the compiled document
    Compile {
        /// Path to the definition document
        file: PathBuf,
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Logs go to stderr; stdout carries reports only
fn init_logging(verbose: u8, json: bool) {
    let default = match verbose {
        0 => "arbor=warn",
        1 => "arbor=info",
        _ => "arbor=debug",
    };
    let filter = EnvFilter::try_from_env("ARBOR_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let config = match load_config(cli.config.as_deref(), cli.strict) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(err.exit_code());
        }
    };
    debug!(?config, "configuration loaded");

    let session = Session::new(&config, cli.format);
    let mut out = io::stdout().lock();
    let (file, outcome) = match &cli.command {
        Commands::Validate { file } => (file, session.validate(file, &mut out)),
        Commands::Compile { file, output } => (file, session.compile(file, output, &mut out)),
    };

    match outcome {
        Ok(code) => Ok(code),
        Err(CommandError::Load(LoadError::Definition(error))) => {
            session.report_definition_error(file, error, &mut out)?;
            Ok(EXIT_INVALID)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(err.exit_code())
        }
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let code = run(&cli)?;
    Ok(ExitCode::from(code))
}
