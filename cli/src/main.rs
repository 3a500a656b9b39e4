//! Command-line interface for the interface schema compiler.
//!
//! Usage:
//!   isc compile `<file|->` [-o `<out>`] [--no-header]   - Emit the fact stream
//!   isc parse `<file|->`                                - Print the AST as JSON
//!   isc check `<file|->`                                - Parse and transpile, report errors

mod config;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "isc")]
#[command(version)]
#[command(about = "Compile interface schemas into logic facts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file layered over the defaults and ./isc.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema to facts
    Compile {
        /// Input file, or `-` for stdin
        input: String,

        /// Write facts to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not prepend the configured header
        #[arg(long)]
        no_header: bool,
    },

    /// Parse a schema and print its AST as JSON
    Parse {
        /// Input file, or `-` for stdin
        input: String,
    },

    /// Parse and transpile a schema without emitting facts
    Check {
        /// Input file, or `-` for stdin
        input: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compile {
            input,
            output,
            no_header,
        } => {
            let config = config::load(cli.config.as_deref())
                .context("failed to load configuration")?;
            let source = read_input(&input)?;
            let facts = isc_transpiler::compile_with(&source, &config.transpile)
                .map_err(|e| anyhow!(e.reason()))?
                .render();

            let header = match config.output.header {
                Some(path) if !no_header => Some(
                    fs::read_to_string(&path)
                        .with_context(|| format!("failed to read header {}", path.display()))?,
                ),
                _ => None,
            };
            let text = with_header(header.as_deref(), &facts);

            match output {
                Some(path) => fs::write(&path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", text),
            }
        }
        Commands::Parse { input } => {
            let source = read_input(&input)?;
            let program = isc_parser::parse(&source).map_err(|e| anyhow!(e.reason()))?;
            println!("{}", serde_json::to_string_pretty(&program)?);
        }
        Commands::Check { input } => {
            let config = config::load(cli.config.as_deref())
                .context("failed to load configuration")?;
            let source = read_input(&input)?;
            isc_transpiler::compile_with(&source, &config.transpile)
                .map_err(|e| anyhow!(e.reason()))?;
            println!("ok");
        }
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }

    let path = Path::new(input);
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Header first, then facts, newline-terminated.
fn with_header(header: Option<&str>, facts: &str) -> String {
    let mut text = String::new();
    if let Some(header) = header {
        text.push_str(header.trim_end());
        text.push('\n');
    }
    text.push_str(facts);
    if !facts.is_empty() {
        text.push('\n');
    }
    text
}
