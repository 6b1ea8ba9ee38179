// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! doccheck - compile the code examples in documentation comments.

mod commands;
mod config;
mod output;
mod report;

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "doccheck")]
#[command(about = "Compile the code examples in documentation comments and classify the failures", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory to scan recursively
    root: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: Format,

    /// Only scan files with this extension
    #[arg(long)]
    extension: Option<String>,

    /// Compiler command line, e.g. "dotnet /usr/share/dotnet/sdk/3.1.100/Roslyn/bincore/csc.dll"
    #[arg(long)]
    compiler: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

fn main() {
    let cli = Cli::parse();
    output::init();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", output::error_label(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.extension, cli.compiler);
    commands::check::cmd_check(&cli.root, &config, cli.format)?;
    Ok(())
}

/// Logs go to stderr; stdout carries the report.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("doccheck=debug,doccheck_compiler=debug,doccheck_snippets=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
