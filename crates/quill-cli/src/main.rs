//! Quill CLI - Command-line interface for the Quill API documentation engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_core::cref::{parse_query, CRef};

mod check;
mod list;
mod project;
mod resolve;

/// Environment variable holding the log filter
const LOG_ENV: &str = "QUILL_LOG";

#[derive(Parser)]
#[command(name = "quill")]
#[command(version = quill_core::VERSION)]
#[command(about = "Resolve and inspect .NET documentation identifiers", long_about = None)]
struct Cli {
    /// Project configuration file
    #[arg(short, long, global = true, default_value = "quill.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a cref against the configured repositories and print its model as JSON
    Resolve {
        /// Identifier such as `T:System.String`
        cref: String,

        /// Only identity and display names
        #[arg(long)]
        minimum: bool,
    },

    /// Parse a cref and print its structure as JSON
    Parse {
        cref: String,
    },

    /// List every identifier of the target library with its display name
    List {
        /// Only show crefs matching this regular expression
        #[arg(short, long)]
        filter: Option<String>,

        /// Include supporting repositories
        #[arg(long)]
        all: bool,
    },

    /// Print the page slug for a cref
    Slug {
        cref: String,
    },

    /// Verify that every symbol's cref resolves back to it
    Check,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { cref, minimum } => {
            let project = project::Project::open(&cli.config)?;
            let options = resolve::ResolveOptions { cref, minimum };
            resolve::resolve(&project, &options)?;
        }

        Commands::Parse { cref } => {
            let query = parse_query(&cref).with_context(|| format!("Failed to parse `{cref}`"))?;
            println!("{}", serde_json::to_string_pretty(&query)?);
        }

        Commands::List { filter, all } => {
            let project = project::Project::open(&cli.config)?;
            let options = list::ListOptions { filter, all };
            list::list(&project, &options)?;
        }

        Commands::Slug { cref } => {
            let cref = CRef::parse(&cref).with_context(|| format!("Failed to parse `{cref}`"))?;
            println!("{}", cref.slug());
        }

        Commands::Check => {
            let project = project::Project::open(&cli.config)?;
            let report = check::check(&project);
            report.print_summary();
            if !report.is_clean() {
                anyhow::bail!("{} identifier(s) failed to round-trip", report.failures.len());
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `QUILL_LOG` (warnings only by default)
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
