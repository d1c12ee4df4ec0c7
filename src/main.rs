//! # PYQ Search CLI (`pyq`)
//!
//! The `pyq` binary queries the question-paper site index from the command
//! line and serves it over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! pyq --config ./config/pyq.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pyq search "<query>"` | Ranked search over branches, semesters, subjects and pages |
//! | `pyq index` | Build the index and list its entries |
//! | `pyq serve` | Start the HTTP search server |
//! | `pyq completions <shell>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! pyq search "computer"
//! pyq search "5th sem" --format json
//! pyq search "applied mechanics" --no-wait
//! pyq index --kind subject
//! pyq serve --config ./config/pyq.toml
//! ```
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`
//! (default `warn`); command output goes to stdout.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pyq_search::config;
use pyq_search::search::{run_search, OutputFormat};
use pyq_search::server::run_server;
use pyq_search::stats::run_index;
use pyq_search_core::models::EntryKind;

/// PYQ Search: ranked search for a previous-year question paper library.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/pyq.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "pyq",
    about = "PYQ Search: ranked search over a previous-year question paper site",
    version,
    long_about = "PYQ Search builds an in-memory index of a question paper site (branches, \
    semesters and curated pages from a fixed catalog, plus subjects scraped from semester pages) \
    and answers free-text queries with intent-aware ranking, from the CLI or over HTTP."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/pyq.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the index.
    ///
    /// Waits for semester-page enrichment to settle (bounded by
    /// `[enrichment].settle_timeout_secs`) before querying, unless
    /// `--no-wait` is given.
    Search {
        /// Free-text query.
        query: String,

        /// Maximum number of results (defaults to `[retrieval].max_results`).
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Query as soon as the static catalog is indexed.
        #[arg(long)]
        no_wait: bool,
    },

    /// Build the index and list its entries.
    Index {
        /// Only list entries of this kind (branch, semester, subject, page).
        #[arg(long, value_parser = parse_kind)]
        kind: Option<EntryKind>,
    },

    /// Start the HTTP search server on `[server].bind`.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_kind(s: &str) -> Result<EntryKind, String> {
    EntryKind::parse(s).ok_or_else(|| {
        format!(
            "unknown kind '{}': expected branch, semester, subject or page",
            s
        )
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "pyq", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            format,
            no_wait,
        } => {
            run_search(&cfg, &query, limit, format, !no_wait).await?;
        }
        Commands::Index { kind } => {
            run_index(&cfg, kind).await?;
        }
        Commands::Serve => {
            run_server(&cfg).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
