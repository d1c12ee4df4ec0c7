//! `pyq search`: one-shot query from the command line.
//!
//! Builds the index, waits for enrichment to settle (unless `--no-wait`),
//! runs the query and prints the outcome in the requested format.

use anyhow::Result;
use clap::ValueEnum;

use crate::config::Config;
use crate::render::render_panel;
use crate::service::{SearchOutcome, SearchService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Numbered list, one hit per block.
    Text,
    /// `{ "state": …, "results": […] }`.
    Json,
    /// Result panel markup.
    Html,
}

pub async fn run_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    format: OutputFormat,
    wait: bool,
) -> Result<()> {
    let service = SearchService::from_config(config)?;

    // blank queries hide the panel without building anything
    if !query.trim().is_empty() {
        service.build();
        if wait && config.enrichment.enabled {
            service.settle(config.enrichment.settle_timeout()).await;
        }
    }

    let limit = limit.unwrap_or(config.retrieval.max_results).max(1);
    let outcome = service.query_with_limit(query, limit).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.view())?),
        OutputFormat::Html => {
            if let Some(panel) = render_panel(&outcome) {
                println!("{}", panel);
            }
        }
        OutputFormat::Text => print_text(&outcome),
    }

    Ok(())
}

fn print_text(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Hidden => {}
        SearchOutcome::Loading => println!("Loading search index..."),
        SearchOutcome::Results(hits) if hits.is_empty() => println!("No results found"),
        SearchOutcome::Results(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{}. [{}] {} / {}",
                    i + 1,
                    hit.score,
                    hit.entry.kind,
                    hit.entry.title
                );
                println!("    url: {}", hit.entry.url);
            }
        }
    }
}
