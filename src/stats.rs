//! `pyq index`: build the index and print what it contains.
//!
//! Waits for enrichment to settle, then prints the per-kind counts and
//! every entry (optionally restricted to one kind). Useful for checking
//! that semester pages are reachable and that their subject sections are
//! being picked up.

use anyhow::Result;

use pyq_search_core::models::EntryKind;

use crate::config::Config;
use crate::service::SearchService;

pub async fn run_index(config: &Config, kind: Option<EntryKind>) -> Result<()> {
    let service = SearchService::from_config(config)?;
    service.build();
    if config.enrichment.enabled {
        service.settle(config.enrichment.settle_timeout()).await;
    }

    let stats = service.stats();
    println!("PYQ Search Index");
    println!("================");
    println!();
    println!("  Source:      {}", stats.source);
    if let Some(at) = stats.built_at {
        println!("  Built:       {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("  Entries:     {}", stats.index.entries);
    if stats.index.enrichment_pending > 0 {
        println!("  Pending:     {} semester pages", stats.index.enrichment_pending);
    }
    println!();
    println!("  By kind:");
    for (k, n) in &stats.index.by_kind {
        println!("    {:<10} {:>6}", k, n);
    }
    println!();

    let entries = service.index().snapshot();
    for entry in entries
        .iter()
        .filter(|e| kind.map_or(true, |k| e.kind == k))
    {
        println!("  [{}] {}", entry.kind, entry.title);
        println!("      {}", entry.url);
    }

    Ok(())
}
