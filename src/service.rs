//! Query front end shared by the CLI and the HTTP server.
//!
//! [`SearchService`] owns the index for one session. The first query (or
//! an explicit [`SearchService::build`]) triggers the build; queries never
//! wait for enrichment. A query that lands on an empty index waits one
//! retry delay and tries again before reporting [`SearchOutcome::Loading`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::Serialize;

use pyq_search_core::index::{IndexStats, SearchIndex};
use pyq_search_core::search::{search, SearchHit};

use crate::builder::build_index;
use crate::config::Config;
use crate::fetch::{fetcher_from_config, PageFetcher};

/// Session settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub link_prefix: String,
    pub enrich: bool,
    pub max_results: usize,
    pub retry_delay: Duration,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            link_prefix: config.site.link_prefix(),
            enrich: config.enrichment.enabled,
            max_results: config.retrieval.max_results,
            retry_delay: config.retrieval.retry_delay(),
        }
    }
}

/// What the result panel should show for a query.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Blank query: no panel at all.
    Hidden,
    /// The index is still empty after the retry.
    Loading,
    /// Ranked hits, possibly none.
    Results(Vec<SearchHit>),
}

impl SearchOutcome {
    pub fn state(&self) -> &'static str {
        match self {
            SearchOutcome::Hidden => "hidden",
            SearchOutcome::Loading => "loading",
            SearchOutcome::Results(_) => "results",
        }
    }

    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Results(hits) => hits,
            _ => &[],
        }
    }

    /// Serializable `{ "state": …, "results": […] }` form.
    pub fn view(&self) -> OutcomeView<'_> {
        OutcomeView {
            state: self.state(),
            results: self.hits(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutcomeView<'a> {
    pub state: &'static str,
    pub results: &'a [SearchHit],
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    #[serde(flatten)]
    pub index: IndexStats,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,
}

pub struct SearchService {
    index: Arc<SearchIndex>,
    fetcher: Arc<dyn PageFetcher>,
    settings: SearchSettings,
    built_at: OnceCell<DateTime<Utc>>,
}

impl SearchService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, settings: SearchSettings) -> Self {
        Self::with_index(Arc::new(SearchIndex::new()), fetcher, settings)
    }

    /// Session for `config`: its configured source and settings.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            fetcher_from_config(config)?,
            SearchSettings::from_config(config),
        ))
    }

    /// Serve queries against an existing, possibly pre-populated index.
    pub fn with_index(
        index: Arc<SearchIndex>,
        fetcher: Arc<dyn PageFetcher>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            index,
            fetcher,
            settings,
            built_at: OnceCell::new(),
        }
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Build the index if no build has happened yet. Returns whether this
    /// call performed the build.
    pub fn build(&self) -> bool {
        let built = build_index(
            &self.index,
            Arc::clone(&self.fetcher),
            &self.settings.link_prefix,
            self.settings.enrich,
        );
        if built {
            let _ = self.built_at.set(Utc::now());
        }
        built
    }

    /// Run `raw` with the configured result limit.
    pub async fn query(&self, raw: &str) -> SearchOutcome {
        self.query_with_limit(raw, self.settings.max_results).await
    }

    pub async fn query_with_limit(&self, raw: &str, limit: usize) -> SearchOutcome {
        if raw.trim().is_empty() {
            return SearchOutcome::Hidden;
        }

        if !self.index.is_built() {
            self.build();
        }

        if self.index.is_empty() {
            tracing::debug!(
                delay_ms = self.settings.retry_delay.as_millis() as u64,
                "index empty, retrying once"
            );
            tokio::time::sleep(self.settings.retry_delay).await;
            if self.index.is_empty() {
                return SearchOutcome::Loading;
            }
        }

        match search(&self.index, raw, limit) {
            Some(hits) => SearchOutcome::Results(hits),
            None => SearchOutcome::Hidden,
        }
    }

    /// Wait until in-flight enrichment drains or `timeout` passes. Returns
    /// `true` when nothing is left pending. Enrichment keeps running either
    /// way.
    pub async fn settle(&self, timeout: Duration) -> bool {
        let drained = tokio::time::timeout(timeout, async {
            while self.index.enrichment_in_progress() {
                tokio::time::sleep(Duration::from_millis(25)).await;
            }
        })
        .await
        .is_ok();

        if !drained {
            tracing::warn!(
                pending = self.index.pending_enrichment(),
                "enrichment still running after {}s; results may be incomplete",
                timeout.as_secs()
            );
        }
        drained
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            index: self.index.stats(),
            source: self.fetcher.kind().to_string(),
            built_at: self.built_at.get().copied(),
        }
    }
}
