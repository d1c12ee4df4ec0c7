use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pyq_search_core::catalog::link_prefix_for;
use pyq_search_core::search::MAX_RESULTS;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteConfig {
    /// Prefix prepended to every resource file name to form result hrefs.
    #[serde(default)]
    pub link_prefix: Option<String>,
    /// Path of the page hosting the search box; used to derive
    /// `link_prefix` when it is not set.
    #[serde(default = "default_page_path")]
    pub page_path: String,
}

fn default_page_path() -> String {
    "/".to_string()
}

impl SiteConfig {
    pub fn link_prefix(&self) -> String {
        match &self.link_prefix {
            Some(p) => p.clone(),
            None => link_prefix_for(&self.page_path).to_string(),
        }
    }
}

/// Where semester pages are fetched from during enrichment.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Pages are served over HTTP under `base_url`.
    Http { base_url: String },
    /// Pages are files under `root`.
    Filesystem { root: PathBuf },
}

#[derive(Debug, Deserialize, Clone)]
pub struct EnrichmentConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// How long one-shot commands wait for enrichment to drain. Fetches
    /// themselves are never timed out or cancelled.
    #[serde(default = "default_settle_timeout_secs")]
    pub settle_timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_timeout_secs: default_settle_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_settle_timeout_secs() -> u64 {
    10
}

impl EnrichmentConfig {
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.settle_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Delay before the single retry when a query hits an empty index.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_max_results() -> usize {
    MAX_RESULTS
}
fn default_retry_delay_ms() -> u64 {
    500
}

impl RetrievalConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// A configuration serving pages from `root` with every other setting
    /// at its default.
    pub fn for_site_root(root: impl Into<PathBuf>) -> Self {
        Self {
            site: SiteConfig {
                link_prefix: None,
                page_path: default_page_path(),
            },
            source: SourceConfig::Filesystem { root: root.into() },
            enrichment: EnrichmentConfig::default(),
            retrieval: RetrievalConfig::default(),
            server: ServerConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retrieval.max_results == 0 {
            bail!("retrieval.max_results must be >= 1");
        }

        match &self.source {
            SourceConfig::Http { base_url } => {
                let url = reqwest::Url::parse(base_url)
                    .with_context(|| format!("source.base_url is not a valid URL: {}", base_url))?;
                match url.scheme() {
                    "http" | "https" => {}
                    other => bail!(
                        "Unsupported source.base_url scheme: '{}'. Must be http or https.",
                        other
                    ),
                }
            }
            SourceConfig::Filesystem { root } => {
                if root.as_os_str().is_empty() {
                    bail!("source.root must not be empty");
                }
            }
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Config> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse(
            r#"
[source]
kind = "filesystem"
root = "./public/html"
"#,
        )
        .unwrap();
        assert_eq!(config.retrieval.max_results, 25);
        assert_eq!(config.retrieval.retry_delay_ms, 500);
        assert!(config.enrichment.enabled);
        assert_eq!(config.site.link_prefix(), "./html/");
        assert_eq!(config.server.bind, "127.0.0.1:7340");
    }

    #[test]
    fn link_prefix_follows_page_path() {
        let config = parse(
            r#"
[site]
page_path = "/html/hsbte-pyq.html"

[source]
kind = "http"
base_url = "https://example.org/html/"
"#,
        )
        .unwrap();
        assert_eq!(config.site.link_prefix(), "./");
    }

    #[test]
    fn rejects_zero_results() {
        let err = parse(
            r#"
[source]
kind = "filesystem"
root = "."

[retrieval]
max_results = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = parse(
            r#"
[source]
kind = "http"
base_url = "ftp://example.org/"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn rejects_unknown_source_kind() {
        assert!(parse(
            r#"
[source]
kind = "s3"
bucket = "x"
"#,
        )
        .is_err());
    }
}
