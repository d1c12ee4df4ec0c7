//! Page fetchers used by index enrichment.
//!
//! A [`PageFetcher`] turns a semester page file name (for example
//! `civil-3.html`) into its markup. Two implementations ship with the
//! crate:
//!
//! | Fetcher | Source |
//! |---------|--------|
//! | [`HttpFetcher`] | Pages served over HTTP(S) under a base URL |
//! | [`FsFetcher`] | A local checkout of the site |
//!
//! Callers treat every error as "this page contributes no subjects"; the
//! error type exists so the reason can be logged.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Config, SourceConfig};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to join '{page}' onto base url: {reason}")]
    Join { page: String, reason: String },
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches site pages by file name.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Short label for logs, e.g. `"http"` or `"filesystem"`.
    fn kind(&self) -> &str;

    /// Return the markup of `page`.
    async fn fetch(&self, page: &str) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP.
///
/// No request timeout is configured: a page that never answers simply never
/// contributes subjects.
pub struct HttpFetcher {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut base = reqwest::Url::parse(base_url)?;
        // joining onto ".../html" would replace the last segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("pyq-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    pub fn page_url(&self, page: &str) -> Result<reqwest::Url, FetchError> {
        self.base.join(page).map_err(|e| FetchError::Join {
            page: page.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn kind(&self) -> &str {
        "http"
    }

    async fn fetch(&self, page: &str) -> Result<String, FetchError> {
        let url = self.page_url(page)?;
        let url_str = url.to_string();

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url_str.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| FetchError::Body {
            url: url_str,
            source,
        })
    }
}

/// Reads pages from a directory on disk.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl PageFetcher for FsFetcher {
    fn kind(&self) -> &str {
        "filesystem"
    }

    async fn fetch(&self, page: &str) -> Result<String, FetchError> {
        let path = self.root.join(page);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

/// Build the fetcher described by `[source]`.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Arc<dyn PageFetcher>> {
    let fetcher: Arc<dyn PageFetcher> = match &config.source {
        SourceConfig::Http { base_url } => Arc::new(HttpFetcher::new(base_url)?),
        SourceConfig::Filesystem { root } => Arc::new(FsFetcher::new(root.clone())),
    };
    Ok(fetcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_page_urls_join_under_base() {
        let fetcher = HttpFetcher::new("https://example.org/html").unwrap();
        assert_eq!(
            fetcher.page_url("civil-3.html").unwrap().as_str(),
            "https://example.org/html/civil-3.html"
        );
        let fetcher = HttpFetcher::new("https://example.org/html/").unwrap();
        assert_eq!(
            fetcher.page_url("computer-pyq-2-semester.html").unwrap().as_str(),
            "https://example.org/html/computer-pyq-2-semester.html"
        );
    }

    #[tokio::test]
    async fn fs_fetcher_reads_and_reports_missing_pages() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("civil-1.html"), "<html></html>").unwrap();
        let fetcher = FsFetcher::new(tmp.path());

        assert_eq!(fetcher.fetch("civil-1.html").await.unwrap(), "<html></html>");
        let err = fetcher.fetch("civil-2.html").await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }
}
