//! Index construction: static catalog plus background enrichment.
//!
//! [`build_index`] appends the catalog synchronously, then spawns one
//! detached task per (branch, semester) page. Each task fetches its page,
//! extracts subject sections and appends a Subject entry per section as
//! soon as the page arrives. Tasks run independently and complete in any
//! order. A task that fails contributes nothing; the failure is logged at
//! debug level and never reaches the caller.
//!
//! Tasks are never cancelled and carry no deadline of their own. Callers
//! that need a quiescent index wait on
//! [`SearchIndex::enrichment_in_progress`].

use std::sync::Arc;

use pyq_search_core::catalog::{catalog, subject_entry, BranchSpec, BRANCHES};
use pyq_search_core::index::SearchIndex;

use crate::extract::extract_subjects;
use crate::fetch::PageFetcher;

/// Build `index` once.
///
/// Returns `false` without touching the index when it was already built.
/// Must be called from within a tokio runtime when `enrich` is set.
pub fn build_index(
    index: &Arc<SearchIndex>,
    fetcher: Arc<dyn PageFetcher>,
    prefix: &str,
    enrich: bool,
) -> bool {
    if !index.mark_built() {
        return false;
    }

    let entries = catalog(prefix);
    let static_count = entries.len();
    index.extend(entries);
    tracing::info!(entries = static_count, "static catalog indexed");

    if !enrich {
        return true;
    }

    let pages: usize = BRANCHES.iter().map(|b| b.semesters.len()).sum();
    index.begin_enrichment(pages);
    tracing::debug!(pages, fetcher = fetcher.kind(), "enrichment started");

    for branch in BRANCHES {
        for &n in branch.semesters {
            let index = Arc::clone(index);
            let fetcher = Arc::clone(&fetcher);
            let prefix = prefix.to_string();
            tokio::spawn(async move {
                let _pending = PendingPage(&index);
                enrich_semester(&index, fetcher.as_ref(), &prefix, branch, n).await;
            });
        }
    }

    true
}

/// Releases one unit of pending enrichment when dropped, including when the
/// task unwinds out of a panicking fetcher or extractor.
struct PendingPage<'a>(&'a SearchIndex);

impl Drop for PendingPage<'_> {
    fn drop(&mut self) {
        self.0.finish_enrichment();
    }
}

async fn enrich_semester(
    index: &SearchIndex,
    fetcher: &dyn PageFetcher,
    prefix: &str,
    branch: &'static BranchSpec,
    n: u32,
) {
    let page = branch.semester_page(n);
    let markup = match fetcher.fetch(&page).await {
        Ok(markup) => markup,
        Err(e) => {
            tracing::debug!(page = %page, error = %e, "semester page skipped");
            return;
        }
    };

    let subjects = extract_subjects(&markup);
    let found = subjects.len();
    index.extend(
        subjects
            .iter()
            .map(|subject| subject_entry(prefix, branch, n, subject)),
    );
    tracing::debug!(page = %page, subjects = found, "semester page indexed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use pyq_search_core::models::EntryKind;
    use std::time::Duration;

    struct OnePage;

    #[async_trait]
    impl PageFetcher for OnePage {
        fn kind(&self) -> &str {
            "test"
        }

        async fn fetch(&self, page: &str) -> Result<String, FetchError> {
            if page == "civil-2.html" {
                Ok(r#"<section class="computer-1-semester" id="mech">
                    <h2 class="semester-heading">Applied Mechanics</h2>
                    <p class="semester-subtext">Select exam session</p></section>"#
                    .to_string())
            } else {
                Err(FetchError::Status {
                    url: page.to_string(),
                    status: 404,
                })
            }
        }
    }

    async fn drain(index: &SearchIndex) {
        for _ in 0..200 {
            if !index.enrichment_in_progress() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("enrichment did not drain");
    }

    #[tokio::test]
    async fn builds_once_and_enriches() {
        let index = Arc::new(SearchIndex::new());
        assert!(build_index(&index, Arc::new(OnePage), "./html/", true));
        assert!(!build_index(&index, Arc::new(OnePage), "./html/", true));

        let static_count = catalog("./html/").len();
        assert!(index.len() >= static_count);
        drain(&index).await;

        let subjects: Vec<_> = index
            .snapshot()
            .into_iter()
            .filter(|e| e.kind == EntryKind::Subject)
            .collect();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].url, "./html/civil-2.html#mech");
        assert_eq!(index.len(), static_count + 1);
    }

    /// Panics while fetching one page; every other page is a 404.
    struct PanicsOnCivil2;

    #[async_trait]
    impl PageFetcher for PanicsOnCivil2 {
        fn kind(&self) -> &str {
            "test"
        }

        async fn fetch(&self, page: &str) -> Result<String, FetchError> {
            if page == "civil-2.html" {
                panic!("fetcher blew up on {}", page);
            }
            Err(FetchError::Status {
                url: page.to_string(),
                status: 404,
            })
        }
    }

    #[tokio::test]
    async fn panicking_fetcher_still_releases_pending() {
        let index = Arc::new(SearchIndex::new());
        assert!(build_index(&index, Arc::new(PanicsOnCivil2), "./html/", true));
        drain(&index).await;

        assert_eq!(index.pending_enrichment(), 0);
        assert_eq!(index.len(), catalog("./html/").len());
    }

    #[tokio::test]
    async fn disabled_enrichment_only_indexes_catalog() {
        let index = Arc::new(SearchIndex::new());
        assert!(build_index(&index, Arc::new(OnePage), "./", false));
        assert_eq!(index.len(), catalog("./").len());
        assert!(!index.enrichment_in_progress());
    }
}
