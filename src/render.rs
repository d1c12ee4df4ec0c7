//! Result panel markup.

use pyq_search_core::search::SearchHit;
use pyq_search_core::text::escape_html;

use crate::service::SearchOutcome;

const LOADING: &str = r#"<div class="search-result-item">Loading search index...</div>"#;
const NO_RESULTS: &str = r#"<div class="search-result-item">No results found</div>"#;

fn render_hit(i: usize, hit: &SearchHit) -> String {
    format!(
        concat!(
            r#"<a href="{href}" class="search-result-item" role="listitem" tabindex="0" data-index="{i}">"#,
            r#"<span class="search-result-icon">{icon}</span>"#,
            r#"<span class="search-result-title">{title}</span>"#,
            r#"<span class="search-result-type">{kind}</span>"#,
            "</a>"
        ),
        href = escape_html(&hit.entry.url),
        i = i,
        icon = hit.entry.kind.icon(),
        title = hit.highlighted_title,
        kind = hit.entry.kind.as_str(),
    )
}

/// Render the panel body for `outcome`. `None` means the panel is hidden.
pub fn render_panel(outcome: &SearchOutcome) -> Option<String> {
    match outcome {
        SearchOutcome::Hidden => None,
        SearchOutcome::Loading => Some(LOADING.to_string()),
        SearchOutcome::Results(hits) if hits.is_empty() => Some(NO_RESULTS.to_string()),
        SearchOutcome::Results(hits) => Some(
            hits.iter()
                .enumerate()
                .map(|(i, hit)| render_hit(i, hit))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}
