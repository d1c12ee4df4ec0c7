//! Ranked retrieval over a [`SearchIndex`].
//!
//! # Algorithm
//!
//! 1. Normalize the query (trim, lowercase, tokenize) and classify intent.
//! 2. Score every entry through its kind's tier ladder.
//! 3. Drop entries that scored zero.
//! 4. Sort by score (desc), then by the intent's kind priority (desc),
//!    keeping index order for full ties.
//! 5. Truncate to the result limit and attach a highlighted title.
//!
//! Scoring is a pure function over resident entries, so a search can never
//! fail: an empty query yields no hits and an empty index yields no hits.

use regex::RegexBuilder;
use serde::Serialize;

use crate::index::SearchIndex;
use crate::intent::Query;
use crate::models::IndexEntry;
use crate::scoring::{score, Strategy};
use crate::text::escape_html;

/// Default cap on the number of hits returned.
pub const MAX_RESULTS: usize = 25;

/// One ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub entry: IndexEntry,
    pub score: u8,
    #[serde(skip)]
    pub matched_by: Strategy,
    /// HTML-escaped title with the first occurrence of the query in `<mark>`.
    pub highlighted_title: String,
}

/// Wrap the first case-insensitive literal occurrence of `query` in `title`
/// with `<mark>…</mark>`. Everything else is HTML-escaped. Only the first
/// occurrence is marked.
pub fn highlight(title: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return escape_html(title);
    }
    let found = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
        .and_then(|re| re.find(title));
    match found {
        Some(m) => format!(
            "{}<mark>{}</mark>{}",
            escape_html(&title[..m.start()]),
            escape_html(m.as_str()),
            escape_html(&title[m.end()..])
        ),
        None => escape_html(title),
    }
}

/// Score and rank `entries` for `query`, returning at most `limit` hits.
pub fn rank(entries: &[IndexEntry], query: &Query, limit: usize) -> Vec<SearchHit> {
    let mut scored: Vec<(&IndexEntry, u8, Strategy)> = entries
        .iter()
        .filter_map(|e| score(e, query).map(|(s, strategy)| (e, s, strategy)))
        .collect();

    // stable: equal score and priority keep index order
    scored.sort_by(|a, b| {
        b.1.cmp(&a.1).then_with(|| {
            query
                .intent
                .kind_priority(b.0.kind)
                .cmp(&query.intent.kind_priority(a.0.kind))
        })
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(entry, score, matched_by)| SearchHit {
            highlighted_title: highlight(&entry.title, &query.raw),
            entry: entry.clone(),
            score,
            matched_by,
        })
        .collect()
}

/// Search `index` for free-text `input`.
///
/// Returns `None` when the input is blank after trimming (the caller should
/// hide its result panel), otherwise the ranked hits, possibly empty.
pub fn search(index: &SearchIndex, input: &str, limit: usize) -> Option<Vec<SearchHit>> {
    let query = Query::parse(input)?;
    Some(index.with_entries(|entries| rank(entries, &query, limit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, find_branch, subject_entry, ScrapedSubject};
    use crate::models::EntryKind;

    fn full_index() -> SearchIndex {
        let index = SearchIndex::new();
        index.extend(catalog("./html/"));
        let subjects = [
            ("computer", 2, "Computer Programming"),
            ("computer", 3, "Data Structures"),
            ("ece", 3, "Computer Networks Basics"),
            ("civil", 2, "Applied Mechanics"),
            ("mechanical", 5, "Theory of Machines"),
        ];
        for (key, n, name) in subjects {
            let subject = ScrapedSubject {
                id: name.to_lowercase().replace(' ', "-"),
                name: name.to_string(),
            };
            index.push(subject_entry("./html/", find_branch(key).unwrap(), n, &subject));
        }
        index
    }

    #[test]
    fn blank_query_is_hidden_not_empty() {
        let index = full_index();
        assert!(search(&index, "", MAX_RESULTS).is_none());
        assert!(search(&index, "   ", MAX_RESULTS).is_none());
    }

    #[test]
    fn empty_index_gives_no_hits() {
        let index = SearchIndex::new();
        assert_eq!(search(&index, "civil", MAX_RESULTS).unwrap().len(), 0);
    }

    #[test]
    fn exact_title_ranks_first() {
        let index = full_index();
        let hits = search(&index, "Civil Engineering", MAX_RESULTS).unwrap();
        assert_eq!(hits[0].entry.title, "Civil Engineering");
        assert_eq!(hits[0].score, 100);
        assert!(hits[1..].iter().all(|h| h.score < 100));
    }

    #[test]
    fn semester_query_excludes_branches() {
        let index = full_index();
        let hits = search(&index, "3rd semester", MAX_RESULTS).unwrap();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.entry.kind != EntryKind::Branch));
        assert!(hits
            .iter()
            .filter(|h| h.entry.kind == EntryKind::Semester)
            .all(|h| h.entry.semester == Some(3)));
    }

    #[test]
    fn results_are_capped() {
        let index = full_index();
        // "engineering" matches far more than 25 branch/semester entries
        let hits = search(&index, "engineering", MAX_RESULTS).unwrap();
        assert_eq!(hits.len(), MAX_RESULTS);
        assert_eq!(search(&index, "engineering", 3).unwrap().len(), 3);
    }

    #[test]
    fn computer_prefers_the_branch() {
        let index = full_index();
        let hits = search(&index, "computer", MAX_RESULTS).unwrap();
        assert_eq!(hits[0].entry.kind, EntryKind::Branch);
        assert_eq!(hits[0].entry.title, "Computer Engineering");

        let other_subject = hits
            .iter()
            .position(|h| {
                h.entry.kind == EntryKind::Subject && h.entry.branch_name.as_deref() == Some("ECE")
            })
            .unwrap();
        let first_semester = hits
            .iter()
            .position(|h| {
                h.entry.kind == EntryKind::Semester
                    && h.entry.branch_name.as_deref() == Some("Computer Engineering")
            })
            .unwrap();
        assert!(first_semester > 0);
        assert!(other_subject > 0);
    }

    #[test]
    fn fifth_sem_returns_fifth_semesters_on_top() {
        let index = full_index();
        let hits = search(&index, "5th sem", MAX_RESULTS).unwrap();
        let semesters: Vec<&SearchHit> = hits
            .iter()
            .filter(|h| h.entry.kind == EntryKind::Semester)
            .collect();
        assert!(!semesters.is_empty());
        assert!(semesters.iter().all(|h| h.entry.semester == Some(5)));
        assert!(hits.iter().all(|h| h.entry.kind != EntryKind::Branch));

        let last_semester = hits
            .iter()
            .rposition(|h| h.entry.kind == EntryKind::Semester)
            .unwrap();
        let first_other = hits
            .iter()
            .position(|h| h.entry.kind != EntryKind::Semester)
            .unwrap_or(hits.len());
        assert!(last_semester < first_other);
    }

    #[test]
    fn ties_follow_intent_priority() {
        let index = full_index();
        // all six semesters tie on the prefix tier and keep catalog order
        let hits = search(&index, "civil", MAX_RESULTS).unwrap();
        assert_eq!(hits[0].entry.kind, EntryKind::Branch);
        let sems: Vec<u32> = hits
            .iter()
            .filter(|h| h.entry.kind == EntryKind::Semester)
            .filter_map(|h| h.entry.semester)
            .collect();
        assert_eq!(sems, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn highlight_marks_first_occurrence_only() {
        assert_eq!(
            highlight("Data Data Structures", "data"),
            "<mark>Data</mark> Data Structures"
        );
    }

    #[test]
    fn highlight_is_literal_and_escaped() {
        assert_eq!(highlight("AI & ML", "ai & ml"), "<mark>AI &amp; ML</mark>");
        assert_eq!(highlight("C++ Lab", "c++"), "<mark>C++</mark> Lab");
        assert_eq!(highlight("Home", "xyz"), "Home");
        assert_eq!(highlight("Home", "  "), "Home");
    }

    #[test]
    fn hits_carry_highlighted_titles() {
        let index = full_index();
        let hits = search(&index, "Mechanics", MAX_RESULTS).unwrap();
        let hit = hits
            .iter()
            .find(|h| h.entry.subject_name.as_deref() == Some("Applied Mechanics"))
            .unwrap();
        assert!(hit
            .highlighted_title
            .starts_with("Applied <mark>Mechanics</mark> (Civil"));
    }
}
