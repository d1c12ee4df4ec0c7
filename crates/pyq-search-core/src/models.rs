//! Core data models for the search index.
//!
//! Every navigable resource on the site (branch landing pages, semester
//! pages, scraped subject sections, curated static pages) is represented
//! by a single [`IndexEntry`] tagged with an [`EntryKind`].

use serde::Serialize;
use std::fmt;

use crate::text::split_subject_words;

/// What an index entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Branch,
    Semester,
    Subject,
    Page,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Branch,
        EntryKind::Semester,
        EntryKind::Subject,
        EntryKind::Page,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Branch => "branch",
            EntryKind::Semester => "semester",
            EntryKind::Subject => "subject",
            EntryKind::Page => "page",
        }
    }

    /// Glyph shown next to a result of this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            EntryKind::Branch => "🏛️",
            EntryKind::Semester => "📚",
            EntryKind::Subject => "📖",
            EntryKind::Page => "📄",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "branch" => Some(EntryKind::Branch),
            "semester" => Some(EntryKind::Semester),
            "subject" => Some(EntryKind::Subject),
            "page" => Some(EntryKind::Page),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single searchable resource.
///
/// Keywords are lowercase, deduplicated (first occurrence wins) and never
/// empty. Entries are immutable once appended to the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub kind: EntryKind,
    pub title: String,
    pub url: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
}

impl IndexEntry {
    pub fn new(kind: EntryKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: url.into(),
            keywords: Vec::new(),
            subject_name: None,
            branch_name: None,
            semester: None,
        }
    }

    /// Set the keyword list, normalizing it to the set semantics above.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Vec::new();
        for kw in keywords {
            let kw = kw.into().to_lowercase();
            if kw.is_empty() || self.keywords.contains(&kw) {
                continue;
            }
            self.keywords.push(kw);
        }
        self
    }

    /// The text the title-level match strategies run against.
    ///
    /// Subjects are matched on their bare subject name, not on the
    /// decorated `"Name (Branch - Nth Sem)"` title.
    pub fn match_text(&self) -> String {
        match (self.kind, &self.subject_name) {
            (EntryKind::Subject, Some(name)) => name.to_lowercase(),
            _ => self.title.to_lowercase(),
        }
    }

    /// Words of [`match_text`](Self::match_text) used by token strategies.
    pub fn match_words(&self) -> Vec<String> {
        let text = self.match_text();
        match self.kind {
            EntryKind::Subject => split_subject_words(&text),
            _ => text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn has_keyword_containing(&self, needle: &str) -> bool {
        self.keywords.iter().any(|kw| kw.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_lowercased_deduplicated_and_non_empty() {
        let entry = IndexEntry::new(EntryKind::Page, "Home", "./html/index.html")
            .with_keywords(["Home", "home", "", "Main"]);
        assert_eq!(entry.keywords, vec!["home", "main"]);
    }

    #[test]
    fn subject_matches_on_subject_name() {
        let mut entry = IndexEntry::new(
            EntryKind::Subject,
            "Applied Physics (Civil Engineering - 1st Sem)",
            "./html/civil-1.html#physics",
        );
        entry.subject_name = Some("Applied Physics".to_string());
        assert_eq!(entry.match_text(), "applied physics");
        assert_eq!(entry.match_words(), vec!["applied", "physics"]);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EntryKind::Semester).unwrap();
        assert_eq!(json, "\"semester\"");
        assert_eq!(EntryKind::parse(" Subject "), Some(EntryKind::Subject));
        assert_eq!(EntryKind::parse("chapter"), None);
    }
}
