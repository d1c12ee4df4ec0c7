//! Query normalization and intent classification.
//!
//! The four intents are not mutually exclusive: "5th sem" is both a
//! semester query and (having two tokens) a subject query. Intent gates
//! which entry kinds may score at all and decides the kind ordering used
//! to break score ties.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::EntryKind;

static SEMESTER_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+(st|nd|rd|th)?\s*(semester|sem)?$|semester\s*\d+|sem\s*\d+")
        .expect("static regex")
});

static LEET_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)leet|sample\s*paper|mock\s*paper|practice\s*paper").expect("static regex")
});

static QUERY_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)(st|nd|rd|th)?|semester\s*(\d+)|sem\s*(\d+)").expect("static regex")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub semester: bool,
    pub leet: bool,
    pub branch: bool,
    pub subject: bool,
}

impl Intent {
    pub fn classify(query: &str, token_count: usize) -> Self {
        let semester = SEMESTER_QUERY.is_match(query);
        let leet = LEET_QUERY.is_match(query);
        let branch = !semester && !leet && token_count <= 2;
        let subject = token_count >= 2 || (!semester && !branch && !leet);
        Self {
            semester,
            leet,
            branch,
            subject,
        }
    }

    /// Tie-break rank of `kind` for this intent; higher sorts first.
    pub fn kind_priority(&self, kind: EntryKind) -> u8 {
        use EntryKind::*;
        let order: [EntryKind; 4] = if self.leet {
            [Page, Branch, Subject, Semester]
        } else if self.semester {
            [Semester, Branch, Subject, Page]
        } else if self.branch {
            [Branch, Semester, Subject, Page]
        } else if self.subject {
            [Subject, Branch, Semester, Page]
        } else {
            [Branch, Subject, Semester, Page]
        };
        match order.iter().position(|k| *k == kind) {
            Some(0) => 5,
            Some(1) => 4,
            Some(2) => 3,
            _ => 1,
        }
    }
}

/// A normalized query, ready for scoring.
#[derive(Debug, Clone)]
pub struct Query {
    /// Trimmed input with its original casing, used for highlighting.
    pub raw: String,
    /// Trimmed, lowercased input.
    pub text: String,
    pub tokens: Vec<String>,
    pub intent: Intent,
    /// First number mentioned in the query, as written.
    pub number: Option<String>,
}

impl Query {
    /// Normalize `input`. Returns `None` when nothing is left after trimming.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }
        let text = raw.to_lowercase();
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let intent = Intent::classify(raw, tokens.len());
        let number = QUERY_NUMBER.captures(&text).and_then(|c| {
            c.get(1)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map(|m| m.as_str().to_string())
        });
        Some(Self {
            raw: raw.to_string(),
            text,
            tokens,
            intent,
            number,
        })
    }

    pub fn mentions(&self, word: &str) -> bool {
        self.text.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(q: &str) -> Intent {
        Query::parse(q).unwrap().intent
    }

    #[test]
    fn blank_input_is_not_a_query() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse("   \t ").is_none());
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let q = Query::parse("  Civil   Engineering ").unwrap();
        assert_eq!(q.raw, "Civil   Engineering");
        assert_eq!(q.text, "civil   engineering");
        assert_eq!(q.tokens, vec!["civil", "engineering"]);
    }

    #[test]
    fn semester_queries() {
        for q in ["3", "3rd", "3rd semester", "5th sem", "semester 4", "sem4", "2nd Semester"] {
            assert!(intent(q).semester, "{} should be a semester query", q);
            assert!(!intent(q).branch, "{} should not be a branch query", q);
        }
        assert!(!intent("computer").semester);
    }

    #[test]
    fn leet_queries() {
        assert!(intent("haryana leet").leet);
        assert!(intent("btech sample paper").leet);
        assert!(intent("mock papers").leet);
        assert!(!intent("sample").leet);
    }

    #[test]
    fn branch_and_subject_queries() {
        let one = intent("computer");
        assert!(one.branch && !one.subject);

        let two = intent("civil engineering");
        assert!(two.branch && two.subject);

        let three = intent("applied mathematics one");
        assert!(!three.branch && three.subject);

        let five_sem = intent("5th sem");
        assert!(five_sem.semester && five_sem.subject && !five_sem.branch);
    }

    #[test]
    fn number_extraction() {
        assert_eq!(Query::parse("5th sem").unwrap().number.as_deref(), Some("5"));
        assert_eq!(Query::parse("semester 3").unwrap().number.as_deref(), Some("3"));
        assert_eq!(Query::parse("computer").unwrap().number, None);
    }

    #[test]
    fn priorities_follow_intent() {
        let sem = intent("3rd semester");
        assert!(sem.kind_priority(EntryKind::Semester) > sem.kind_priority(EntryKind::Branch));
        assert!(sem.kind_priority(EntryKind::Branch) > sem.kind_priority(EntryKind::Subject));
        assert!(sem.kind_priority(EntryKind::Subject) > sem.kind_priority(EntryKind::Page));

        let leet = intent("leet");
        assert!(leet.kind_priority(EntryKind::Page) > leet.kind_priority(EntryKind::Branch));
        assert_eq!(leet.kind_priority(EntryKind::Semester), 1);

        let branch = intent("computer");
        assert!(branch.kind_priority(EntryKind::Branch) > branch.kind_priority(EntryKind::Semester));
    }
}
