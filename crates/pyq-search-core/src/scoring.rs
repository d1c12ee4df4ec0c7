//! Tiered scoring cascade.
//!
//! Each entry kind has a fixed ladder of named [`Strategy`] tiers, ordered
//! from most to least specific. Evaluation walks the ladder and stops at
//! the first tier that reports [`Outcome::Hit`]; that tier's score is the
//! entry's score. A tier may instead [`Outcome::Veto`] the entry, which ends
//! the walk with a score of zero. Entries that score zero are not results.
//!
//! | Kind | Ladder |
//! |------|--------|
//! | Subject | exact 100, prefix 95, whole word 90, substring 85, all tokens 80, any token 75, branch context 70, keyword 65, keyword tokens 55 |
//! | Branch | exact 100, prefix 98, whole word 95, substring 90, all tokens 85, any token 80, keyword 75 |
//! | Semester | exact 100, semester number 95, prefix 90, whole word 85, substring 75, branch tokens 70, keyword 60 |
//! | Page | exact 100, LEET tiers 95/90/85/80, sample-paper tiers 95/85/70, substring 50, keyword 45 |
//!
//! Before the ladder runs, [`eligible`] drops kinds the intent rules out.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::intent::Query;
use crate::models::{EntryKind, IndexEntry};
use crate::text::contains_whole_word;

static TITLE_SEMESTER_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)(st|nd|rd|th)?\s*semester|semester\s*(\d+)").expect("static regex")
});

const SEMESTER_FILLER: &[&str] = &["semester", "sem"];
const SAMPLE_FILLER: &[&str] = &["sample", "paper", "mock", "practice"];
const SAMPLE_VOCABULARY: &[&str] = &["sample", "mock", "practice"];

/// Result of testing one tier against one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
    Veto,
}

impl From<bool> for Outcome {
    fn from(hit: bool) -> Self {
        if hit {
            Outcome::Hit
        } else {
            Outcome::Miss
        }
    }
}

/// A named match strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Match text equals the query.
    Exact,
    /// Match text starts with the query.
    Prefix,
    /// Query appears in the match text between word boundaries.
    WholeWord,
    /// Query appears anywhere in the match text.
    Substring,
    /// Every query token is contained in some word of the match text.
    AllTokens,
    /// At least one query token is contained in some word of the match text.
    AnyToken,
    /// Query and the entry's branch name contain one another.
    BranchContext,
    /// Query and a keyword are equal, contain one another as whole words,
    /// or contain one another at all.
    Keyword,
    /// Like [`Keyword`](Strategy::Keyword) without the query-contains-keyword
    /// whole-word test.
    KeywordOneWay,
    /// Some keyword contains some query token.
    KeywordTokens,
    /// The semester number in the title equals the number in the query.
    /// Vetoes on a different number.
    SemesterNumber,
    /// Some non-filler query token overlaps some keyword.
    BranchTokens,
    /// LEET query against a LEET page: a keyword equals the query or they
    /// contain one another as whole words.
    LeetKeyword,
    /// LEET query against a LEET page: as many overlapping keywords as
    /// query tokens.
    LeetKeywordCoverage,
    /// LEET query against a LEET page: some keyword overlaps some token.
    LeetKeywordOverlap,
    /// LEET query against a LEET page: title contains the query or the
    /// query names LEET. Vetoes otherwise.
    LeetFallback,
    /// Sample-paper query against a sample-paper page naming the same track.
    SamplePaperTrack,
    /// Sample-paper query against a sample-paper page.
    SamplePaperVocabulary,
    /// Sample-paper query against a sample-paper page without the vocabulary.
    SamplePaperFallback,
}

/// One rung of a ladder.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub strategy: Strategy,
    pub score: u8,
}

const fn tier(strategy: Strategy, score: u8) -> Tier {
    Tier { strategy, score }
}

use Strategy::*;

pub const SUBJECT_LADDER: &[Tier] = &[
    tier(Exact, 100),
    tier(Prefix, 95),
    tier(WholeWord, 90),
    tier(Substring, 85),
    tier(AllTokens, 80),
    tier(AnyToken, 75),
    tier(BranchContext, 70),
    tier(Keyword, 65),
    tier(KeywordTokens, 55),
];

pub const BRANCH_LADDER: &[Tier] = &[
    tier(Exact, 100),
    tier(Prefix, 98),
    tier(WholeWord, 95),
    tier(Substring, 90),
    tier(AllTokens, 85),
    tier(AnyToken, 80),
    tier(Keyword, 75),
];

pub const SEMESTER_LADDER: &[Tier] = &[
    tier(Exact, 100),
    tier(SemesterNumber, 95),
    tier(Prefix, 90),
    tier(WholeWord, 85),
    tier(Substring, 75),
    tier(BranchTokens, 70),
    tier(KeywordOneWay, 60),
];

pub const PAGE_LADDER: &[Tier] = &[
    tier(Exact, 100),
    tier(LeetKeyword, 95),
    tier(LeetKeywordCoverage, 90),
    tier(LeetKeywordOverlap, 85),
    tier(LeetFallback, 80),
    tier(SamplePaperTrack, 95),
    tier(SamplePaperVocabulary, 85),
    tier(SamplePaperFallback, 70),
    tier(Substring, 50),
    tier(KeywordOneWay, 45),
];

pub fn ladder(kind: EntryKind) -> &'static [Tier] {
    match kind {
        EntryKind::Subject => SUBJECT_LADDER,
        EntryKind::Branch => BRANCH_LADDER,
        EntryKind::Semester => SEMESTER_LADDER,
        EntryKind::Page => PAGE_LADDER,
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn keyword_matches(kw: &str, q: &str, both_ways: bool) -> bool {
    kw == q
        || contains_whole_word(kw, q)
        || (both_ways && contains_whole_word(q, kw))
        || overlaps(kw, q)
}

fn any_keyword_token_overlap(entry: &IndexEntry, query: &Query, filler: &[&str]) -> bool {
    entry.keywords.iter().any(|kw| {
        query
            .tokens
            .iter()
            .filter(|t| !filler.contains(&t.as_str()))
            .any(|t| overlaps(kw, t))
    })
}

fn is_leet_context(entry: &IndexEntry, query: &Query) -> bool {
    query.intent.leet && entry.has_keyword_containing("leet")
}

fn is_sample_context(entry: &IndexEntry, query: &Query) -> bool {
    SAMPLE_VOCABULARY.iter().any(|w| query.mentions(w)) && entry.has_keyword_containing("sample")
}

fn leet_keyword_hits(entry: &IndexEntry, query: &Query) -> usize {
    entry
        .keywords
        .iter()
        .filter(|kw| {
            query
                .tokens
                .iter()
                .any(|t| overlaps(kw, t) || contains_whole_word(kw, t))
        })
        .count()
}

fn title_semester_number(title: &str) -> Option<String> {
    TITLE_SEMESTER_NUMBER.captures(title).and_then(|c| {
        c.get(1)
            .or_else(|| c.get(3))
            .map(|m| m.as_str().to_string())
    })
}

impl Strategy {
    /// Test this strategy against `entry`.
    ///
    /// `text` and `words` are the entry's precomputed match text and match
    /// words (see [`IndexEntry::match_text`]).
    pub fn test(self, entry: &IndexEntry, text: &str, words: &[String], query: &Query) -> Outcome {
        let q = query.text.as_str();
        match self {
            Exact => (text == q).into(),
            Prefix => text.starts_with(q).into(),
            WholeWord => contains_whole_word(text, q).into(),
            Substring => text.contains(q).into(),
            AllTokens => {
                let matched = query
                    .tokens
                    .iter()
                    .filter(|t| words.iter().any(|w| w.contains(t.as_str())))
                    .count();
                (matched > 0 && matched == query.tokens.len()).into()
            }
            AnyToken => query
                .tokens
                .iter()
                .any(|t| words.iter().any(|w| w.contains(t.as_str())))
                .into(),
            BranchContext => entry
                .branch_name
                .as_deref()
                .map(|b| overlaps(&b.to_lowercase(), q))
                .unwrap_or(false)
                .into(),
            Keyword => entry
                .keywords
                .iter()
                .any(|kw| keyword_matches(kw, q, true))
                .into(),
            KeywordOneWay => entry
                .keywords
                .iter()
                .any(|kw| keyword_matches(kw, q, false))
                .into(),
            KeywordTokens => query
                .tokens
                .iter()
                .any(|t| entry.keywords.iter().any(|kw| kw.contains(t.as_str())))
                .into(),
            SemesterNumber => {
                match (title_semester_number(&entry.title.to_lowercase()), &query.number) {
                    (Some(title_n), Some(query_n)) if &title_n == query_n => Outcome::Hit,
                    (Some(_), Some(_)) => Outcome::Veto,
                    _ => Outcome::Miss,
                }
            }
            BranchTokens => {
                let filler = |t: &str| {
                    SEMESTER_FILLER.contains(&t) || t.starts_with(|c: char| c.is_ascii_digit())
                };
                entry
                    .keywords
                    .iter()
                    .any(|kw| {
                        query
                            .tokens
                            .iter()
                            .filter(|t| !filler(t.as_str()))
                            .any(|t| overlaps(kw, t))
                    })
                    .into()
            }
            LeetKeyword => (is_leet_context(entry, query)
                && entry.keywords.iter().any(|kw| {
                    kw == q || contains_whole_word(q, kw) || contains_whole_word(kw, q)
                }))
            .into(),
            LeetKeywordCoverage => (is_leet_context(entry, query)
                && !query.tokens.is_empty()
                && leet_keyword_hits(entry, query) == query.tokens.len())
            .into(),
            LeetKeywordOverlap => {
                (is_leet_context(entry, query) && leet_keyword_hits(entry, query) > 0).into()
            }
            LeetFallback => {
                if !is_leet_context(entry, query) {
                    Outcome::Miss
                } else if text.contains(q) || query.mentions("leet") {
                    Outcome::Hit
                } else {
                    Outcome::Veto
                }
            }
            SamplePaperTrack => (is_sample_context(entry, query)
                && SAMPLE_VOCABULARY
                    .iter()
                    .any(|w| entry.has_keyword_containing(w))
                && any_keyword_token_overlap(entry, query, SAMPLE_FILLER))
            .into(),
            SamplePaperVocabulary => (is_sample_context(entry, query)
                && SAMPLE_VOCABULARY
                    .iter()
                    .any(|w| entry.has_keyword_containing(w)))
            .into(),
            SamplePaperFallback => is_sample_context(entry, query).into(),
        }
    }
}

/// Whether entries of this kind may score at all for `query`.
pub fn eligible(entry: &IndexEntry, query: &Query) -> bool {
    let intent = query.intent;
    match entry.kind {
        EntryKind::Subject => intent.subject || intent.branch,
        EntryKind::Branch => !intent.semester,
        EntryKind::Semester => {
            if intent.subject && !intent.branch {
                any_keyword_token_overlap(entry, query, &[])
            } else {
                true
            }
        }
        EntryKind::Page => true,
    }
}

/// Score `entry` for `query`, or `None` if it should not be a result.
pub fn score(entry: &IndexEntry, query: &Query) -> Option<(u8, Strategy)> {
    if !eligible(entry, query) {
        return None;
    }
    let text = entry.match_text();
    let words = entry.match_words();
    for t in ladder(entry.kind) {
        match t.strategy.test(entry, &text, &words, query) {
            Outcome::Hit => return Some((t.score, t.strategy)),
            Outcome::Veto => return None,
            Outcome::Miss => {}
        }
    }
    None
}
