//! Small string helpers shared by the catalog, scoring and highlighting.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Split a subject name into words on whitespace, `&`, en-dash, `-` and
/// parentheses. Empty pieces are dropped.
pub fn split_subject_words(name: &str) -> Vec<String> {
    name.split(|c: char| c.is_whitespace() || matches!(c, '&' | '–' | '-' | '(' | ')'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove everything outside `[a-z0-9]`.
pub fn strip_non_alnum(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Compiled `\bneedle\b` patterns keyed by needle. Cleared wholesale once
/// it reaches `WORD_PATTERN_LIMIT` entries.
static WORD_PATTERNS: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

const WORD_PATTERN_LIMIT: usize = 4096;

fn word_pattern(needle: &str) -> Option<Regex> {
    let mut patterns = WORD_PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = patterns.get(needle) {
        return Some(re.clone());
    }
    // ASCII boundaries: accented letters are not word characters here
    let re = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(needle))).ok()?;
    if patterns.len() >= WORD_PATTERN_LIMIT {
        patterns.clear();
    }
    patterns.insert(needle.to_string(), re.clone());
    Some(re)
}

/// True when `haystack` contains `needle` delimited by word boundaries on
/// both sides, with the same semantics as the pattern `\bneedle\b` where
/// `needle` is taken literally.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    word_pattern(needle).is_some_and(|re| re.is_match(haystack))
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_words_split_on_separators() {
        assert_eq!(
            split_subject_words("Basics of IT & Web Design (Lab) – Practical"),
            vec!["Basics", "of", "IT", "Web", "Design", "Lab", "Practical"]
        );
        assert!(split_subject_words("  - & ").is_empty());
    }

    #[test]
    fn strip_keeps_ascii_alnum() {
        assert_eq!(strip_non_alnum("i/o"), "io");
        assert_eq!(strip_non_alnum("c++"), "c");
        assert_eq!(strip_non_alnum("."), "");
    }

    #[test]
    fn whole_word_requires_boundaries() {
        assert!(contains_whole_word("computer engineering", "computer"));
        assert!(contains_whole_word("civil engineering", "engineering"));
        assert!(!contains_whole_word("computerized", "computer"));
        assert!(!contains_whole_word("microcomputer", "computer"));
        assert!(contains_whole_word("b.pharmacy leet", "pharmacy"));
        assert!(!contains_whole_word("anything", ""));
    }

    #[test]
    fn whole_word_tries_later_occurrences() {
        assert!(contains_whole_word("computers and computer", "computer"));
    }

    #[test]
    fn whole_word_with_non_word_edges() {
        // `\b` before a non-word char needs a word char on the left
        assert!(!contains_whole_word("ai & ml", "ai &"));
        assert!(contains_whole_word("ai &ml", "ai &"));
        assert!(!contains_whole_word("x (lab)", "(lab)"));
        assert!(!contains_whole_word("x(lab)", "(lab)"));
        assert!(contains_whole_word("x(lab)y", "(lab)"));
    }

    #[test]
    fn whole_word_treats_needle_literally() {
        assert!(contains_whole_word("c++ basics", "c"));
        assert!(!contains_whole_word("abc", "a.c"));
        assert!(contains_whole_word("a.c lab", "a.c"));
        // accented letters are not word characters
        assert!(contains_whole_word("caféteria", "caf"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("AI & ML <b>"), "AI &amp; ML &lt;b&gt;");
    }
}
