//! Subject extraction from semester page markup.
//!
//! Semester pages mark each examined subject as a section element carrying
//! the `computer-1-semester` class (shared by every branch's pages), an
//! `id` used as the link fragment, and a `.semester-heading` with the
//! subject name:
//!
//! ```html
//! <section class="computer-1-semester" id="maths-1">
//!   <h2 class="semester-heading">Applied Mathematics I</h2>
//!   <p class="semester-subtext">Select exam session</p>
//!   <a class="semester-subject-card" href="…">Nov 2023</a>
//! </section>
//! ```
//!
//! A section counts as a subject when its subtext mentions an exam
//! session, or when it has an id and session cards. The page's own
//! "… Semester Previous Year …" banner uses the same markup and is skipped.
//! Malformed markup never fails: the HTML parser recovers and whatever
//! sections survive are returned.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use pyq_search_core::catalog::ScrapedSubject;

struct Selectors {
    section: Selector,
    heading: Selector,
    subtext: Selector,
    card: Selector,
}

static SELECTORS: Lazy<Selectors> = Lazy::new(|| Selectors {
    section: Selector::parse(".computer-1-semester[id]").expect("static selector"),
    heading: Selector::parse(".semester-heading").expect("static selector"),
    subtext: Selector::parse(".semester-subtext").expect("static selector"),
    card: Selector::parse(".semester-subject-card").expect("static selector"),
});

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn is_page_banner(heading: &str) -> bool {
    let lower = heading.to_lowercase();
    lower.contains("semester") && lower.contains("previous year")
}

/// Extract every subject section from a semester page, in document order.
pub fn extract_subjects(markup: &str) -> Vec<ScrapedSubject> {
    let doc = Html::parse_document(markup);
    let sel = &*SELECTORS;
    let mut subjects = Vec::new();

    for section in doc.select(&sel.section) {
        let id = section.value().attr("id").unwrap_or_default().trim();
        let Some(heading) = section.select(&sel.heading).next() else {
            continue;
        };
        let name = text_of(heading);
        if name.is_empty() || is_page_banner(&name) {
            continue;
        }

        let mentions_session = section
            .select(&sel.subtext)
            .next()
            .map(|s| text_of(s).contains("exam session"))
            .unwrap_or(false);
        let has_cards = section.select(&sel.card).next().is_some();

        if mentions_session || (has_cards && !id.is_empty()) {
            subjects.push(ScrapedSubject {
                id: id.to_string(),
                name,
            });
        }
    }

    subjects
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<!DOCTYPE html>
<html><body>
  <section class="computer-1-semester" id="top">
    <h1 class="semester-heading">Computer Engineering 1st Semester Previous Year Papers</h1>
    <p class="semester-subtext">Select exam session</p>
  </section>
  <section class="computer-1-semester" id="maths-1">
    <h2 class="semester-heading">  Applied Mathematics I </h2>
    <p class="semester-subtext">Select exam session</p>
  </section>
  <div class="computer-1-semester" id="physics">
    <h2 class="semester-heading">Applied <span>Physics</span></h2>
    <div><a class="semester-subject-card" href="p.pdf">Nov 2023</a></div>
  </div>
  <section class="computer-1-semester" id="notice">
    <h2 class="semester-heading">Notice</h2>
    <p class="semester-subtext">Results are out</p>
  </section>
  <section class="computer-1-semester">
    <h2 class="semester-heading">No Id Here</h2>
    <p class="semester-subtext">Select exam session</p>
  </section>
</body></html>
"#;

    #[test]
    fn finds_subject_sections_in_order() {
        let subjects = extract_subjects(PAGE);
        assert_eq!(
            subjects,
            vec![
                ScrapedSubject {
                    id: "maths-1".to_string(),
                    name: "Applied Mathematics I".to_string(),
                },
                ScrapedSubject {
                    id: "physics".to_string(),
                    name: "Applied Physics".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_id_with_session_text_is_kept() {
        let page = r#"<div class="computer-1-semester" id="">
            <h2 class="semester-heading">Drawing</h2>
            <p class="semester-subtext">Choose an exam session</p></div>"#;
        let subjects = extract_subjects(page);
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].id, "");
    }

    #[test]
    fn blank_heading_is_skipped() {
        let markup = r#"
            <section class="computer-1-semester" id="blank">
              <h2 class="semester-heading">   </h2>
              <p class="semester-subtext">Select exam session</p>
              <a class="semester-subject-card" href="x.pdf">Nov 2023</a>
            </section>
            <section class="computer-1-semester" id="ds">
              <h2 class="semester-heading">Data Structures</h2>
              <p class="semester-subtext">Select exam session</p>
            </section>"#;
        let subjects = extract_subjects(markup);
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].id, "ds");
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(extract_subjects("").is_empty());
        assert!(extract_subjects("<<<not html at all").is_empty());
        assert!(extract_subjects("<div class='computer-1-semester' id='x'>").is_empty());
    }
}
