//! Static catalog of branches, semester pages and curated site pages.
//!
//! This is the synchronous part of index construction: everything here is
//! derived from fixed tables and never touches the network, so the catalog
//! is always complete even when every semester page fails to load.
//!
//! # Semester page naming
//!
//! Most branches name their semester pages by inserting `-N` before the
//! extension of the branch page (`civil.html` → `civil-3.html`). Branches
//! that deviate carry an explicit [`SemesterPages::Templated`] scheme.

use crate::models::{EntryKind, IndexEntry};
use crate::text::{split_subject_words, strip_non_alnum};

/// How a branch names its per-semester pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterPages {
    /// `branch.html` → `branch-N.html`.
    NumberSuffix,
    /// `first` for semester 1; `rest` with `{n}` replaced otherwise.
    Templated {
        first: &'static str,
        rest: &'static str,
    },
}

/// One academic program offered on the site.
#[derive(Debug, Clone, Copy)]
pub struct BranchSpec {
    pub name: &'static str,
    pub page: &'static str,
    pub semesters: &'static [u32],
    pub key: &'static str,
    pub semester_pages: SemesterPages,
}

impl BranchSpec {
    pub const fn new(
        name: &'static str,
        page: &'static str,
        semesters: &'static [u32],
        key: &'static str,
    ) -> Self {
        Self {
            name,
            page,
            semesters,
            key,
            semester_pages: SemesterPages::NumberSuffix,
        }
    }

    /// File name of this branch's page for semester `n`.
    pub fn semester_page(&self, n: u32) -> String {
        match self.semester_pages {
            SemesterPages::NumberSuffix => self.page.replacen(".html", &format!("-{}.html", n), 1),
            SemesterPages::Templated { first, rest } => {
                if n == 1 {
                    first.to_string()
                } else {
                    rest.replace("{n}", &n.to_string())
                }
            }
        }
    }

    fn name_words(&self) -> impl Iterator<Item = String> + '_ {
        self.name.split(' ').map(str::to_lowercase)
    }
}

const FIVE: &[u32] = &[1, 2, 3, 4, 5];
const SIX: &[u32] = &[1, 2, 3, 4, 5, 6];
const FOUR: &[u32] = &[1, 2, 3, 4];

/// Every branch the site publishes papers for.
pub static BRANCHES: &[BranchSpec] = &[
    BranchSpec::new("Agriculture Engineering", "Agriculture.html", FIVE, "agriculture"),
    BranchSpec::new("Architectural Assistantship", "Architectural-Assistantship.html", SIX, "architectural"),
    BranchSpec::new("Automobile Engineering", "Automobile.html", SIX, "automobile"),
    BranchSpec::new("Automation & Robotics", "Automation.html", SIX, "automation"),
    BranchSpec::new("AI & ML", "ai-ml.html", SIX, "ai-ml"),
    BranchSpec::new("Chemical Engineering", "Chemical.html", SIX, "chemical"),
    BranchSpec::new("Civil Engineering", "civil.html", SIX, "civil"),
    BranchSpec {
        name: "Computer Engineering",
        page: "computer-pyq.html",
        semesters: SIX,
        key: "computer",
        semester_pages: SemesterPages::Templated {
            first: "computer-1-semester.html",
            rest: "computer-pyq-{n}-semester.html",
        },
    },
    BranchSpec::new("DBM", "dbm.html", FIVE, "dbm"),
    BranchSpec::new("ECE", "ece.html", SIX, "ece"),
    BranchSpec::new("Electrical Engineering", "Electrical-Engineering.html", SIX, "electrical"),
    BranchSpec::new("Fashion Design", "Fashion-Design.html", SIX, "fashion-design"),
    BranchSpec::new("Fashion Technology", "Fashion-Technology.html", SIX, "fashion-technology"),
    BranchSpec::new("Food Technology", "food.html", SIX, "food"),
    BranchSpec::new("Hotel Management", "Hotel-Management.html", FIVE, "hotel"),
    BranchSpec::new("Instrumentation & Control", "Instrumentation-&-Control.html", SIX, "instrumentation"),
    BranchSpec::new("Library & Information Science", "Library.html", FIVE, "library"),
    BranchSpec::new("Mechanical Engineering", "mech.html", SIX, "mechanical"),
    BranchSpec::new("Medical Electronics", "Medical-Electronics.html", FIVE, "medical-electronics"),
    BranchSpec::new("Medical Lab Technology", "Medical-Laboratory-Technology.html", FOUR, "medical-lab"),
    BranchSpec::new("Office Management", "Office-Management.html", FIVE, "office"),
    BranchSpec::new("Plastic Technology", "Plastic.html", SIX, "plastic"),
    BranchSpec::new("Textile Design", "Textile-Design.html", SIX, "textile-design"),
    BranchSpec::new("Textile Processing", "Textile-Processing.html", SIX, "textile-processing"),
    BranchSpec::new("Textile Technology", "Textile-Technology.html", SIX, "textile-technology"),
    BranchSpec::new("Ceramic Engineering", "Ceramic.html", FIVE, "ceramic"),
    BranchSpec::new("Advance Diploma", "Adv-Diploma.html", FOUR, "adv-diploma"),
    BranchSpec::new("FAA", "FAA.html", FIVE, "faa"),
    BranchSpec::new("D Pharmacy", "d-pharmacy.html", &[1, 2], "d-pharmacy"),
];

pub fn find_branch(key: &str) -> Option<&'static BranchSpec> {
    BRANCHES.iter().find(|b| b.key == key)
}

/// `1st`, `2nd`, `3rd`, then `Nth`.
pub fn ordinal(n: u32) -> String {
    match n {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        _ => format!("{}th", n),
    }
}

/// Link prefix for resource URLs as seen from the page at `page_path`.
///
/// Pages inside the `html/` directory link to siblings; everything else
/// (the site root, `/index.html`) links into `html/`.
pub fn link_prefix_for(page_path: &str) -> &'static str {
    if page_path.contains("/html/") {
        "./"
    } else {
        "./html/"
    }
}

/// One Branch entry followed by one Semester entry per offered semester.
pub fn branch_entries(prefix: &str, branch: &BranchSpec) -> Vec<IndexEntry> {
    let mut entries = Vec::with_capacity(branch.semesters.len() + 1);
    let name_lower = branch.name.to_lowercase();

    entries.push(
        IndexEntry::new(
            EntryKind::Branch,
            branch.name,
            format!("{}{}", prefix, branch.page),
        )
        .with_keywords(std::iter::once(name_lower.clone()).chain(branch.name_words())),
    );

    for &n in branch.semesters {
        let ord = ordinal(n);
        let mut entry = IndexEntry::new(
            EntryKind::Semester,
            format!("{} - {} Semester", branch.name, ord),
            format!("{}{}", prefix, branch.semester_page(n)),
        )
        .with_keywords(
            [
                name_lower.clone(),
                format!("{} semester", ord),
                format!("semester {}", n),
            ]
            .into_iter()
            .chain(branch.name_words()),
        );
        entry.branch_name = Some(branch.name.to_string());
        entry.semester = Some(n);
        entries.push(entry);
    }

    entries
}

/// A subject section found on a semester page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedSubject {
    /// Element id, used as the URL fragment.
    pub id: String,
    pub name: String,
}

/// Build the Subject entry for a section scraped from semester `n` of `branch`.
pub fn subject_entry(
    prefix: &str,
    branch: &BranchSpec,
    n: u32,
    subject: &ScrapedSubject,
) -> IndexEntry {
    let ord = ordinal(n);
    let words: Vec<String> = split_subject_words(&subject.name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect();

    let keywords = std::iter::once(subject.name.to_lowercase())
        .chain(words.iter().cloned())
        .chain(words.iter().map(|w| strip_non_alnum(w)))
        .chain([
            branch.name.to_lowercase(),
            format!("{} semester", ord),
            format!("semester {}", n),
        ])
        .chain(branch.name_words());

    let mut entry = IndexEntry::new(
        EntryKind::Subject,
        format!("{} ({} - {} Sem)", subject.name, branch.name, ord),
        format!("{}{}#{}", prefix, branch.semester_page(n), subject.id),
    )
    .with_keywords(keywords);
    entry.subject_name = Some(subject.name.clone());
    entry.branch_name = Some(branch.name.to_string());
    entry.semester = Some(n);
    entry
}

fn page(prefix: &str, title: &str, file: &str, keywords: &[&str]) -> IndexEntry {
    IndexEntry::new(EntryKind::Page, title, format!("{}{}", prefix, file))
        .with_keywords(keywords.iter().copied())
}

/// Sample-paper vocabulary for a LEET track, one phrase per spelling and
/// suffix, plus the `sample paper <spelling>` inversions.
fn sample_paper_vocabulary(spellings: &[&str]) -> Vec<String> {
    const SUFFIXES: &[&str] = &[
        "leet sample paper",
        "sample paper",
        "leet sample",
        "mock paper",
        "practice paper",
        "leet mock",
        "leet papers",
        "sample",
        "practice",
        "mock",
    ];
    let mut out: Vec<String> = SUFFIXES
        .iter()
        .flat_map(|suffix| spellings.iter().map(move |s| format!("{} {}", s, suffix)))
        .collect();
    out.extend(spellings.iter().map(|s| format!("sample paper {}", s)));
    out
}

/// The closed set of hand-curated informational pages.
pub fn static_pages(prefix: &str) -> Vec<IndexEntry> {
    vec![
        page(
            prefix,
            "HSBTE PYQ",
            "hsbte-pyq.html",
            &["hsbte", "pyq", "previous year", "question papers", "question paper"],
        ),
        page(
            prefix,
            "Home",
            "index.html",
            &["home", "main", "index", "homepage"],
        ),
        page(
            prefix,
            "Haryana LEET",
            "haryanaleet.html",
            &[
                "leet",
                "haryana leet",
                "lateral entry",
                "haryana",
                "lateral entry engineering test",
                "haryana lateral entry",
            ],
        ),
        page(
            prefix,
            "BTech LEET Information",
            "btech-leet.html",
            &[
                "btech leet",
                "btech",
                "b.tech leet",
                "b tech leet",
                "btech lateral entry",
                "engineering leet",
                "leet btech",
                "btech lateral",
                "btech information",
                "btech syllabus",
                "btech exam pattern",
                "btech cutoff",
                "btech key dates",
            ],
        ),
        page(
            prefix,
            "BTech LEET Sample Papers",
            "btech-leet-sample-paper.html",
            &[
                "btech leet sample paper",
                "btech sample paper",
                "btech leet sample",
                "btech mock paper",
                "btech practice paper",
                "btech leet practice",
                "sample paper btech",
                "btech leet mock",
                "btech leet papers",
                "btech sample",
                "btech practice",
                "btech mock",
            ],
        ),
        page(
            prefix,
            "B. Pharmacy LEET Information",
            "B-Pharmacy-leet.html",
            &[
                "b pharmacy leet",
                "bpharmacy leet",
                "b.pharmacy leet",
                "b pharmacy lateral entry",
                "pharmacy leet",
                "bpharm leet",
                "b pharm leet",
                "bpharmacy",
                "b pharmacy",
                "pharmacy lateral entry",
                "b pharmacy information",
                "b pharmacy syllabus",
                "b pharmacy exam pattern",
                "b pharmacy cutoff",
                "b pharmacy key dates",
            ],
        ),
        IndexEntry::new(
            EntryKind::Page,
            "B. Pharmacy LEET Sample Papers",
            format!("{}b-pharmacy-leet-sample-paper.html", prefix),
        )
        .with_keywords(sample_paper_vocabulary(&["b pharmacy", "bpharmacy"])),
    ]
}

/// The full synchronous catalog: every branch with its semesters, then the
/// static pages.
pub fn catalog(prefix: &str) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = BRANCHES
        .iter()
        .flat_map(|b| branch_entries(prefix, b))
        .collect();
    entries.extend(static_pages(prefix));
    entries
}
