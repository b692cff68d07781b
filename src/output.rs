//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is an inventory of the profile, not of files. Each section is shown
//! by its heading and positional index, with counts as secondary detail.
//! Paths appear only as indented `Source:` / `Output:` context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Profile
//!     Jane Doe
//!     Source: content/index.json
//!
//! Sections
//! 001 About (1)
//! 002 Announcements (3)
//! 003 Publications (4)
//!     Empty: Activities
//!
//! Data gaps
//!     Journal 003 Sparse Attention for Graphs: year "in press" is not an integer
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 About (1 fragment)
//! 002 Publications (6 fragments)
//!     Output: dist/index.html
//!
//! Generated 2 sections, copied 1 asset
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::citation;
use crate::document::Document;
use crate::generate::GenerateSummary;
use crate::naming::Section;
use crate::views::{self, Announcement, DataGap, GapKind};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn gap_line(gap: &DataGap) -> String {
    let problem = match &gap.kind {
        GapKind::NonNumericYear(year) if year.is_empty() => "no year".to_string(),
        GapKind::NonNumericYear(year) => format!("year \"{year}\" is not an integer"),
        GapKind::UnmatchedStatus(status) => format!("status \"{status}\" matches no group"),
        GapKind::NoCitation(value) => format!("identifier \"{value}\" has no citation"),
    };
    format!(
        "{}{} {} {}: {}",
        indent(1),
        gap.collection.label(),
        format_index(gap.position),
        gap.title,
        problem
    )
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(
    document: &Document,
    source: &Path,
    announcement_limit: usize,
) -> Vec<String> {
    let mut lines = vec!["Profile".to_string()];
    if !document.about.name.is_empty() {
        lines.push(format!("{}{}", indent(1), document.about.name));
    }
    lines.push(format!("{}Source: {}", indent(1), source.display()));

    lines.push(String::new());
    lines.push("Sections".to_string());
    let mut empty = Vec::new();
    let mut pos = 0;
    for section in Section::ALL {
        let n = views::section_len(document, section, announcement_limit);
        if n == 0 {
            empty.push(section.heading());
            continue;
        }
        pos += 1;
        lines.push(format!("{} {} ({})", format_index(pos), section.heading(), n));
    }
    if !empty.is_empty() {
        lines.push(format!("{}Empty: {}", indent(1), empty.join(", ")));
    }

    let unknown: Vec<&str> = document
        .navigation
        .iter()
        .map(String::as_str)
        .filter(|id| Section::from_id(id).is_none())
        .collect();
    if !unknown.is_empty() {
        lines.push(format!(
            "{}Navigation without a section: {}",
            indent(1),
            unknown.join(", ")
        ));
    }

    lines.push(String::new());
    lines.push("Data gaps".to_string());
    let gaps = views::data_gaps(document);
    if gaps.is_empty() {
        lines.push(format!("{}none", indent(1)));
    } else {
        lines.extend(gaps.iter().map(gap_line));
    }
    lines
}

pub fn print_check_output(document: &Document, source: &Path, announcement_limit: usize) {
    for line in format_check_output(document, source, announcement_limit) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .sections
        .iter()
        .enumerate()
        .map(|(i, (section, n))| {
            format!(
                "{} {} ({})",
                format_index(i + 1),
                section.heading(),
                plural(*n, "fragment")
            )
        })
        .collect();
    lines.push(format!("{}Output: {}", indent(1), summary.page.display()));
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, copied {}",
        plural(summary.sections.len(), "section"),
        plural(summary.assets, "asset")
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Announcements
// ============================================================================

/// The announcement feed, one entry per header line, detail indented.
pub fn format_announcements(items: &[Announcement]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No announcements".to_string()];
    }
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.headline));
        if !item.detail.is_empty() {
            lines.push(format!("{}{}", indent(1), item.detail));
        }
    }
    lines
}

pub fn print_announcements(items: &[Announcement]) {
    for line in format_announcements(items) {
        println!("{}", line);
    }
}

// ============================================================================
// Citations
// ============================================================================

/// BibTeX for every publication that has one, records separated by a blank line.
pub fn format_citations(document: &Document) -> Vec<String> {
    let records: Vec<String> = document
        .publications
        .iter()
        .filter_map(citation::bibtex)
        .collect();
    let mut lines = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(record.lines().map(str::to_string));
    }
    lines
}

pub fn print_citations(document: &Document) {
    for line in format_citations(document) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
