//! Shared test utilities for the scholar-page test suite.
//!
//! Provides publication builders, a representative in-memory document, and a
//! fixture copy for tests that need a real source directory on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let paper = with_identifier(publication("Graphs", 2021), IdentifierKind::Doi, "10.1/x");
//! let doc = sample_document();
//! let tmp = setup_fixtures();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::document::{Document, Identifier, IdentifierKind, Publication, Year};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path()).unwrap();
    tmp
}

pub fn fixtures_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Publication builders
// =========================================================================

/// A dated publication with a single author and a generic venue.
pub fn publication(title: &str, year: i64) -> Publication {
    Publication {
        title: title.to_string(),
        authors: vec!["Sam Author".to_string()],
        venue: "Proceedings of Things".to_string(),
        year: Year::Number(year),
        ..Default::default()
    }
}

pub fn with_status(mut publication: Publication, status: &str) -> Publication {
    publication.status = status.to_string();
    publication
}

pub fn with_identifier(mut publication: Publication, kind: IdentifierKind, value: &str) -> Publication {
    publication.identifier = Some(Identifier {
        kind,
        value: value.to_string(),
    });
    publication
}

// =========================================================================
// Sample document
// =========================================================================

/// A document touching every section except direct announcements.
///
/// The newest dated publication is "Graph Neural Models!!" (2021), first in
/// the journals list.
pub fn sample_document() -> Document {
    serde_json::from_str(SAMPLE_DOCUMENT).unwrap()
}

const SAMPLE_DOCUMENT: &str = r#"{
  "about": {
    "name": "Jane Doe",
    "title": "Assistant Professor",
    "affiliation": ["Dept. of Computer Science", "Example University"],
    "email": "jane@example.edu",
    "photo": "jane.jpg"
  },
  "summary": ["I work on **graph learning** and its applications."],
  "publications": {
    "journals": [
      {
        "title": "Graph Neural Models!!",
        "authors": ["Jane Doe", "John Roe"],
        "venue": "Journal of Graphs",
        "year": 2021,
        "status": "published",
        "identifier": {"type": "doi", "value": "10.1/xyz"}
      },
      {
        "title": "Message Passing at Scale",
        "authors": ["Jane Doe"],
        "venue": "Transactions on Learning",
        "year": 2019,
        "status": "under_review"
      },
      {
        "title": "Sparse Attention for Graphs",
        "authors": ["Jane Doe", "Ada Byron"],
        "venue": "arXiv",
        "year": "in press",
        "status": "preprint",
        "identifier": {"type": "arxiv", "value": "2301.00001"}
      }
    ],
    "conference_proceedings": [
      {
        "title": "Spectral Tricks",
        "authors": ["John Roe", "Jane Doe"],
        "venue": "Conference on Graphs",
        "year": 2020
      }
    ]
  },
  "experience": [
    {
      "role": "Assistant Professor",
      "institution": "Example University",
      "location": "Springfield",
      "period": "2021 - present",
      "details": ["Teaching machine learning"]
    }
  ],
  "education": [
    {
      "degree": "PhD in Computer Science",
      "institution": "Another University",
      "year": "2019"
    }
  ],
  "research": [
    {"title": "Graph learning", "details": ["Scalable message passing"]}
  ],
  "projects": [
    {"title": "graphkit", "details": ["Open-source toolkit"]}
  ],
  "academic_service": {
    "program_committee": ["ICML 2023"],
    "reviewer": ["NeurIPS", "JMLR"]
  },
  "teaching": ["CS 101: Intro to Programming"],
  "achievements": [{"award": "Best Paper Award", "year": 2021}],
  "talks_and_presentations": [{"title": "Graphs Everywhere", "venue": "GraphConf"}],
  "activities": [],
  "technical_skills": {"languages": ["Rust", "Python"], "tools": ["Git"]},
  "references": [
    {
      "name": "Prof. Alan Turing",
      "designation": "Professor",
      "institution": "Example University",
      "email": "alan@example.edu"
    }
  ]
}"#;
