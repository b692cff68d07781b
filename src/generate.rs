//! HTML site generation.
//!
//! The adapter between pure renderers and the filesystem. Takes the loaded
//! [`Document`] and the resolved [`SiteConfig`], attaches every renderer's
//! fragments to its named container, and writes a single static page.
//!
//! ## Page Layout
//!
//! - **Hero**: name, title, affiliation, email and portrait
//! - **Navigation**: one anchor per section, highlighted while scrolling
//! - **Sections**: one `<section id="...">` per non-empty content section,
//!   in canonical order (see [`Section::ALL`])
//!
//! Empty sections produce no container and no navigation entry, unless the
//! document lists its own `navigation`.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # The whole page, CSS and script inlined
//! └── jane.jpg          # Everything under content/assets/, copied verbatim
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Carousel, scroll reveal, citation toggles, nav highlight
//!
//! The script reads its settings from `data-*` attributes on `<body>`, so
//! the same script serves every configuration.

use crate::config::{self, SiteConfig};
use crate::document::Document;
use crate::naming::Section;
use crate::render;
use crate::views;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("asset {0} would overwrite the generated page")]
    PageCollision(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Directory under the source root copied verbatim to the output root.
pub const ASSETS_DIR: &str = "assets";

/// File name of the generated page, relative to the output root.
pub const PAGE_FILE: &str = "index.html";

/// What a build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    /// Path of the written page.
    pub page: PathBuf,
    /// Rendered sections with their fragment counts, in page order.
    pub sections: Vec<(Section, usize)>,
    /// Number of asset files copied.
    pub assets: usize,
}

/// Render the page and write it, with assets, into `output_dir`.
pub fn generate(
    document: &Document,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let sections = render_sections(document, config);
    let counts = sections
        .iter()
        .map(|(section, fragments)| (*section, fragments.len()))
        .collect();
    let page = assemble(document, config, sections);

    let assets_dir = source_dir.join(ASSETS_DIR);
    let clash = assets_dir.join(PAGE_FILE);
    if clash.exists() {
        return Err(GenerateError::PageCollision(clash));
    }

    fs::create_dir_all(output_dir)?;
    let assets = copy_assets(&assets_dir, output_dir)?;
    if assets > 0 {
        tracing::info!(count = assets, "copied assets");
    }

    // Page goes last so nothing copied above can replace it.
    let page_path = output_dir.join(PAGE_FILE);
    fs::write(&page_path, page.into_string())?;
    tracing::info!(path = %page_path.display(), "generated index.html");

    Ok(GenerateSummary {
        page: page_path,
        sections: counts,
        assets,
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
///
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        tracing::debug!(dir = %src.display(), "no assets directory");
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            tracing::debug!(?relative, "copied asset");
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Page assembly
// ============================================================================

/// The complete page for a document, without touching the filesystem.
pub fn render_page(document: &Document, config: &SiteConfig) -> Markup {
    assemble(document, config, render_sections(document, config))
}

fn assemble(
    document: &Document,
    config: &SiteConfig,
    sections: Vec<(Section, Vec<Markup>)>,
) -> Markup {
    let nav_ids: Vec<String> = if document.navigation.is_empty() {
        sections
            .iter()
            .map(|(section, _)| section.id().to_string())
            .collect()
    } else {
        document.navigation.clone()
    };

    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let content = html! {
        (render::hero(&document.about))
        (render::navigation(&nav_ids))
        main.content {
            @for (section, fragments) in sections {
                (attach(section, fragments))
            }
        }
    };
    base_document(&page_title(document, config), &css, config, content)
}

/// Every non-empty section's fragments, in canonical order.
pub fn render_sections(document: &Document, config: &SiteConfig) -> Vec<(Section, Vec<Markup>)> {
    Section::ALL
        .into_iter()
        .map(|section| (section, section_fragments(section, document, config)))
        .filter(|(_, fragments)| !fragments.is_empty())
        .collect()
}

fn section_fragments(section: Section, doc: &Document, config: &SiteConfig) -> Vec<Markup> {
    match section {
        Section::About => render::summary(&doc.summary),
        Section::Announcements => {
            render::announcements(&views::announcements(doc, config.announcements.count))
        }
        Section::Experience => render::experience(&doc.experience),
        Section::Education => render::education(&doc.education),
        Section::Publications => render::publications(&doc.publications, &config.publications),
        Section::Research => render::highlights(&doc.research),
        Section::Projects => render::highlights(&doc.projects),
        Section::AcademicService => render::groups(&doc.academic_service),
        Section::Teaching => render::list_items(&doc.teaching),
        Section::Achievements => render::list_items(&doc.achievements),
        Section::TalksAndPresentations => render::list_items(&doc.talks_and_presentations),
        Section::Activities => render::list_items(&doc.activities),
        Section::TechnicalSkills => render::skills(&doc.technical_skills),
        Section::References => render::references(&doc.references),
    }
}

/// Attach fragments to the section's named container.
pub fn attach(section: Section, fragments: Vec<Markup>) -> Markup {
    html! {
        section.section id=(section.id()) {
            h2 { (section.heading()) }
            @for fragment in fragments {
                (fragment)
            }
        }
    }
}

fn page_title<'a>(document: &'a Document, config: &'a SiteConfig) -> &'a str {
    if !config.title.is_empty() {
        &config.title
    } else if !document.about.name.is_empty() {
        &document.about.name
    } else {
        "Profile"
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, config: &SiteConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body
                data-carousel-interval=(config.announcements.interval_ms)
                data-reveal-threshold=(config.reveal.threshold)
            {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
