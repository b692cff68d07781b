//! # Scholar Page
//!
//! A static site generator for a single academic profile page. One JSON
//! document describes the person; the generator turns every non-empty
//! section into a named container on one self-contained HTML page.
//!
//! # Architecture: One Pipeline
//!
//! ```text
//! 1. Load      content/index.json  →  Document        (one read, one parse)
//! 2. Views     Document            →  feeds, groups   (borrowed, computed)
//! 3. Render    sub-tree            →  Vec<Markup>     (pure, per section)
//! 4. Generate  fragments           →  dist/index.html (attach + write)
//! ```
//!
//! Presentation effects (announcement carousel, scroll reveal, citation
//! toggles, nav highlight) run in the browser after the page loads. The
//! [`effects`] module models the carousel and reveal as plain state machines.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`document`] | Serde model of the profile document with lenient defaults |
//! | [`load`] | Reads and parses the document; the only data failure point |
//! | [`views`] | Recent-items feed, status groups, data-gap inventory |
//! | [`render`] | Pure renderers from document sub-trees to Maud fragments |
//! | [`citation`] | Access URLs, BibTeX records, stable toggle ids |
//! | [`effects`] | Carousel and scroll reveal models, stoppable carousel timer |
//! | [`generate`] | Attaches fragments to containers, writes the page, copies assets |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | Section ids, headings and navigation labels |
//! | [`output`] | CLI output formatting for every command |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Renderers Never Touch the Page
//!
//! Every renderer is `(data) -> Vec<Markup>`: one fragment per input item, in
//! input order, no error path. Only [`generate`] knows that fragments end up
//! inside `<section id="...">` containers. Renderers can be tested on their
//! own and the same renderer serves several sections (research and projects,
//! the four free-form list sections).
//!
//! ## Lenient Data, Strict Config
//!
//! The profile document is hand-written and drifts: years as strings, `null`
//! sections, skills as a list in one version and keyed by category in the
//! next. [`document`] absorbs that at deserialization time. `config.toml` is
//! the opposite: unknown keys and out-of-range values are errors.
//!
//! ## Variants Are Configuration
//!
//! Citation toggles and status-grouped publications are switches in
//! `[publications]`, not separate page builds. Optional summary, grouped
//! skills and hand-written announcements are picked up from the data shape.
//!
//! ## Stable Citation Ids
//!
//! Toggle ids combine the group, the item's position and a SHA-256 prefix of
//! its citation key. Rebuilding the same document produces the same page,
//! byte for byte.

pub mod citation;
pub mod config;
pub mod document;
pub mod effects;
pub mod generate;
pub mod load;
pub mod logging;
pub mod naming;
pub mod output;
pub mod render;
pub mod views;

#[cfg(test)]
pub(crate) mod test_helpers;
