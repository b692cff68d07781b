//! Section renderers.
//!
//! Each renderer maps one sub-tree of the [`Document`](crate::document::Document)
//! to a list of markup fragments, one per input item, in input order. Nothing
//! here touches the filesystem or knows which container a fragment ends up
//! in; [`generate`](crate::generate) does the attaching.
//!
//! Renderers have no error path. An empty input produces no fragments, and a
//! missing field renders as the empty string.
//!
//! Cards carry `data-reveal`, which the page script uses for the scroll
//! reveal effect.

use crate::citation;
use crate::config::PublicationsConfig;
use crate::document::{
    Education, Experience, Groups, Highlight, IdentifierKind, ListItem, Profile, Publication,
    Publications, Reference, SkillSet, Year,
};
use crate::naming::{group_label, nav_label};
use crate::views::{self, Announcement};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

// ============================================================================
// Shared pieces
// ============================================================================

/// A reveal-on-scroll card wrapping one item.
fn card(content: Markup) -> Markup {
    html! {
        div.card data-reveal {
            (content)
        }
    }
}

/// Bullet list of details; nothing when empty.
fn details_list(details: &[String]) -> Markup {
    html! {
        @if !details.is_empty() {
            ul {
                @for detail in details {
                    li { (detail) }
                }
            }
        }
    }
}

/// Join the non-empty parts with `sep`.
fn joined(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

// ============================================================================
// Page furniture
// ============================================================================

/// Name, title, affiliation lines, email and portrait.
pub fn hero(profile: &Profile) -> Markup {
    html! {
        header.hero {
            @if !profile.photo.src.is_empty() {
                img.photo id="photo" src=(profile.photo.src) alt=(profile.photo_alt());
            }
            div.hero-text {
                h1 id="name" { (profile.name) }
                @if !profile.title.is_empty() {
                    p.title id="title" { (profile.title) }
                }
                @if !profile.affiliation.is_empty() {
                    p.affiliation id="affiliation" {
                        @for (i, line) in profile.affiliation.iter().enumerate() {
                            @if i > 0 { br; }
                            (line)
                        }
                    }
                }
                @if !profile.email.is_empty() {
                    a.email id="email" href={ "mailto:" (profile.email) } { (profile.email) }
                }
            }
        }
    }
}

/// Top navigation: one anchor per section id.
pub fn navigation(ids: &[String]) -> Markup {
    html! {
        nav.top-nav id="top-nav" {
            @for id in ids {
                a href={ "#" (id) } { (nav_label(id)) }
            }
        }
    }
}

/// The optional bio, rendered from Markdown.
pub fn summary(paragraphs: &[String]) -> Vec<Markup> {
    if paragraphs.is_empty() {
        return Vec::new();
    }
    let source = paragraphs.join("\n\n");
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, Parser::new(&source));
    vec![html! {
        div.summary data-reveal {
            (PreEscaped(body_html))
        }
    }]
}

// ============================================================================
// Content sections
// ============================================================================

pub fn announcements(items: &[Announcement]) -> Vec<Markup> {
    items
        .iter()
        .map(|item| {
            html! {
                div.announce data-reveal {
                    strong { (item.headline) }
                    @if !item.detail.is_empty() {
                        br;
                        small { (item.detail) }
                    }
                }
            }
        })
        .collect()
}

pub fn experience(entries: &[Experience]) -> Vec<Markup> {
    entries
        .iter()
        .map(|e| {
            card(html! {
                strong { (e.role) }
                br;
                (joined(&[&e.institution, &e.location], ", "))
                br;
                small { (e.period) }
                (details_list(&e.details))
            })
        })
        .collect()
}

pub fn education(entries: &[Education]) -> Vec<Markup> {
    entries
        .iter()
        .map(|e| {
            card(html! {
                strong { (e.degree) }
                br;
                (joined(&[&e.institution, &e.location], ", "))
                br;
                small { (e.when()) }
                (details_list(&e.details))
            })
        })
        .collect()
}

/// Publication groups, each an `h3` heading followed by one card per entry.
///
/// Empty groups are skipped entirely. With `group_by_status`, journals are
/// split into Published / Under Review / Preprints and entries with any other
/// status are not shown.
pub fn publications(publications: &Publications, options: &PublicationsConfig) -> Vec<Markup> {
    let mut fragments = Vec::new();
    if options.group_by_status {
        let groups = views::group_by_status(&publications.journals);
        push_publication_group(&mut fragments, "Published", "published", &groups.published, options);
        push_publication_group(
            &mut fragments,
            "Under Review",
            "under_review",
            &groups.under_review,
            options,
        );
        push_publication_group(&mut fragments, "Preprints", "preprint", &groups.preprint, options);
    } else {
        let journals: Vec<&Publication> = publications.journals.iter().collect();
        push_publication_group(&mut fragments, "Journals", "journals", &journals, options);
    }
    let conferences: Vec<&Publication> = publications.conference_proceedings.iter().collect();
    push_publication_group(
        &mut fragments,
        "Conference Proceedings",
        "conference_proceedings",
        &conferences,
        options,
    );
    fragments
}

fn push_publication_group(
    fragments: &mut Vec<Markup>,
    heading: &str,
    group: &str,
    entries: &[&Publication],
    options: &PublicationsConfig,
) {
    if entries.is_empty() {
        return;
    }
    fragments.push(html! { h3 { (heading) } });
    fragments.extend(
        entries
            .iter()
            .enumerate()
            .map(|(index, p)| publication_card(group, index, p, options.citations)),
    );
}

fn publication_card(group: &str, index: usize, p: &Publication, citations: bool) -> Markup {
    let url = citation::access_url(p.identifier.as_ref());
    let link_label = match p.identifier.as_ref().map(|id| id.kind) {
        Some(IdentifierKind::Arxiv) => "arXiv",
        _ => "DOI",
    };
    let bib = if citations { citation::bibtex(p) } else { None };

    card(html! {
        strong { (p.title) }
        br;
        (p.authors.join(", "))
        br;
        em { (p.venue) }
        @if p.year != Year::Absent {
            " (" (p.year) ")"
        }
        @if citations && (!url.is_empty() || bib.is_some()) {
            div.cite-actions {
                @if !url.is_empty() {
                    a.access href=(url) target="_blank" rel="noopener" { (link_label) }
                }
                @if let Some(bib) = &bib {
                    @let toggle = citation::toggle_id(group, index, p);
                    button.cite-toggle type="button" data-toggle=(toggle) { "Cite" }
                    pre.bibtex id=(toggle) hidden { (bib) }
                }
            }
        }
    })
}

/// Research themes and projects: title plus bullet details.
pub fn highlights(entries: &[Highlight]) -> Vec<Markup> {
    entries
        .iter()
        .map(|h| {
            card(html! {
                strong { (h.title) }
                (details_list(&h.details))
            })
        })
        .collect()
}

/// Academic service: one card per group, label from the group key.
pub fn groups(groups: &Groups) -> Vec<Markup> {
    groups
        .iter()
        .map(|g| {
            card(html! {
                @if !g.name.is_empty() {
                    strong { (group_label(&g.name)) }
                }
                (details_list(&g.items))
            })
        })
        .collect()
}

/// Free-form list sections (teaching, achievements, talks, activities).
pub fn list_items(items: &[ListItem]) -> Vec<Markup> {
    items.iter().map(list_item).collect()
}

fn list_item(item: &ListItem) -> Markup {
    match (item, item.headline()) {
        (ListItem::Text(text), _) => card(html! { (text) }),
        (ListItem::Record(_), Some(headline)) => {
            let details = item.details();
            card(html! {
                strong { (headline) }
                @if !details.is_empty() {
                    br;
                    small { (details.join(" · ")) }
                }
            })
        }
        (ListItem::Record(_), None) => card(html! { code { (item.raw()) } }),
    }
}

/// Skill chips; grouped skill sets get one card per category.
pub fn skills(skills: &SkillSet) -> Vec<Markup> {
    match skills {
        SkillSet::Flat(items) => items.iter().map(|s| skill_chip(s)).collect(),
        SkillSet::Grouped(groups) => groups
            .iter()
            .map(|g| {
                card(html! {
                    @if !g.name.is_empty() {
                        strong { (group_label(&g.name)) }
                        br;
                    }
                    @for skill in &g.items {
                        (skill_chip(skill))
                    }
                })
            })
            .collect(),
    }
}

fn skill_chip(skill: &str) -> Markup {
    html! { span.skill data-reveal { (skill) } }
}

pub fn references(entries: &[Reference]) -> Vec<Markup> {
    entries
        .iter()
        .map(|r| {
            card(html! {
                strong { (r.name) }
                br;
                (joined(&[&r.designation, &r.institution], ", "))
                @if !r.email.is_empty() {
                    br;
                    a href={ "mailto:" (r.email) } { (r.email) }
                }
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
