//! Computed views over the document.
//!
//! Everything here borrows from the [`Document`]; nothing is copied out of it
//! or reordered in place.
//!
//! ## Recent items
//!
//! Journals and conference proceedings are concatenated (journals first),
//! entries without a numeric year are dropped, and the rest are sorted by
//! year, newest first. The sort is stable, so two papers from the same year
//! keep the order the author wrote them in. The first `limit` survive.
//!
//! ## Status groups
//!
//! Journals are bucketed by an exact match on `status`. An entry whose status
//! is missing or anything other than `published`, `under_review` or
//! `preprint` lands in no bucket at all.

use crate::document::{Document, IdentifierKind, ListItem, Publication, PublicationStatus};
use crate::naming::Section;

/// Default size of the announcement feed.
pub const RECENT_LIMIT: usize = 5;

/// Most recent dated publications across both collections, newest first.
pub fn recent_items<'a>(
    journals: &'a [Publication],
    conferences: &'a [Publication],
    limit: usize,
) -> Vec<&'a Publication> {
    let mut dated: Vec<&Publication> = journals
        .iter()
        .chain(conferences)
        .filter(|p| p.year.number().is_some())
        .collect();
    // `sort_by` is stable: equal years keep input order.
    dated.sort_by(|a, b| b.year.number().cmp(&a.year.number()));
    dated.truncate(limit);
    dated
}

/// Journal entries bucketed by status.
#[derive(Debug, Default)]
pub struct StatusGroups<'a> {
    pub published: Vec<&'a Publication>,
    pub under_review: Vec<&'a Publication>,
    pub preprint: Vec<&'a Publication>,
}

impl StatusGroups<'_> {
    pub fn len(&self) -> usize {
        self.published.len() + self.under_review.len() + self.preprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn group_by_status(journals: &[Publication]) -> StatusGroups<'_> {
    let mut groups = StatusGroups::default();
    for publication in journals {
        match publication.status() {
            Some(PublicationStatus::Published) => groups.published.push(publication),
            Some(PublicationStatus::UnderReview) => groups.under_review.push(publication),
            Some(PublicationStatus::Preprint) => groups.preprint.push(publication),
            None => {}
        }
    }
    groups
}

/// One entry of the announcement feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub headline: String,
    pub detail: String,
}

impl Announcement {
    fn from_publication(publication: &Publication) -> Self {
        Self {
            headline: publication.title.clone(),
            detail: format!("{} ({})", publication.venue, publication.year),
        }
    }

    fn from_item(item: &ListItem) -> Self {
        match item.headline() {
            Some(headline) => Self {
                headline: headline.to_string(),
                detail: item.details().join(" · "),
            },
            None => Self {
                headline: item.raw(),
                detail: String::new(),
            },
        }
    }
}

/// The announcement feed: hand-written entries when the document has any,
/// otherwise derived from the most recent publications.
pub fn announcements(document: &Document, limit: usize) -> Vec<Announcement> {
    if !document.announcements.is_empty() {
        return document
            .announcements
            .iter()
            .take(limit)
            .map(Announcement::from_item)
            .collect();
    }
    let publications = &document.publications;
    recent_items(
        &publications.journals,
        &publications.conference_proceedings,
        limit,
    )
    .into_iter()
    .map(Announcement::from_publication)
    .collect()
}

/// Number of source items behind a section.
///
/// Counts document entries, not rendered fragments: publication group
/// headings are not counted, and announcements count the feed as built.
pub fn section_len(document: &Document, section: Section, announcement_limit: usize) -> usize {
    match section {
        Section::About => document.summary.len(),
        Section::Announcements => announcements(document, announcement_limit).len(),
        Section::Experience => document.experience.len(),
        Section::Education => document.education.len(),
        Section::Publications => document.publications.iter().count(),
        Section::Research => document.research.len(),
        Section::Projects => document.projects.len(),
        Section::AcademicService => document.academic_service.0.len(),
        Section::Teaching => document.teaching.len(),
        Section::Achievements => document.achievements.len(),
        Section::TalksAndPresentations => document.talks_and_presentations.len(),
        Section::Activities => document.activities.len(),
        Section::TechnicalSkills => document.technical_skills.len(),
        Section::References => document.references.len(),
    }
}

/// Which publication list an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Journals,
    ConferenceProceedings,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Collection::Journals => "Journal",
            Collection::ConferenceProceedings => "Conference",
        }
    }
}

/// Something in the document that renders, but not the way its author
/// probably expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DataGap {
    pub collection: Collection,
    /// 1-based position within the collection.
    pub position: usize,
    pub title: String,
    pub kind: GapKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GapKind {
    /// Year missing or not an integer; excluded from the announcement feed.
    NonNumericYear(String),
    /// Journal status outside the three known groups; hidden when grouping.
    UnmatchedStatus(String),
    /// Identifier of a kind that yields no link and no BibTeX.
    NoCitation(String),
}

/// Every data gap in both publication lists, in document order.
pub fn data_gaps(document: &Document) -> Vec<DataGap> {
    let publications = &document.publications;
    let lists = [
        (Collection::Journals, &publications.journals),
        (Collection::ConferenceProceedings, &publications.conference_proceedings),
    ];
    let mut gaps = Vec::new();
    for (collection, list) in lists {
        for (i, publication) in list.iter().enumerate() {
            let gap = |kind| DataGap {
                collection,
                position: i + 1,
                title: publication.title.clone(),
                kind,
            };
            if publication.year.number().is_none() {
                gaps.push(gap(GapKind::NonNumericYear(publication.year.to_string())));
            }
            if collection == Collection::Journals
                && !publication.status.is_empty()
                && publication.status().is_none()
            {
                gaps.push(gap(GapKind::UnmatchedStatus(publication.status.clone())));
            }
            if let Some(identifier) = &publication.identifier {
                if identifier.kind == IdentifierKind::Other {
                    gaps.push(gap(GapKind::NoCitation(identifier.value.clone())));
                }
            }
        }
    }
    gaps
}
