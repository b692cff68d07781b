//! The profile document: every entity the page renders.
//!
//! The document is a single JSON file (`index.json` by default) authored by
//! hand, so its shape drifts: years are sometimes strings, affiliations are
//! sometimes a single line, optional sections are missing or `null`, and
//! skills come either as a flat list or keyed by category. Deserialization
//! absorbs all of that here so renderers never have to.
//!
//! ## Leniency rules
//!
//! - Every list-valued field defaults to an empty sequence when absent or `null`.
//! - Text fields accept strings, numbers (rendered in decimal) and `null` (empty).
//! - [`Year`] keeps non-numeric values for display but reports no number,
//!   so such entries sort as "absent", never as zero.
//! - Object key order is preserved for [`Groups`] and [`ListItem::Record`],
//!   since the author's ordering is the display ordering.
//!
//! Everything is read-only after load.

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// The whole profile document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "lenient")]
    pub about: Profile,
    /// Optional bio paragraphs (Markdown). Accepts a string or a list.
    #[serde(deserialize_with = "lines")]
    pub summary: Vec<String>,
    /// Explicit section order for the top navigation.
    #[serde(deserialize_with = "lines")]
    pub navigation: Vec<String>,
    /// Hand-written announcements. When empty, the feed is derived from publications.
    #[serde(deserialize_with = "lenient")]
    pub announcements: Vec<ListItem>,
    #[serde(deserialize_with = "lenient")]
    pub publications: Publications,
    #[serde(deserialize_with = "lenient")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "lenient")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient")]
    pub research: Vec<Highlight>,
    #[serde(deserialize_with = "lenient")]
    pub projects: Vec<Highlight>,
    #[serde(deserialize_with = "lenient")]
    pub academic_service: Groups,
    #[serde(deserialize_with = "lenient")]
    pub teaching: Vec<ListItem>,
    #[serde(deserialize_with = "lenient")]
    pub achievements: Vec<ListItem>,
    #[serde(deserialize_with = "lenient")]
    pub talks_and_presentations: Vec<ListItem>,
    #[serde(deserialize_with = "lenient")]
    pub activities: Vec<ListItem>,
    #[serde(deserialize_with = "lenient")]
    pub technical_skills: SkillSet,
    #[serde(deserialize_with = "lenient")]
    pub references: Vec<Reference>,
}

/// The hero block: who the page is about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    /// One line per affiliation (department, institution, ...).
    #[serde(deserialize_with = "lines")]
    pub affiliation: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "lenient")]
    pub photo: Photo,
}

impl Profile {
    /// Alt text for the portrait, falling back to the person's name.
    pub fn photo_alt(&self) -> &str {
        if self.photo.alt.is_empty() {
            &self.name
        } else {
            &self.photo.alt
        }
    }
}

/// Portrait reference. Accepts `{"src": ..., "alt": ...}` or a bare path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Photo {
    pub src: String,
    pub alt: String,
}

impl<'de> Deserialize<'de> for Photo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let photo = match Value::deserialize(deserializer)? {
            Value::String(src) => Photo {
                src,
                alt: String::new(),
            },
            Value::Object(fields) => Photo {
                src: fields.get("src").map(scalar_text).unwrap_or_default(),
                alt: fields.get("alt").map(scalar_text).unwrap_or_default(),
            },
            _ => Photo::default(),
        };
        Ok(photo)
    }
}

/// The two publication collections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Publications {
    #[serde(deserialize_with = "lenient")]
    pub journals: Vec<Publication>,
    #[serde(deserialize_with = "lenient")]
    pub conference_proceedings: Vec<Publication>,
}

impl Publications {
    pub fn is_empty(&self) -> bool {
        self.journals.is_empty() && self.conference_proceedings.is_empty()
    }

    /// Journals then conference proceedings, in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Publication> {
        self.journals.iter().chain(&self.conference_proceedings)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Publication {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "lines")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub venue: String,
    pub year: Year,
    /// Raw status string; see [`Publication::status`].
    #[serde(deserialize_with = "text")]
    pub status: String,
    #[serde(deserialize_with = "lenient")]
    pub identifier: Option<Identifier>,
}

impl Publication {
    /// The recognized status, by exact match. Anything else is `None`.
    pub fn status(&self) -> Option<PublicationStatus> {
        PublicationStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationStatus {
    Published,
    UnderReview,
    Preprint,
}

impl PublicationStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "published" => Some(Self::Published),
            "under_review" => Some(Self::UnderReview),
            "preprint" => Some(Self::Preprint),
            _ => None,
        }
    }
}

/// Publication year as authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Year {
    #[default]
    Absent,
    Number(i64),
    /// A non-numeric value such as `"in press"`. Displayed, never sorted on.
    Text(String),
}

impl Year {
    /// The numeric year, if the document gave one.
    pub fn number(&self) -> Option<i64> {
        match self {
            Year::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Absent => Ok(()),
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let year = match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_i64() {
                Some(y) => Year::Number(y),
                None => match n.as_f64() {
                    Some(y) if y.is_finite() && y.fract() == 0.0 => Year::Number(y as i64),
                    _ => Year::Text(n.to_string()),
                },
            },
            Value::String(s) if s.is_empty() => Year::Absent,
            Value::String(s) => Year::Text(s),
            _ => Year::Absent,
        };
        Ok(year)
    }
}

/// External identifier of a publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: IdentifierKind,
    #[serde(deserialize_with = "text")]
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentifierKind {
    Doi,
    Arxiv,
    #[default]
    Other,
}

impl<'de> Deserialize<'de> for IdentifierKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = scalar_text(&Value::deserialize(deserializer)?);
        let kind = if raw.eq_ignore_ascii_case("doi") {
            IdentifierKind::Doi
        } else if raw.eq_ignore_ascii_case("arxiv") {
            IdentifierKind::Arxiv
        } else {
            IdentifierKind::Other
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "text")]
    pub role: String,
    #[serde(deserialize_with = "text")]
    pub institution: String,
    #[serde(deserialize_with = "text")]
    pub location: String,
    #[serde(deserialize_with = "text")]
    pub period: String,
    #[serde(deserialize_with = "lines")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "text")]
    pub degree: String,
    #[serde(deserialize_with = "text")]
    pub institution: String,
    #[serde(deserialize_with = "text")]
    pub location: String,
    #[serde(deserialize_with = "text")]
    pub period: String,
    #[serde(deserialize_with = "text")]
    pub year: String,
    #[serde(deserialize_with = "lines")]
    pub details: Vec<String>,
}

impl Education {
    /// Period when given, the single year otherwise.
    pub fn when(&self) -> &str {
        if self.period.is_empty() {
            &self.year
        } else {
            &self.period
        }
    }
}

/// A titled entry with bullet details (research themes, projects).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Highlight {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "lines")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Reference {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub designation: String,
    #[serde(deserialize_with = "text")]
    pub institution: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
}

/// A named list, e.g. `"program_committee": ["ICML 2023", ...]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub items: Vec<String>,
}

/// Ordered `name → items` pairs from a JSON object.
///
/// A bare list is accepted as a single unnamed group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups(pub Vec<Group>);

impl Groups {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Groups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserializer.deserialize_any(GroupedVisitor)? {
            SkillSet::Flat(items) if items.is_empty() => Ok(Groups::default()),
            SkillSet::Flat(items) => Ok(Groups(vec![Group {
                name: String::new(),
                items,
            }])),
            SkillSet::Grouped(groups) => Ok(groups),
        }
    }
}

/// Technical skills: a flat list in some documents, category-keyed in others.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillSet {
    Flat(Vec<String>),
    Grouped(Groups),
}

impl Default for SkillSet {
    fn default() -> Self {
        SkillSet::Flat(Vec::new())
    }
}

impl SkillSet {
    pub fn is_empty(&self) -> bool {
        match self {
            SkillSet::Flat(skills) => skills.is_empty(),
            SkillSet::Grouped(groups) => groups.is_empty(),
        }
    }

    /// Total number of skills across all categories.
    pub fn len(&self) -> usize {
        match self {
            SkillSet::Flat(skills) => skills.len(),
            SkillSet::Grouped(groups) => groups.iter().map(|g| g.items.len()).sum(),
        }
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GroupedVisitor)
    }
}

/// Visits either a list (flat) or an object (grouped, order-preserving).
struct GroupedVisitor;

impl<'de> Visitor<'de> for GroupedVisitor {
    type Value = SkillSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of strings or an object of string lists")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<SkillSet, E> {
        Ok(SkillSet::default())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<SkillSet, E> {
        Ok(SkillSet::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SkillSet, A::Error> {
        let mut items = Vec::new();
        while let Some(Lines(entry)) = seq.next_element()? {
            items.extend(entry);
        }
        Ok(SkillSet::Flat(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SkillSet, A::Error> {
        let mut groups = Vec::new();
        while let Some((name, Lines(items))) = map.next_entry::<String, Lines>()? {
            groups.push(Group { name, items });
        }
        Ok(SkillSet::Grouped(Groups(groups)))
    }
}

/// An entry of a free-form list section (teaching, talks, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Text(String),
    Record(Map<String, Value>),
}

/// Keys that name a record, in lookup priority.
const HEADLINE_KEYS: &[&str] = &["title", "name", "role", "course", "award"];

impl ListItem {
    /// The record's naming field, or the whole text for plain entries.
    pub fn headline(&self) -> Option<&str> {
        match self {
            ListItem::Text(text) => Some(text.as_str()),
            ListItem::Record(fields) => HEADLINE_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str)),
        }
    }

    /// Remaining scalar fields of a record, in document order.
    pub fn details(&self) -> Vec<String> {
        let ListItem::Record(fields) = self else {
            return Vec::new();
        };
        let headline_key = HEADLINE_KEYS
            .iter()
            .find(|key| fields.get(**key).is_some_and(Value::is_string));
        fields
            .iter()
            .filter(|(key, _)| Some(&key.as_str()) != headline_key)
            .map(|(_, value)| scalar_text(value))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Compact JSON of a record, for entries with no recognizable shape.
    pub fn raw(&self) -> String {
        match self {
            ListItem::Text(text) => text.clone(),
            ListItem::Record(fields) => Value::Object(fields.clone()).to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ListItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let item = match Value::deserialize(deserializer)? {
            Value::Object(fields) => ListItem::Record(fields),
            Value::Array(values) => ListItem::Text(Value::Array(values).to_string()),
            other => ListItem::Text(scalar_text(&other)),
        };
        Ok(item)
    }
}

// ============================================================================
// Field deserializers
// ============================================================================

/// Text of a scalar JSON value; empty for null and containers.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// `null` or missing → `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

fn lines<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Lines::deserialize(deserializer).map(|l| l.0)
}

/// A string or a list of strings, flattened to a list.
struct Lines(Vec<String>);

impl<'de> Deserialize<'de> for Lines {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = match Value::deserialize(deserializer)? {
            Value::Array(values) => values
                .iter()
                .map(scalar_text)
                .filter(|s| !s.is_empty())
                .collect(),
            Value::Null => Vec::new(),
            other => {
                let single = scalar_text(&other);
                if single.is_empty() {
                    Vec::new()
                } else {
                    vec![single]
                }
            }
        };
        Ok(Lines(lines))
    }
}
