//! Section identifiers and the labels derived from them.
//!
//! Every content section of the page has a snake_case id that doubles as the
//! container id in the generated HTML, the anchor target in the navigation,
//! and the top-level key in the profile document:
//!
//! - `talks_and_presentations` → nav label "TALKS AND PRESENTATIONS"
//! - `academic_service` group `program_committee` → "program committee"
//!
//! [`Section::ALL`] is the canonical page order, used when the document does
//! not list its own `navigation`.

/// A content section of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Announcements,
    Experience,
    Education,
    Publications,
    Research,
    Projects,
    AcademicService,
    Teaching,
    Achievements,
    TalksAndPresentations,
    Activities,
    TechnicalSkills,
    References,
}

impl Section {
    /// Canonical page order.
    pub const ALL: [Section; 14] = [
        Section::About,
        Section::Announcements,
        Section::Experience,
        Section::Education,
        Section::Publications,
        Section::Research,
        Section::Projects,
        Section::AcademicService,
        Section::Teaching,
        Section::Achievements,
        Section::TalksAndPresentations,
        Section::Activities,
        Section::TechnicalSkills,
        Section::References,
    ];

    /// Container id and document key.
    pub fn id(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Announcements => "announcements",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Publications => "publications",
            Section::Research => "research",
            Section::Projects => "projects",
            Section::AcademicService => "academic_service",
            Section::Teaching => "teaching",
            Section::Achievements => "achievements",
            Section::TalksAndPresentations => "talks_and_presentations",
            Section::Activities => "activities",
            Section::TechnicalSkills => "technical_skills",
            Section::References => "references",
        }
    }

    /// Heading shown above the container.
    pub fn heading(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Announcements => "Announcements",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Publications => "Publications",
            Section::Research => "Research",
            Section::Projects => "Projects",
            Section::AcademicService => "Academic Service",
            Section::Teaching => "Teaching",
            Section::Achievements => "Achievements",
            Section::TalksAndPresentations => "Talks and Presentations",
            Section::Activities => "Activities",
            Section::TechnicalSkills => "Technical Skills",
            Section::References => "References",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Navigation label for a section id: underscores → spaces, upper-cased.
///
/// Works on any id, including ones the page has no renderer for.
pub fn nav_label(id: &str) -> String {
    id.replace('_', " ").to_uppercase()
}

/// Display label for a group key: underscores → spaces, case preserved.
pub fn group_label(key: &str) -> String {
    key.replace('_', " ")
}
