//! Citation formatting: access links, BibTeX records and toggle ids.
//!
//! ## Citation keys
//!
//! A key is the first author's first name token, the year, and a slug of the
//! title, all lowercase:
//!
//! ```text
//! Jane Doe, 2021, "Graph Neural Models!!"  →  jane2021graphneuralmodels
//! ```
//!
//! The name token and the slug keep only `[a-z0-9]`; the slug is capped at 25
//! characters. Keys are a pure function of the publication, so rebuilding
//! never changes them.
//!
//! ## Record layouts
//!
//! DOI-identified entries become `@article` records; arXiv-identified entries
//! become `@misc` records with `eprint` and `archivePrefix`. Anything else has
//! no citation. Braces inside field values are escaped as `\{` and `\}` so a
//! stray brace cannot close a field early.

use crate::document::{Identifier, IdentifierKind, Publication};
use sha2::{Digest, Sha256};

const DOI_RESOLVER: &str = "https://doi.org/";
const ARXIV_ABS: &str = "https://arxiv.org/abs/";

/// Maximum length of the title slug inside a citation key.
pub const SLUG_MAX: usize = 25;

/// External access URL for an identifier; empty when there is none.
pub fn access_url(identifier: Option<&Identifier>) -> String {
    match identifier {
        Some(id) if id.kind == IdentifierKind::Doi => format!("{DOI_RESOLVER}{}", id.value),
        Some(id) if id.kind == IdentifierKind::Arxiv => format!("{ARXIV_ABS}{}", id.value),
        _ => String::new(),
    }
}

/// Lowercase `[a-z0-9]` slug of a title, capped at [`SLUG_MAX`] characters.
pub fn title_slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(SLUG_MAX)
        .collect()
}

/// Deterministic citation key: first-name token, year, title slug.
pub fn citation_key(publication: &Publication) -> String {
    let first_name: String = publication
        .authors
        .first()
        .and_then(|author| author.split_whitespace().next())
        .map(|token| {
            token
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect()
        })
        .unwrap_or_default();
    let first_name = if first_name.is_empty() {
        "anon".to_string()
    } else {
        first_name
    };
    let year = publication
        .year
        .number()
        .map(|y| y.to_string())
        .unwrap_or_default();
    format!("{first_name}{year}{}", title_slug(&publication.title))
}

/// BibTeX record for a publication with a DOI or arXiv identifier.
pub fn bibtex(publication: &Publication) -> Option<String> {
    let identifier = publication.identifier.as_ref()?;
    let key = citation_key(publication);
    let authors = publication.authors.join(" and ");
    let year = publication.year.to_string();

    let fields: Vec<(&str, &str)> = match identifier.kind {
        IdentifierKind::Doi => vec![
            ("title", publication.title.as_str()),
            ("author", authors.as_str()),
            ("journal", publication.venue.as_str()),
            ("year", year.as_str()),
            ("doi", identifier.value.as_str()),
        ],
        IdentifierKind::Arxiv => vec![
            ("title", publication.title.as_str()),
            ("author", authors.as_str()),
            ("year", year.as_str()),
            ("eprint", identifier.value.as_str()),
            ("archivePrefix", "arXiv"),
        ],
        IdentifierKind::Other => return None,
    };
    let entry_type = match identifier.kind {
        IdentifierKind::Doi => "article",
        _ => "misc",
    };

    let body = fields
        .iter()
        .map(|(name, value)| format!("  {name} = {{{}}}", escape_braces(value)))
        .collect::<Vec<_>>()
        .join(",\n");
    Some(format!("@{entry_type}{{{key},\n{body}\n}}"))
}

fn escape_braces(value: &str) -> String {
    value.replace('{', "\\{").replace('}', "\\}")
}

/// Stable DOM id linking a "Cite" button to its BibTeX block.
///
/// Unique per rendered item (group + position) and tied to the content
/// through a short hash of the citation key.
pub fn toggle_id(group: &str, index: usize, publication: &Publication) -> String {
    let digest = Sha256::digest(citation_key(publication).as_bytes());
    let hash = format!("{:x}", digest);
    format!("cite-{group}-{index}-{}", &hash[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Year;
    use crate::test_helpers::*;

    fn graph_paper() -> Publication {
        with_identifier(
            Publication {
                title: "Graph Neural Models!!".into(),
                authors: vec!["Jane Doe".into(), "John Roe".into()],
                venue: "Journal of Graphs".into(),
                year: Year::Number(2021),
                ..Default::default()
            },
            IdentifierKind::Doi,
            "10.1/xyz",
        )
    }

    #[test]
    fn doi_access_url() {
        let paper = graph_paper();
        assert_eq!(
            access_url(paper.identifier.as_ref()),
            "https://doi.org/10.1/xyz"
        );
    }

    #[test]
    fn arxiv_access_url() {
        let paper = with_identifier(publication("x", 2020), IdentifierKind::Arxiv, "2101.00001");
        assert_eq!(
            access_url(paper.identifier.as_ref()),
            "https://arxiv.org/abs/2101.00001"
        );
    }

    #[test]
    fn other_or_missing_access_url_is_empty() {
        let isbn = with_identifier(publication("x", 2020), IdentifierKind::Other, "978-3");
        assert_eq!(access_url(isbn.identifier.as_ref()), "");
        assert_eq!(access_url(None), "");
    }

    #[test]
    fn key_from_first_name_year_and_slug() {
        let key = citation_key(&graph_paper());
        assert!(key.starts_with("jane2021graphneuralmodels"));
        assert_eq!(key, "jane2021graphneuralmodels");
    }

    #[test]
    fn key_is_deterministic() {
        let paper = graph_paper();
        assert_eq!(citation_key(&paper), citation_key(&paper.clone()));
    }

    #[test]
    fn slug_is_capped() {
        let slug = title_slug("A Very Long Title About Many Interesting Things");
        assert_eq!(slug.len(), SLUG_MAX);
        assert_eq!(slug, "averylongtitleaboutmanyin");
    }

    #[test]
    fn slug_drops_non_ascii_and_punctuation() {
        assert_eq!(title_slug("Über-fast: Ψ-nets (v2)"), "berfastnetsv2");
    }

    #[test]
    fn key_without_authors_or_year() {
        let paper = Publication {
            title: "Untitled Draft".into(),
            ..Default::default()
        };
        assert_eq!(citation_key(&paper), "anonuntitleddraft");
    }

    #[test]
    fn key_name_token_is_ascii() {
        let mut paper = graph_paper();
        paper.authors = vec!["José Doe".into()];
        assert!(citation_key(&paper).starts_with("jos2021graphneuralmodels"));
        paper.authors = vec!["Ψ Doe".into()];
        assert!(citation_key(&paper).starts_with("anon2021"));
    }

    #[test]
    fn bibtex_escapes_stray_braces() {
        let mut paper = graph_paper();
        paper.title = "Sets {A, B} and a lone }".into();
        paper.venue = "Proc. {".into();
        let bib = bibtex(&paper).unwrap();
        assert!(bib.contains(r"  title = {Sets \{A, B\} and a lone \}},"));
        assert!(bib.contains(r"  journal = {Proc. \{},"));
        let opens = bib.matches('{').count() - bib.matches(r"\{").count();
        let closes = bib.matches('}').count() - bib.matches(r"\}").count();
        assert_eq!(opens, closes);
    }

    #[test]
    fn doi_bibtex_is_article() {
        let bib = bibtex(&graph_paper()).unwrap();
        assert!(bib.starts_with("@article{jane2021graphneuralmodels,\n"));
        assert!(bib.contains("  title = {Graph Neural Models!!}"));
        assert!(bib.contains("  author = {Jane Doe and John Roe}"));
        assert!(bib.contains("  journal = {Journal of Graphs}"));
        assert!(bib.contains("  year = {2021}"));
        assert!(bib.contains("  doi = {10.1/xyz}"));
        assert!(bib.ends_with("\n}"));
    }

    #[test]
    fn arxiv_bibtex_is_misc_preprint() {
        let mut paper = graph_paper();
        paper.identifier = Some(Identifier {
            kind: IdentifierKind::Arxiv,
            value: "2101.00001".into(),
        });
        let bib = bibtex(&paper).unwrap();
        assert!(bib.starts_with("@misc{"));
        assert!(bib.contains("  eprint = {2101.00001}"));
        assert!(bib.contains("  archivePrefix = {arXiv}"));
        assert!(!bib.contains("journal"));
    }

    #[test]
    fn no_bibtex_without_known_identifier() {
        assert_eq!(bibtex(&publication("x", 2020)), None);
        let isbn = with_identifier(publication("x", 2020), IdentifierKind::Other, "978-3");
        assert_eq!(bibtex(&isbn), None);
    }

    #[test]
    fn toggle_ids_are_stable_and_distinct() {
        let paper = graph_paper();
        let first = toggle_id("journals", 0, &paper);
        assert_eq!(first, toggle_id("journals", 0, &paper));
        assert!(first.starts_with("cite-journals-0-"));
        assert_eq!(first.len(), "cite-journals-0-".len() + 8);

        // Identical content at another position still gets its own id.
        assert_ne!(first, toggle_id("journals", 1, &paper));
        assert_ne!(first, toggle_id("conference_proceedings", 0, &paper));
    }
}
