use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHORS: &str = "Unknown Authors";
pub const NO_ABSTRACT: &str = "No abstract available";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const NO_IDENTIFIER: &str = "No DOI available";
pub const DEFAULT_VENUE: &str = "bioRxiv (Preprint)";
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
pub const DEFAULT_VERSION: &str = "1";
pub const UNKNOWN_LICENSE: &str = "Unknown License";

static FRAGMENTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z](?:\s*,\s*[A-Za-z])+$").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalized description of the paper being summarized.
///
/// Every field holds a displayable value: missing upstream values are replaced
/// by the documented placeholders at construction, so prompts never see nulls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    pub authors: Vec<String>,
    pub abstract_text: String,
    pub publication_date: String,
    pub identifier: String,
    pub venue: String,
    pub category: String,
    pub version: String,
    pub license: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            authors: Vec::new(),
            abstract_text: NO_ABSTRACT.to_string(),
            publication_date: UNKNOWN_DATE.to_string(),
            identifier: NO_IDENTIFIER.to_string(),
            venue: DEFAULT_VENUE.to_string(),
            category: UNKNOWN_CATEGORY.to_string(),
            version: DEFAULT_VERSION.to_string(),
            license: UNKNOWN_LICENSE.to_string(),
        }
    }
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: non_blank(Some(title.into()), UNKNOWN_TITLE),
            ..Self::default()
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = authors.into_iter().map(|a| a.into()).collect::<Vec<_>>();
        self.authors = normalize_author_names(names);
        self
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = non_blank(Some(abstract_text.into()), NO_ABSTRACT);
        self
    }

    pub fn with_publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = non_blank(Some(date.into()), UNKNOWN_DATE);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = non_blank(Some(identifier.into()), NO_IDENTIFIER);
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = non_blank(Some(venue.into()), DEFAULT_VENUE);
        self
    }

    /// Parses an upstream metadata record once, isolating every shape quirk of
    /// the source API in this function.
    pub fn from_raw(raw: RawMetadata) -> Self {
        let mut names = match raw.authors {
            Some(RawAuthors::Joined(joined)) => joined.split(';').map(str::to_string).collect(),
            Some(RawAuthors::List(list)) => list.into_iter().filter_map(RawAuthor::into_name).collect(),
            None => Vec::new(),
        };

        if names.len() > 1 && names.iter().all(|n| n.trim().chars().count() == 1) {
            names = vec![names.iter().map(|n| n.trim()).collect::<Vec<_>>().join(", ")];
        }

        let mut authors = normalize_author_names(names);

        if authors.iter().all(|a| a.chars().count() <= 2) {
            if let Some(corresponding) = raw.author_corresponding.and_then(RawAuthor::into_name) {
                tracing::warn!(
                    "Author list appears malformed, using corresponding author instead"
                );
                authors = normalize_author_names(vec![corresponding]);
            }
        }

        Self {
            title: non_blank(raw.title, UNKNOWN_TITLE),
            authors,
            abstract_text: non_blank(raw.abstract_text, NO_ABSTRACT),
            publication_date: non_blank(raw.date, UNKNOWN_DATE),
            identifier: non_blank(raw.doi, NO_IDENTIFIER),
            venue: non_blank(raw.journal, DEFAULT_VENUE),
            category: non_blank(raw.category, UNKNOWN_CATEGORY),
            version: non_blank(raw.version.map(|v| v.into_string()), DEFAULT_VERSION),
            license: non_blank(raw.license, UNKNOWN_LICENSE),
        }
    }

    pub fn authors_display(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHORS.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    pub fn has_identifier(&self) -> bool {
        self.identifier != NO_IDENTIFIER
    }

    pub fn has_abstract(&self) -> bool {
        self.abstract_text != NO_ABSTRACT
    }

    /// Resolvable link for the identifier, when one exists.
    pub fn url(&self) -> Option<String> {
        self.has_identifier()
            .then(|| format!("https://doi.org/{}", self.identifier))
    }
}

/// Metadata record in the shape delivered by the preprint API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<RawAuthors>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub version: Option<RawScalar>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub author_corresponding: Option<RawAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAuthors {
    List(Vec<RawAuthor>),
    /// `"Smith, J.; Doe, A."` as returned by the details endpoint.
    Joined(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAuthor {
    Name(String),
    Characters(Vec<String>),
    Record {
        #[serde(default)]
        name: Option<RawAuthorName>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAuthorName {
    Text(String),
    Characters(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(i64),
}

impl RawScalar {
    fn into_string(self) -> String {
        match self {
            RawScalar::Text(s) => s,
            RawScalar::Number(n) => n.to_string(),
        }
    }
}

impl RawAuthor {
    fn into_name(self) -> Option<String> {
        let name = match self {
            RawAuthor::Name(name) => name,
            RawAuthor::Characters(chars) => chars.concat(),
            RawAuthor::Record { name } => match name? {
                RawAuthorName::Text(name) => name,
                RawAuthorName::Characters(chars) => chars.concat(),
            },
        };
        let trimmed = name.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Re-joins a name that arrived as comma-separated single letters
/// (`"D, e, K, o, k, e, r"` becomes `"DeKoker"`).
///
/// Best effort: only the exact single-letter pattern is rewritten. Legitimate
/// names never match it, but the casing and spacing of the original name
/// cannot be recovered.
pub fn repair_fragmented_authors(name: &str) -> String {
    let trimmed = name.trim();
    if FRAGMENTED_NAME.is_match(trimmed) {
        trimmed
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect()
    } else {
        trimmed.to_string()
    }
}

fn normalize_author_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| {
            let collapsed = WHITESPACE_RUN.replace_all(name.trim(), " ");
            let repaired = repair_fragmented_authors(&collapsed);
            repaired.trim_end_matches(',').trim().to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn non_blank(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => placeholder.to_string(),
    }
}
