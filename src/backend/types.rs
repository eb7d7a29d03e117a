//! Shared types for catalog communication

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which catalog field a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Genre];

    /// Field prefix understood by the catalog `q` parameter
    pub fn query_prefix(self) -> &'static str {
        match self {
            SearchField::Title => "intitle",
            SearchField::Author => "inauthor",
            SearchField::Genre => "subject",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Genre => "Genre",
        };
        f.write_str(label)
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" | "intitle" => Ok(SearchField::Title),
            "author" | "inauthor" => Ok(SearchField::Author),
            "genre" | "subject" => Ok(SearchField::Genre),
            other => Err(format!("Unknown search field: {}", other)),
        }
    }
}

/// One book as shown in the result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

/// Parameters of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub field: SearchField,
    pub text: String,
    pub limit: u32,
    pub offset: u32,
}

impl PageQuery {
    /// Value of the `q` parameter, e.g. `intitle:Dune`
    pub fn q(&self) -> String {
        format!("{}:{}", self.field.query_prefix(), self.text)
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub image_links: Option<ImageLinks>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl From<Volume> for BookSummary {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        Self {
            id: volume.id,
            title: info.title,
            authors: info.authors,
            thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
            description: info.description,
        }
    }
}
