use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric catalog identifier. Only unique within one `MediaType` namespace.
pub type CatalogId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("Unknown media type: {}", other)),
        }
    }
}

/// Composite identity of a catalog entry.
///
/// Two items sharing a numeric id but differing in media type are distinct
/// entities; every dedup in the workspace goes through this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub id: CatalogId,
    pub media_type: MediaType,
}

impl ItemKey {
    pub fn new(id: CatalogId, media_type: MediaType) -> Self {
        Self { id, media_type }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.media_type)
    }
}

/// Canonical, immutable representation of a movie or show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: CatalogId,
    pub media_type: MediaType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    /// ISO-639-1 code; empty when the source did not report one
    #[serde(default)]
    pub original_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
}

impl ContentItem {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id, self.media_type)
    }

    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}
