//! Payload shapes returned by the catalog API before normalization.
//!
//! Movies and shows share one loose shape with optional fields; search results
//! add a `media_type` discriminator and a person variant.

use serde::Deserialize;
use crate::media::CatalogId;

#[derive(Debug, Clone, Deserialize)]
pub struct RawPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// A movie or show entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    pub id: CatalogId,
    pub title: Option<String>,          // movies
    pub name: Option<String>,           // shows
    pub release_date: Option<String>,   // movies
    pub first_air_date: Option<String>, // shows
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub original_language: Option<String>,
    pub vote_average: Option<f32>,
    /// Present on `known_for` entries of a person result
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPerson {
    pub id: CatalogId,
    pub name: Option<String>,
    #[serde(default)]
    pub known_for: Vec<RawEntry>,
}

/// One entry of a multi-type search page, discriminated by `media_type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum SearchEntry {
    Movie(RawEntry),
    Tv(RawEntry),
    Person(RawPerson),
    #[serde(other)]
    Unsupported,
}
