use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::media::{CatalogId, ContentItem, MediaType};

/// One row of the favorites list, keyed by bare `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub id: CatalogId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "crate::dates::deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FavoriteEntry {
    pub fn from_item(item: &ContentItem, user_name: &str) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            poster_path: item.poster_path.clone(),
            release_date: item.release_date,
            media_type: item.media_type,
            user_name: user_name.to_string(),
            created_at: None,
        }
    }
}

impl From<&FavoriteEntry> for ContentItem {
    fn from(entry: &FavoriteEntry) -> Self {
        ContentItem {
            id: entry.id,
            media_type: entry.media_type,
            title: entry.title.clone(),
            release_date: entry.release_date,
            poster_path: entry.poster_path.clone(),
            backdrop_path: None,
            overview: String::new(),
            original_language: String::new(),
            vote_average: None,
        }
    }
}
