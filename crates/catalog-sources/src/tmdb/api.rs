//! Endpoint paths and query parameters for the TMDB v3 API.

use catalog_models::{CatalogId, MediaType};

pub type Query = Vec<(&'static str, String)>;

pub fn popular(kind: MediaType, language: &str, page: u32) -> (String, Query) {
    (
        format!("/{}/popular", kind),
        vec![("language", language.to_string()), ("page", page.to_string())],
    )
}

pub fn discover_by_genre(kind: MediaType, genre_id: u32, language: &str, page: u32) -> (String, Query) {
    (
        format!("/discover/{}", kind),
        vec![
            ("language", language.to_string()),
            ("with_genres", genre_id.to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", page.to_string()),
        ],
    )
}

pub fn search_multi(query: &str, language: &str, include_adult: bool, page: u32) -> (String, Query) {
    (
        "/search/multi".to_string(),
        vec![
            ("query", query.to_string()),
            ("language", language.to_string()),
            ("include_adult", include_adult.to_string()),
            ("page", page.to_string()),
        ],
    )
}

pub fn videos(id: CatalogId, kind: MediaType, video_languages: &[String]) -> (String, Query) {
    let mut query = Vec::new();
    if !video_languages.is_empty() {
        query.push(("include_video_language", video_languages.join(",")));
    }
    (format!("/{}/{}/videos", kind, id), query)
}

/// v4 read access tokens are JWTs and go in the Authorization header;
/// classic v3 keys go in the query string.
pub fn is_bearer_token(api_key: &str) -> bool {
    api_key.starts_with("eyJ")
}
