use serde::{Deserialize, Serialize};

/// Clip category as reported by the catalog video listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VideoType {
    Trailer,
    Teaser,
    Clip,
    Featurette,
    #[serde(rename = "Behind the Scenes")]
    BehindTheScenes,
    Bloopers,
    #[serde(other)]
    Other,
}

/// A playable clip attached to a title. Fetched per title, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoCandidate {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: VideoType,
    #[serde(rename = "iso_639_1", default)]
    pub language_code: String,
    #[serde(rename = "iso_3166_1", default)]
    pub region_code: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListing {
    #[serde(default)]
    pub results: Vec<VideoCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_listing_deserialize() {
        let body = r#"{"id": 550, "results": [
            {"iso_639_1": "es", "iso_3166_1": "MX", "name": "Tráiler oficial", "key": "abc",
             "site": "YouTube", "type": "Trailer", "official": true},
            {"iso_639_1": "en", "iso_3166_1": "US", "name": "BTS", "key": "def",
             "site": "YouTube", "type": "Behind the Scenes"},
            {"iso_639_1": "en", "iso_3166_1": "US", "name": "Promo", "key": "ghi",
             "site": "Vimeo", "type": "Opening Credits"}
        ]}"#;
        let listing: VideoListing = serde_json::from_str(body).unwrap();
        assert_eq!(listing.results.len(), 3);
        assert_eq!(listing.results[0].video_type, VideoType::Trailer);
        assert_eq!(listing.results[0].region_code, "MX");
        assert_eq!(listing.results[1].video_type, VideoType::BehindTheScenes);
        assert_eq!(listing.results[2].video_type, VideoType::Other);
    }
}
