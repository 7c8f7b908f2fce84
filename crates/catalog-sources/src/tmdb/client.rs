use crate::error::{check_status, SourceError};
use crate::tmdb::api::{self, Query};
use crate::traits::CatalogSource;
use async_trait::async_trait;
use catalog_config::CatalogConfig;
use catalog_models::{CatalogId, MediaType, RawEntry, RawPage, SearchEntry, VideoCandidate, VideoListing};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Clone)]
pub struct TmdbClient {
    http: Arc<Client>,
    base_url: String,
    api_key: String,
    language: String,
    video_languages: Vec<String>,
    include_adult: bool,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: String, language: String) -> Self {
        Self {
            http: Arc::new(Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            language,
            video_languages: vec!["es".to_string(), "en".to_string()],
            include_adult: false,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut client = Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.language.clone(),
        );
        client.video_languages = config.video_languages.clone();
        client.include_adult = config.include_adult;
        client
    }

    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str, mut query: Query) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.http.get(&url);
        if api::is_bearer_token(&self.api_key) {
            request = request.bearer_auth(&self.api_key);
        } else {
            query.push(("api_key", self.api_key.clone()));
        }

        trace!(endpoint, "GET catalog");
        let response = request.query(&query).send().await?;
        if let Some(err) = check_status(response.status().as_u16(), endpoint) {
            return Err(err);
        }
        response.json::<T>().await.map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_popular(&self, kind: MediaType, page: u32) -> Result<RawPage<RawEntry>, SourceError> {
        let (endpoint, query) = api::popular(kind, &self.language, page);
        let raw: RawPage<RawEntry> = self.fetch_json(&endpoint, query).await?;
        debug!(%kind, page, results = raw.results.len(), "Fetched popular page");
        Ok(raw)
    }

    async fn fetch_by_genre(
        &self,
        kind: MediaType,
        genre_id: u32,
        page: u32,
    ) -> Result<RawPage<RawEntry>, SourceError> {
        let (endpoint, query) = api::discover_by_genre(kind, genre_id, &self.language, page);
        let raw: RawPage<RawEntry> = self.fetch_json(&endpoint, query).await?;
        debug!(%kind, genre_id, page, results = raw.results.len(), "Fetched genre page");
        Ok(raw)
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<RawPage<SearchEntry>, SourceError> {
        let (endpoint, params) = api::search_multi(query, &self.language, self.include_adult, page);
        let raw: RawPage<SearchEntry> = self.fetch_json(&endpoint, params).await?;
        debug!(query, page, results = raw.results.len(), "Fetched search page");
        Ok(raw)
    }

    async fn fetch_videos(&self, id: CatalogId, kind: MediaType) -> Result<Vec<VideoCandidate>, SourceError> {
        let (endpoint, query) = api::videos(id, kind, &self.video_languages);
        let listing: VideoListing = self.fetch_json(&endpoint, query).await?;
        debug!(id, %kind, videos = listing.results.len(), "Fetched video listing");
        Ok(listing.results)
    }
}
