use async_trait::async_trait;
use catalog_models::{
    CatalogId, FavoriteEntry, HistoryEntry, MediaType, RawEntry, RawPage, SearchEntry, VideoCandidate,
};
use crate::error::SourceError;
use crate::subscription::HistorySubscription;

/// Paginated catalog of movies and shows.
///
/// Implementations return raw payloads; normalization happens in the core.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Popularity-ranked page for one media kind
    async fn fetch_popular(&self, kind: MediaType, page: u32) -> Result<RawPage<RawEntry>, SourceError>;

    /// Popularity-ranked page restricted to a genre
    async fn fetch_by_genre(
        &self,
        kind: MediaType,
        genre_id: u32,
        page: u32,
    ) -> Result<RawPage<RawEntry>, SourceError>;

    /// Multi-type search; results mix movies, shows and people
    async fn search_multi(&self, query: &str, page: u32) -> Result<RawPage<SearchEntry>, SourceError>;

    async fn fetch_videos(&self, id: CatalogId, kind: MediaType) -> Result<Vec<VideoCandidate>, SourceError>;
}

/// Remote persisted store for watch history and favorites.
#[async_trait]
pub trait WatchStateStore: Send + Sync {
    fn store_name(&self) -> &str;

    /// Insert or overwrite the history row for `entry.id`
    async fn upsert_history(&self, entry: &HistoryEntry) -> Result<(), SourceError>;

    /// Newest first
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, SourceError>;

    /// Newest first
    async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>, SourceError>;

    async fn insert_favorite(&self, entry: &FavoriteEntry) -> Result<(), SourceError>;

    async fn delete_favorite(&self, id: CatalogId) -> Result<(), SourceError>;

    async fn is_favorite(&self, id: CatalogId) -> Result<bool, SourceError>;

    /// Deliver history rows inserted by any writer from now on.
    /// Delivery stops when the returned handle is dropped or unsubscribed.
    async fn subscribe_history_inserts(&self) -> Result<HistorySubscription, SourceError>;
}
