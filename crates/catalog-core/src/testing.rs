//! In-crate fakes for the catalog and the watch-state store.

use async_trait::async_trait;
use catalog_models::{
    CatalogId, FavoriteEntry, HistoryEntry, MediaType, RawEntry, RawPage, SearchEntry, VideoCandidate,
};
use catalog_sources::{CatalogSource, HistorySubscription, LocalStore, SourceError, WatchStateStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub fn raw_movie(id: CatalogId, title: &str) -> RawEntry {
    RawEntry {
        id,
        title: Some(title.to_string()),
        release_date: Some("2020-01-01".to_string()),
        original_language: Some("en".to_string()),
        ..Default::default()
    }
}

pub fn raw_show(id: CatalogId, name: &str) -> RawEntry {
    RawEntry {
        id,
        name: Some(name.to_string()),
        first_air_date: Some("2019-06-01".to_string()),
        original_language: Some("en".to_string()),
        ..Default::default()
    }
}

/// Catalog serving canned pages. Unknown pages come back empty.
#[derive(Default)]
pub struct FakeCatalog {
    popular: HashMap<(MediaType, u32), Vec<RawEntry>>,
    genre: HashMap<(MediaType, u32, u32), Vec<RawEntry>>,
    search: HashMap<(String, u32), Vec<SearchEntry>>,
    videos: HashMap<(CatalogId, MediaType), Vec<VideoCandidate>>,
    failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_popular(mut self, kind: MediaType, page: u32, entries: Vec<RawEntry>) -> Self {
        self.popular.insert((kind, page), entries);
        self
    }

    pub fn with_genre(mut self, kind: MediaType, genre_id: u32, page: u32, entries: Vec<RawEntry>) -> Self {
        self.genre.insert((kind, genre_id, page), entries);
        self
    }

    pub fn with_search(mut self, query: &str, page: u32, entries: Vec<SearchEntry>) -> Self {
        self.search.insert((query.to_string(), page), entries);
        self
    }

    pub fn with_videos(mut self, id: CatalogId, kind: MediaType, videos: Vec<VideoCandidate>) -> Self {
        self.videos.insert((id, kind), videos);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), SourceError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn page<T: Clone>(entries: Option<&Vec<T>>, page: u32) -> RawPage<T> {
        RawPage {
            page,
            results: entries.cloned().unwrap_or_default(),
            total_pages: None,
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn fetch_popular(&self, kind: MediaType, page: u32) -> Result<RawPage<RawEntry>, SourceError> {
        self.record(format!("popular:{}:{}", kind, page))?;
        Ok(Self::page(self.popular.get(&(kind, page)), page))
    }

    async fn fetch_by_genre(&self, kind: MediaType, genre_id: u32, page: u32) -> Result<RawPage<RawEntry>, SourceError> {
        self.record(format!("genre:{}:{}:{}", kind, genre_id, page))?;
        Ok(Self::page(self.genre.get(&(kind, genre_id, page)), page))
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<RawPage<SearchEntry>, SourceError> {
        self.record(format!("search:{}:{}", query, page))?;
        Ok(Self::page(self.search.get(&(query.to_string(), page)), page))
    }

    async fn fetch_videos(&self, id: CatalogId, kind: MediaType) -> Result<Vec<VideoCandidate>, SourceError> {
        self.record(format!("videos:{}:{}", kind, id))?;
        Ok(self.videos.get(&(id, kind)).cloned().unwrap_or_default())
    }
}

/// In-memory store whose reads and writes can be made to fail.
pub struct FlakyStore {
    pub inner: LocalStore,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: LocalStore::in_memory(),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), SourceError> {
        if flag.load(Ordering::SeqCst) {
            Err(SourceError::store("store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WatchStateStore for FlakyStore {
    fn store_name(&self) -> &str {
        "flaky"
    }

    async fn upsert_history(&self, entry: &HistoryEntry) -> Result<(), SourceError> {
        Self::check(&self.fail_writes)?;
        self.inner.upsert_history(entry).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, SourceError> {
        Self::check(&self.fail_reads)?;
        self.inner.list_history().await
    }

    async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>, SourceError> {
        Self::check(&self.fail_reads)?;
        self.inner.list_favorites().await
    }

    async fn insert_favorite(&self, entry: &FavoriteEntry) -> Result<(), SourceError> {
        Self::check(&self.fail_writes)?;
        self.inner.insert_favorite(entry).await
    }

    async fn delete_favorite(&self, id: CatalogId) -> Result<(), SourceError> {
        Self::check(&self.fail_writes)?;
        self.inner.delete_favorite(id).await
    }

    async fn is_favorite(&self, id: CatalogId) -> Result<bool, SourceError> {
        Self::check(&self.fail_reads)?;
        self.inner.is_favorite(id).await
    }

    async fn subscribe_history_inserts(&self) -> Result<HistorySubscription, SourceError> {
        self.inner.subscribe_history_inserts().await
    }
}
