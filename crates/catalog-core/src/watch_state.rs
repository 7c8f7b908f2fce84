//! History and favorites reconciliation against the watch-state store.
//!
//! History writes are fire-and-forget: a failure is logged and the caller
//! carries on. Favorite membership only changes locally after the store
//! confirms the write.

use catalog_models::{ContentItem, FavoriteEntry, HistoryEntry};
use catalog_sources::{HistorySubscription, WatchStateStore};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteState {
    /// Membership not checked yet
    #[default]
    Unknown,
    Favorited,
    NotFavorited,
}

impl FavoriteState {
    pub fn is_favorite(&self) -> bool {
        matches!(self, FavoriteState::Favorited)
    }

    fn from_membership(present: bool) -> Self {
        if present {
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        }
    }
}

pub struct WatchStateSync {
    store: Arc<dyn WatchStateStore>,
}

impl WatchStateSync {
    pub fn new(store: Arc<dyn WatchStateStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &str {
        self.store.store_name()
    }

    /// Upsert the history row for `item`, attributed to `user`.
    /// Returns whether the store accepted it.
    pub async fn record_history(&self, item: &ContentItem, user: &str) -> bool {
        let entry = HistoryEntry::from_item(item, user);
        match self.store.upsert_history(&entry).await {
            Ok(()) => {
                debug!(id = item.id, media_type = %item.media_type, user, "History recorded");
                true
            }
            Err(e) => {
                error!(id = item.id, media_type = %item.media_type, "Failed to record history: {}", e);
                false
            }
        }
    }

    /// A failed lookup counts as not favorited
    pub async fn check_favorite(&self, item: &ContentItem) -> FavoriteState {
        match self.store.is_favorite(item.id).await {
            Ok(present) => FavoriteState::from_membership(present),
            Err(e) => {
                warn!(id = item.id, "Favorite membership check failed: {}", e);
                FavoriteState::NotFavorited
            }
        }
    }

    /// Flip membership of `item`. The returned state reflects what the store
    /// confirmed; on any failure it is `current` unchanged.
    pub async fn toggle_favorite(&self, item: &ContentItem, user: &str, current: FavoriteState) -> FavoriteState {
        let present = match current {
            FavoriteState::Favorited => true,
            FavoriteState::NotFavorited => false,
            FavoriteState::Unknown => match self.store.is_favorite(item.id).await {
                Ok(present) => present,
                Err(e) => {
                    warn!(id = item.id, "Cannot toggle favorite, membership unknown: {}", e);
                    return current;
                }
            },
        };

        if present {
            match self.store.delete_favorite(item.id).await {
                Ok(()) => {
                    info!(id = item.id, title = %item.title, "Removed from favorites");
                    FavoriteState::NotFavorited
                }
                Err(e) => {
                    error!(id = item.id, "Failed to remove favorite: {}", e);
                    current
                }
            }
        } else {
            let entry = FavoriteEntry::from_item(item, user);
            match self.store.insert_favorite(&entry).await {
                Ok(()) => {
                    info!(id = item.id, title = %item.title, user, "Added to favorites");
                    FavoriteState::Favorited
                }
                Err(e) => {
                    error!(id = item.id, "Failed to save favorite: {}", e);
                    current
                }
            }
        }
    }

    /// Newest first; empty when the store cannot be read
    pub async fn history_items(&self) -> Vec<ContentItem> {
        match self.store.list_history().await {
            Ok(rows) => rows.iter().map(ContentItem::from).collect(),
            Err(e) => {
                error!("Failed to load history: {}", e);
                Vec::new()
            }
        }
    }

    /// Newest first; empty when the store cannot be read
    pub async fn favorite_items(&self) -> Vec<ContentItem> {
        match self.store.list_favorites().await {
            Ok(rows) => rows.iter().map(ContentItem::from).collect(),
            Err(e) => {
                error!("Failed to load favorites: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn subscribe_history(&self) -> Option<HistorySubscription> {
        match self.store.subscribe_history_inserts().await {
            Ok(subscription) => {
                debug!(store = self.store.store_name(), "Subscribed to history inserts");
                Some(subscription)
            }
            Err(e) => {
                warn!("History push subscription failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_entry;
    use crate::testing::{raw_movie, raw_show, FlakyStore};
    use catalog_models::MediaType;

    fn setup() -> (Arc<FlakyStore>, WatchStateSync) {
        let store = Arc::new(FlakyStore::new());
        let sync = WatchStateSync::new(store.clone());
        (store, sync)
    }

    fn movie(id: u64) -> ContentItem {
        normalize_entry(raw_movie(id, "Heat"), Some(MediaType::Movie))
    }

    #[tokio::test]
    async fn test_toggle_twice_leaves_no_rows() {
        let (store, sync) = setup();
        let item = movie(1);

        let state = sync.check_favorite(&item).await;
        assert_eq!(state, FavoriteState::NotFavorited);

        let state = sync.toggle_favorite(&item, "ana", state).await;
        assert_eq!(state, FavoriteState::Favorited);
        assert_eq!(store.inner.list_favorites().await.unwrap().len(), 1);

        let state = sync.toggle_favorite(&item, "ana", state).await;
        assert_eq!(state, FavoriteState::NotFavorited);
        assert!(store.inner.list_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_state() {
        let (store, sync) = setup();
        let item = movie(2);
        store.set_fail_writes(true);

        let state = sync.toggle_favorite(&item, "ana", FavoriteState::NotFavorited).await;
        assert_eq!(state, FavoriteState::NotFavorited);

        store.set_fail_writes(false);
        let state = sync.toggle_favorite(&item, "ana", state).await;
        assert_eq!(state, FavoriteState::Favorited);

        store.set_fail_writes(true);
        let state = sync.toggle_favorite(&item, "ana", state).await;
        assert_eq!(state, FavoriteState::Favorited);
        assert!(store.inner.is_favorite(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_state_checks_membership_first() {
        let (store, sync) = setup();
        let item = movie(3);
        store.inner.insert_favorite(&FavoriteEntry::from_item(&item, "luis")).await.unwrap();

        let state = sync.toggle_favorite(&item, "ana", FavoriteState::Unknown).await;
        assert_eq!(state, FavoriteState::NotFavorited);

        store.set_fail_reads(true);
        let state = sync.toggle_favorite(&item, "ana", FavoriteState::Unknown).await;
        assert_eq!(state, FavoriteState::Unknown);
    }

    #[tokio::test]
    async fn test_failed_membership_check_is_not_favorited() {
        let (store, sync) = setup();
        store.set_fail_reads(true);
        assert_eq!(sync.check_favorite(&movie(4)).await, FavoriteState::NotFavorited);
    }

    #[tokio::test]
    async fn test_record_history_overwrites_by_id() {
        let (store, sync) = setup();
        let show = normalize_entry(raw_show(5, "Dark"), Some(MediaType::Tv));

        assert!(sync.record_history(&movie(5), "ana").await);
        assert!(sync.record_history(&show, "luis").await);

        let rows = store.inner.list_history().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].media_type, MediaType::Tv);
        assert_eq!(rows[0].scanned_by, "luis");

        store.set_fail_writes(true);
        assert!(!sync.record_history(&movie(6), "ana").await);
    }

    #[tokio::test]
    async fn test_listing_failure_is_empty() {
        let (store, sync) = setup();
        sync.record_history(&movie(7), "ana").await;
        assert_eq!(sync.history_items().await.len(), 1);

        store.set_fail_reads(true);
        assert!(sync.history_items().await.is_empty());
        assert!(sync.favorite_items().await.is_empty());
    }
}
