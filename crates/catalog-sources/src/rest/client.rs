use crate::error::{check_status, SourceError};
use crate::rest::api::{self, FAVORITES_TABLE, HISTORY_TABLE};
use crate::rest::push::InsertTracker;
use crate::subscription::HistorySubscription;
use crate::traits::WatchStateStore;
use async_trait::async_trait;
use catalog_config::StoreConfig;
use catalog_models::{CatalogId, FavoriteEntry, HistoryEntry};
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const PUSH_CAPACITY: usize = 64;

#[derive(Deserialize)]
struct IdRow {
    id: CatalogId,
}

/// Watch-state store backed by a PostgREST-compatible HTTP API.
#[derive(Clone)]
pub struct RestStore {
    http: Arc<Client>,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
}

impl RestStore {
    pub fn new(base_url: String, api_key: String, poll_interval: Duration) -> Self {
        Self {
            http: Arc::new(Client::new()),
            base_url,
            api_key,
            poll_interval,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, SourceError> {
        let url = config
            .url
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| SourceError::store("store.url is not configured"))?;
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SourceError::store("store.api_key is not configured"))?;
        Ok(Self::new(url, api_key, Duration::from_secs(config.poll_interval_secs.max(1))))
    }

    fn request(&self, method: Method, table: &str, query: &str) -> RequestBuilder {
        let url = format!("{}?{}", api::table_url(&self.base_url, table), query);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder, table: &str) -> Result<Response, SourceError> {
        let response = request.send().await?;
        if let Some(err) = check_status(response.status().as_u16(), table) {
            return Err(err);
        }
        Ok(response)
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &str) -> Result<Vec<T>, SourceError> {
        let response = self.send(self.request(Method::GET, table, query), table).await?;
        response.json::<Vec<T>>().await.map_err(|e| SourceError::Parse(e.to_string()))
    }

    /// Fetch history rows newer than the tracker's cursor and publish the first-time ones
    async fn poll_inserts(
        &self,
        tracker: &mut InsertTracker,
        tx: &broadcast::Sender<HistoryEntry>,
    ) -> Result<(), SourceError> {
        let rows: Vec<HistoryEntry> = self
            .select(HISTORY_TABLE, &api::inserted_since_query(tracker.cursor()))
            .await?;
        for row in tracker.admit(rows) {
            let _ = tx.send(row);
        }
        Ok(())
    }
}

#[async_trait]
impl WatchStateStore for RestStore {
    fn store_name(&self) -> &str {
        "rest"
    }

    async fn upsert_history(&self, entry: &HistoryEntry) -> Result<(), SourceError> {
        let mut row = entry.clone();
        // Overwrites refresh the timestamp so repeat views move to the top
        row.created_at = Some(Utc::now());
        let request = self
            .request(Method::POST, HISTORY_TABLE, api::upsert_query())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row);
        self.send(request, HISTORY_TABLE).await?;
        debug!(id = entry.id, "Upserted history row");
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, SourceError> {
        self.select(HISTORY_TABLE, api::newest_first_query()).await
    }

    async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>, SourceError> {
        self.select(FAVORITES_TABLE, api::newest_first_query()).await
    }

    async fn insert_favorite(&self, entry: &FavoriteEntry) -> Result<(), SourceError> {
        let request = self
            .request(Method::POST, FAVORITES_TABLE, "")
            .header("Prefer", "return=minimal")
            .json(entry);
        self.send(request, FAVORITES_TABLE).await?;
        debug!(id = entry.id, "Inserted favorite");
        Ok(())
    }

    async fn delete_favorite(&self, id: CatalogId) -> Result<(), SourceError> {
        let request = self.request(Method::DELETE, FAVORITES_TABLE, &api::by_id_query(id));
        self.send(request, FAVORITES_TABLE).await?;
        debug!(id, "Deleted favorite");
        Ok(())
    }

    async fn is_favorite(&self, id: CatalogId) -> Result<bool, SourceError> {
        let rows: Vec<serde_json::Value> = self.select(FAVORITES_TABLE, &api::membership_query(id)).await?;
        Ok(!rows.is_empty())
    }

    async fn subscribe_history_inserts(&self) -> Result<HistorySubscription, SourceError> {
        let (tx, rx) = broadcast::channel(PUSH_CAPACITY);
        let cursor = Utc::now();
        let existing: Vec<IdRow> = self.select(HISTORY_TABLE, api::ids_query()).await?;
        let mut tracker = InsertTracker::new(cursor, existing.into_iter().map(|r| r.id));
        let store = self.clone();

        let poller = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(store.poll_interval);
            loop {
                ticker.tick().await;
                if let Err(e) = store.poll_inserts(&mut tracker, &tx).await {
                    warn!("History push poll failed: {}", e);
                }
            }
        });

        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Subscribed to history inserts"
        );
        Ok(HistorySubscription::with_poller(rx, poller))
    }
}
