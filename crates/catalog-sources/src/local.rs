use crate::error::SourceError;
use crate::subscription::HistorySubscription;
use crate::traits::WatchStateStore;
use async_trait::async_trait;
use catalog_models::{CatalogId, FavoriteEntry, HistoryEntry};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

const PUSH_CAPACITY: usize = 64;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct LocalState {
    #[serde(default)]
    history: Vec<HistoryEntry>,
    #[serde(default)]
    favorites: Vec<FavoriteEntry>,
    #[serde(skip)]
    last_stamp: Option<DateTime<Utc>>,
}

impl LocalState {
    /// Strictly increasing so rows written in the same instant still order
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

/// Single-process watch-state store, optionally persisted as JSON.
///
/// Pushes a history row to subscribers only when its id is inserted for the
/// first time; overwriting an existing id counts as an update.
pub struct LocalStore {
    path: Option<PathBuf>,
    state: RwLock<LocalState>,
    push: broadcast::Sender<HistoryEntry>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        let (push, _rx) = broadcast::channel(PUSH_CAPACITY);
        Self {
            path: None,
            state: RwLock::new(LocalState::default()),
            push,
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let state = Self::load_state(&path)?;
        let (push, _rx) = broadcast::channel(PUSH_CAPACITY);
        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
            push,
        })
    }

    fn load_state(path: &Path) -> Result<LocalState, SourceError> {
        if !path.exists() {
            debug!("No watch-state file at {}, starting empty", path.display());
            return Ok(LocalState::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<LocalState>(&content) {
            Ok(mut state) => {
                state.last_stamp = state
                    .history
                    .iter()
                    .filter_map(|h| h.created_at)
                    .chain(state.favorites.iter().filter_map(|f| f.created_at))
                    .max();
                info!(
                    "Loaded watch state from {} ({} history, {} favorites)",
                    path.display(),
                    state.history.len(),
                    state.favorites.len()
                );
                Ok(state)
            }
            Err(e) => {
                warn!(
                    "Watch-state file {} is corrupted: {}. Starting empty.",
                    path.display(),
                    e
                );
                Ok(LocalState::default())
            }
        }
    }

    /// Apply `change` to a copy, persist the copy and only then swap it in,
    /// so a failed write leaves the store as it was.
    async fn commit<T, F>(&self, change: F) -> Result<T, SourceError>
    where
        F: FnOnce(&mut LocalState) -> Result<T, SourceError>,
    {
        let mut state = self.state.write().await;
        let mut staged = state.clone();
        let result = change(&mut staged)?;
        self.persist(&staged).await?;
        *state = staged;
        Ok(result)
    }

    async fn persist(&self, state: &LocalState) -> Result<(), SourceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(state)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

fn newest_first<T, F>(rows: &[T], stamp: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| stamp(b).cmp(&stamp(a)));
    sorted
}

#[async_trait]
impl WatchStateStore for LocalStore {
    fn store_name(&self) -> &str {
        "local"
    }

    async fn upsert_history(&self, entry: &HistoryEntry) -> Result<(), SourceError> {
        let pushed = self
            .commit(|state| {
                let mut row = entry.clone();
                row.created_at = Some(state.next_stamp());
                match state.history.iter().position(|h| h.id == row.id) {
                    Some(index) => {
                        state.history[index] = row;
                        Ok(None)
                    }
                    None => {
                        state.history.push(row.clone());
                        Ok(Some(row))
                    }
                }
            })
            .await?;

        if let Some(row) = pushed {
            // No subscribers is not an error
            let _ = self.push.send(row);
        }
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, SourceError> {
        let state = self.state.read().await;
        Ok(newest_first(&state.history, |h| h.created_at))
    }

    async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>, SourceError> {
        let state = self.state.read().await;
        Ok(newest_first(&state.favorites, |f| f.created_at))
    }

    async fn insert_favorite(&self, entry: &FavoriteEntry) -> Result<(), SourceError> {
        self.commit(|state| {
            if state.favorites.iter().any(|f| f.id == entry.id) {
                return Err(SourceError::store(format!("favorite {} already exists", entry.id)));
            }
            let mut row = entry.clone();
            row.created_at = Some(state.next_stamp());
            state.favorites.push(row);
            Ok(())
        })
        .await
    }

    async fn delete_favorite(&self, id: CatalogId) -> Result<(), SourceError> {
        self.commit(|state| {
            state.favorites.retain(|f| f.id != id);
            Ok(())
        })
        .await
    }

    async fn is_favorite(&self, id: CatalogId) -> Result<bool, SourceError> {
        let state = self.state.read().await;
        Ok(state.favorites.iter().any(|f| f.id == id))
    }

    async fn subscribe_history_inserts(&self) -> Result<HistorySubscription, SourceError> {
        Ok(HistorySubscription::new(self.push.subscribe()))
    }
}
