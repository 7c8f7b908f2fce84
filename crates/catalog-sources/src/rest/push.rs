//! Turns polled history rows into insert events.
//!
//! Upserts refresh `created_at`, so a poll by timestamp also returns rows
//! that were only overwritten. The tracker remembers which ids the
//! subscription has already seen and lets only first appearances through.

use catalog_models::{CatalogId, HistoryEntry};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug)]
pub struct InsertTracker {
    cursor: DateTime<Utc>,
    known: HashSet<CatalogId>,
}

impl InsertTracker {
    /// Start after `cursor`, treating `existing` ids as already delivered
    pub fn new(cursor: DateTime<Utc>, existing: impl IntoIterator<Item = CatalogId>) -> Self {
        Self {
            cursor,
            known: existing.into_iter().collect(),
        }
    }

    pub fn cursor(&self) -> DateTime<Utc> {
        self.cursor
    }

    /// Advance the cursor past `rows` and keep the ones never seen before
    pub fn admit(&mut self, rows: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
        let polled = rows.len();
        let mut inserted = Vec::new();
        for row in rows {
            if let Some(created_at) = row.created_at {
                self.cursor = self.cursor.max(created_at);
            }
            if self.known.insert(row.id) {
                inserted.push(row);
            }
        }
        if polled > 0 {
            debug!(polled, inserted = inserted.len(), "Polled history rows");
        }
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::MediaType;
    use chrono::{Duration, TimeZone};

    fn row(id: CatalogId, created_at: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            id,
            title: format!("Title {}", id),
            poster_path: None,
            release_date: None,
            media_type: MediaType::Movie,
            scanned_by: "ana".to_string(),
            created_at: Some(created_at),
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_overwrite_is_not_delivered_again() {
        let t0 = start();
        let mut tracker = InsertTracker::new(t0, []);

        let first = tracker.admit(vec![row(1, t0 + Duration::seconds(1))]);
        assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);

        // Same id upserted again with a newer timestamp
        let second = tracker.admit(vec![row(1, t0 + Duration::seconds(5))]);
        assert!(second.is_empty());
        assert_eq!(tracker.cursor(), t0 + Duration::seconds(5));
    }

    #[test]
    fn test_rows_present_at_subscribe_are_not_inserts() {
        let t0 = start();
        let mut tracker = InsertTracker::new(t0, [4, 8]);

        let rows = tracker.admit(vec![
            row(4, t0 + Duration::seconds(1)),
            row(15, t0 + Duration::seconds(2)),
            row(8, t0 + Duration::seconds(3)),
        ]);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![15]);
        assert_eq!(tracker.cursor(), t0 + Duration::seconds(3));
    }

    #[test]
    fn test_cursor_never_moves_back() {
        let t0 = start();
        let mut tracker = InsertTracker::new(t0, []);
        tracker.admit(vec![row(2, t0 - Duration::seconds(10))]);
        assert_eq!(tracker.cursor(), t0);
    }
}
