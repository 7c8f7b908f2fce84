//! Table names and PostgREST query strings for the shared watch-state store.

use catalog_models::CatalogId;
use chrono::{DateTime, SecondsFormat, Utc};

pub const HISTORY_TABLE: &str = "history";
pub const FAVORITES_TABLE: &str = "favorites";

pub fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

pub fn upsert_query() -> &'static str {
    "on_conflict=id"
}

pub fn newest_first_query() -> &'static str {
    "select=*&order=created_at.desc"
}

pub fn by_id_query(id: CatalogId) -> String {
    format!("id=eq.{}", id)
}

pub fn membership_query(id: CatalogId) -> String {
    format!("select=id&id=eq.{}", id)
}

pub fn ids_query() -> &'static str {
    "select=id"
}

/// Rows created strictly after `cursor`, oldest first so delivery keeps insert order
pub fn inserted_since_query(cursor: DateTime<Utc>) -> String {
    let stamp = cursor.to_rfc3339_opts(SecondsFormat::Micros, true);
    format!(
        "select=*&created_at=gt.{}&order=created_at.asc",
        urlencoding::encode(&stamp)
    )
}
