// Composite-key dedup used when merging pages and search results

use catalog_models::{ContentItem, ItemKey};
use std::collections::HashSet;
use tracing::debug;

/// Anything carrying the `(id, media_type)` identity.
pub trait GetItemKey {
    fn get_item_key(&self) -> ItemKey;
}

impl GetItemKey for ContentItem {
    fn get_item_key(&self) -> ItemKey {
        self.key()
    }
}

/// Keys of every item already present, for incremental filtering
pub fn key_set<T: GetItemKey>(items: &[T]) -> HashSet<ItemKey> {
    items.iter().map(|item| item.get_item_key()).collect()
}

/// Items from `incoming` whose key is not in `seen`, in incoming order.
///
/// `seen` is extended with every key kept so duplicates inside `incoming`
/// are dropped as well.
pub fn filter_unseen<T>(incoming: Vec<T>, seen: &mut HashSet<ItemKey>) -> Vec<T>
where
    T: GetItemKey,
{
    let incoming_count = incoming.len();
    let mut kept = Vec::with_capacity(incoming_count);
    let mut skipped = 0;

    for item in incoming {
        if seen.insert(item.get_item_key()) {
            kept.push(item);
        } else {
            skipped += 1;
        }
    }

    debug!(
        incoming = incoming_count,
        kept = kept.len(),
        skipped,
        "filter_unseen"
    );

    kept
}

/// Keep the first occurrence of every key
pub fn remove_duplicates_by_key<T>(items: Vec<T>) -> Vec<T>
where
    T: GetItemKey,
{
    let mut seen = HashSet::new();
    filter_unseen(items, &mut seen)
}
