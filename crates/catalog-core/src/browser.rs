//! The browsing session a front-end drives.
//!
//! Owns the page state of the active tab, the selected item and the history
//! push subscription. Every mutation goes through `&mut self`, so a session
//! has a single logical thread of control; front-ends that want concurrent
//! page fetches use [`Browser::page_state_mut`] with the split-phase API.

use crate::aggregation::{ActiveFilter, PageOutcome, PageState};
use crate::category::{Category, ContentKind};
use crate::normalize::{normalize_page, SearchScope};
use crate::trailer::{resolve_trailer, TrailerResolution};
use crate::view::{arrange, MediaFilter, SortOrder};
use crate::watch_state::{FavoriteState, WatchStateSync};
use catalog_config::BrowseConfig;
use catalog_models::{ContentItem, MediaType};
use catalog_sources::{CatalogSource, HistorySubscription, WatchStateStore};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Movies,
    Series,
    History,
    Favorites,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Movies => "movies",
            Tab::Series => "series",
            Tab::History => "history",
            Tab::Favorites => "favorites",
        }
    }

    /// Catalog sources behind a browse tab; `None` for stored lists
    pub fn content_kind(&self) -> Option<ContentKind> {
        match self {
            Tab::Home => Some(ContentKind::Mixed),
            Tab::Movies => Some(ContentKind::Movie),
            Tab::Series => Some(ContentKind::Tv),
            Tab::History | Tab::Favorites => None,
        }
    }

    pub fn search_scope(&self) -> SearchScope {
        match self {
            Tab::Movies => SearchScope::Movies,
            Tab::Series => SearchScope::Shows,
            Tab::Home | Tab::History | Tab::Favorites => SearchScope::All,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Tab::Home),
            "movies" => Ok(Tab::Movies),
            "series" | "tv" => Ok(Tab::Series),
            "history" => Ok(Tab::History),
            "favorites" => Ok(Tab::Favorites),
            other => Err(format!("Unknown tab: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowseOptions {
    pub min_search_chars: usize,
    pub featured_movies: usize,
    pub featured_shows: usize,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self::from(&BrowseConfig::default())
    }
}

impl From<&BrowseConfig> for BrowseOptions {
    fn from(config: &BrowseConfig) -> Self {
        Self {
            min_search_chars: config.min_search_chars,
            featured_movies: config.featured_movies,
            featured_shows: config.featured_shows,
        }
    }
}

/// The item opened by the user, with what was resolved for it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub item: ContentItem,
    pub favorite: FavoriteState,
    pub trailer: TrailerResolution,
    pub history_recorded: bool,
}

pub struct Browser {
    catalog: Arc<dyn CatalogSource>,
    watch: WatchStateSync,
    options: BrowseOptions,
    tab: Tab,
    category: Category,
    pages: PageState,
    sort: SortOrder,
    media_filter: MediaFilter,
    selected: Option<Selection>,
    history_push: Option<HistorySubscription>,
}

impl Browser {
    pub fn new(catalog: Arc<dyn CatalogSource>, store: Arc<dyn WatchStateStore>, options: BrowseOptions) -> Self {
        Self {
            catalog,
            watch: WatchStateSync::new(store),
            options,
            tab: Tab::default(),
            category: Category::default(),
            pages: PageState::new(),
            sort: SortOrder::default(),
            media_filter: MediaFilter::default(),
            selected: None,
            history_push: None,
        }
    }

    /// Switch tab and load it, resetting category, search, sort and media filter
    pub async fn open_tab(&mut self, tab: Tab) -> PageOutcome {
        self.switch_tab(tab);
        self.reload().await
    }

    /// Reset to `tab` without loading anything yet
    pub fn switch_tab(&mut self, tab: Tab) {
        info!(tab = %tab, "Opening tab");
        self.drop_history_push();
        self.tab = tab;
        self.category = Category::Popular;
        self.sort = SortOrder::Insertion;
        self.media_filter = MediaFilter::All;
    }

    /// Reload the current tab's context, keeping its category
    pub async fn reload(&mut self) -> PageOutcome {
        match self.tab.content_kind() {
            Some(kind) => self.select_filter(kind, self.category).await,
            None if self.tab == Tab::History => {
                let items = self.watch.history_items().await;
                let outcome = self.load_snapshot(items);
                if self.history_push.is_none() {
                    self.history_push = self.watch.subscribe_history().await;
                }
                outcome
            }
            None => {
                let items = self.watch.favorite_items().await;
                self.load_snapshot(items)
            }
        }
    }

    fn load_snapshot(&mut self, items: Vec<ContentItem>) -> PageOutcome {
        let count = items.len();
        self.pages.load_snapshot(items);
        debug!(tab = %self.tab, count, "Loaded stored list");
        if count == 0 {
            PageOutcome::Empty { page: 1 }
        } else {
            PageOutcome::Loaded { page: 1, added: count }
        }
    }

    /// Browse `kind` under `category` from its first page
    pub async fn select_filter(&mut self, kind: ContentKind, category: Category) -> PageOutcome {
        self.drop_history_push();
        self.category = category;
        self.pages
            .select_filter(&*self.catalog, ActiveFilter::Browse { kind, category })
            .await
    }

    pub async fn load_more(&mut self) -> PageOutcome {
        self.pages.load_more(&*self.catalog).await
    }

    /// Search from the current tab.
    ///
    /// `None` when the query is too short to run. An empty query leaves
    /// search mode and reloads the tab.
    pub async fn search(&mut self, query: &str) -> Option<PageOutcome> {
        let query = query.trim();
        if query.is_empty() {
            debug!(tab = %self.tab, "Search cleared");
            return Some(self.reload().await);
        }
        if query.chars().count() < self.options.min_search_chars {
            debug!(query, min = self.options.min_search_chars, "Search query too short");
            return None;
        }

        let filter = ActiveFilter::Search {
            query: query.to_string(),
            scope: self.tab.search_scope(),
        };
        Some(self.pages.select_filter(&*self.catalog, filter).await)
    }

    /// Open `item`: records history, checks favorite membership and
    /// resolves its trailer concurrently.
    pub async fn select_item(&mut self, item: ContentItem, user: &str) -> &Selection {
        let (history_recorded, favorite, trailer) = futures::join!(
            self.watch.record_history(&item, user),
            self.watch.check_favorite(&item),
            resolve_trailer(&*self.catalog, &item),
        );
        debug!(
            id = item.id,
            media_type = %item.media_type,
            favorite = favorite.is_favorite(),
            trailer = trailer.key().unwrap_or("-"),
            "Item selected"
        );
        self.selected.insert(Selection {
            item,
            favorite,
            trailer,
            history_recorded,
        })
    }

    /// Toggle the selected item's favorite membership. `None` without a selection.
    pub async fn toggle_favorite(&mut self, user: &str) -> Option<FavoriteState> {
        let selection = self.selected.as_ref()?;
        let before = selection.favorite;
        let after = self.watch.toggle_favorite(&selection.item, user, before).await;

        if let Some(selection) = self.selected.as_mut() {
            selection.favorite = after;
        }

        let removed = before == FavoriteState::Favorited && after == FavoriteState::NotFavorited;
        if removed && self.tab == Tab::Favorites && !self.pages.is_searching() {
            self.reload().await;
        }
        Some(after)
    }

    /// First movies then first shows of the popular lists. Empty on failure.
    pub async fn featured(&self) -> Vec<ContentItem> {
        let result = futures::try_join!(
            self.catalog.fetch_popular(MediaType::Movie, 1),
            self.catalog.fetch_popular(MediaType::Tv, 1),
        );
        match result {
            Ok((movies, shows)) => {
                let mut items: Vec<ContentItem> = normalize_page(movies, MediaType::Movie)
                    .into_iter()
                    .take(self.options.featured_movies)
                    .collect();
                items.extend(
                    normalize_page(shows, MediaType::Tv)
                        .into_iter()
                        .take(self.options.featured_shows),
                );
                items
            }
            Err(e) => {
                warn!("Failed to load featured titles: {}", e);
                Vec::new()
            }
        }
    }

    /// Prepend every history row already pushed. Returns how many landed.
    pub fn pump_history_push(&mut self) -> usize {
        let Some(subscription) = self.history_push.as_mut() else {
            return 0;
        };
        let mut rows = Vec::new();
        while let Some(row) = subscription.try_recv() {
            rows.push(row);
        }
        let mut applied = 0;
        for row in &rows {
            if self.apply_history_push(ContentItem::from(row)) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next pushed history row and prepend it.
    /// `None` once there is no subscription or the channel closed.
    pub async fn next_history_push(&mut self) -> Option<ContentItem> {
        let subscription = self.history_push.as_mut()?;
        let Some(row) = subscription.recv().await else {
            self.history_push = None;
            return None;
        };
        let item = ContentItem::from(&row);
        self.apply_history_push(item.clone());
        Some(item)
    }

    fn apply_history_push(&mut self, item: ContentItem) -> bool {
        if self.tab != Tab::History {
            return false;
        }
        let id = item.id;
        let applied = self.pages.prepend(item);
        debug!(id, applied, "History push");
        applied
    }

    fn drop_history_push(&mut self) {
        if let Some(subscription) = self.history_push.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_following_history(&self) -> bool {
        self.history_push.is_some()
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn set_media_filter(&mut self, filter: MediaFilter) {
        self.media_filter = filter;
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn media_filter(&self) -> MediaFilter {
        self.media_filter
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn store_name(&self) -> &str {
        self.watch.store_name()
    }

    pub fn page_state(&self) -> &PageState {
        &self.pages
    }

    pub fn page_state_mut(&mut self) -> &mut PageState {
        &mut self.pages
    }

    /// Accumulated items in encounter order
    pub fn current_items(&self) -> &[ContentItem] {
        self.pages.items()
    }

    /// Sorted view; the media filter only applies on the history tab
    pub fn visible_items(&self) -> Vec<&ContentItem> {
        let filter = if self.tab == Tab::History {
            self.media_filter
        } else {
            MediaFilter::All
        };
        arrange(self.pages.items(), filter, self.sort)
    }

    pub fn has_more(&self) -> bool {
        self.pages.has_more()
    }

    pub fn is_searching(&self) -> bool {
        self.pages.is_searching()
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    pub fn is_favorite(&self) -> bool {
        self.selected.as_ref().is_some_and(|s| s.favorite.is_favorite())
    }

    pub fn resolved_trailer_key(&self) -> Option<&str> {
        self.selected.as_ref().and_then(|s| s.trailer.key())
    }
}
