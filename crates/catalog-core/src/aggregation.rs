//! Page-by-page accumulation of catalog results.
//!
//! A fetch is split in three so callers may run it off the state borrow:
//! `begin_*` mutates the state and hands out a [`PageRequest`], the request
//! is fetched independently, and [`PageState::commit`] applies the result.
//! Each begin bumps or reuses a generation number; a commit carrying an
//! outdated generation is dropped.

use crate::category::{Category, ContentKind};
use crate::diff::filter_unseen;
use crate::normalize::{normalize_page, normalize_search, SearchScope};
use catalog_models::{ContentItem, ItemKey, MediaType};
use catalog_sources::{CatalogSource, SourceError};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// What the accumulated list currently represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Browse { kind: ContentKind, category: Category },
    Search { query: String, scope: SearchScope },
    /// A stored list loaded in one go (history, favorites)
    Snapshot,
}

impl ActiveFilter {
    pub fn is_search(&self) -> bool {
        matches!(self, ActiveFilter::Search { .. })
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Browse { kind, category } => write!(f, "{}/{}", kind.as_str(), category),
            ActiveFilter::Search { query, scope } => write!(f, "search:{}:{}", scope.as_str(), query),
            ActiveFilter::Snapshot => f.write_str("snapshot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// New items appended; `added` may be zero when the page only held duplicates
    Loaded { page: u32, added: usize },
    /// The page came back without items
    Empty { page: u32 },
    /// No more pages under this filter; nothing was fetched
    Exhausted,
    /// The fetch failed; paging stops under this filter
    Failed,
    /// The filter changed while the fetch was in flight; result dropped
    Stale,
    /// Another page request is still in flight
    Busy,
}

/// Ticket for one page fetch under one filter generation.
#[derive(Debug, Clone)]
pub struct PageRequest {
    generation: u64,
    filter: ActiveFilter,
    page: u32,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> &ActiveFilter {
        &self.filter
    }

    /// Fetch and normalize the page. Mixed browsing fetches the movie and
    /// show pages of the same number and concatenates them, movies first.
    pub async fn fetch(&self, catalog: &dyn CatalogSource) -> Result<Vec<ContentItem>, SourceError> {
        let page = self.page;
        match &self.filter {
            ActiveFilter::Browse { kind: ContentKind::Mixed, category: Category::Popular } => {
                let (movies, shows) = futures::try_join!(
                    catalog.fetch_popular(MediaType::Movie, page),
                    catalog.fetch_popular(MediaType::Tv, page),
                )?;
                let mut items = normalize_page(movies, MediaType::Movie);
                items.extend(normalize_page(shows, MediaType::Tv));
                Ok(items)
            }
            // Mixed genre browsing only has a movie source
            ActiveFilter::Browse { kind: ContentKind::Mixed, category: Category::Genre(genre_id) } => {
                let movies = catalog.fetch_by_genre(MediaType::Movie, *genre_id, page).await?;
                Ok(normalize_page(movies, MediaType::Movie))
            }
            ActiveFilter::Browse { kind, category } => {
                let media_type = match kind {
                    ContentKind::Tv => MediaType::Tv,
                    _ => MediaType::Movie,
                };
                let raw = match category {
                    Category::Popular => catalog.fetch_popular(media_type, page).await?,
                    Category::Genre(genre_id) => catalog.fetch_by_genre(media_type, *genre_id, page).await?,
                };
                Ok(normalize_page(raw, media_type))
            }
            ActiveFilter::Search { query, scope } => {
                let raw = catalog.search_multi(query, page).await?;
                Ok(normalize_search(raw.results, *scope))
            }
            ActiveFilter::Snapshot => Ok(Vec::new()),
        }
    }
}

/// Accumulated results of the active filter session.
#[derive(Debug)]
pub struct PageState {
    page_number: u32,
    filter: Option<ActiveFilter>,
    items: Vec<ContentItem>,
    seen: HashSet<ItemKey>,
    has_more: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageState {
    pub fn new() -> Self {
        Self {
            page_number: 1,
            filter: None,
            items: Vec::new(),
            seen: HashSet::new(),
            has_more: true,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn filter(&self) -> Option<&ActiveFilter> {
        self.filter.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.filter.as_ref().is_some_and(ActiveFilter::is_search)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    fn reset(&mut self, filter: ActiveFilter) {
        self.generation += 1;
        self.filter = Some(filter);
        self.items.clear();
        self.seen.clear();
        self.page_number = 1;
        self.has_more = true;
        self.in_flight = None;
    }

    /// Switch to `filter` and request its first page
    pub fn begin_select_filter(&mut self, filter: ActiveFilter) -> PageRequest {
        info!(filter = %filter, "Selecting filter");
        self.reset(filter.clone());
        self.in_flight = Some(self.generation);
        PageRequest {
            generation: self.generation,
            filter,
            page: 1,
        }
    }

    /// Request the page after the last loaded one.
    ///
    /// Refused with `Busy` while a request is in flight and with `Exhausted`
    /// once the filter has no more pages.
    pub fn begin_load_more(&mut self) -> Result<PageRequest, PageOutcome> {
        if self.in_flight.is_some() {
            return Err(PageOutcome::Busy);
        }
        let filter = match &self.filter {
            Some(ActiveFilter::Snapshot) | None => return Err(PageOutcome::Exhausted),
            Some(filter) => filter.clone(),
        };
        if !self.has_more {
            debug!(filter = %filter, page = self.page_number, "No more pages");
            return Err(PageOutcome::Exhausted);
        }

        self.in_flight = Some(self.generation);
        Ok(PageRequest {
            generation: self.generation,
            filter,
            page: self.page_number + 1,
        })
    }

    /// Apply a fetched page
    pub fn commit(&mut self, request: &PageRequest, result: Result<Vec<ContentItem>, SourceError>) -> PageOutcome {
        if request.generation != self.generation || self.filter.as_ref() != Some(&request.filter) {
            debug!(
                filter = %request.filter,
                page = request.page,
                "Dropping stale page result"
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                warn!(filter = %request.filter, page = request.page, "Page fetch failed: {}", e);
                self.has_more = false;
                return PageOutcome::Failed;
            }
        };

        if items.is_empty() {
            debug!(filter = %request.filter, page = request.page, "Empty page");
            if request.page == 1 {
                self.items.clear();
                self.seen.clear();
            } else {
                self.has_more = false;
            }
            return PageOutcome::Empty { page: request.page };
        }

        let fetched = items.len();
        let fresh = filter_unseen(items, &mut self.seen);
        let added = fresh.len();
        self.items.extend(fresh);
        self.page_number = request.page;

        debug!(
            filter = %request.filter,
            page = request.page,
            fetched,
            added,
            total = self.items.len(),
            "Page committed"
        );
        PageOutcome::Loaded { page: request.page, added }
    }

    pub async fn select_filter(&mut self, catalog: &dyn CatalogSource, filter: ActiveFilter) -> PageOutcome {
        let request = self.begin_select_filter(filter);
        let result = request.fetch(catalog).await;
        self.commit(&request, result)
    }

    pub async fn load_more(&mut self, catalog: &dyn CatalogSource) -> PageOutcome {
        let request = match self.begin_load_more() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = request.fetch(catalog).await;
        self.commit(&request, result)
    }

    /// Replace the list with a stored snapshot; it is never paged further.
    /// Rows are kept as stored, without dedup.
    pub fn load_snapshot(&mut self, items: Vec<ContentItem>) {
        self.reset(ActiveFilter::Snapshot);
        self.seen = items.iter().map(ContentItem::key).collect();
        self.items = items;
        self.has_more = false;
    }

    /// Put a pushed row in front of a snapshot. Ignored under any other filter.
    pub fn prepend(&mut self, item: ContentItem) -> bool {
        if self.filter != Some(ActiveFilter::Snapshot) {
            return false;
        }
        self.seen.insert(item.key());
        self.items.insert(0, item);
        true
    }
}

#[cfg(test)]
mod tests;
