pub mod aggregation;
pub mod browser;
pub mod category;
pub mod diff;
pub mod normalize;
pub mod trailer;
pub mod view;
pub mod watch_state;

#[cfg(test)]
mod testing;

pub use aggregation::{ActiveFilter, PageOutcome, PageRequest, PageState};
pub use browser::{BrowseOptions, Browser, Selection, Tab};
pub use category::{genre_name, Category, ContentKind, Genre, KNOWN_GENRES};
pub use diff::{filter_unseen, remove_duplicates_by_key};
pub use normalize::{normalize_entry, normalize_page, normalize_search, SearchScope};
pub use trailer::{resolve_trailer, select_trailer, TrailerResolution, APPROVED_SITE};
pub use view::{arrange, MediaFilter, SortOrder};
pub use watch_state::{FavoriteState, WatchStateSync};
