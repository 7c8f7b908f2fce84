pub mod dates;
pub mod favorite;
pub mod media;
pub mod raw;
pub mod video;
pub mod watch_history;

pub use favorite::FavoriteEntry;
pub use media::{CatalogId, ContentItem, ItemKey, MediaType};
pub use raw::{RawEntry, RawPage, RawPerson, SearchEntry};
pub use video::{VideoCandidate, VideoListing, VideoType};
pub use watch_history::HistoryEntry;
