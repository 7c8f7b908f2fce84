pub mod error;
pub mod factory;
pub mod local;
pub mod rest;
pub mod subscription;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use factory::{create_catalog, create_store};
pub use local::LocalStore;
pub use rest::RestStore;
pub use subscription::HistorySubscription;
pub use tmdb::TmdbClient;
pub use traits::{CatalogSource, WatchStateStore};
