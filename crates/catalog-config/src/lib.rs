pub mod config;
pub mod paths;

pub use config::{BrowseConfig, CatalogConfig, Config, LoggingConfig, StoreBackend, StoreConfig};
pub use paths::{PathManager, container_base_path};
