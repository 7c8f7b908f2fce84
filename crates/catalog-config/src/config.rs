use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PLACEHOLDER_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Language requested for titles and overviews (e.g. "es-ES")
    #[serde(default = "default_language")]
    pub language: String,
    /// Languages requested from the video listing endpoint
    #[serde(default = "default_video_languages")]
    pub video_languages: Vec<String>,
    #[serde(default)]
    pub include_adult: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store persisted to a JSON file
    #[default]
    Local,
    /// PostgREST-compatible HTTP store shared between clients
    Rest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Local backend file; defaults to `<data dir>/watch_state.json`
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Attribution written on history and favorite rows
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default = "default_min_search_chars")]
    pub min_search_chars: usize,
    #[serde(default = "default_featured_movies")]
    pub featured_movies: usize,
    #[serde(default = "default_featured_shows")]
    pub featured_shows: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "es-ES".to_string()
}

fn default_video_languages() -> Vec<String> {
    vec!["es".to_string(), "en".to_string()]
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_user_name() -> String {
    "Usuario".to_string()
}

fn default_min_search_chars() -> usize {
    3
}

fn default_featured_movies() -> usize {
    4
}

fn default_featured_shows() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_KEY.to_string(),
            base_url: default_base_url(),
            language: default_language(),
            video_languages: default_video_languages(),
            include_adult: false,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: None,
            api_key: None,
            poll_interval_secs: default_poll_interval_secs(),
            file: None,
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            min_search_chars: default_min_search_chars(),
            featured_movies: default_featured_movies(),
            featured_shows: default_featured_shows(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            store: StoreConfig::default(),
            browse: BrowseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Keys from the environment win over the file so secrets can stay out of it
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("MARQUEE_CATALOG_API_KEY") {
            if !key.is_empty() {
                self.catalog.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("MARQUEE_STORE_API_KEY") {
            if !key.is_empty() {
                self.store.api_key = Some(key);
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!("catalog.api_key is not configured"));
        }
        if self.catalog.base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }

        if self.store.backend == StoreBackend::Rest {
            let url = self.store.url.as_deref().unwrap_or_default();
            if url.is_empty() {
                return Err(anyhow::anyhow!("store.url is required for the rest backend"));
            }
            let key = self.store.api_key.as_deref().unwrap_or_default();
            if key.is_empty() || key == PLACEHOLDER_KEY {
                return Err(anyhow::anyhow!("store.api_key is required for the rest backend"));
            }
        }
        if self.store.poll_interval_secs == 0 {
            return Err(anyhow::anyhow!("store.poll_interval_secs must be greater than zero"));
        }

        if self.browse.min_search_chars == 0 {
            return Err(anyhow::anyhow!("browse.min_search_chars must be greater than zero"));
        }

        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.catalog.api_key.is_empty() && self.catalog.api_key != PLACEHOLDER_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.catalog.api_key = "test_key".to_string();
        config.browse.user_name = "ana".to_string();
        config.store.backend = StoreBackend::Rest;
        config.store.url = Some("https://store.example.com".to_string());

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.catalog.language, "es-ES");
        assert_eq!(loaded.browse.user_name, "ana");
        assert_eq!(loaded.store.backend, StoreBackend::Rest);
        assert_eq!(loaded.store.url.as_deref(), Some("https://store.example.com"));
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config: Config = toml::from_str("[catalog]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.video_languages, vec!["es", "en"]);
        assert_eq!(config.store.backend, StoreBackend::Local);
        assert_eq!(config.store.poll_interval_secs, 5);
        assert_eq!(config.browse.min_search_chars, 3);
        assert_eq!(config.browse.featured_movies, 4);
        assert_eq!(config.browse.featured_shows, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());
        assert!(!config.is_catalog_configured());

        config.catalog.api_key = "real_key".to_string();
        assert!(config.validate().is_ok());

        config.store.backend = StoreBackend::Rest;
        assert!(config.validate().is_err());

        config.store.url = Some("https://store.example.com".to_string());
        config.store.api_key = Some("anon".to_string());
        assert!(config.validate().is_ok());

        config.browse.min_search_chars = 0;
        assert!(config.validate().is_err());
    }
}
