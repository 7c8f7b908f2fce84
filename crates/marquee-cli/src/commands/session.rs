use crate::output::Output;
use crate::PickArgs;
use catalog_config::{Config, PathManager};
use catalog_core::{BrowseOptions, Browser, FavoriteState, PageOutcome, TrailerResolution};
use catalog_sources::{create_catalog, create_store};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use super::render;

/// Paths rooted next to an explicit config file, or the platform default
pub fn path_manager(explicit: Option<&Path>) -> PathManager {
    match explicit.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => PathManager::with_base(dir),
        _ => PathManager::default(),
    }
}

pub fn config_path(explicit: Option<&Path>) -> std::path::PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathManager::default().config_file())
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config_file = config_path(explicit);
    if !config_file.exists() {
        return Err(eyre!(
            "Configuration file not found at {}. Run 'marquee config init --api-key <KEY>' first.",
            config_file.display()
        ));
    }
    Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

pub fn open_browser(config: &Config, paths: &PathManager) -> Result<Browser> {
    config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    let catalog = create_catalog(config).map_err(|e| eyre!("{}", e))?;
    let store = create_store(config, paths).map_err(|e| eyre!("{:#}", e))?;

    Ok(Browser::new(catalog, store, BrowseOptions::from(&config.browse)))
}

/// Spinner shown while pages load; silent unless a human is watching.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(output: &Output, msg: impl Into<String>) -> Self {
        if !output.is_human() || output.is_quiet() || !std::io::stderr().is_terminal() {
            return Self { bar: None };
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
        {
            bar.set_style(style);
        }
        bar.set_message(msg.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        if let Some(bar) = &self.bar {
            bar.set_message(msg.into());
        }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Load further pages after the first until `pages` are in or paging stops
pub async fn load_more_pages(browser: &mut Browser, pages: u32, spinner: &Spinner) -> PageOutcome {
    let mut last = PageOutcome::Loaded { page: 1, added: 0 };
    for _ in 1..pages {
        spinner.set_message(format!("Loading page {}...", browser.page_state().page_number() + 1));
        last = browser.load_more().await;
        if !matches!(last, PageOutcome::Loaded { .. }) {
            break;
        }
    }
    last
}

pub fn report_outcome(outcome: &PageOutcome, output: &Output) {
    match outcome {
        PageOutcome::Failed => output.warn("The catalog could not be reached; showing what was loaded so far."),
        PageOutcome::Empty { page: 1 } => output.info("Nothing found."),
        PageOutcome::Empty { .. } | PageOutcome::Exhausted => output.info("No more pages."),
        _ => {}
    }
}

/// Apply `--select` / `--favorite` to the visible listing
pub async fn apply_pick(browser: &mut Browser, pick: &PickArgs, user: &str, output: &Output) -> Result<()> {
    let Some(position) = pick.select else {
        return Ok(());
    };
    let item = browser
        .visible_items()
        .get(position.wrapping_sub(1))
        .map(|item| (*item).clone())
        .ok_or_else(|| eyre!("--select {} is out of range (1..={})", position, browser.visible_items().len()))?;

    let selection = browser.select_item(item, user).await.clone();
    if !selection.history_recorded {
        output.warn("Could not record this view in the history.");
    }
    if let TrailerResolution::Failed = selection.trailer {
        output.warn("Could not fetch the video listing.");
    }
    output.block(render::selection_table(&selection));
    output.data("selection", &render::selection_json(&selection));

    if pick.favorite {
        let before = selection.favorite;
        let after = browser
            .toggle_favorite(user)
            .await
            .ok_or_else(|| eyre!("No item selected"))?;
        match (before, after) {
            (_, FavoriteState::Favorited) if before != after => {
                output.success(format!("Added '{}' to favorites", selection.item.title))
            }
            (FavoriteState::Favorited, FavoriteState::NotFavorited) => {
                output.success(format!("Removed '{}' from favorites", selection.item.title))
            }
            _ => output.error("Favorite state unchanged: the store did not confirm the write"),
        }
    }
    Ok(())
}
