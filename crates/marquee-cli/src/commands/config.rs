use super::session;
use crate::output::Output;
use crate::ConfigCommands;
use catalog_config::{Config, StoreBackend};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, explicit: Option<&Path>, loaded: Result<Config>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, explicit, loaded, output),
        ConfigCommands::Init { api_key, force } => init_config(api_key, force, explicit, output),
    }
}

fn show_config(full: bool, explicit: Option<&Path>, loaded: Result<Config>, output: &Output) -> Result<()> {
    let config_file = session::config_path(explicit);
    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Create one with 'marquee config init --api-key <KEY>'.");
        return Ok(());
    }
    let config = loaded?;
    let secret = |value: &str| if full { value.to_string() } else { mask_string(value) };

    let store_key = config.store.api_key.as_deref().unwrap_or_default();
    output.data(
        "config",
        &json!({
            "file": config_file.display().to_string(),
            "catalog": {
                "api_key": secret(&config.catalog.api_key),
                "base_url": config.catalog.base_url,
                "language": config.catalog.language,
                "video_languages": config.catalog.video_languages,
                "include_adult": config.catalog.include_adult,
            },
            "store": {
                "backend": config.store.backend,
                "url": config.store.url,
                "api_key": secret(store_key),
                "poll_interval_secs": config.store.poll_interval_secs,
                "file": config.store.file,
            },
            "browse": config.browse,
            "logging": config.logging,
        }),
    );
    if !output.is_human() {
        return Ok(());
    }

    let mut info_table = section_table("Config File");
    info_table.add_row(vec![Cell::new("Path"), Cell::new(config_file.display().to_string())]);
    let status = if config.validate().is_ok() {
        "✓ valid".green().to_string()
    } else {
        "✗ incomplete".red().to_string()
    };
    info_table.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    output.block(info_table);

    let mut catalog_table = section_table("Catalog");
    catalog_table.add_row(vec![Cell::new("API key"), Cell::new(secret(&config.catalog.api_key))]);
    catalog_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.catalog.base_url)]);
    catalog_table.add_row(vec![Cell::new("Language"), Cell::new(&config.catalog.language)]);
    catalog_table.add_row(vec![
        Cell::new("Video languages"),
        Cell::new(config.catalog.video_languages.join(", ")),
    ]);
    catalog_table.add_row(vec![Cell::new("Include adult"), Cell::new(config.catalog.include_adult)]);
    output.block(catalog_table);

    let mut store_table = section_table("Watch-state Store");
    match config.store.backend {
        StoreBackend::Local => {
            let file = config
                .store
                .file
                .clone()
                .unwrap_or_else(|| session::path_manager(explicit).watch_state_file());
            store_table.add_row(vec![Cell::new("Backend"), Cell::new("local")]);
            store_table.add_row(vec![Cell::new("File"), Cell::new(file.display().to_string())]);
        }
        StoreBackend::Rest => {
            store_table.add_row(vec![Cell::new("Backend"), Cell::new("rest")]);
            store_table.add_row(vec![
                Cell::new("URL"),
                Cell::new(config.store.url.as_deref().unwrap_or("<not set>")),
            ]);
            store_table.add_row(vec![Cell::new("API key"), Cell::new(secret(store_key))]);
            store_table.add_row(vec![
                Cell::new("Push poll interval"),
                Cell::new(format!("{}s", config.store.poll_interval_secs)),
            ]);
        }
    }
    output.block(store_table);

    let mut browse_table = section_table("Browsing");
    browse_table.add_row(vec![Cell::new("User name"), Cell::new(&config.browse.user_name)]);
    browse_table.add_row(vec![Cell::new("Min search chars"), Cell::new(config.browse.min_search_chars)]);
    browse_table.add_row(vec![
        Cell::new("Featured"),
        Cell::new(format!(
            "{} movies, {} shows",
            config.browse.featured_movies, config.browse.featured_shows
        )),
    ]);
    browse_table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    output.block(browse_table);

    Ok(())
}

fn init_config(api_key: Option<String>, force: bool, explicit: Option<&Path>, output: &Output) -> Result<()> {
    let config_file = session::config_path(explicit);
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
    }

    let paths = session::path_manager(explicit);
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;

    let mut config = Config::default();
    if let Some(key) = api_key {
        config.catalog.api_key = key;
    }
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration written to {}", config_file.display()));
    if !config.is_catalog_configured() {
        output.warn("No catalog API key set; pass --api-key or set MARQUEE_CATALOG_API_KEY.");
    }
    Ok(())
}

fn section_table(title: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    table
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == "YOUR_API_KEY" {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
