use super::render;
use super::session::{self, Spinner};
use crate::output::Output;
use crate::{ListingArgs, PickArgs};
use catalog_config::{Config, PathManager};
use catalog_core::{genre_name, Browser, Category, PageOutcome, Tab};
use catalog_models::ContentItem;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub async fn run_browse(
    config: Config,
    paths: &PathManager,
    tab: Tab,
    genre: Option<u32>,
    listing: ListingArgs,
    pick: PickArgs,
    output: &Output,
) -> Result<()> {
    tracing::debug!(tab = %tab, ?genre, pages = listing.pages, "Browse command started");
    let mut browser = session::open_browser(&config, paths)?;

    let spinner = Spinner::start(output, format!("Loading {}...", tab));
    let mut outcome = match genre {
        Some(genre_id) => {
            if genre_name(genre_id).is_none() {
                output.warn(format!("Genre {} is not one of the known genres; trying it anyway", genre_id));
            }
            let kind = tab
                .content_kind()
                .ok_or_else(|| eyre!("Genres only apply to the home, movies and series tabs"))?;
            browser.switch_tab(tab);
            browser.select_filter(kind, Category::Genre(genre_id)).await
        }
        None => browser.open_tab(tab).await,
    };
    if matches!(outcome, PageOutcome::Loaded { .. }) {
        outcome = session::load_more_pages(&mut browser, listing.pages, &spinner).await;
    }
    let featured = if shows_featured(tab, genre) {
        spinner.set_message("Loading featured titles...");
        browser.featured().await
    } else {
        Vec::new()
    };
    spinner.finish();

    if !featured.is_empty() {
        print_featured(&featured, output);
    }
    browser.set_sort(listing.sort.into());
    print_listing(&browser, &heading(tab, browser.category()), output);
    session::report_outcome(&outcome, output);

    session::apply_pick(&mut browser, &pick, &config.browse.user_name, output).await
}

pub async fn run_search(
    config: Config,
    paths: &PathManager,
    query: &str,
    tab: Tab,
    listing: ListingArgs,
    pick: PickArgs,
    output: &Output,
) -> Result<()> {
    tracing::debug!(tab = %tab, query, "Search command started");
    let mut browser = session::open_browser(&config, paths)?;

    let spinner = Spinner::start(output, format!("Searching '{}'...", query));
    browser.switch_tab(tab);
    let Some(mut outcome) = browser.search(query).await else {
        spinner.finish();
        return Err(eyre!(
            "Search queries need at least {} characters",
            config.browse.min_search_chars
        ));
    };
    if matches!(outcome, PageOutcome::Loaded { .. }) {
        outcome = session::load_more_pages(&mut browser, listing.pages, &spinner).await;
    }
    spinner.finish();

    browser.set_sort(listing.sort.into());
    print_listing(&browser, &format!("Results for '{}' ({})", query, tab), output);
    session::report_outcome(&outcome, output);

    session::apply_pick(&mut browser, &pick, &config.browse.user_name, output).await
}

/// The featured strip sits on top of the unfiltered home listing
fn shows_featured(tab: Tab, genre: Option<u32>) -> bool {
    tab == Tab::Home && genre.is_none()
}

fn print_featured(items: &[ContentItem], output: &Output) {
    if output.is_human() && !output.is_quiet() {
        println!();
        output.info("Featured");
        let rows: Vec<&ContentItem> = items.iter().collect();
        output.block(render::items_table(&rows));
    }
    output.data("featured", &items);
}

fn heading(tab: Tab, category: Category) -> String {
    match category {
        Category::Popular => format!("Popular · {}", tab),
        Category::Genre(id) => format!("{} · {}", genre_name(id).unwrap_or("Genre"), tab),
    }
}

pub fn print_listing(browser: &Browser, title: &str, output: &Output) {
    let items = browser.visible_items();
    if output.is_human() && !output.is_quiet() {
        println!();
        output.info(format!("{} ({} titles)", title, items.len()));
        if !items.is_empty() {
            output.block(render::items_table(&items));
        }
    }
    output.data(
        "listing",
        &json!({
            "title": title,
            "has_more": browser.has_more(),
            "items": items,
        }),
    );
}
