use super::browse::print_listing;
use super::session::{self, Spinner};
use crate::output::Output;
use catalog_config::{Config, PathManager};
use catalog_core::{SortOrder, Tab};
use color_eyre::Result;

pub async fn run_favorites(config: Config, paths: &PathManager, sort: SortOrder, output: &Output) -> Result<()> {
    let mut browser = session::open_browser(&config, paths)?;

    let spinner = Spinner::start(output, "Loading favorites...");
    let outcome = browser.open_tab(Tab::Favorites).await;
    spinner.finish();

    browser.set_sort(sort);
    print_listing(&browser, "Favorites", output);
    session::report_outcome(&outcome, output);
    Ok(())
}
