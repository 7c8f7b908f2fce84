use super::browse::print_listing;
use super::render;
use super::session::{self, Spinner};
use crate::output::Output;
use catalog_config::{Config, PathManager};
use catalog_core::{MediaFilter, SortOrder, Tab};
use color_eyre::Result;
use owo_colors::OwoColorize;

pub async fn run_history(
    config: Config,
    paths: &PathManager,
    media: MediaFilter,
    sort: SortOrder,
    follow: bool,
    output: &Output,
) -> Result<()> {
    let mut browser = session::open_browser(&config, paths)?;

    let spinner = Spinner::start(output, "Loading history...");
    let outcome = browser.open_tab(Tab::History).await;
    spinner.finish();

    browser.set_sort(sort);
    browser.set_media_filter(media);
    print_listing(&browser, "Watch history", output);
    session::report_outcome(&outcome, output);

    if !follow {
        return Ok(());
    }
    if !browser.is_following_history() {
        output.error(format!("The {} store cannot push history updates", browser.store_name()));
        return Ok(());
    }

    output.info("Following history, press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping history follow");
                break;
            }
            pushed = browser.next_history_push() => {
                let Some(item) = pushed else {
                    output.warn("History push channel closed");
                    break;
                };
                if !media.accepts(&item) {
                    continue;
                }
                if output.is_human() {
                    output.info(format!(
                        "{} {} ({}) {}",
                        "+".green(),
                        item.title.bold(),
                        render::media_label(item.media_type),
                        item.key().to_string().dimmed()
                    ));
                }
                output.data("history_push", &item);
            }
        }
    }

    Ok(())
}
