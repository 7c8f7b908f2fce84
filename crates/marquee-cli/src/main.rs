use catalog_core::{MediaFilter, SortOrder, Tab};
use catalog_models::MediaType;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use commands::{browse, config, favorites, genres, history};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - browse movies and shows, keep a shared watch history")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List popular or genre titles
    #[command(long_about = "Browse the catalog page by page. The home tab mixes movies and shows; --genre restricts to one genre (see 'marquee genres').")]
    Browse {
        #[arg(long, default_value = "home", value_enum)]
        tab: BrowseTab,

        /// Genre id
        #[arg(long)]
        genre: Option<u32>,

        #[command(flatten)]
        listing: ListingArgs,

        #[command(flatten)]
        pick: PickArgs,
    },
    /// Search movies, shows and people
    #[command(long_about = "Search the catalog. From the home, history and favorites tabs people are expanded into the titles they are known for; the movies and series tabs only keep their own kind.")]
    Search {
        query: String,

        #[arg(long, default_value = "home", value_enum)]
        tab: TabArg,

        #[command(flatten)]
        listing: ListingArgs,

        #[command(flatten)]
        pick: PickArgs,
    },
    /// Show the watch history
    History {
        #[arg(long, default_value = "all", value_enum)]
        media: MediaArg,

        #[arg(long, default_value = "default", value_enum)]
        sort: SortArg,

        /// Keep running and print rows added by any client until Ctrl-C
        #[arg(long, action = ArgAction::SetTrue)]
        follow: bool,
    },
    /// Show favorites
    Favorites {
        #[arg(long, default_value = "default", value_enum)]
        sort: SortArg,
    },
    /// List the genres available to --genre
    Genres,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks keys)
    Show {
        /// Show keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    Init {
        /// Catalog API key (v3 key or v4 read token)
        #[arg(long)]
        api_key: Option<String>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    #[arg(long, default_value = "default", value_enum)]
    pub sort: SortArg,
}

#[derive(Args, Debug, Clone)]
pub struct PickArgs {
    /// Open the N-th listed item (1-based): records history, shows trailer and favorite state
    #[arg(long, value_name = "N")]
    pub select: Option<usize>,

    /// Toggle the favorite state of the selected item
    #[arg(long, action = ArgAction::SetTrue, requires = "select")]
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BrowseTab {
    Home,
    Movies,
    Series,
}

impl From<BrowseTab> for Tab {
    fn from(tab: BrowseTab) -> Self {
        match tab {
            BrowseTab::Home => Tab::Home,
            BrowseTab::Movies => Tab::Movies,
            BrowseTab::Series => Tab::Series,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Home,
    Movies,
    Series,
    History,
    Favorites,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Home => Tab::Home,
            TabArg::Movies => Tab::Movies,
            TabArg::Series => Tab::Series,
            TabArg::History => Tab::History,
            TabArg::Favorites => Tab::Favorites,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Default,
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Default => SortOrder::Insertion,
            SortArg::Asc => SortOrder::TitleAscending,
            SortArg::Desc => SortOrder::TitleDescending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaArg {
    All,
    Movie,
    Tv,
}

impl From<MediaArg> for MediaFilter {
    fn from(media: MediaArg) -> Self {
        match media {
            MediaArg::All => MediaFilter::All,
            MediaArg::Movie => MediaFilter::Only(MediaType::Movie),
            MediaArg::Tv => MediaFilter::Only(MediaType::Tv),
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // A broken config file is reported by the command that needs it
    let loaded = commands::session::load_config(cli.config.as_deref());
    let log_settings = loaded.as_ref().ok().map(|config| &config.logging);
    logging::init_logging(cli.verbose, cli.quiet, log_settings).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let paths = commands::session::path_manager(cli.config.as_deref());

    match cli.command {
        Commands::Browse { tab, genre, listing, pick } => {
            browse::run_browse(loaded?, &paths, tab.into(), genre, listing, pick, &output).await
        }
        Commands::Search { query, tab, listing, pick } => {
            browse::run_search(loaded?, &paths, &query, tab.into(), listing, pick, &output).await
        }
        Commands::History { media, sort, follow } => {
            history::run_history(loaded?, &paths, media.into(), sort.into(), follow, &output).await
        }
        Commands::Favorites { sort } => favorites::run_favorites(loaded?, &paths, sort.into(), &output).await,
        Commands::Genres => genres::run_genres(&output),
        Commands::Config { cmd } => config::run_config(cmd, cli.config.as_deref(), loaded, &output),
    }
}
