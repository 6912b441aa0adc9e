use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use playshelf_core::page::change_language;
use playshelf_core::{
    CatalogLocation, CatalogStore, DetailPage, ListingPage, PageOptions, PageQuery,
    PlayshelfConfig, SortOption,
};

#[derive(Parser)]
#[command(name = "playshelf", version, about = "Query a casual games catalog")]
struct Cli {
    /// Catalog location (file path or http(s) URL), overrides the config file
    #[arg(long, global = true)]
    source: Option<String>,
    /// Config file to read instead of ./playshelf.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List games, optionally restricted to one category
    List {
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Search titles, descriptions, tags and categories
    Search { term: String },
    /// Show a single game
    Show { id: String },
    /// Games in the same category as the given one
    Related {
        id: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Games carrying an exact tag
    Tag { tag: String },
    /// Random selection, highest rated first
    Featured {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Seed for a reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Highest rated games
    Popular {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Whole catalog after sorting by rating, title or newest
    Sort { option: String },
    /// Listing page model for an index.html query string
    Listing {
        #[arg(default_value = "")]
        query: String,
    },
    /// Detail page model for a play.html query string
    Detail { query: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => PlayshelfConfig::load_from(path),
        None => PlayshelfConfig::load(),
    };
    if let Some(source) = cli.source {
        config.source = source;
    }
    config.validate()?;
    change_language(&config.language);

    let location = CatalogLocation::parse(&config.source)?;
    let seed = match cli.command {
        Command::Featured { seed, .. } => seed,
        _ => None,
    };
    let mut store = match seed {
        Some(seed) => CatalogStore::with_seed(config.store_options(), seed),
        None => CatalogStore::with_options(config.store_options()),
    };
    store.load_from(&location).await;

    let options = PageOptions::from(&config);
    match cli.command {
        Command::List { category } => print_json(&store.by_category(&category)),
        Command::Search { term } => print_json(&store.search(&term)),
        Command::Show { id } => print_json(&store.by_param(&id)),
        Command::Related { id, limit } => {
            let related = match store.by_param(&id) {
                Some(game) => store.related(&game.id, limit.unwrap_or(config.limits.related)),
                None => Vec::new(),
            };
            print_json(&related)
        },
        Command::Tag { tag } => print_json(&store.by_tag(&tag)),
        Command::Featured { limit, .. } => {
            print_json(&store.featured(limit.unwrap_or(config.limits.featured)))
        },
        Command::Popular { limit } => {
            print_json(&store.popular(limit.unwrap_or(config.limits.popular)))
        },
        Command::Sort { option } => print_json(&store.sort_games(SortOption::parse(&option))),
        Command::Listing { query } => print_json(&ListingPage::build(
            &mut store,
            &PageQuery::parse(&query),
            &options,
        )),
        Command::Detail { query } => print_json(&DetailPage::resolve(
            &store,
            &PageQuery::parse(&query),
            &options,
        )),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
