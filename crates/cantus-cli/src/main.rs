use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cantus_etl::Config;

mod commands;

use commands::QueryArgs;

#[derive(Debug, Parser)]
#[command(name = "cantus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the song catalog, CSV or imported SQLite (default: ~/.local/share/cantus/clean_data.csv)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend songs close to a set of audio features
    ///
    /// Keeps the songs of the chosen genre released within the year range,
    /// takes the 500 most popular of them, and orders those by Euclidean
    /// distance between their audio features and the ones given here:
    ///
    /// - acousticness, danceability, energy, instrumentalness, valence: 0.0 to 1.0
    /// - tempo: 0 to 244 BPM
    ///
    /// Tempo is not rescaled, so it weighs far more than the other features.
    /// Any feature left out takes its default value.
    Recommend {
        #[command(flatten)]
        query: QueryArgs,

        /// Number of pages to print
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        pages: u64,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactively page through recommendations
    ///
    /// Reads commands from standard input: `more`, `genre <name>`,
    /// `years <from> <to>`, `set <feature> <value>`, `show`, `help`, `quit`.
    /// Changing any part of the query starts again from the first page.
    Browse {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// List the genre tags in the catalog
    Genres {
        /// Only show the curated genre menu
        #[arg(long)]
        menu: bool,
    },
    /// Import the CSV dataset into a SQLite catalog
    Import {
        /// Path to the cleaned CSV dataset
        csv: PathBuf,

        /// Output database (default: the CSV path with a .db extension)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file
    Get {
        /// Config key (catalog_path, page_size, candidate_limit)
        key: Option<String>,
    },
    /// Set a value in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn init_logging(opts: twyg::Opts) {
    if let Err(error) = twyg::setup(opts) {
        eprintln!("Could not set up logging: {error:?}");
    }
}

/// Load the configuration and start logging from it.
fn setup(catalog: Option<PathBuf>) -> Result<Config> {
    let config = match catalog {
        Some(path) => Config::load_with_catalog_path(path)?,
        None => Config::load()?,
    };
    init_logging(config.logging.clone());
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = cli.catalog;

    match cli.command {
        Commands::Recommend { query, pages, json } => {
            let config = setup(catalog)?;
            commands::run_recommend(&config, &query, pages, json)?;
        }
        Commands::Browse { query } => {
            let config = setup(catalog)?;
            commands::run_browse(&config, &query)?;
        }
        Commands::Genres { menu } => {
            let config = setup(catalog)?;
            commands::show_genres(&config, menu)?;
        }
        Commands::Import { csv, output } => {
            setup(catalog)?;
            commands::run_import(&csv, output)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Get { key } => commands::config::get_config(key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(key, value)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
