pub mod browse;
pub mod config;
pub mod genres;
pub mod import;
pub mod recommend;

use anyhow::{Context, Result};
use std::sync::Arc;

use cantus_core::model::{AudioFeature, FeatureVector, Query, YearRange, YEAR_MAX, YEAR_MIN};
use cantus_core::Catalog;
use cantus_etl::Config;
use cantus_search::{RankedSong, Recommender};

pub use browse::run_browse;
pub use genres::show_genres;
pub use import::run_import;
pub use recommend::run_recommend;

/// Query options shared by `recommend` and `browse`.
///
/// Anything left out falls back to the default query.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct QueryArgs {
    /// Genre to search (e.g., "Dance Pop", "rock")
    #[arg(long)]
    pub genre: Option<String>,

    /// First release year (inclusive)
    #[arg(long)]
    pub from: Option<i32>,

    /// Last release year (inclusive)
    #[arg(long)]
    pub to: Option<i32>,

    #[arg(long)]
    pub acousticness: Option<f64>,

    #[arg(long)]
    pub danceability: Option<f64>,

    #[arg(long)]
    pub energy: Option<f64>,

    #[arg(long)]
    pub instrumentalness: Option<f64>,

    #[arg(long)]
    pub valence: Option<f64>,

    /// Tempo in BPM
    #[arg(long)]
    pub tempo: Option<f64>,
}

impl QueryArgs {
    /// Build a query from the default one with these overrides applied.
    pub fn to_query(&self) -> Query {
        let defaults = Query::default();

        let genre = self.genre.clone().unwrap_or(defaults.genre);
        let years = YearRange::new(
            self.from.unwrap_or(defaults.years.start),
            self.to.unwrap_or(defaults.years.end),
        );
        if !years.is_selectable() {
            log::warn!(
                "Catalog years run from {} to {}; {}-{} may match few songs",
                YEAR_MIN,
                YEAR_MAX,
                years.start,
                years.end
            );
        }

        let mut features = defaults.features;
        for (feature, value) in self.feature_overrides() {
            if let Some(value) = value {
                features.set(feature, value);
            }
        }

        Query::new(genre, years, features)
    }

    fn feature_overrides(&self) -> [(AudioFeature, Option<f64>); 6] {
        [
            (AudioFeature::Acousticness, self.acousticness),
            (AudioFeature::Danceability, self.danceability),
            (AudioFeature::Energy, self.energy),
            (AudioFeature::Instrumentalness, self.instrumentalness),
            (AudioFeature::Valence, self.valence),
            (AudioFeature::Tempo, self.tempo),
        ]
    }
}

/// Load the configured catalog and wrap it in a recommender.
pub fn open_recommender(config: &Config) -> Result<Recommender> {
    let catalog = load_catalog(config)?;
    Ok(Recommender::new(Arc::new(catalog)).with_candidate_limit(config.candidate_limit))
}

pub fn load_catalog(config: &Config) -> Result<Catalog> {
    let source = config.catalog_source();
    cantus_etl::load(&source).context(
        "Could not load the song catalog.\n\
         Set one with --catalog, CANTUS_CATALOG_PATH or 'cantus config set catalog_path <path>'",
    )
}

/// Web link for a track id such as `spotify:track:4uLU6hMCjMI75M1A2tKUQC`.
pub fn track_url(track_id: &str) -> String {
    let id = track_id.rsplit(':').next().unwrap_or(track_id);
    format!("https://open.spotify.com/track/{id}")
}

pub fn format_features(features: &FeatureVector) -> String {
    features
        .iter()
        .map(|(feature, value)| format!("{feature}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_query(query: &Query) -> String {
    format!(
        "{} {}-{} {}",
        query.genre,
        query.years.start,
        query.years.end,
        format_features(&query.features)
    )
}

/// One printed line per song; `offset` is the position of the first one.
pub fn write_page(out: &mut impl std::io::Write, page: &[RankedSong], offset: usize) -> Result<()> {
    for (i, song) in page.iter().enumerate() {
        writeln!(
            out,
            "{:>4}. {}  [{} {}] distance {:.3}",
            offset + i + 1,
            track_url(&song.track_id),
            song.genre,
            song.release_year,
            song.distance
        )?;
        writeln!(out, "        {}", format_features(&song.features))?;
    }
    Ok(())
}
