//! Catalog loading.
//!
//! Reads the cleaned song dataset once, expands each row's genre list into
//! one row per genre tag, and returns an immutable [`Catalog`]. Two sources
//! are supported: the CSV dataset itself and a SQLite catalog written by
//! [`crate::import`].

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use cantus_core::model::{FeatureVector, Song};
use cantus_core::schema::Database;
use cantus_core::taxonomy::parse_genre_list;
use cantus_core::{Catalog, Error, Result};

/// Columns the dataset must provide. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "uri",
    "genres",
    "release_year",
    "popularity",
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "valence",
    "tempo",
];

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Csv(PathBuf),
    Sqlite(PathBuf),
}

impl CatalogSource {
    /// Pick the source kind from the file extension: `.db`, `.sqlite` and
    /// `.sqlite3` are SQLite catalogs, everything else is CSV.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_sqlite = path
            .extension()
            .map(|ext| {
                matches!(
                    ext.to_string_lossy().to_lowercase().as_ref(),
                    "db" | "sqlite" | "sqlite3"
                )
            })
            .unwrap_or(false);

        if is_sqlite {
            Self::Sqlite(path)
        } else {
            Self::Csv(path)
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Csv(path) | Self::Sqlite(path) => path,
        }
    }
}

/// One line of the dataset before genre expansion.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    uri: String,
    genres: String,
    release_year: f64,
    popularity: f64,
    acousticness: f64,
    danceability: f64,
    energy: f64,
    instrumentalness: f64,
    valence: f64,
    tempo: f64,
}

/// Load a catalog from `source`.
///
/// # Errors
///
/// Returns [`Error::CatalogLoad`] if the source is missing, malformed, or
/// lacks a required column.
pub fn load(source: &CatalogSource) -> Result<Catalog> {
    let songs = match source {
        CatalogSource::Csv(path) => load_csv(path)?,
        CatalogSource::Sqlite(path) => load_sqlite(path)?,
    };

    let catalog = Catalog::new(songs);
    log::info!(
        "Loaded catalog from {}: {} rows, {} tracks",
        source.path().display(),
        catalog.len(),
        catalog.track_count()
    );
    Ok(catalog)
}

/// Read and expand every row of a CSV dataset.
pub fn load_csv(path: &Path) -> Result<Vec<Song>> {
    let file = File::open(path).map_err(|e| load_error(path, e.to_string()))?;
    read_csv(file, path)
}

/// Read and expand CSV rows from any reader. `path` is only used in errors.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Vec<Song>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| load_error(path, e.to_string()))?
        .clone();
    check_columns(&headers, path)?;

    let mut songs = Vec::new();
    let mut raw = csv::StringRecord::new();
    let mut skipped = 0_usize;

    while reader
        .read_record(&mut raw)
        .map_err(|e| load_error(path, e.to_string()))?
    {
        let line = raw.position().map_or(0, csv::Position::line);
        let record: CsvRecord = raw
            .deserialize(Some(&headers))
            .map_err(|e| load_error(path, format!("line {line}: {e}")))?;

        let before = songs.len();
        expand_record(record, line, path, &mut songs)?;
        if songs.len() == before {
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::warn!(
            "{} rows in {} have no genre tags and were skipped",
            skipped,
            path.display()
        );
    }

    Ok(songs)
}

fn check_columns(headers: &csv::StringRecord, path: &Path) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(load_error(
            path,
            format!("missing required column(s): {}", missing.join(", ")),
        ))
    }
}

/// Push one song per genre tag of `record`.
fn expand_record(record: CsvRecord, line: u64, path: &Path, out: &mut Vec<Song>) -> Result<()> {
    let features = FeatureVector::new([
        record.acousticness,
        record.danceability,
        record.energy,
        record.instrumentalness,
        record.valence,
        record.tempo,
    ]);
    if !features.is_finite() || !record.popularity.is_finite() {
        return Err(load_error(path, format!("line {line}: non-finite value")));
    }

    let release_year = whole_year(record.release_year)
        .ok_or_else(|| load_error(path, format!("line {line}: bad release_year")))?;

    for tag in parse_genre_list(&record.genres) {
        out.push(Song::new(
            record.uri.clone(),
            &tag,
            release_year,
            record.popularity,
            features,
        ));
    }
    Ok(())
}

/// Accept years written as `1990` or `1990.0`.
#[allow(clippy::cast_possible_truncation)]
fn whole_year(value: f64) -> Option<i32> {
    let in_range = value.is_finite()
        && value.fract() == 0.0
        && value >= f64::from(i32::MIN)
        && value <= f64::from(i32::MAX);
    in_range.then_some(value as i32)
}

/// Read a SQLite catalog written by the importer. The file is opened
/// read-only and must already carry the catalog tables.
pub fn load_sqlite(path: &Path) -> Result<Vec<Song>> {
    if !path.is_file() {
        return Err(load_error(path, "no such catalog database".to_string()));
    }

    let db = Database::open_existing(path)?;
    let songs = db.list_songs().map_err(|e| load_error(path, e.to_string()))?;
    if songs.is_empty() {
        log::warn!("Catalog database {} has no songs", path.display());
    }
    Ok(songs)
}

fn load_error(path: &Path, message: String) -> Error {
    Error::CatalogLoad {
        path: path.to_path_buf(),
        message,
    }
}
