//! Convert the CSV dataset into a SQLite catalog.

use std::path::Path;

use cantus_core::schema::Database;
use cantus_core::{Catalog, Result};

use crate::load::load_csv;

/// What an import wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows written, one per (track, genre) pair.
    pub rows: usize,
    /// Distinct tracks among those rows.
    pub tracks: usize,
    /// Distinct genre tags.
    pub genres: usize,
}

/// Load `csv_path` and replace the contents of the catalog database at
/// `db_path` with its expanded rows.
///
/// # Errors
///
/// Returns a catalog load error if the CSV cannot be read, or a database
/// error if the SQLite file cannot be written.
pub fn import_csv(csv_path: &Path, db_path: &Path) -> Result<ImportSummary> {
    log::info!(
        "Importing {} into {}",
        csv_path.display(),
        db_path.display()
    );

    let songs = load_csv(csv_path)?;

    let mut db = Database::open(db_path)?;
    let rows = db.replace_songs(&songs, &csv_path.display().to_string())?;

    let catalog = Catalog::new(songs);
    let summary = ImportSummary {
        rows,
        tracks: catalog.track_count(),
        genres: catalog.genre_counts().len(),
    };

    log::info!(
        "Import complete: {} rows, {} tracks, {} genres",
        summary.rows,
        summary.tracks,
        summary.genres
    );
    Ok(summary)
}
