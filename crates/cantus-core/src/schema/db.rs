use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{FeatureVector, Song};

use super::migrations::MIGRATIONS;

/// Tables every catalog database carries.
const CATALOG_TABLES: [&str; 3] = ["schema_migrations", "songs", "imports"];

/// A SQLite catalog database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

/// Metadata recorded for each catalog import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    /// Path (or other description) of the imported source.
    pub source: String,
    pub row_count: usize,
    pub imported_at: DateTime<Utc>,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an existing catalog read-only. Nothing is created or migrated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogLoad`] if the file is missing, is not a
    /// SQLite database, or lacks the catalog tables.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |message: String| Error::CatalogLoad {
            path: path.to_path_buf(),
            message,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| load_error(e.to_string()))?;

        let mut missing = Vec::new();
        for table in CATALOG_TABLES {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .map_err(|e| load_error(e.to_string()))?;
            if count == 0 {
                missing.push(table);
            }
        }

        if !missing.is_empty() {
            return Err(load_error(format!(
                "not a cantus catalog (missing table(s): {})",
                missing.join(", ")
            )));
        }

        Ok(Self { conn })
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Song table
impl Database {
    /// Replace the whole song table with `songs`, keeping their order, and
    /// record the import. Runs in a single transaction.
    pub fn replace_songs(&mut self, songs: &[Song], source: &str) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM songs", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO songs (
                    position, track_id, genre, release_year, popularity,
                    acousticness, danceability, energy, instrumentalness, valence, tempo
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for (position, song) in songs.iter().enumerate() {
                let f = song.features.as_array();
                stmt.execute(rusqlite::params![
                    i64::try_from(position).unwrap_or(i64::MAX),
                    song.track_id,
                    song.genre,
                    song.release_year,
                    song.popularity,
                    f[0],
                    f[1],
                    f[2],
                    f[3],
                    f[4],
                    f[5],
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO imports (source, row_count, imported_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                source,
                i64::try_from(songs.len()).unwrap_or(i64::MAX),
                Utc::now().to_rfc3339(),
            ],
        )?;
        tx.commit()?;
        Ok(songs.len())
    }

    /// All songs in their original load order.
    pub fn list_songs(&self) -> Result<Vec<Song>> {
        let mut stmt = self.conn.prepare(
            "SELECT track_id, genre, release_year, popularity,
                    acousticness, danceability, energy, instrumentalness, valence, tempo
             FROM songs
             ORDER BY position",
        )?;

        let songs = stmt
            .query_map([], |row| Self::row_to_song(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(songs)
    }

    /// Number of rows in the song table.
    pub fn song_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// The most recent import, if any.
    pub fn latest_import(&self) -> Result<Option<ImportRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT source, row_count, imported_at FROM imports ORDER BY id DESC LIMIT 1",
        )?;
        let mut rows = stmt.query([])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let source: String = row.get(0)?;
        let row_count: i64 = row.get(1)?;
        let imported_at: String = row.get(2)?;
        let imported_at = DateTime::parse_from_rfc3339(&imported_at)
            .map_err(|e| Error::InvalidData(format!("bad import timestamp {imported_at}: {e}")))?
            .with_timezone(&Utc);

        Ok(Some(ImportRecord {
            source,
            row_count: usize::try_from(row_count).unwrap_or(0),
            imported_at,
        }))
    }

    fn row_to_song(row: &rusqlite::Row) -> rusqlite::Result<Song> {
        Ok(Song {
            track_id: row.get(0)?,
            genre: row.get(1)?,
            release_year: row.get(2)?,
            popularity: row.get(3)?,
            features: FeatureVector::new([
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ]),
        })
    }
}
