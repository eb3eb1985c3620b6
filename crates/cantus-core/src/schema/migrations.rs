/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- One row per (track, genre) pair; position preserves load order
CREATE TABLE IF NOT EXISTS songs (
    position INTEGER PRIMARY KEY,
    track_id TEXT NOT NULL,
    genre TEXT NOT NULL,
    release_year INTEGER NOT NULL,
    popularity REAL NOT NULL,
    acousticness REAL NOT NULL,
    danceability REAL NOT NULL,
    energy REAL NOT NULL,
    instrumentalness REAL NOT NULL,
    valence REAL NOT NULL,
    tempo REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_songs_genre_year ON songs(genre, release_year);
CREATE INDEX IF NOT EXISTS idx_songs_track_id ON songs(track_id);

-- Import history
CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    row_count INTEGER NOT NULL,
    imported_at TEXT NOT NULL
);
"#;

/// All migrations in order.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_catalog_schema",
    sql: MIGRATION_001,
}];
