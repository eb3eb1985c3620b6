//! The immutable in-memory song table.

use std::collections::{BTreeMap, HashSet};

use crate::model::{Song, YearRange};

/// Every (track, genre) row known to the process.
///
/// Built once at startup and read thereafter; share it between sessions
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    #[must_use]
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// All rows, in load order.
    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Number of distinct track ids.
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.songs
            .iter()
            .map(|s| s.track_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Row count per genre tag, sorted by tag.
    #[must_use]
    pub fn genre_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for song in &self.songs {
            *counts.entry(song.genre.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect()
    }

    /// Number of rows carrying `tag`.
    #[must_use]
    pub fn genre_count(&self, tag: &str) -> usize {
        self.songs.iter().filter(|s| s.genre == tag).count()
    }

    /// Earliest and latest release year, or `None` for an empty catalog.
    #[must_use]
    pub fn year_span(&self) -> Option<YearRange> {
        let start = self.songs.iter().map(|s| s.release_year).min()?;
        let end = self.songs.iter().map(|s| s.release_year).max()?;
        Some(YearRange::new(start, end))
    }
}

impl FromIterator<Song> for Catalog {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
