//! Brute-force nearest-neighbor ranking.
//!
//! Every candidate is scored by Euclidean distance to the query vector and
//! the whole candidate set is returned in ascending order. At a few hundred
//! points in six dimensions no index pays for itself.

use serde::{Deserialize, Serialize};

use cantus_core::model::{FeatureVector, Song};

/// A candidate song with its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSong {
    pub track_id: String,
    pub features: FeatureVector,
    pub distance: f64,
    pub genre: String,
    pub release_year: i32,
    pub popularity: f64,
}

impl RankedSong {
    fn from_song(song: &Song, distance: f64) -> Self {
        Self {
            track_id: song.track_id.clone(),
            features: song.features,
            distance,
            genre: song.genre.clone(),
            release_year: song.release_year,
            popularity: song.popularity,
        }
    }
}

/// Candidates ordered by non-decreasing distance to a query vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResult {
    entries: Vec<RankedSong>,
}

impl RankedResult {
    #[must_use]
    pub fn entries(&self) -> &[RankedSong] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedSong> {
        self.entries.iter()
    }

    /// Track ids in rank order.
    #[must_use]
    pub fn track_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.track_id.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedSong;
    type IntoIter = std::slice::Iter<'a, RankedSong>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Order `candidates` by Euclidean distance to `query`.
///
/// Equal distances keep candidate order, so identical input always gives
/// identical output. An empty candidate list gives an empty result.
pub fn rank(candidates: &[&Song], query: &FeatureVector) -> RankedResult {
    let mut entries: Vec<RankedSong> = candidates
        .iter()
        .map(|song| RankedSong::from_song(song, song.features.distance(query)))
        .collect();

    entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    log::debug!("Ranked {} candidates", entries.len());
    RankedResult { entries }
}
