use serde::{Deserialize, Serialize};

use crate::model::features::FeatureVector;
use crate::taxonomy::normalize_tag;

/// One (track, genre) row of the catalog.
///
/// A track tagged with several genres appears once per genre, so `track_id`
/// is not unique across a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Streaming-service track URI or id.
    pub track_id: String,

    /// Lower-cased genre tag.
    pub genre: String,

    pub release_year: i32,

    /// Popularity score; only used to choose which candidates get ranked.
    pub popularity: f64,

    pub features: FeatureVector,
}

impl Song {
    #[must_use]
    pub fn new(
        track_id: impl Into<String>,
        genre: &str,
        release_year: i32,
        popularity: f64,
        features: FeatureVector,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            genre: normalize_tag(genre),
            release_year,
            popularity,
            features,
        }
    }
}
