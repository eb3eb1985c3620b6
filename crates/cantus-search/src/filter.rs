//! Genre and release-year filtering with a popularity cap.

use cantus_core::model::{Query, Song, YearRange};
use cantus_core::taxonomy::normalize_tag;

/// Rows whose genre tag equals `genre` (case-insensitive) and whose release
/// year lies in `years`, most popular first, at most `limit` of them.
///
/// Rows with equal popularity keep their catalog order.
pub fn filter<'a>(songs: &'a [Song], genre: &str, years: YearRange, limit: usize) -> Vec<&'a Song> {
    let tag = normalize_tag(genre);

    let mut matches: Vec<&Song> = songs
        .iter()
        .filter(|song| song.genre == tag && years.contains(song.release_year))
        .collect();

    let matched = matches.len();
    matches.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
    matches.truncate(limit);

    log::debug!(
        "Filter genre={:?} years={}..={}: {} matches, {} kept",
        tag,
        years.start,
        years.end,
        matched,
        matches.len()
    );
    matches
}

/// [`filter`] driven by a query's genre and year range.
pub fn filter_for_query<'a>(songs: &'a [Song], query: &Query, limit: usize) -> Vec<&'a Song> {
    filter(songs, &query.genre, query.years, limit)
}
