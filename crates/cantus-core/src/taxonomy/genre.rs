use serde::{Deserialize, Serialize};

/// Display names of the genres offered for selection.
pub const GENRE_MENU: [&str; 11] = [
    "Dance Pop",
    "Electronic",
    "Electropop",
    "Hip Hop",
    "Jazz",
    "K-pop",
    "Latin",
    "Pop",
    "Pop Rap",
    "R&B",
    "Rock",
];

/// A selectable genre.
///
/// Catalog rows carry only the lower-cased `tag`; `name` is what a caller
/// shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    /// Display name (e.g., "Dance Pop").
    pub name: String,

    /// Catalog tag the name matches (e.g., "dance pop").
    pub tag: String,
}

impl Genre {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let tag = normalize_tag(&name);
        Self { name, tag }
    }

    /// The curated genre menu, in display order.
    #[must_use]
    pub fn menu() -> Vec<Self> {
        GENRE_MENU.iter().map(|name| Self::new(*name)).collect()
    }
}

/// Canonical form of a genre tag: trimmed and lower-cased.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a genre cell into its tags.
///
/// The dataset stores genres as a bracketed, quoted list, e.g.
/// `['dance pop', 'pop']`. A bare value without brackets is treated the same
/// way. Empty entries are dropped, so `[]` yields no tags.
#[must_use]
pub fn parse_genre_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|entry| normalize_tag(entry.trim().trim_matches(|c| c == '\'' || c == '"')))
        .filter(|tag| !tag.is_empty())
        .collect()
}
