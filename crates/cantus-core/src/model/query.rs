use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::features::FeatureVector;
use crate::taxonomy::normalize_tag;

/// Earliest selectable release year.
pub const YEAR_MIN: i32 = 1908;

/// Latest selectable release year.
pub const YEAR_MAX: i32 = 2022;

/// An inclusive release-year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Whether both ends lie within the selectable years
    /// [`YEAR_MIN`]..=[`YEAR_MAX`]. Ranges outside are still valid.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        YEAR_MIN <= self.start && self.end <= YEAR_MAX
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(1980, YEAR_MAX)
    }
}

/// What the caller is looking for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Genre name or tag; matched case-insensitively.
    pub genre: String,
    pub years: YearRange,
    pub features: FeatureVector,
}

impl Query {
    #[must_use]
    pub fn new(genre: impl Into<String>, years: YearRange, features: FeatureVector) -> Self {
        Self {
            genre: genre.into(),
            years,
            features,
        }
    }

    /// The catalog tag this query's genre matches.
    #[must_use]
    pub fn genre_tag(&self) -> String {
        normalize_tag(&self.genre)
    }

    /// Reject queries that cannot be answered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] when the year range is inverted or a
    /// feature lies outside its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.years.start > self.years.end {
            return Err(Error::invalid_query(
                "years",
                format!(
                    "start year {} is after end year {}",
                    self.years.start, self.years.end
                ),
            ));
        }
        self.features.validate()
    }

    /// Identity of this query for pagination purposes.
    #[must_use]
    pub fn signature(&self) -> QuerySignature {
        QuerySignature {
            genre: self.genre_tag(),
            years: self.years,
            features: self.features,
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(
            "Rock",
            YearRange::default(),
            FeatureVector::new([0.5, 0.5, 0.5, 0.5, 0.45, 125.01]),
        )
    }
}

/// Every field that makes two queries distinct.
///
/// The genre is compared in its normalized form, so "Rock" and "rock" are
/// the same query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySignature {
    genre: String,
    years: YearRange,
    features: FeatureVector,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::features::AudioFeature;

    #[test]
    fn test_selectable_year_bounds() {
        assert!(YearRange::default().is_selectable());
        assert!(YearRange::new(YEAR_MIN, YEAR_MAX).is_selectable());
        assert!(!YearRange::new(1900, 1950).is_selectable());
        assert!(!YearRange::new(2000, 2030).is_selectable());
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let years = YearRange::new(1980, 2000);
        assert!(years.contains(1980));
        assert!(years.contains(2000));
        assert!(!years.contains(1979));
        assert!(!years.contains(2001));
    }

    #[test]
    fn test_default_query_is_valid() {
        let query = Query::default();
        assert!(query.validate().is_ok());
        assert_eq!(query.genre_tag(), "rock");
        assert_eq!(query.years, YearRange::new(1980, 2022));
    }

    #[test]
    fn test_inverted_years_rejected() {
        let query = Query::new("rock", YearRange::new(2000, 1990), FeatureVector::default());
        match query.validate() {
            Err(Error::InvalidQuery { field, .. }) => assert_eq!(field, "years"),
            other => panic!("expected invalid query, got {other:?}"),
        }
    }

    #[test]
    fn test_single_year_range_is_valid() {
        let query = Query::new("rock", YearRange::new(1999, 1999), FeatureVector::default());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_years_outside_selectable_bounds_are_valid() {
        let query = Query::new("rock", YearRange::new(1800, 2100), FeatureVector::default());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_feature_rejected() {
        let mut query = Query::default();
        query.features.set(AudioFeature::Energy, -0.1);
        let err = query.validate().unwrap_err();
        assert!(err.is_invalid_query());
        assert!(err.to_string().contains("energy"));
    }

    #[test]
    fn test_signature_ignores_genre_case() {
        let a = Query::new("Rock", YearRange::default(), FeatureVector::default());
        let b = Query::new("rock", YearRange::default(), FeatureVector::default());
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_changes_with_any_field() {
        let base = Query::default();

        let mut tempo = base.clone();
        tempo.features.set(AudioFeature::Tempo, 130.0);
        assert_ne!(base.signature(), tempo.signature());

        let mut years = base.clone();
        years.years.start = 1981;
        assert_ne!(base.signature(), years.signature());

        let mut genre = base.clone();
        genre.genre = "Jazz".to_string();
        assert_ne!(base.signature(), genre.signature());
    }
}
