//! The fixed-order audio feature vector shared by catalog rows and queries.
//!
//! Distances are only meaningful when both sides use the same order, so the
//! order lives in exactly one place: [`AudioFeature::ALL`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Number of dimensions in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 6;

/// Upper bound of the tempo feature, in beats per minute.
pub const TEMPO_MAX: f64 = 244.0;

/// One named dimension of a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFeature {
    Acousticness,
    Danceability,
    Energy,
    Instrumentalness,
    Valence,
    Tempo,
}

impl AudioFeature {
    /// Every feature, in vector order.
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::Acousticness,
        Self::Danceability,
        Self::Energy,
        Self::Instrumentalness,
        Self::Valence,
        Self::Tempo,
    ];

    /// Position of this feature inside a [`FeatureVector`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the dataset and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Acousticness => "acousticness",
            Self::Danceability => "danceability",
            Self::Energy => "energy",
            Self::Instrumentalness => "instrumentalness",
            Self::Valence => "valence",
            Self::Tempo => "tempo",
        }
    }

    /// Look up a feature by column name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The documented value range of this feature.
    #[must_use]
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Self::Tempo => 0.0..=TEMPO_MAX,
            _ => 0.0..=1.0,
        }
    }
}

impl fmt::Display for AudioFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Six audio descriptors in [`AudioFeature::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub const fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    #[must_use]
    pub const fn get(&self, feature: AudioFeature) -> f64 {
        self.0[feature.index()]
    }

    pub fn set(&mut self, feature: AudioFeature, value: f64) {
        self.0[feature.index()] = value;
    }

    #[must_use]
    pub fn with(mut self, feature: AudioFeature, value: f64) -> Self {
        self.set(feature, value);
        self
    }

    /// Iterate over `(feature, value)` pairs in vector order.
    pub fn iter(&self) -> impl Iterator<Item = (AudioFeature, f64)> + '_ {
        AudioFeature::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Whether every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Sum of squared component differences.
    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance to `other`. Components are not rescaled, so tempo
    /// dominates unless the other features differ substantially.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Check every component against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] naming the first offending feature.
    pub fn validate(&self) -> Result<()> {
        for (feature, value) in self.iter() {
            let range = feature.range();
            if !range.contains(&value) {
                return Err(Error::invalid_query(
                    feature.name(),
                    format!(
                        "{value} is outside [{}, {}]",
                        range.start(),
                        range.end()
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_matches_index() {
        for (i, feature) in AudioFeature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
        assert_eq!(AudioFeature::Tempo.index(), FEATURE_COUNT - 1);
    }

    #[test]
    fn test_feature_from_name() {
        assert_eq!(
            AudioFeature::from_name("Valence"),
            Some(AudioFeature::Valence)
        );
        assert_eq!(AudioFeature::from_name(" tempo "), Some(AudioFeature::Tempo));
        assert_eq!(AudioFeature::from_name("liveness"), None);
    }

    #[test]
    fn test_distance_zero_for_identical_vectors() {
        let v = FeatureVector::new([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert!(v.distance(&v).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = FeatureVector::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let b = FeatureVector::new([0.0, 0.0, 0.0, 0.0, 0.6, 0.8]);
        assert!((a.distance(&b) - 1.0).abs() < 1e-12);
        assert!((b.distance(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_with_and_get() {
        let v = FeatureVector::default().with(AudioFeature::Tempo, 120.0);
        assert!((v.get(AudioFeature::Tempo) - 120.0).abs() < f64::EPSILON);
        assert!(v.get(AudioFeature::Energy).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let low = FeatureVector::new([0.0; FEATURE_COUNT]);
        let high = FeatureVector::new([1.0, 1.0, 1.0, 1.0, 1.0, TEMPO_MAX]);
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_validate_names_offending_feature() {
        let v = FeatureVector::new([0.5, 1.2, 0.5, 0.5, 0.5, 120.0]);
        match v.validate() {
            Err(Error::InvalidQuery { field, .. }) => assert_eq!(field, "danceability"),
            other => panic!("expected invalid query, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_tempo_out_of_range_and_nan() {
        let fast = FeatureVector::new([0.5, 0.5, 0.5, 0.5, 0.5, 300.0]);
        assert!(fast.validate().is_err());

        let nan = FeatureVector::new([f64::NAN, 0.5, 0.5, 0.5, 0.5, 100.0]);
        assert!(nan.validate().is_err());
        assert!(!nan.is_finite());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let v = FeatureVector::new([0.1, 0.2, 0.3, 0.4, 0.5, 120.0]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[0.1,0.2,0.3,0.4,0.5,120.0]");
    }
}
