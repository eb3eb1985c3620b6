pub mod features;
pub mod ids;
pub mod query;
pub mod song;

pub use features::{AudioFeature, FeatureVector, FEATURE_COUNT, TEMPO_MAX};
pub use ids::SessionId;
pub use query::{Query, QuerySignature, YearRange, YEAR_MAX, YEAR_MIN};
pub use song::Song;
