//! Tunable defaults shared by the search engine and configuration.

/// Songs shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Most popular matching rows that enter ranking.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 500;
