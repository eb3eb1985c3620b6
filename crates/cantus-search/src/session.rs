//! Query evaluation over a shared catalog, and per-session paging state.

use serde::Serialize;
use std::sync::Arc;

use cantus_core::defaults::DEFAULT_CANDIDATE_LIMIT;
use cantus_core::model::{Query, SessionId};
use cantus_core::{Catalog, Result};

use crate::cursor::PageCursor;
use crate::filter::filter_for_query;
use crate::rank::{rank, RankedResult, RankedSong};

/// Stateless filter-then-rank over a read-only catalog.
///
/// Cheap to clone; every clone shares the same catalog.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    candidate_limit: usize,
}

impl Recommender {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    /// Cap the number of candidates that enter ranking (at least one).
    #[must_use]
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit.max(1);
        self
    }

    /// Validate `query`, filter the catalog and rank what is left.
    ///
    /// # Errors
    ///
    /// Returns [`cantus_core::Error::InvalidQuery`] before any filtering if
    /// the query is invalid. No matches is an empty result, not an error.
    pub fn recommend(&self, query: &Query) -> Result<RankedResult> {
        query.validate()?;
        let candidates = filter_for_query(self.catalog.songs(), query, self.candidate_limit);
        Ok(rank(&candidates, &query.features))
    }

    /// Start a new paging session with its own cursor.
    #[must_use]
    pub fn session(&self, page_size: usize) -> Session {
        Session::new(self.clone(), page_size)
    }
}

/// The outcome of evaluating one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Every ranked candidate.
    pub results: RankedResult,
    /// The window of `results` at the session's current offset.
    pub page: Vec<RankedSong>,
    pub offset: usize,
}

/// One caller's view: the last evaluated result and a cursor into it.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    recommender: Recommender,
    cursor: PageCursor,
    results: RankedResult,
}

impl Session {
    #[must_use]
    pub fn new(recommender: Recommender, page_size: usize) -> Self {
        Self {
            id: SessionId::new(),
            recommender,
            cursor: PageCursor::new(page_size),
            results: RankedResult::default(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// The most recently evaluated result (empty before the first query).
    #[must_use]
    pub fn results(&self) -> &RankedResult {
        &self.results
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset()
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.cursor.page_size()
    }

    /// Whether the cursor has run past the last result.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted(self.results.len())
    }

    /// Evaluate `query` and return its current page.
    ///
    /// A query that differs from the previous one in any field starts at the
    /// first page; re-evaluating an unchanged query keeps the current page.
    /// If the query is rejected the session keeps its previous result and
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`cantus_core::Error::InvalidQuery`] for invalid queries.
    pub fn evaluate_query(&mut self, query: &Query) -> Result<Evaluation> {
        let results = self.recommender.recommend(query)?;

        if self.cursor.observe(query.signature()) {
            log::debug!("Session {}: query changed, paging reset", self.id);
        }
        self.results = results;

        Ok(Evaluation {
            results: self.results.clone(),
            page: self.current_page().to_vec(),
            offset: self.cursor.offset(),
        })
    }

    /// Advance to the next page and return it; empty once exhausted.
    pub fn advance_page(&mut self) -> Vec<RankedSong> {
        if !self.cursor.advance(self.results.len()) {
            log::debug!("Session {}: no more results", self.id);
        }
        self.current_page().to_vec()
    }

    /// The page at the current offset.
    #[must_use]
    pub fn current_page(&self) -> &[RankedSong] {
        self.cursor.window(self.results.entries())
    }
}
