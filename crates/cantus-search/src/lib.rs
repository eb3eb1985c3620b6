//! Nearest-neighbor song search for cantus.
//!
//! A query narrows the catalog by genre and release year, keeps the most
//! popular matches, and orders them by Euclidean distance between audio
//! feature vectors. A [`Session`] pages through the ordered result and starts
//! over whenever the query changes.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod cursor;
pub mod filter;
pub mod rank;
pub mod session;

pub use cursor::PageCursor;
pub use filter::{filter, filter_for_query};
pub use rank::{rank, RankedResult, RankedSong};
pub use session::{Evaluation, Recommender, Session};
