//! Core song model for cantus.
//!
//! This crate defines the catalog row and feature-vector types, query
//! validation, genre tags, the immutable in-memory [`Catalog`], and the
//! SQLite schema used for imported catalogs.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod model;
pub mod schema;
pub mod taxonomy;

pub use catalog::Catalog;
pub use error::{Error, Result};
