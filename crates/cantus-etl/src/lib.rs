//! Catalog loading and configuration for cantus.
//!
//! Loads the cleaned song dataset (CSV or an imported SQLite catalog),
//! expands multi-genre rows, and provides the layered [`Config`].

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod import;
pub mod load;

pub use config::Config;
pub use import::{import_csv, ImportSummary};
pub use load::{load, CatalogSource};
