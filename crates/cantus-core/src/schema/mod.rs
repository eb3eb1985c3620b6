mod db;
mod migrations;

pub use db::{Database, ImportRecord};
pub use migrations::{Migration, MIGRATIONS};
