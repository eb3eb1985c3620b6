use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use cantus_etl::import_csv;

/// Where `cantus import` writes when no `--output` is given.
pub fn default_output(csv: &Path) -> PathBuf {
    csv.with_extension("db")
}

pub fn run_import(csv: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| default_output(csv));

    let summary = import_csv(csv, &output)
        .with_context(|| format!("Failed to import {}", csv.display()))?;

    println!("✓ Imported {}", csv.display());
    println!("  Rows: {}", summary.rows);
    println!("  Tracks: {}", summary.tracks);
    println!("  Genres: {}", summary.genres);
    println!("  Catalog: {}", output.display());
    println!(
        "\nUse it with: cantus --catalog {} recommend",
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantus_etl::CatalogSource;
    use tempfile::TempDir;

    #[test]
    fn test_default_output_is_sqlite_catalog() {
        let output = default_output(Path::new("data/clean_data.csv"));
        assert_eq!(output, PathBuf::from("data/clean_data.db"));
        assert!(matches!(
            CatalogSource::from_path(output),
            CatalogSource::Sqlite(_)
        ));
    }

    #[test]
    fn test_import_missing_csv_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("catalog.db");
        assert!(run_import(&dir.path().join("missing.csv"), Some(output.clone())).is_err());
        assert!(!output.exists());
    }
}
