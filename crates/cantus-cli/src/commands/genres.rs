use anyhow::Result;

use cantus_core::schema::Database;
use cantus_core::taxonomy::Genre;
use cantus_etl::{CatalogSource, Config};

use super::load_catalog;

pub fn show_genres(config: &Config, menu_only: bool) -> Result<()> {
    let catalog = load_catalog(config)?;

    if menu_only {
        println!("\nGenre menu\n");
        for genre in Genre::menu() {
            println!("  {:<12} {:>7} rows", genre.name, catalog.genre_count(&genre.tag));
        }
        return Ok(());
    }

    let counts = catalog.genre_counts();
    println!("\nCatalog: {}", config.catalog_path.display());
    println!("  Rows: {}", catalog.len());
    println!("  Tracks: {}", catalog.track_count());
    if let Some(span) = catalog.year_span() {
        println!("  Years: {}-{}", span.start, span.end);
    }
    println!("  Genres: {}", counts.len());
    if let CatalogSource::Sqlite(path) = config.catalog_source() {
        if let Some(import) = Database::open_existing(&path)?.latest_import()? {
            println!(
                "  Imported: {} from {}",
                import.imported_at.format("%Y-%m-%d %H:%M UTC"),
                import.source
            );
        }
    }
    println!();

    for (tag, count) in counts {
        println!("  {count:>7}  {tag}");
    }

    Ok(())
}
