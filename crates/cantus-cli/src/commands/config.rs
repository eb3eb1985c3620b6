use anyhow::{Context, Result};
use toml_edit::{value, DocumentMut};

use cantus_etl::config::{self, CONFIG_KEYS};
use cantus_etl::Config;

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  catalog_path: {}", config.catalog_path.display());
    println!("  page_size: {}", config.page_size);
    println!("  candidate_limit: {}", config.candidate_limit);
    println!("  logging: {:?}", config.logging);

    println!("\nPriority: CLI args > ENV vars (CANTUS_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;

        match key.as_str() {
            "catalog_path" => println!("{}", config.catalog_path.display()),
            "page_size" => println!("{}", config.page_size),
            "candidate_limit" => println!("{}", config.candidate_limit),
            _ => bail_unknown_key(&key)?,
        }
    } else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{contents}");
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'cantus config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value.
pub fn set_config(key: String, value: String) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = update_document(&contents, &key, &value)?;

    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {key} = {value}");
    println!("  in {}", config_path.display());

    Ok(())
}

/// Apply one `key = value` edit to a config document, keeping its comments.
fn update_document(contents: &str, key: &str, raw: &str) -> Result<String> {
    let mut doc: DocumentMut = contents.parse().context("Config file is not valid TOML")?;

    match key {
        "catalog_path" => {
            doc[key] = value(raw);
        }
        "page_size" | "candidate_limit" => {
            let number: i64 = raw
                .parse()
                .with_context(|| format!("{key} must be a whole number, got '{raw}'"))?;
            anyhow::ensure!(number > 0, "{key} must be at least 1");
            doc[key] = value(number);
        }
        _ => bail_unknown_key(key)?,
    }

    Ok(doc.to_string())
}

fn bail_unknown_key(key: &str) -> Result<()> {
    anyhow::bail!(
        "Unknown config key: {key}\n\nValid keys: {}",
        CONFIG_KEYS.join(", ")
    )
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    let config_path = config::config_file_path();
    println!("{}", config_path.display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cantus.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
