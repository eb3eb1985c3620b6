use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use cantus_core::defaults::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_PAGE_SIZE};

use crate::load::CatalogSource;

/// Configuration for cantus.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CANTUS_* prefix)
/// 3. Config file (~/.config/cantus/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the song catalog (CSV dataset or imported SQLite catalog).
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/clean_data.csv
    /// - ENV: CANTUS_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/clean_data.csv"
    /// - Default: ~/.local/share/cantus/clean_data.csv
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Songs per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Most popular matching rows kept for ranking.
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,

    /// Logger options.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            page_size: DEFAULT_PAGE_SIZE,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/cantus/config.toml
    /// Reads environment variables with CANTUS_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if a limit is zero.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cantus");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration, overriding the catalog path.
    ///
    /// This is used when the --catalog CLI flag is provided.
    pub fn load_with_catalog_path(catalog_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.catalog_path = catalog_path;
        Ok(config)
    }

    /// Reject limits the search engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.page_size > 0, "page_size must be at least 1");
        anyhow::ensure!(
            self.candidate_limit > 0,
            "candidate_limit must be at least 1"
        );
        Ok(())
    }

    /// The catalog source implied by `catalog_path`.
    #[must_use]
    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::from_path(self.catalog_path.clone())
    }
}

/// Get the default catalog path.
///
/// Returns: ~/.local/share/cantus/clean_data.csv (or platform equivalent)
fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantus")
        .join("clean_data.csv")
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_candidate_limit() -> usize {
    DEFAULT_CANDIDATE_LIMIT
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cantus/config.toml
/// - macOS: ~/Library/Application Support/cantus/config.toml
/// - Windows: %APPDATA%\cantus\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantus")
        .join("config.toml")
}

/// Keys accepted by `cantus config get` and `cantus config set`.
pub const CONFIG_KEYS: [&str; 3] = ["catalog_path", "page_size", "candidate_limit"];

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cantus Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CANTUS_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the song catalog
#
# Either the cleaned CSV dataset or a SQLite catalog created with
# 'cantus import'. Files ending in .db, .sqlite or .sqlite3 are read as SQLite.
#
# Can also be set via:
# - CLI: cantus --catalog /custom/clean_data.csv recommend
# - Environment: CANTUS_CATALOG_PATH=/custom/clean_data.csv
#
# Default: Platform-specific data directory
#catalog_path = "/path/to/clean_data.csv"

# Songs shown per page
page_size = 6

# Number of most popular matching songs that are ranked by similarity
candidate_limit = 500

# Logger options (passed to twyg)
#[logging]
#coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
