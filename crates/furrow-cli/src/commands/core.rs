//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_engine` - Build the recommendation engine from config sources
//! - `cmd_init` - Initialize the database

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use furrow_core::{CropCatalog, Database, EngineConfig, MarketPrices, RecommendationEngine};

/// Where the engine config and crop catalog come from
#[derive(Debug, Clone, Default)]
pub struct EngineSources {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Open (and migrate) the database
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn load_config(sources: &EngineSources) -> Result<EngineConfig> {
    EngineConfig::load(sources.config.as_deref()).context("Failed to load engine config")
}

pub fn load_catalog(sources: &EngineSources) -> Result<CropCatalog> {
    CropCatalog::load(sources.catalog.as_deref()).context("Failed to load crop catalog")
}

/// Build the engine: config and catalog from their sources, catalog prices
/// overlaid with an optional CSV, and an optional top-N override.
pub fn load_engine(
    sources: &EngineSources,
    prices_csv: Option<&Path>,
    top: Option<usize>,
) -> Result<RecommendationEngine> {
    let mut config = load_config(sources)?;
    if let Some(n) = top {
        config.top_n = n;
    }

    let catalog = load_catalog(sources)?;
    let mut prices = MarketPrices::from_catalog(&catalog);
    if let Some(path) = prices_csv {
        let csv = MarketPrices::from_csv_path(path)
            .with_context(|| format!("Failed to read prices from {}", path.display()))?;
        prices.merge(csv);
    }

    RecommendationEngine::new(config, catalog, prices).context("Invalid engine configuration")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Browse crops: furrow crops");
    println!("  2. Get a recommendation: furrow recommend -l 2.5 -s loamy -p grains");

    Ok(())
}
