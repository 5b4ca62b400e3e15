//! Catalog and configuration display commands (crops, config)

use anyhow::{anyhow, Result};
use furrow_core::catalog::default_catalog_path;
use furrow_core::config::default_config_path;
use furrow_core::{CropCategory, SoilType};

use super::{load_catalog, load_config, EngineSources};

/// List catalog crops, optionally filtered by category and soil
pub fn cmd_crops(sources: &EngineSources, category: Option<&str>, soil: Option<&str>) -> Result<()> {
    let catalog = load_catalog(sources)?;

    let category: Option<CropCategory> = category
        .map(|c| c.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;
    let soil: Option<SoilType> = soil
        .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;

    let crops: Vec<_> = catalog
        .crops()
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .filter(|c| soil.map_or(true, |s| c.tolerates(s)))
        .collect();

    if crops.is_empty() {
        println!("No crops match.");
        return Ok(());
    }

    println!(
        "{:<12} {:<11} {:<20} {:>13} {:>13} {:>8} {:>6}",
        "CROP", "CATEGORY", "SOILS", "TEMP (°C)", "RAIN (mm)", "PRICE", "SUST."
    );
    println!("{}", "-".repeat(90));

    for c in crops {
        let soils = c
            .soils
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let price = c
            .price
            .map(|p| format!("{:.0}", p))
            .unwrap_or_else(|| "-".to_string());
        let sustainability = c
            .sustainability
            .map(|s| format!("{:.2}", s.mean()))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<12} {:<11} {:<20} {:>13} {:>13} {:>8} {:>6}",
            c.name,
            c.category.as_str(),
            soils,
            format!("{:.0}-{:.0}", c.temperature.0, c.temperature.1),
            format!("{:.0}-{:.0}", c.rainfall.0, c.rainfall.1),
            price,
            sustainability
        );
    }

    Ok(())
}

/// Show the effective configuration and where overrides are read from
pub fn cmd_config(sources: &EngineSources) -> Result<()> {
    let config = load_config(sources)?;
    let w = &config.weights;
    let d = &config.defaults;

    println!();
    println!("⚙️  Engine Configuration");
    println!("   ─────────────────────────────");
    println!("   Weights");
    println!("     sustainability  {:.2}", w.sustainability);
    println!("     weather         {:.2}", w.weather);
    println!("     market          {:.2}", w.market);
    println!("     farmer          {:.2}", w.farmer);
    println!("     (sum {:.2})", w.total());
    println!("   Defaults for missing data");
    println!("     farmer          {:.2}", d.farmer);
    println!("     market          {:.2}", d.market);
    println!("     weather         {:.2}", d.weather);
    println!("     sustainability  {:.2}", d.sustainability);
    println!("   Rationale threshold: {:.2}", config.rationale_threshold);
    println!("   Decimals: {}   Top N: {}", config.decimals, config.top_n);
    println!();

    let show = |label: &str, explicit: Option<&std::path::Path>, default: Option<std::path::PathBuf>| {
        match (explicit, default) {
            (Some(p), _) if p.exists() => println!("   {}: {}", label, p.display()),
            (_, Some(p)) if p.exists() => println!("   {}: {} (override)", label, p.display()),
            (_, Some(p)) => println!("   {}: built-in (override path: {})", label, p.display()),
            _ => println!("   {}: built-in", label),
        }
    };
    show("Config", sources.config.as_deref(), default_config_path());
    show("Catalog", sources.catalog.as_deref(), default_catalog_path());
    println!();

    Ok(())
}
