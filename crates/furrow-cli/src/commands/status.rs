//! Status command implementation

use std::path::Path;

use anyhow::Result;

use super::{load_catalog, load_config, open_db, EngineSources};

pub fn cmd_status(db_path: &Path, sources: &EngineSources) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Furrow Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        match open_db(db_path) {
            Ok(db) => {
                if let (Ok(requests), Ok(rows)) = (db.count_requests(), db.count_recommendations())
                {
                    println!("   Requests: {}", requests);
                    println!("   Recommendations: {}", rows);
                }
            }
            Err(e) => {
                println!("   ❌ Error opening database: {:#}", e);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    println!();
    match load_catalog(sources) {
        Ok(catalog) => println!("   Catalog: {} crops", catalog.len()),
        Err(e) => println!("   ❌ Catalog: {:#}", e),
    }
    match load_config(sources) {
        Ok(config) => println!(
            "   Config: OK (top {}, threshold {:.2})",
            config.top_n, config.rationale_threshold
        ),
        Err(e) => println!("   ❌ Config: {:#}", e),
    }

    println!();
    Ok(())
}
