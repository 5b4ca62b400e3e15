//! Furrow CLI - crop recommendation engine
//!
//! Usage:
//!   furrow init                                              Initialize database
//!   furrow recommend -l 2.5 -s loamy -p grains               Rank crops for a plot
//!   furrow history --limit 10                                Show past recommendations
//!   furrow crops --category fruits                           Browse the crop catalog

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let sources = commands::EngineSources {
        config: cli.config.clone(),
        catalog: cli.catalog.clone(),
    };

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Recommend {
            land_size,
            soil,
            preference,
            temperature,
            rainfall,
            prices,
            top,
            no_save,
            json,
            transcript,
        } => {
            let request = commands::RecommendRequest {
                land_size,
                soil,
                preference,
                temperature,
                rainfall,
                prices,
                top,
            };
            let output = commands::RecommendOutput { json, transcript };
            if no_save {
                commands::cmd_recommend(None, &sources, &request, output)
            } else {
                let db = commands::open_db(&cli.db)?;
                commands::cmd_recommend(Some(&db), &sources, &request, output)
            }
        }
        Commands::History { limit, crop, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_history(&db, limit, crop.as_deref(), json)
        }
        Commands::Stats => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_stats(&db)
        }
        Commands::Crops { category, soil } => {
            commands::cmd_crops(&sources, category.as_deref(), soil.as_deref())
        }
        Commands::Config => commands::cmd_config(&sources),
        Commands::Status => commands::cmd_status(&cli.db, &sources),
    }
}
