//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Furrow - crop recommendations for your plot
#[derive(Parser)]
#[command(name = "furrow")]
#[command(about = "Rank crops for a farm by market, weather and sustainability", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "furrow.db", global = true)]
    pub db: PathBuf,

    /// Engine config file (defaults to the data-dir override, then built-in)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Crop catalog file (defaults to the data-dir override, then built-in)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Recommend crops for a plot
    Recommend {
        /// Plot size in hectares
        #[arg(short, long)]
        land_size: f64,

        /// Soil type: sandy, loamy, clay
        #[arg(short, long)]
        soil: String,

        /// Preferred crop category: grains, vegetables, fruits
        #[arg(short, long)]
        preference: String,

        /// Growing-season mean temperature (°C)
        #[arg(long, requires = "rainfall")]
        temperature: Option<f64>,

        /// Seasonal rainfall (mm)
        #[arg(long, requires = "temperature")]
        rainfall: Option<f64>,

        /// CSV of market prices (columns: crop,price) overriding catalog prices
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Number of crops to return (overrides config)
        #[arg(short, long)]
        top: Option<usize>,

        /// Don't record the result in the database
        #[arg(long)]
        no_save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Show the advisor transcript
        #[arg(long)]
        transcript: bool,
    },

    /// Show past recommendations
    History {
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only show this crop
        #[arg(short, long)]
        crop: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-crop statistics from the recommendation log
    Stats,

    /// List crops in the catalog
    Crops {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Only crops tolerating this soil
        #[arg(long)]
        soil: Option<String>,
    },

    /// Show the effective engine configuration
    Config,

    /// Show database and configuration status
    Status,
}
