//! Furrow Core Library
//!
//! Crop recommendation for small farms:
//! - Crop catalog with soil, climate, price and sustainability knowledge
//! - Rule-based advisors that report on one aspect each, as text
//! - Report parsing and weighted aggregation into a ranked recommendation
//! - Rationale text for every recommended crop
//! - Append-only SQLite log of requests and results

pub mod advisors;
pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod market;
pub mod models;
pub mod parsing;
pub mod rationale;
pub mod scoring;

pub use catalog::{CropCatalog, CropProfile, SustainabilityProfile};
pub use config::{EngineConfig, Weights};
pub use db::Database;
pub use engine::RecommendationEngine;
pub use error::{Error, Result};
pub use market::MarketPrices;
pub use models::{
    AdvisorKind, AdvisorMessage, AspectScores, CropCandidate, CropCategory, CropStats, FarmInput,
    FarmRequest, Recommendation, RecommendationRecord, SoilType, WeatherObservation,
};
