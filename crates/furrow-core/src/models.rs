//! Domain models for Furrow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Soil texture of a plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Sandy,
    Loamy,
    Clay,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandy => "sandy",
            Self::Loamy => "loamy",
            Self::Clay => "clay",
        }
    }

    pub fn all() -> &'static [SoilType] {
        &[Self::Sandy, Self::Loamy, Self::Clay]
    }
}

impl std::str::FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandy" | "sand" => Ok(Self::Sandy),
            "loamy" | "loam" => Ok(Self::Loamy),
            "clay" | "clayey" => Ok(Self::Clay),
            _ => Err(format!("Unknown soil type: {}", s)),
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Broad crop category a farmer can express a preference for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropCategory {
    Grains,
    Vegetables,
    Fruits,
}

impl CropCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grains => "grains",
            Self::Vegetables => "vegetables",
            Self::Fruits => "fruits",
        }
    }

    pub fn all() -> &'static [CropCategory] {
        &[Self::Grains, Self::Vegetables, Self::Fruits]
    }
}

impl std::str::FromStr for CropCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grains" | "grain" => Ok(Self::Grains),
            "vegetables" | "vegetable" => Ok(Self::Vegetables),
            "fruits" | "fruit" => Ok(Self::Fruits),
            _ => Err(format!("Unknown crop category: {}", s)),
        }
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the farmer tells us about their plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarmInput {
    /// Plot size in hectares
    pub land_size_ha: f64,
    pub soil: SoilType,
    pub preference: CropCategory,
}

impl FarmInput {
    pub fn new(land_size_ha: f64, soil: SoilType, preference: CropCategory) -> Self {
        Self {
            land_size_ha,
            soil,
            preference,
        }
    }

    /// Reject land sizes that are not a positive, finite number of hectares
    pub fn validate(&self) -> Result<()> {
        if !self.land_size_ha.is_finite() || self.land_size_ha <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Land size must be a positive number of hectares, got {}",
                self.land_size_ha
            )));
        }
        Ok(())
    }
}

/// Growing-season weather supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Mean temperature in °C
    pub temperature_c: f64,
    /// Seasonal rainfall in mm
    pub rainfall_mm: f64,
}

impl WeatherObservation {
    /// Reject readings that are not finite, and negative rainfall
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_c.is_finite() {
            return Err(Error::InvalidData(format!(
                "Temperature must be a finite number of °C, got {}",
                self.temperature_c
            )));
        }
        if !self.rainfall_mm.is_finite() || self.rainfall_mm < 0.0 {
            return Err(Error::InvalidData(format!(
                "Rainfall must be a non-negative number of mm, got {}",
                self.rainfall_mm
            )));
        }
        Ok(())
    }
}

/// The four weighted sub-scores of a crop, each in [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectScores {
    pub farmer: f64,
    pub market: f64,
    pub weather: f64,
    pub sustainability: f64,
}

impl AspectScores {
    pub fn new(farmer: f64, market: f64, weather: f64, sustainability: f64) -> Self {
        Self {
            farmer,
            market,
            weather,
            sustainability,
        }
    }

    /// Copy with every aspect clamped into [0,1] (NaN becomes 0)
    pub fn clamped(&self) -> Self {
        fn unit(v: f64) -> f64 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }
        Self {
            farmer: unit(self.farmer),
            market: unit(self.market),
            weather: unit(self.weather),
            sustainability: unit(self.sustainability),
        }
    }
}

/// One crop under consideration, scored and explained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCandidate {
    pub crop: String,
    pub aspects: AspectScores,
    /// Weighted sum of the aspects, rounded
    pub total_score: f64,
    pub rationale: String,
}

/// Which advisor produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorKind {
    Farmer,
    Market,
    Weather,
    Sustainability,
}

impl AdvisorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Market => "market",
            Self::Weather => "weather",
            Self::Sustainability => "sustainability",
        }
    }
}

impl std::fmt::Display for AdvisorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single text report passed from an advisor to the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorMessage {
    pub advisor: AdvisorKind,
    pub crop: String,
    pub text: String,
}

/// Result of one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub farm: FarmInput,
    pub weather: Option<WeatherObservation>,
    /// Ranked best first
    pub candidates: Vec<CropCandidate>,
    /// Advisor messages in the order they were produced
    pub transcript: Vec<AdvisorMessage>,
}

impl Recommendation {
    /// The top-ranked crop, if any candidate survived
    pub fn best(&self) -> Option<&CropCandidate> {
        self.candidates.first()
    }
}

/// A logged recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmRequest {
    pub id: i64,
    pub farm: FarmInput,
    pub weather: Option<WeatherObservation>,
    pub created_at: DateTime<Utc>,
}

/// A logged, ranked recommendation row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub id: i64,
    pub request_id: i64,
    /// 1-based position in the ranking
    pub rank: i64,
    pub crop: String,
    pub score: f64,
    pub rationale: String,
    pub sustainability_score: f64,
    pub aspects: Option<AspectScores>,
    pub created_at: DateTime<Utc>,
}

/// Per-crop aggregate over the recommendation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropStats {
    pub crop: String,
    pub times_recommended: i64,
    pub times_top: i64,
    pub avg_score: f64,
}
