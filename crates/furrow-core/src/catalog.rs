//! Crop catalog
//!
//! Static agronomic knowledge the advisors draw on: which soils a crop
//! tolerates, its ideal temperature and rainfall, a baseline market price
//! and sustainability sub-scores. Loaded like the engine config: explicit
//! path, then ~/.local/share/furrow/config/crops.toml, then the embedded
//! default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{config_dir, resolve_override};
use crate::error::{Error, Result};
use crate::models::{CropCategory, SoilType};

/// Embedded default catalog (compiled into binary)
const DEFAULT_CATALOG: &str = include_str!("../../../config/crops.toml");

/// Sustainability sub-scores, each in [0,1] where higher is better
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityProfile {
    pub soil_health: f64,
    pub water_efficiency: f64,
    pub fertilizer_use: f64,
    pub pesticide_use: f64,
    pub carbon_footprint: f64,
}

impl SustainabilityProfile {
    /// Named sub-scores, in display order
    pub fn parts(&self) -> [(&'static str, f64); 5] {
        [
            ("soil health", self.soil_health),
            ("water efficiency", self.water_efficiency),
            ("fertilizer use", self.fertilizer_use),
            ("pesticide use", self.pesticide_use),
            ("carbon footprint", self.carbon_footprint),
        ]
    }

    pub fn mean(&self) -> f64 {
        let parts = self.parts();
        parts.iter().map(|(_, v)| v).sum::<f64>() / parts.len() as f64
    }
}

/// Everything Furrow knows about one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    pub category: CropCategory,
    pub soils: Vec<SoilType>,
    /// Ideal growing-season temperature range (°C), low to high
    pub temperature: (f64, f64),
    /// Ideal seasonal rainfall range (mm), low to high
    pub rainfall: (f64, f64),
    /// Baseline market price per tonne
    pub price: Option<f64>,
    pub sustainability: Option<SustainabilityProfile>,
}

impl CropProfile {
    pub fn tolerates(&self, soil: SoilType) -> bool {
        self.soils.contains(&soil)
    }
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    crop: Vec<CropProfile>,
}

/// The set of crops the advisors can recommend, in catalog order
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

impl CropCatalog {
    /// Load the catalog (explicit path, then override dir, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match resolve_override(path, default_catalog_path()) {
            Some(p) => fs::read_to_string(&p).map_err(|e| {
                Error::Config(format!("Failed to read catalog {}: {}", p.display(), e))
            })?,
            None => DEFAULT_CATALOG.to_string(),
        };
        Self::from_toml(&content)
    }

    /// The embedded catalog
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CATALOG)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid crop catalog TOML: {}", e)))?;
        Self::from_profiles(raw.crop)
    }

    pub fn from_profiles(crops: Vec<CropProfile>) -> Result<Self> {
        for (i, crop) in crops.iter().enumerate() {
            validate_profile(crop)?;
            if crops[..i]
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&crop.name))
            {
                return Err(Error::Config(format!(
                    "Duplicate crop in catalog: {}",
                    crop.name
                )));
            }
        }
        Ok(Self { crops })
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    /// Case-insensitive lookup by name
    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        let name = name.trim();
        self.crops.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn by_category(&self, category: CropCategory) -> impl Iterator<Item = &CropProfile> {
        self.crops.iter().filter(move |c| c.category == category)
    }

    /// Crops of the category that tolerate the soil
    pub fn candidates_for(&self, soil: SoilType, category: CropCategory) -> Vec<&CropProfile> {
        self.by_category(category)
            .filter(|c| c.tolerates(soil))
            .collect()
    }
}

/// Default catalog override path
pub fn default_catalog_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("crops.toml"))
}

fn validate_profile(crop: &CropProfile) -> Result<()> {
    if crop.name.trim().is_empty() {
        return Err(Error::Config("Crop with empty name in catalog".into()));
    }
    if crop.soils.is_empty() {
        return Err(Error::Config(format!("{} lists no soils", crop.name)));
    }
    for (label, (lo, hi)) in [("temperature", crop.temperature), ("rainfall", crop.rainfall)] {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::Config(format!(
                "{} has an invalid {} range [{}, {}]",
                crop.name, label, lo, hi
            )));
        }
    }
    if let Some(price) = crop.price {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::Config(format!(
                "{} has an invalid price {}",
                crop.name, price
            )));
        }
    }
    if let Some(s) = crop.sustainability {
        if let Some((name, v)) = s.parts().into_iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
            return Err(Error::Config(format!(
                "{} has {} {} outside [0,1]",
                crop.name, name, v
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = CropCatalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        for category in CropCategory::all() {
            assert!(
                catalog.by_category(*category).count() > 0,
                "no crops for {}",
                category
            );
        }
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("crops.toml");
        assert!(matches!(
            CropCatalog::load(Some(&missing)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = CropCatalog::embedded().unwrap();
        let maize = catalog.get("  MAIZE ").unwrap();
        assert_eq!(maize.name, "Maize");
        assert_eq!(maize.category, CropCategory::Grains);
        assert!(catalog.get("Kale").is_none());
    }

    #[test]
    fn test_candidates_filter_soil_and_category() {
        let catalog = CropCatalog::embedded().unwrap();
        let candidates = catalog.candidates_for(SoilType::Sandy, CropCategory::Fruits);
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert_eq!(c.category, CropCategory::Fruits);
            assert!(c.tolerates(SoilType::Sandy));
        }
        assert!(candidates.iter().any(|c| c.name == "Watermelon"));
        assert!(!candidates.iter().any(|c| c.name == "Apple"));
    }

    #[test]
    fn test_sustainability_mean() {
        let s = SustainabilityProfile {
            soil_health: 1.0,
            water_efficiency: 0.5,
            fertilizer_use: 0.5,
            pesticide_use: 0.0,
            carbon_footprint: 0.5,
        };
        assert_relative_eq!(s.mean(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_duplicate_crop_rejected() {
        let toml = r#"
            [[crop]]
            name = "Oats"
            category = "grains"
            soils = ["loamy"]
            temperature = [10.0, 20.0]
            rainfall = [300.0, 600.0]

            [[crop]]
            name = "oats"
            category = "grains"
            soils = ["clay"]
            temperature = [10.0, 20.0]
            rainfall = [300.0, 600.0]
        "#;
        assert!(matches!(
            CropCatalog::from_toml(toml),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let toml = r#"
            [[crop]]
            name = "Oats"
            category = "grains"
            soils = ["loamy"]
            temperature = [25.0, 10.0]
            rainfall = [300.0, 600.0]
        "#;
        assert!(CropCatalog::from_toml(toml).is_err());
    }

    #[test]
    fn test_sub_score_out_of_range_rejected() {
        let toml = r#"
            [[crop]]
            name = "Oats"
            category = "grains"
            soils = ["loamy"]
            temperature = [10.0, 20.0]
            rainfall = [300.0, 600.0]
            sustainability = { soil_health = 1.4, water_efficiency = 0.5, fertilizer_use = 0.5, pesticide_use = 0.5, carbon_footprint = 0.5 }
        "#;
        assert!(CropCatalog::from_toml(toml).is_err());
    }

    #[test]
    fn test_optional_fields() {
        let toml = r#"
            [[crop]]
            name = "Oats"
            category = "grains"
            soils = ["loamy", "sandy"]
            temperature = [10.0, 20.0]
            rainfall = [300.0, 600.0]
        "#;
        let catalog = CropCatalog::from_toml(toml).unwrap();
        let oats = catalog.get("oats").unwrap();
        assert!(oats.price.is_none());
        assert!(oats.sustainability.is_none());
    }
}
