//! Farmer advisor: which crops fit this plot at all

use super::{scored, unscored, Advisor, AdvisoryContext};
use crate::catalog::CropProfile;
use crate::models::{AdvisorKind, AdvisorMessage};

/// Crops proposed for a plot, plus the message announcing them
#[derive(Debug, Clone)]
pub struct CandidateProposal<'a> {
    pub crops: Vec<&'a CropProfile>,
    /// True when no crop of the category tolerates the soil and the whole
    /// category was proposed instead
    pub soil_fallback: bool,
    pub message: AdvisorMessage,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FarmerAdvisor;

impl FarmerAdvisor {
    /// Propose candidates: crops of the preferred category that tolerate the
    /// soil, or every crop of the category if none do.
    pub fn propose<'a>(&self, ctx: &AdvisoryContext<'a>) -> CandidateProposal<'a> {
        let farm = ctx.farm;
        let mut crops = ctx.catalog.candidates_for(farm.soil, farm.preference);
        let soil_fallback = crops.is_empty();
        if soil_fallback {
            crops = ctx.catalog.by_category(farm.preference).collect();
        }

        let names = crops
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let text = if crops.is_empty() {
            format!("I have no {} crops to suggest", farm.preference)
        } else if soil_fallback {
            format!(
                "No {} crop lists {} soil; considering all {}: {}",
                farm.preference, farm.soil, farm.preference, names
            )
        } else {
            format!(
                "For a {:.2} ha {} plot preferring {} I suggest: {}",
                farm.land_size_ha, farm.soil, farm.preference, names
            )
        };

        CandidateProposal {
            crops,
            soil_fallback,
            message: unscored(AdvisorKind::Farmer, "*", text),
        }
    }
}

impl Advisor for FarmerAdvisor {
    fn kind(&self) -> AdvisorKind {
        AdvisorKind::Farmer
    }

    fn advise(&self, ctx: &AdvisoryContext<'_>, crop: &CropProfile) -> AdvisorMessage {
        let farm = ctx.farm;
        if crop.tolerates(farm.soil) && crop.category == farm.preference {
            scored(
                self.kind(),
                &crop.name,
                format!(
                    "{} suits a {:.2} ha {} plot and your {} preference",
                    crop.name, farm.land_size_ha, farm.soil, farm.preference
                ),
                ctx.config.defaults.farmer,
            )
        } else {
            unscored(
                self.kind(),
                &crop.name,
                format!("{} is not known to grow well in {} soil", crop.name, farm.soil),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CropCatalog;
    use crate::config::EngineConfig;
    use crate::market::MarketPrices;
    use crate::models::{CropCategory, FarmInput, SoilType};

    fn catalog() -> CropCatalog {
        CropCatalog::from_toml(
            r#"
            [[crop]]
            name = "Oats"
            category = "grains"
            soils = ["loamy"]
            temperature = [10.0, 20.0]
            rainfall = [300.0, 600.0]

            [[crop]]
            name = "Rye"
            category = "grains"
            soils = ["loamy", "clay"]
            temperature = [5.0, 20.0]
            rainfall = [300.0, 600.0]

            [[crop]]
            name = "Kale"
            category = "vegetables"
            soils = ["clay"]
            temperature = [5.0, 20.0]
            rainfall = [300.0, 600.0]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_propose_matching_soil() {
        let catalog = catalog();
        let prices = MarketPrices::new();
        let config = EngineConfig::default();
        let farm = FarmInput::new(2.0, SoilType::Clay, CropCategory::Grains);
        let ctx = AdvisoryContext {
            farm: &farm,
            weather: None,
            catalog: &catalog,
            prices: &prices,
            config: &config,
        };

        let proposal = FarmerAdvisor.propose(&ctx);
        assert!(!proposal.soil_fallback);
        let names: Vec<&str> = proposal.crops.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rye"]);
        assert!(proposal.message.text.contains("I suggest: Rye"));
    }

    #[test]
    fn test_propose_falls_back_to_category() {
        let catalog = catalog();
        let prices = MarketPrices::new();
        let config = EngineConfig::default();
        let farm = FarmInput::new(2.0, SoilType::Sandy, CropCategory::Grains);
        let ctx = AdvisoryContext {
            farm: &farm,
            weather: None,
            catalog: &catalog,
            prices: &prices,
            config: &config,
        };

        let proposal = FarmerAdvisor.propose(&ctx);
        assert!(proposal.soil_fallback);
        assert_eq!(proposal.crops.len(), 2);

        // Soil mismatch: no score, so the engine default applies
        let msg = FarmerAdvisor.advise(&ctx, proposal.crops[0]);
        assert!(!msg.text.contains("(score"));
    }

    #[test]
    fn test_propose_empty_category() {
        let catalog = catalog();
        let prices = MarketPrices::new();
        let config = EngineConfig::default();
        let farm = FarmInput::new(2.0, SoilType::Loamy, CropCategory::Fruits);
        let ctx = AdvisoryContext {
            farm: &farm,
            weather: None,
            catalog: &catalog,
            prices: &prices,
            config: &config,
        };

        let proposal = FarmerAdvisor.propose(&ctx);
        assert!(proposal.crops.is_empty());
    }

    #[test]
    fn test_advise_matching_crop_scores_one() {
        let catalog = catalog();
        let prices = MarketPrices::new();
        let config = EngineConfig::default();
        let farm = FarmInput::new(1.5, SoilType::Loamy, CropCategory::Grains);
        let ctx = AdvisoryContext {
            farm: &farm,
            weather: None,
            catalog: &catalog,
            prices: &prices,
            config: &config,
        };

        let oats = catalog.get("Oats").unwrap();
        let msg = FarmerAdvisor.advise(&ctx, oats);
        assert_eq!(msg.advisor, AdvisorKind::Farmer);
        assert_eq!(
            msg.text,
            "Oats suits a 1.50 ha loamy plot and your grains preference (score 1.00)"
        );
    }

    #[test]
    fn test_advise_reports_configured_farmer_score() {
        let catalog = catalog();
        let prices = MarketPrices::new();
        let mut config = EngineConfig::default();
        config.defaults.farmer = 0.8;
        let farm = FarmInput::new(1.5, SoilType::Loamy, CropCategory::Grains);
        let ctx = AdvisoryContext {
            farm: &farm,
            weather: None,
            catalog: &catalog,
            prices: &prices,
            config: &config,
        };

        let oats = catalog.get("Oats").unwrap();
        let msg = FarmerAdvisor.advise(&ctx, oats);
        assert!(msg.text.ends_with("(score 0.80)"));
    }
}
