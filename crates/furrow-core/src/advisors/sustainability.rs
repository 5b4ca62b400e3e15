//! Sustainability expert

use super::{scored, unscored, Advisor, AdvisoryContext};
use crate::catalog::CropProfile;
use crate::models::{AdvisorKind, AdvisorMessage};

#[derive(Debug, Clone, Copy, Default)]
pub struct SustainabilityExpert;

impl Advisor for SustainabilityExpert {
    fn kind(&self) -> AdvisorKind {
        AdvisorKind::Sustainability
    }

    fn advise(&self, _ctx: &AdvisoryContext<'_>, crop: &CropProfile) -> AdvisorMessage {
        match crop.sustainability {
            Some(profile) => {
                let parts = profile
                    .parts()
                    .iter()
                    .map(|(name, v)| format!("{} {:.2}", name, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                scored(
                    self.kind(),
                    &crop.name,
                    format!("{}: {}", crop.name, parts),
                    profile.mean(),
                )
            }
            None => unscored(
                self.kind(),
                &crop.name,
                format!("No sustainability assessment for {}", crop.name),
            ),
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
    use crate::parsing::ReportParser;

    #[test]
    fn test_sustainability_report() {
        let catalog = CropCatalog::embedded().unwrap();
        let prices = MarketPrices::new();
        let config = EngineConfig::default();
        let farm = FarmInput::new(1.0, SoilType::Sandy, CropCategory::Grains);
        let ctx = AdvisoryContext {
            farm: &farm,
            weather: None,
            catalog: &catalog,
            prices: &prices,
            config: &config,
        };
        let parser = ReportParser::new().unwrap();

        // Millet: 0.8, 0.9, 0.8, 0.8, 0.8 -> 0.82
        let millet = catalog.get("Millet").unwrap();
        let msg = SustainabilityExpert.advise(&ctx, millet);
        assert!(msg.text.starts_with("Millet: soil health 0.80, water efficiency 0.90"));
        assert_eq!(parser.parse_score(&msg.text), Some(0.82));

        let watermelon = catalog.get("Watermelon").unwrap();
        let msg = SustainabilityExpert.advise(&ctx, watermelon);
        assert_eq!(msg.text, "No sustainability assessment for Watermelon");
        assert_eq!(parser.parse_score(&msg.text), None);
    }
}
