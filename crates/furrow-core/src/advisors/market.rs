//! Market researcher: how well a crop sells

use super::{scored, unscored, Advisor, AdvisoryContext};
use crate::catalog::CropProfile;
use crate::models::{AdvisorKind, AdvisorMessage};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketResearcher;

impl Advisor for MarketResearcher {
    fn kind(&self) -> AdvisorKind {
        AdvisorKind::Market
    }

    fn advise(&self, ctx: &AdvisoryContext<'_>, crop: &CropProfile) -> AdvisorMessage {
        let prices = ctx.prices;
        match (
            prices.price(&crop.name),
            prices.max_price(),
            prices.normalized(&crop.name),
        ) {
            (Some(price), Some(max), Some(score)) => scored(
                self.kind(),
                &crop.name,
                format!(
                    "{} trades at {:.2} per tonne against a top price of {:.2}",
                    crop.name, price, max
                ),
                score,
            ),
            _ => unscored(
                self.kind(),
                &crop.name,
                format!("No market data for {}", crop.name),
            ),
        }
    }
}
