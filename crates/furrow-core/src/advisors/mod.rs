//! Rule-based advisors
//!
//! Each advisor looks at one aspect of a crop and reports back in plain
//! text, the way a specialist would in a round-table discussion. Reports that
//! carry a number end with a `(score N)` marker which the engine parses; an
//! advisor without data says so instead, and the engine falls back to the
//! configured default for that aspect.
//!
//! - `FarmerAdvisor`: proposes candidate crops for the plot
//! - `MarketResearcher`: relative market price
//! - `WeatherStation`: fit between observed weather and the crop's ideal ranges
//! - `SustainabilityExpert`: mean of the crop's sustainability sub-scores

mod farmer;
mod market;
mod sustainability;
mod weather;

pub use farmer::{CandidateProposal, FarmerAdvisor};
pub use market::MarketResearcher;
pub use sustainability::SustainabilityExpert;
pub use weather::{range_fit, weather_suitability, WeatherStation};

use crate::catalog::{CropCatalog, CropProfile};
use crate::config::EngineConfig;
use crate::market::MarketPrices;
use crate::models::{AdvisorKind, AdvisorMessage, FarmInput, WeatherObservation};

/// Everything an advisor may consult for one request
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryContext<'a> {
    pub farm: &'a FarmInput,
    pub weather: Option<&'a WeatherObservation>,
    pub catalog: &'a CropCatalog,
    pub prices: &'a MarketPrices,
    pub config: &'a EngineConfig,
}

/// A specialist that reports on one aspect of a crop
pub trait Advisor {
    fn kind(&self) -> AdvisorKind;

    /// Report on a crop. Never fails; missing data is stated in the text.
    fn advise(&self, ctx: &AdvisoryContext<'_>, crop: &CropProfile) -> AdvisorMessage;
}

/// Format a report carrying a score marker
pub(crate) fn scored(kind: AdvisorKind, crop: &str, body: String, score: f64) -> AdvisorMessage {
    AdvisorMessage {
        advisor: kind,
        crop: crop.to_string(),
        text: format!("{} (score {:.2})", body, score),
    }
}

/// Format a report without a score
pub(crate) fn unscored(kind: AdvisorKind, crop: &str, body: String) -> AdvisorMessage {
    AdvisorMessage {
        advisor: kind,
        crop: crop.to_string(),
        text: body,
    }
}
