//! Recommendation engine
//!
//! Runs the advisor round for each candidate crop, parses their reports,
//! substitutes defaults for anything missing, then scores, explains and
//! ranks the candidates.

use tracing::{debug, info, warn};

use crate::advisors::{
    Advisor, AdvisoryContext, FarmerAdvisor, MarketResearcher, SustainabilityExpert,
    WeatherStation,
};
use crate::catalog::CropCatalog;
use crate::config::EngineConfig;
use crate::db::Database;
use crate::error::Result;
use crate::market::MarketPrices;
use crate::models::{
    AdvisorKind, AdvisorMessage, CropCandidate, FarmInput, Recommendation,
    WeatherObservation,
};
use crate::parsing::ReportParser;
use crate::rationale::rationale;
use crate::scoring::{rank, score};

pub struct RecommendationEngine {
    config: EngineConfig,
    catalog: CropCatalog,
    prices: MarketPrices,
    parser: ReportParser,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig, catalog: CropCatalog, prices: MarketPrices) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            prices,
            parser: ReportParser::new()?,
        })
    }

    /// Engine over the embedded config and catalog, priced from the catalog
    pub fn with_defaults() -> Result<Self> {
        let catalog = CropCatalog::embedded()?;
        let prices = MarketPrices::from_catalog(&catalog);
        Self::new(EngineConfig::embedded()?, catalog, prices)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn prices(&self) -> &MarketPrices {
        &self.prices
    }

    /// Score and rank crops for a farm
    ///
    /// Aspect scores travel as advisor text with two decimals, so each
    /// aspect is rounded to 0.01 before weighting.
    pub fn recommend(
        &self,
        farm: &FarmInput,
        weather: Option<&WeatherObservation>,
    ) -> Result<Recommendation> {
        farm.validate()?;
        if let Some(obs) = weather {
            obs.validate()?;
        }

        let ctx = AdvisoryContext {
            farm,
            weather,
            catalog: &self.catalog,
            prices: &self.prices,
            config: &self.config,
        };

        let farmer = FarmerAdvisor;
        let market = MarketResearcher;
        let station = WeatherStation;
        let expert = SustainabilityExpert;

        let proposal = farmer.propose(&ctx);
        debug!("{}", proposal.message.text);
        let mut transcript = vec![proposal.message];

        if proposal.crops.is_empty() {
            warn!(
                "No {} crops in the catalog; nothing to recommend",
                farm.preference
            );
            return Ok(Recommendation {
                farm: *farm,
                weather: weather.copied(),
                candidates: Vec::new(),
                transcript,
            });
        }

        let advisors: [&dyn Advisor; 4] = [&farmer, &market, &station, &expert];
        let mut candidates = Vec::with_capacity(proposal.crops.len());

        for crop in proposal.crops {
            let mut aspects = self.config.defaults;
            for advisor in advisors {
                let message = advisor.advise(&ctx, crop);
                debug!(advisor = %message.advisor, "{}", message.text);
                let value = self.read_score(&message);
                match message.advisor {
                    AdvisorKind::Farmer => aspects.farmer = value,
                    AdvisorKind::Market => aspects.market = value,
                    AdvisorKind::Weather => aspects.weather = value,
                    AdvisorKind::Sustainability => aspects.sustainability = value,
                }
                transcript.push(message);
            }

            let aspects = aspects.clamped();
            let total = score(&aspects, &self.config.weights, self.config.decimals);
            candidates.push(CropCandidate {
                crop: crop.name.clone(),
                rationale: rationale(
                    &crop.name,
                    &aspects,
                    total,
                    farm.preference,
                    self.config.rationale_threshold,
                ),
                aspects,
                total_score: total,
            });
        }

        rank(&mut candidates);
        candidates.truncate(self.config.top_n);

        Ok(Recommendation {
            farm: *farm,
            weather: weather.copied(),
            candidates,
            transcript,
        })
    }

    /// Recommend and append the result to the log. Returns the request id.
    pub fn recommend_and_record(
        &self,
        db: &Database,
        farm: &FarmInput,
        weather: Option<&WeatherObservation>,
    ) -> Result<(Recommendation, i64)> {
        let recommendation = self.recommend(farm, weather)?;
        let request_id = db.record_recommendation(&recommendation)?;
        info!(
            request_id,
            best = recommendation.best().map(|c| c.crop.as_str()).unwrap_or("-"),
            "Recorded recommendation"
        );
        Ok((recommendation, request_id))
    }

    /// Parsed score from a report, or the configured default for its aspect
    fn read_score(&self, message: &AdvisorMessage) -> f64 {
        if let Some(v) = self.parser.parse_score(&message.text) {
            return v;
        }
        let d = &self.config.defaults;
        let fallback = match message.advisor {
            AdvisorKind::Farmer => d.farmer,
            AdvisorKind::Market => d.market,
            AdvisorKind::Weather => d.weather,
            AdvisorKind::Sustainability => d.sustainability,
        };
        debug!(
            advisor = %message.advisor,
            crop = %message.crop,
            "No score in report, defaulting to {:.2}",
            fallback
        );
        fallback
    }
}
