//! Recommendation command

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use furrow_core::{CropCategory, Database, FarmInput, Recommendation, SoilType, WeatherObservation};

use super::{load_engine, EngineSources};

/// Inputs for one `furrow recommend` run, as typed on the command line
#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub land_size: f64,
    pub soil: String,
    pub preference: String,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub prices: Option<PathBuf>,
    pub top: Option<usize>,
}

impl RecommendRequest {
    pub fn farm(&self) -> Result<FarmInput> {
        let soil: SoilType = self.soil.parse().map_err(|e: String| anyhow!(e))?;
        let preference: CropCategory = self.preference.parse().map_err(|e: String| anyhow!(e))?;
        Ok(FarmInput::new(self.land_size, soil, preference))
    }

    pub fn weather(&self) -> Option<WeatherObservation> {
        match (self.temperature, self.rainfall) {
            (Some(temperature_c), Some(rainfall_mm)) => Some(WeatherObservation {
                temperature_c,
                rainfall_mm,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendOutput {
    pub json: bool,
    pub transcript: bool,
}

/// Run the engine; record the result when a database is given
pub fn cmd_recommend(
    db: Option<&Database>,
    sources: &EngineSources,
    request: &RecommendRequest,
    output: RecommendOutput,
) -> Result<()> {
    let farm = request.farm()?;
    let weather = request.weather();
    let engine = load_engine(sources, request.prices.as_deref(), request.top)?;

    let (recommendation, request_id) = match db {
        Some(db) => {
            let (rec, id) = engine.recommend_and_record(db, &farm, weather.as_ref())?;
            (rec, Some(id))
        }
        None => (engine.recommend(&farm, weather.as_ref())?, None),
    };

    if output.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    print_recommendation(&recommendation, output.transcript);
    if let Some(id) = request_id {
        println!("   Saved as request #{}", id);
        println!();
    }
    Ok(())
}

fn print_recommendation(rec: &Recommendation, show_transcript: bool) {
    let farm = &rec.farm;

    println!();
    println!("🌱 Crop Recommendation");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Plot: {:.2} ha, {} soil, prefers {}",
        farm.land_size_ha, farm.soil, farm.preference
    );
    match &rec.weather {
        Some(w) => println!(
            "   Weather: {:.1} °C, {:.0} mm rainfall",
            w.temperature_c, w.rainfall_mm
        ),
        None => println!("   Weather: not supplied (neutral weather score used)"),
    }
    println!();

    if show_transcript {
        println!("   💬 Advisor transcript");
        for msg in &rec.transcript {
            println!("   [{:<14}] {}", msg.advisor.as_str(), msg.text);
        }
        println!();
    }

    if rec.candidates.is_empty() {
        println!("   No {} crops in the catalog to recommend.", farm.preference);
        println!();
        return;
    }

    println!(
        "   {:<4} {:<12} {:>6}   {:>6} {:>6} {:>7} {:>6}",
        "#", "CROP", "SCORE", "FARMER", "MARKET", "WEATHER", "SUST."
    );
    for (i, c) in rec.candidates.iter().enumerate() {
        let a = &c.aspects;
        println!(
            "   {:<4} {:<12} {:>6.2}   {:>6.2} {:>6.2} {:>7.2} {:>6.2}",
            i + 1,
            c.crop,
            c.total_score,
            a.farmer,
            a.market,
            a.weather,
            a.sustainability
        );
    }
    println!();

    for c in &rec.candidates {
        println!("   • {}", c.rationale);
    }
    println!();
}
