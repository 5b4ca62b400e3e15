//! Integration tests for furrow-core
//!
//! These tests exercise the full catalog → advise → score → record workflow.

use approx::assert_relative_eq;
use furrow_core::{
    db::Database,
    models::{AdvisorKind, CropCategory, FarmInput, SoilType, WeatherObservation},
    CropCatalog, EngineConfig, MarketPrices, RecommendationEngine,
};

/// Two pulses that land on the same total:
/// - Lentil has no price (market 0.0) but strong sustainability (0.8)
/// - Chickpea tops the price table (market 1.0) but has no assessment (0.5)
fn pulses_catalog() -> &'static str {
    r#"
[[crop]]
name = "Lentil"
category = "grains"
soils = ["loamy", "clay"]
temperature = [15.0, 25.0]
rainfall = [300.0, 500.0]
sustainability = { soil_health = 0.8, water_efficiency = 0.8, fertilizer_use = 0.8, pesticide_use = 0.8, carbon_footprint = 0.8 }

[[crop]]
name = "Chickpea"
category = "grains"
soils = ["loamy"]
temperature = [15.0, 25.0]
rainfall = [300.0, 500.0]
price = 200.0

[[crop]]
name = "Fig"
category = "fruits"
soils = ["sandy"]
temperature = [20.0, 30.0]
rainfall = [200.0, 400.0]
price = 150.0
"#
}

fn pulses_engine() -> RecommendationEngine {
    let catalog = CropCatalog::from_toml(pulses_catalog()).expect("Failed to parse catalog");
    let prices = MarketPrices::from_catalog(&catalog);
    RecommendationEngine::new(EngineConfig::default(), catalog, prices)
        .expect("Failed to build engine")
}

fn mild_weather() -> WeatherObservation {
    WeatherObservation {
        temperature_c: 20.0,
        rainfall_mm: 400.0,
    }
}

// =============================================================================
// Engine Integration Tests
// =============================================================================

#[test]
fn test_full_recommendation_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let engine = pulses_engine();
    let farm = FarmInput::new(4.0, SoilType::Loamy, CropCategory::Grains);

    let (rec, request_id) = engine
        .recommend_and_record(&db, &farm, Some(&mild_weather()))
        .expect("Failed to recommend");

    // Both grains score 0.75; ties keep catalog order
    assert_eq!(rec.candidates.len(), 2);
    assert_eq!(rec.candidates[0].crop, "Lentil");
    assert_eq!(rec.candidates[1].crop, "Chickpea");
    assert_relative_eq!(rec.candidates[0].total_score, 0.75);
    assert_relative_eq!(rec.candidates[1].total_score, 0.75);

    let lentil = &rec.candidates[0];
    assert_relative_eq!(lentil.aspects.farmer, 1.0);
    assert_relative_eq!(lentil.aspects.market, 0.0);
    assert_relative_eq!(lentil.aspects.weather, 1.0);
    assert_relative_eq!(lentil.aspects.sustainability, 0.8);
    assert!(lentil.rationale.contains("market demand is moderate (0.00)"));
    assert!(lentil.rationale.contains("weather conditions are suitable (1.00)"));
    assert!(lentil.rationale.contains("farming practice is sustainable (0.80)"));
    assert!(lentil.rationale.contains("grains preference"));

    let chickpea = &rec.candidates[1];
    assert_relative_eq!(chickpea.aspects.market, 1.0);
    assert_relative_eq!(chickpea.aspects.sustainability, 0.5);
    assert!(chickpea.rationale.contains("farming practice is moderate (0.50)"));

    // The log mirrors the ranking
    let request = db.get_request(request_id).unwrap().expect("Request missing");
    assert_eq!(request.farm, farm);
    assert_eq!(request.weather, Some(mild_weather()));

    let rows = db.list_request_recommendations(request_id).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].crop, "Lentil");
    assert_eq!(rows[0].rank, 1);
    assert_relative_eq!(rows[0].sustainability_score, 0.8);
    assert_eq!(rows[0].aspects, Some(lentil.aspects));
    assert_eq!(rows[1].crop, "Chickpea");
    assert_eq!(rows[1].rank, 2);
}

#[test]
fn test_transcript_covers_every_advisor() {
    let engine = pulses_engine();
    let farm = FarmInput::new(1.0, SoilType::Loamy, CropCategory::Grains);

    let rec = engine.recommend(&farm, None).unwrap();
    assert_eq!(rec.transcript[0].advisor, AdvisorKind::Farmer);

    for kind in [
        AdvisorKind::Farmer,
        AdvisorKind::Market,
        AdvisorKind::Weather,
        AdvisorKind::Sustainability,
    ] {
        let count = rec.transcript[1..]
            .iter()
            .filter(|m| m.advisor == kind)
            .count();
        assert_eq!(count, 2, "expected one {} report per crop", kind);
    }

    // Without an observation the station cannot score anything
    assert!(rec
        .transcript
        .iter()
        .filter(|m| m.advisor == AdvisorKind::Weather)
        .all(|m| m.text.contains("unavailable")));
    for c in &rec.candidates {
        assert_relative_eq!(c.aspects.weather, 0.5);
    }
}

#[test]
fn test_soil_fallback_keeps_category() {
    let engine = pulses_engine();
    // Fig only grows on sandy soil; on clay the category fallback still offers it
    let farm = FarmInput::new(1.0, SoilType::Clay, CropCategory::Fruits);

    let rec = engine.recommend(&farm, Some(&mild_weather())).unwrap();
    assert_eq!(rec.candidates.len(), 1);
    assert_eq!(rec.candidates[0].crop, "Fig");
    assert!(rec.transcript[0]
        .text
        .starts_with("No fruits crop lists clay soil"));
    // The farmer cannot vouch for the soil, so the default applies
    assert!(rec.transcript[1].text.contains("not known to grow well"));
    assert_relative_eq!(
        rec.candidates[0].aspects.farmer,
        engine.config().defaults.farmer
    );
}

#[test]
fn test_csv_prices_change_ranking() {
    let catalog = CropCatalog::from_toml(pulses_catalog()).unwrap();
    let mut prices = MarketPrices::from_catalog(&catalog);
    let csv = "crop,price\nLentil,400\n";
    prices.merge(MarketPrices::from_csv_reader(csv.as_bytes()).unwrap());

    let engine = RecommendationEngine::new(EngineConfig::default(), catalog, prices).unwrap();
    let farm = FarmInput::new(2.0, SoilType::Loamy, CropCategory::Grains);

    let rec = engine.recommend(&farm, Some(&mild_weather())).unwrap();
    // Lentil is now the most valuable crop, so it pulls ahead
    assert_eq!(rec.candidates[0].crop, "Lentil");
    assert_relative_eq!(rec.candidates[0].aspects.market, 1.0);
    assert_relative_eq!(rec.candidates[1].aspects.market, 0.5);
    assert!(rec.candidates[0].total_score > rec.candidates[1].total_score);
    assert!(rec.candidates[0]
        .rationale
        .contains("market demand is high (1.00)"));
}

#[test]
fn test_embedded_catalog_end_to_end() {
    let db = Database::in_memory().unwrap();
    let engine = RecommendationEngine::with_defaults().unwrap();

    for category in CropCategory::all() {
        for soil in SoilType::all() {
            let farm = FarmInput::new(1.5, *soil, *category);
            let (rec, _) = engine
                .recommend_and_record(&db, &farm, Some(&mild_weather()))
                .unwrap();
            assert!(!rec.candidates.is_empty());
            assert!(rec.candidates.len() <= engine.config().top_n);
            for c in &rec.candidates {
                assert!((0.0..=1.0).contains(&c.total_score));
                assert!(c.rationale.starts_with(&c.crop));
            }
        }
    }

    let combos = (CropCategory::all().len() * SoilType::all().len()) as i64;
    assert_eq!(db.count_requests().unwrap(), combos);

    let stats = db.recommendation_stats().unwrap();
    assert_eq!(stats.iter().map(|s| s.times_top).sum::<i64>(), combos);
    assert_eq!(
        stats.iter().map(|s| s.times_recommended).sum::<i64>(),
        db.count_recommendations().unwrap()
    );
}
