//! Weather station: fit between observed weather and a crop's ideal ranges

use super::{scored, unscored, Advisor, AdvisoryContext};
use crate::catalog::CropProfile;
use crate::models::{AdvisorKind, AdvisorMessage, WeatherObservation};

/// Degrees outside the ideal range at which temperature fit reaches zero
pub const TEMPERATURE_TOLERANCE_C: f64 = 10.0;

/// 1.0 inside [lo, hi], decaying linearly to 0.0 at `tolerance` outside it
pub fn range_fit(value: f64, (lo, hi): (f64, f64), tolerance: f64) -> f64 {
    let distance = if value < lo {
        lo - value
    } else if value > hi {
        value - hi
    } else {
        return 1.0;
    };
    if tolerance <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / tolerance).max(0.0)
}

/// Temperature and rainfall fit for a crop, and their mean
pub fn weather_suitability(crop: &CropProfile, obs: &WeatherObservation) -> (f64, f64, f64) {
    let temperature = range_fit(obs.temperature_c, crop.temperature, TEMPERATURE_TOLERANCE_C);
    // Rainfall tolerance scales with how wide the crop's comfort band is
    let band = (crop.rainfall.1 - crop.rainfall.0).max(1.0);
    let rainfall = range_fit(obs.rainfall_mm, crop.rainfall, band);
    (temperature, rainfall, (temperature + rainfall) / 2.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherStation;

impl Advisor for WeatherStation {
    fn kind(&self) -> AdvisorKind {
        AdvisorKind::Weather
    }

    fn advise(&self, ctx: &AdvisoryContext<'_>, crop: &CropProfile) -> AdvisorMessage {
        let Some(obs) = ctx.weather else {
            return unscored(
                self.kind(),
                &crop.name,
                format!("Weather data unavailable for {}", crop.name),
            );
        };

        let (temperature, rainfall, overall) = weather_suitability(crop, obs);
        scored(
            self.kind(),
            &crop.name,
            format!(
                "{} at {:.1} °C and {:.0} mm: temperature fit {:.2}, rainfall fit {:.2}",
                crop.name, obs.temperature_c, obs.rainfall_mm, temperature, rainfall
            ),
            overall,
        )
    }
}
