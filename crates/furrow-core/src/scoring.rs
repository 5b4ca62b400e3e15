//! Weighted aggregation and ranking of crop candidates

use crate::config::Weights;
use crate::models::{AspectScores, CropCandidate};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Weighted sum of the (clamped) aspects, rounded to `decimals`
pub fn score(aspects: &AspectScores, weights: &Weights, decimals: u32) -> f64 {
    let a = aspects.clamped();
    let raw = a.sustainability * weights.sustainability
        + a.weather * weights.weather
        + a.market * weights.market
        + a.farmer * weights.farmer;
    round_to(raw, decimals)
}

/// Sort best first. Stable, so equal scores keep their incoming order.
pub fn rank(candidates: &mut [CropCandidate]) {
    candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
}
