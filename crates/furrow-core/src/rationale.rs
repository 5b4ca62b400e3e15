//! Human-readable rationale for a scored crop

use crate::models::{AspectScores, CropCategory};

/// Wording for one aspect: (favourable, unfavourable)
fn wording(score: f64, threshold: f64, favourable: &'static str, other: &'static str) -> &'static str {
    if score > threshold {
        favourable
    } else {
        other
    }
}

/// Build the rationale sentence for a candidate, e.g.
/// "Maize: market demand is high (0.82); weather conditions are suitable
/// (0.90); farming practice is sustainable (0.76); matches your grains
/// preference. Overall score 0.81."
pub fn rationale(
    crop: &str,
    aspects: &AspectScores,
    total: f64,
    preference: CropCategory,
    threshold: f64,
) -> String {
    let market = wording(aspects.market, threshold, "high", "moderate");
    let weather = wording(aspects.weather, threshold, "suitable", "challenging");
    let practice = wording(aspects.sustainability, threshold, "sustainable", "moderate");

    format!(
        "{}: market demand is {} ({:.2}); weather conditions are {} ({:.2}); \
         farming practice is {} ({:.2}); matches your {} preference. Overall score {:.2}.",
        crop,
        market,
        aspects.market,
        weather,
        aspects.weather,
        practice,
        aspects.sustainability,
        preference,
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favourable_wording() {
        let aspects = AspectScores::new(1.0, 0.82, 0.9, 0.76);
        let text = rationale("Maize", &aspects, 0.81, CropCategory::Grains, 0.7);
        assert_eq!(
            text,
            "Maize: market demand is high (0.82); weather conditions are suitable (0.90); \
             farming practice is sustainable (0.76); matches your grains preference. \
             Overall score 0.81."
        );
    }

    #[test]
    fn test_unfavourable_wording() {
        let aspects = AspectScores::new(1.0, 0.0, 0.5, 0.5);
        let text = rationale("Watermelon", &aspects, 0.48, CropCategory::Fruits, 0.7);
        assert!(text.contains("market demand is moderate (0.00)"));
        assert!(text.contains("weather conditions are challenging (0.50)"));
        assert!(text.contains("farming practice is moderate (0.50)"));
        assert!(text.ends_with("Overall score 0.48."));
    }

    #[test]
    fn test_threshold_is_strict() {
        let aspects = AspectScores::new(1.0, 0.7, 0.7, 0.7);
        let text = rationale("Wheat", &aspects, 0.73, CropCategory::Grains, 0.7);
        assert!(text.contains("market demand is moderate"));
        assert!(text.contains("weather conditions are challenging"));

        let aspects = AspectScores::new(1.0, 0.71, 0.71, 0.71);
        let text = rationale("Wheat", &aspects, 0.74, CropCategory::Grains, 0.7);
        assert!(text.contains("market demand is high"));
        assert!(text.contains("weather conditions are suitable"));
        assert!(text.contains("farming practice is sustainable"));
    }
}
