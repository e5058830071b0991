//! Deterministic rule-based decision strategy
//!
//! A pure function of the feature record: a weighted integer score over
//! soil category, pH, rainfall and temperature, mapped to a priority tier
//! with fixed per-tier guidance text. Always available; used whenever the
//! remote advisor is unconfigured or fails.

use crate::models::{FeatureRecord, Priority, Recommendation, Suitability};

/// Soil categories that favor planting
const PREFERRED_SOILS: &[&str] = &[
    "loamy",
    "loamy soil",
    "loam",
    "clay",
    "sandy loam",
    "red soil",
    "black soil",
];

const HIGH_STEPS: &str = "• Prepare land (clear weeds, loosen soil)\n\
                          • Plant during rainy season\n\
                          • Use mulch and monitor irrigation for 6 months";
const HIGH_COMMERCIAL: &str =
    "For commercial use, plan irrigation, adopt spacing for high yield, and research markets.";

const MEDIUM_STEPS: &str = "• Add compost and organic matter\n\
                            • Consider partial shade or agroforestry mix";
const MEDIUM_COMMERCIAL: &str = "Medium-scale possible with amendments and good management.";

const LOW_STEPS: &str =
    "• Consider more drought-tolerant species or soil improvement before planting.";
const LOW_COMMERCIAL: &str = "Low commercial viability; consider alternative crops or irrigation.";

/// Compute the weighted suitability score for a feature record
#[must_use]
pub fn score(features: &FeatureRecord) -> u32 {
    let soil = features.soil.to_lowercase();
    let mut score = 0;

    if PREFERRED_SOILS.iter().any(|p| soil.contains(p)) {
        score += 1;
    }

    if (5.5..=7.5).contains(&features.ph) {
        score += 2;
    } else if (5.0..5.5).contains(&features.ph) || (features.ph > 7.5 && features.ph <= 8.0) {
        score += 1;
    }

    if features.rainfall_mm >= 900.0 {
        score += 2;
    } else if (500.0..900.0).contains(&features.rainfall_mm) {
        score += 1;
    }

    if (10.0..=35.0).contains(&features.temperature_c) {
        score += 1;
    }

    score
}

/// Map a score to its priority tier
#[must_use]
pub fn priority_for_score(score: u32) -> Priority {
    if score >= 5 {
        Priority::High
    } else if score >= 3 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Produce a recommendation from the rule score alone
///
/// Commercial advice text is attached for every tier regardless of purpose
/// or land size; the templates carry the only commercial gating.
#[must_use]
pub fn classify(features: &FeatureRecord) -> Recommendation {
    let priority = priority_for_score(score(features));

    let suitability = if priority == Priority::Low {
        Suitability::No
    } else {
        Suitability::Yes
    };

    let (steps, commercial) = match priority {
        Priority::High => (HIGH_STEPS, HIGH_COMMERCIAL),
        Priority::Medium => (MEDIUM_STEPS, MEDIUM_COMMERCIAL),
        Priority::Low => (LOW_STEPS, LOW_COMMERCIAL),
    };

    Recommendation {
        priority,
        suitability,
        reason: format!(
            "Soil='{}', pH={}, rainfall={}mm",
            features.soil, features.ph, features.rainfall_mm
        ),
        recommendation: steps.to_string(),
        commercial_advice: commercial.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Purpose;
    use rstest::rstest;

    fn features(soil: &str, ph: f64, rainfall: f64, temp: f64) -> FeatureRecord {
        FeatureRecord {
            tree: "Mango".to_string(),
            soil: soil.to_string(),
            soil_raw: soil.to_string(),
            region: String::new(),
            ph,
            rainfall_mm: rainfall,
            temperature_c: temp,
            purpose: Purpose::Personal,
            land_size_sq_m: 200.0,
        }
    }

    #[test]
    fn test_high_priority_scenario() {
        // 1 (soil) + 2 (pH) + 2 (rainfall) + 1 (temp) = 6
        let f = features("loamy soil", 6.5, 1200.0, 25.0);
        assert_eq!(score(&f), 6);

        let rec = classify(&f);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.suitability, Suitability::Yes);
    }

    #[test]
    fn test_low_priority_scenario() {
        let f = features("sandy", 9.0, 200.0, 40.0);
        assert_eq!(score(&f), 0);

        let rec = classify(&f);
        assert_eq!(rec.priority, Priority::Low);
        assert_eq!(rec.suitability, Suitability::No);
    }

    #[rstest]
    #[case(5, Priority::High)]
    #[case(6, Priority::High)]
    #[case(4, Priority::Medium)]
    #[case(3, Priority::Medium)]
    #[case(2, Priority::Low)]
    #[case(0, Priority::Low)]
    fn test_score_thresholds(#[case] score: u32, #[case] expected: Priority) {
        assert_eq!(priority_for_score(score), expected);
    }

    #[rstest]
    #[case(5.5, 2)]
    #[case(7.5, 2)]
    #[case(6.5, 2)]
    #[case(5.0, 1)]
    #[case(5.4, 1)]
    #[case(7.6, 1)]
    #[case(8.0, 1)]
    #[case(4.9, 0)]
    #[case(8.1, 0)]
    fn test_ph_band_scoring(#[case] ph: f64, #[case] expected: u32) {
        // Neutralize every other contribution
        let f = features("volcanic ash", ph, 0.0, 0.0);
        assert_eq!(score(&f), expected);
    }

    #[rstest]
    #[case(900.0, 2)]
    #[case(1500.0, 2)]
    #[case(500.0, 1)]
    #[case(899.0, 1)]
    #[case(499.0, 0)]
    fn test_rainfall_band_scoring(#[case] rainfall: f64, #[case] expected: u32) {
        let f = features("volcanic ash", 9.5, rainfall, 0.0);
        assert_eq!(score(&f), expected);
    }

    #[test]
    fn test_preferred_soil_containment() {
        // "sandy loam soil" contains "loam" and "sandy loam"
        let f = features("sandy loam soil", 9.5, 0.0, 0.0);
        assert_eq!(score(&f), 1);

        let f = features("peaty", 9.5, 0.0, 0.0);
        assert_eq!(score(&f), 0);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let f = features("red soil", 6.8, 950.0, 28.0);
        let first = classify(&f);
        let second = classify(&f);
        assert_eq!(first, second);
    }

    #[test]
    fn test_commercial_advice_present_for_every_tier() {
        for (soil, ph, rain, temp) in [
            ("loamy soil", 6.5, 1200.0, 25.0),
            ("sandy", 6.5, 600.0, 25.0),
            ("sandy", 9.0, 200.0, 40.0),
        ] {
            let rec = classify(&features(soil, ph, rain, temp));
            assert!(!rec.commercial_advice.is_empty());
        }
    }

    #[test]
    fn test_reason_mentions_inputs() {
        let rec = classify(&features("black soil", 6.5, 800.0, 25.0));
        assert!(rec.reason.contains("black soil"));
        assert!(rec.reason.contains("6.5"));
        assert!(rec.reason.contains("800"));
    }
}
