//! Input normalization for free-text soil, rainfall and land size fields
//!
//! Soil names arrive transliterated or vernacular ("lal mati", "regadi") and
//! are mapped to canonical categories. Rainfall and land size arrive as
//! numbers with unit noise or as category words. Every parser here is
//! total: unrecognized input degrades to pass-through or `None`, never an
//! error.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Square metres per acre
const SQ_M_PER_ACRE: f64 = 4046.86;

/// Square metres per hectare
const SQ_M_PER_HECTARE: f64 = 10_000.0;

/// Transliterated and vernacular soil names mapped to canonical categories
static SOIL_MAP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("lal mati", "red soil"),
        ("lal maati", "red soil"),
        ("lalmatti", "red soil"),
        ("kali mati", "black soil"),
        ("kalimati", "black soil"),
        ("regadi", "sandy soil"),
        ("balukamati", "sandy soil"),
        ("balukamatti", "sandy soil"),
        ("retimati", "sandy soil"),
        ("loamy", "loamy soil"),
        ("loam", "loamy soil"),
        ("loamy soil", "loamy soil"),
        ("sandy", "sandy soil"),
        ("clay", "clay soil"),
        ("clayey", "clay soil"),
        ("black soil", "black soil"),
        ("red soil", "red soil"),
        ("alluvial", "alluvial soil"),
    ])
});

/// Rainfall categories mapped to representative annual millimetres
static RAINFALL_MAP: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        ("low", 300.0),
        ("moderate", 700.0),
        ("medium", 700.0),
        ("high", 1200.0),
    ])
});

/// Normalize a soil description to a canonical category
///
/// Unknown inputs pass through lowercased and trimmed; they are treated as
/// their own category rather than rejected.
#[must_use]
pub fn normalize_soil(text: &str) -> String {
    let t = text.trim().to_lowercase();
    match SOIL_MAP.get(t.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => t,
    }
}

/// Parse a rainfall description into annual millimetres
///
/// Accepts plain numbers with unit noise ("1200 mm") or category words
/// ("low"/"moderate"/"medium"/"high"). Returns `None` when neither applies.
#[must_use]
pub fn parse_rainfall(text: &str) -> Option<f64> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }

    if let Some(mm) = parse_loose_number(&t) {
        return Some(mm);
    }

    RAINFALL_MAP.get(t.as_str()).copied()
}

/// Parse a land size description into square metres
///
/// Supports acre ("2ac") and hectare ("1ha") suffixes; anything else is
/// treated as square metres directly. Returns `None` on parse failure.
#[must_use]
pub fn parse_land_size(text: &str) -> Option<f64> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }

    if let Some(prefix) = t.strip_suffix("ac") {
        return prefix.trim().parse::<f64>().ok().map(|a| a * SQ_M_PER_ACRE);
    }
    if let Some(prefix) = t.strip_suffix("ha") {
        return prefix
            .trim()
            .parse::<f64>()
            .ok()
            .map(|h| h * SQ_M_PER_HECTARE);
    }

    parse_loose_number(&t)
}

/// Parse a number out of text by dropping every non-digit, non-dot
/// character ("1200 mm" -> 1200.0)
fn parse_loose_number(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lal mati", "red soil")]
    #[case("Lal Maati", "red soil")]
    #[case("lalmatti", "red soil")]
    #[case("kali mati", "black soil")]
    #[case("kalimati", "black soil")]
    #[case("regadi", "sandy soil")]
    #[case("balukamati", "sandy soil")]
    #[case("retimati", "sandy soil")]
    #[case("loamy", "loamy soil")]
    #[case("loam", "loamy soil")]
    #[case("sandy", "sandy soil")]
    #[case("clayey", "clay soil")]
    #[case("alluvial", "alluvial soil")]
    fn test_normalize_soil_known(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_soil(input), expected);
    }

    #[test]
    fn test_normalize_soil_unknown_passes_through() {
        assert_eq!(normalize_soil("  Volcanic Ash  "), "volcanic ash");
        assert_eq!(normalize_soil("peaty"), "peaty");
    }

    #[rstest]
    #[case("1200 mm", Some(1200.0))]
    #[case("1200", Some(1200.0))]
    #[case("high", Some(1200.0))]
    #[case("moderate", Some(700.0))]
    #[case("medium", Some(700.0))]
    #[case("low", Some(300.0))]
    #[case("", None)]
    #[case("torrential", None)]
    fn test_parse_rainfall(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_rainfall(input), expected);
    }

    #[test]
    fn test_parse_land_size_acres() {
        let sq_m = parse_land_size("2ac").unwrap();
        assert!((sq_m - 8093.72).abs() < 0.01);
    }

    #[test]
    fn test_parse_land_size_hectares() {
        assert_eq!(parse_land_size("1ha"), Some(10_000.0));
        assert_eq!(parse_land_size("0.5 ha"), Some(5_000.0));
    }

    #[rstest]
    #[case("500", Some(500.0))]
    #[case("500 sq m", Some(500.0))]
    #[case("", None)]
    #[case("ac", None)]
    #[case("lots", None)]
    fn test_parse_land_size_square_metres(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_land_size(input), expected);
    }
}
