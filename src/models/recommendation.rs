//! Structured advisory output produced by the decision engine

use serde::{Deserialize, Serialize};

/// Planting priority tier derived from the weighted rule score or the
/// remote model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Lenient parse for model output; unrecognized text maps to Medium
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// Whether the tree is suitable for the plot at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suitability {
    Yes,
    No,
}

impl Suitability {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::Yes => "Yes",
            Suitability::No => "No",
        }
    }

    /// Lenient parse for model output; unrecognized text maps to Yes
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("no") {
            Suitability::No
        } else {
            Suitability::Yes
        }
    }
}

/// Final recommendation for one advisory request
///
/// Produced exactly once per request by a single decision strategy and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub suitability: Suitability,
    /// One-sentence explanation
    pub reason: String,
    /// Practical planting steps, typically a short bullet list
    pub recommendation: String,
    /// Commercial tips; may be empty
    pub commercial_advice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_lenient_parse() {
        assert_eq!(Priority::parse_lenient("High"), Priority::High);
        assert_eq!(Priority::parse_lenient(" low "), Priority::Low);
        assert_eq!(Priority::parse_lenient("MEDIUM"), Priority::Medium);
        assert_eq!(Priority::parse_lenient("urgent"), Priority::Medium);
    }

    #[test]
    fn test_suitability_lenient_parse() {
        assert_eq!(Suitability::parse_lenient("No"), Suitability::No);
        assert_eq!(Suitability::parse_lenient("yes"), Suitability::Yes);
        assert_eq!(Suitability::parse_lenient("maybe"), Suitability::Yes);
    }
}
