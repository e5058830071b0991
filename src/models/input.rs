//! Raw user input for one advisory request

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Intended use of the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Purpose {
    #[default]
    Personal,
    Commercial,
}

impl Purpose {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Personal => "Personal",
            Purpose::Commercial => "Commercial",
        }
    }
}

impl FromStr for Purpose {
    type Err = ();

    /// Case-insensitive; anything other than "commercial" is Personal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("commercial") {
            Ok(Purpose::Commercial)
        } else {
            Ok(Purpose::Personal)
        }
    }
}

/// Free-text user input collected by a front end
///
/// Created once per advisory request and never mutated afterwards. Parsing
/// and defaulting happen downstream in the normalizer and reconciler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInput {
    /// Tree species name, e.g. "Mango"
    pub tree: String,
    /// Soil description, possibly transliterated, e.g. "lal mati"
    pub soil: String,
    /// Region or city name used for geocoding; may be empty
    pub region: String,
    /// Annual rainfall as mm or category text ("low"/"moderate"/"high")
    pub rainfall: String,
    /// Average temperature in degrees Celsius, if the user supplied one
    pub temperature: Option<f64>,
    pub purpose: Purpose,
    /// Land size text, e.g. "500", "2ac", "1ha"
    pub land_size: String,
}
