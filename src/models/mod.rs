//! Data models for the ArborAI application
//!
//! This module contains the core domain models organized by concern:
//! - Input: raw per-request user input
//! - Features: coordinates, soil/climate estimates and the reconciled record
//! - Recommendation: the structured advisory output

pub mod features;
pub mod input;
pub mod recommendation;

// Re-export all public types for convenient access
pub use features::{Coordinates, FeatureRecord, SoilClimateEstimate};
pub use input::{Purpose, RawInput};
pub use recommendation::{Priority, Recommendation, Suitability};
