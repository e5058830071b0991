//! `ArborAI` - Tree planting advisory
//!
//! This library resolves soil and climate features for a plot from user
//! input and best-effort external lookups, reconciles them into a complete
//! feature record, and produces a structured planting recommendation via a
//! remote generative advisor or a deterministic rule engine.

pub mod advisor;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod region_resolver;
pub mod web;

// Re-export core types for public API
pub use advisor::{ChatSession, DecisionStrategy, EngineKind, GeminiClient, RuleStrategy};
pub use config::AdvisorConfig;
pub use error::ArborAiError;
pub use models::{
    Coordinates, FeatureRecord, Priority, Purpose, RawInput, Recommendation, SoilClimateEstimate,
    Suitability,
};
pub use pipeline::{AdvisoryReport, AdvisoryService};
pub use region_resolver::RegionResolver;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ArborAiError>;
