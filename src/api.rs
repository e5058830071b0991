//! JSON API for the advisory pipeline

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::{Purpose, RawInput};
use crate::pipeline::{AdvisoryReport, AdvisoryService};

/// Request body for one advisory; all fields are free text the pipeline
/// normalizes and defaults itself
#[derive(Debug, Deserialize)]
pub struct AdviseRequest {
    pub tree: String,
    pub soil: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub rainfall: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub land_size: String,
}

#[derive(Debug, Serialize)]
pub struct AdviseResponse {
    #[serde(flatten)]
    pub report: AdvisoryReport,
}

impl AdviseRequest {
    fn into_raw_input(self) -> RawInput {
        RawInput {
            tree: self.tree.trim().to_string(),
            soil: self.soil,
            region: self.region,
            rainfall: self.rainfall,
            temperature: self.temperature.trim().parse::<f64>().ok(),
            purpose: self.purpose.parse::<Purpose>().unwrap_or_default(),
            land_size: self.land_size,
        }
    }
}

pub fn router(service: Arc<AdvisoryService>) -> Router {
    Router::new()
        .route("/advise", post(advise))
        .with_state(service)
}

async fn advise(
    State(service): State<Arc<AdvisoryService>>,
    Json(payload): Json<AdviseRequest>,
) -> Result<Json<AdviseResponse>, (StatusCode, String)> {
    if payload.tree.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Tree name is required".to_string()));
    }

    let raw = payload.into_raw_input();
    let report = service.advise(&raw).await;
    Ok(Json(AdviseResponse { report }))
}
