use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::aggregation::{aggregate_recent_activity, normalize_limit};
use super::narrative::generate_insights;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::core::upstream::UpstreamError;

pub const OVERVIEW_ERROR: &str = "Failed to generate Gemini AI overview";

#[derive(Debug, Default, Deserialize)]
pub struct OverviewRequest {
    #[serde(default)]
    pub limit: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub insights: String,
}

/// Aggregates recent activity and narrates it.
pub async fn build_overview(state: &AppState, limit: u32) -> Result<String, UpstreamError> {
    let overview = aggregate_recent_activity(&state.crm, limit).await?;
    generate_insights(state.llm.as_deref(), &overview).await
}

pub async fn handle_ai_overview(
    State(state): State<Arc<AppState>>,
    body: Option<Json<OverviewRequest>>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let limit = normalize_limit(req.limit.as_ref());

    let insights = build_overview(&state, limit)
        .await
        .map_err(ApiError::with(OVERVIEW_ERROR))?;
    Ok(Json(OverviewResponse { insights }))
}
