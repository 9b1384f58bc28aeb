pub mod aggregation;
pub mod handlers;
pub mod narrative;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::core::state::AppState;
use crate::core::urls::ApiUrls;

pub use aggregation::{
    aggregate_recent_activity, ActivityOverview, ContactSummary, DealSummary, PortfolioTotals,
};
pub use handlers::*;
pub use narrative::{build_prompt, fallback_summary, generate_insights};

pub fn configure_insights_routes() -> Router<Arc<AppState>> {
    Router::new().route(ApiUrls::AI_OVERVIEW, post(handle_ai_overview))
}
