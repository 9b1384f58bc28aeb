//! API Router
//!
//! Combines the CRM passthrough, AI overview and UI fragment endpoints into
//! one router sharing `AppState`.

use axum::Router;
use std::sync::Arc;

use crate::core::state::AppState;

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // ===== HubSpot contacts & deals =====
        .merge(crate::crm::configure_crm_routes())
        // ===== Gemini activity overview =====
        .merge(crate::insights::configure_insights_routes())
        // ===== Dashboard fragments =====
        .merge(crate::ui::configure_ui_routes())
}
