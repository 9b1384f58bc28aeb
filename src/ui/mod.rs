//! Server-rendered pieces of the dashboard UI.

pub mod handlers;
pub mod markdown;
pub mod pagination;
pub mod render;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::core::state::AppState;
use crate::core::urls::ApiUrls;

pub use handlers::*;
pub use markdown::markdown_to_html;
pub use pagination::Paginator;

/// Contacts per table page.
pub const PAGE_SIZE: usize = 15;

pub fn configure_ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(ApiUrls::UI_CONTACTS, get(handle_contacts_fragment))
        .route(ApiUrls::UI_CONTACT_DEALS, get(handle_deals_fragment))
        .route(ApiUrls::UI_AI_OVERVIEW, post(handle_overview_fragment))
}
