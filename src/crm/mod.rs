pub mod client;
pub mod handlers;
pub mod types;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::core::state::AppState;
use crate::core::urls::ApiUrls;

pub use client::HubSpotClient;
pub use handlers::*;
pub use types::{CollectionResponse, Contact, Deal};

pub fn configure_crm_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            ApiUrls::CONTACTS,
            get(handle_list_contacts).post(handle_create_contact),
        )
        .route(ApiUrls::CONTACT_DEALS, get(handle_contact_deals))
        .route(ApiUrls::DEALS, get(handle_list_deals).post(handle_create_deal))
}
