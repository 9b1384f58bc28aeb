use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::crm::types::{
    CollectionResponse, Contact, CreateContactRequest, CreateDealRequest, Deal,
};

/// Page size for the contact and deal listings.
pub const LIST_LIMIT: u32 = 50;

pub async fn handle_list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state
        .crm
        .list_recent_contacts(LIST_LIMIT)
        .await
        .map_err(ApiError::with("Failed to fetch contacts"))?;
    Ok(Json(contacts))
}

pub async fn handle_create_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateContactRequest>,
) -> Result<Json<Contact>, ApiError> {
    let contact = state
        .crm
        .create_contact(&req.properties)
        .await
        .map_err(ApiError::with("Failed to create contact"))?;
    log::info!("Created contact {}", contact.id);
    Ok(Json(contact))
}

pub async fn handle_list_deals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CollectionResponse<Deal>>, ApiError> {
    let deals = state
        .crm
        .list_deals(LIST_LIMIT)
        .await
        .map_err(ApiError::with("Failed to fetch deals"))?;
    Ok(Json(deals))
}

pub async fn handle_create_deal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDealRequest>,
) -> Result<Json<Deal>, ApiError> {
    let deal = state
        .crm
        .create_deal(&req.deal_properties, req.contact_id.as_deref())
        .await
        .map_err(ApiError::with("Failed to create deal"))?;
    log::info!(
        "Created deal {} (contact: {})",
        deal.id,
        req.contact_id.as_deref().unwrap_or("none")
    );
    Ok(Json(deal))
}

pub async fn handle_contact_deals(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<String>,
) -> Result<Json<CollectionResponse<Deal>>, ApiError> {
    let deals = state
        .crm
        .list_deals_for_contact(&contact_id)
        .await
        .map_err(ApiError::with("Failed to fetch deals for contact"))?;
    Ok(Json(deals))
}
