use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::pagination::Paginator;
use super::render::{render_contact_options, render_contact_pages, render_deal_rows, render_insights};
use super::PAGE_SIZE;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::crm::handlers::LIST_LIMIT;
use crate::insights::aggregation::normalize_limit;
use crate::insights::handlers::{build_overview, OverviewRequest, OVERVIEW_ERROR};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsFragment {
    pub total: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub pages_html: String,
    pub options_html: String,
}

#[derive(Debug, Serialize)]
pub struct HtmlFragment {
    pub html: String,
}

pub async fn handle_contacts_fragment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContactsFragment>, ApiError> {
    let contacts = state
        .crm
        .list_recent_contacts(LIST_LIMIT)
        .await
        .map_err(ApiError::with("Failed to fetch contacts"))?;

    let pager = Paginator::new(contacts.len(), PAGE_SIZE, 1);
    Ok(Json(ContactsFragment {
        total: pager.total(),
        page_size: pager.page_size(),
        total_pages: pager.total_pages(),
        pages_html: render_contact_pages(&contacts, PAGE_SIZE),
        options_html: render_contact_options(&contacts),
    }))
}

pub async fn handle_deals_fragment(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<String>,
) -> Result<Json<HtmlFragment>, ApiError> {
    let deals = state
        .crm
        .list_deals_for_contact(&contact_id)
        .await
        .map_err(ApiError::with("Failed to fetch deals for contact"))?;
    Ok(Json(HtmlFragment {
        html: render_deal_rows(&deals.results),
    }))
}

pub async fn handle_overview_fragment(
    State(state): State<Arc<AppState>>,
    body: Option<Json<OverviewRequest>>,
) -> Result<Json<HtmlFragment>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let insights = build_overview(&state, normalize_limit(req.limit.as_ref()))
        .await
        .map_err(ApiError::with(OVERVIEW_ERROR))?;
    Ok(Json(HtmlFragment {
        html: render_insights(&insights),
    }))
}
