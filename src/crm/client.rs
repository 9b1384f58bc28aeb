// HubSpot CRM v3 client: contacts, deals and contact→deal associations
use log::debug;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::HubSpotConfig;
use crate::core::upstream::{read_json, UpstreamError};
use crate::crm::types::{
    AssociationRef, AssociationSpec, AssociationType, BatchReadRequest, CollectionResponse,
    Contact, CreateObjectRequest, Deal, ObjectId, SearchRequest, SearchSort, CONTACT_PROPERTIES,
    DEAL_PROPERTIES, DEAL_TO_CONTACT_ASSOCIATION_TYPE,
};

#[derive(Clone)]
pub struct HubSpotClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl std::fmt::Debug for HubSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HubSpotClient {
    pub fn new(client: Client, config: &HubSpotConfig) -> Self {
        Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, UpstreamError> {
        let response = request
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        read_json(response).await
    }

    /// Most recently created contacts first, at most `limit` of them.
    pub async fn list_recent_contacts(&self, limit: u32) -> Result<Vec<Contact>, UpstreamError> {
        let body = SearchRequest {
            sorts: vec![SearchSort {
                property_name: "createdate",
                direction: "DESCENDING",
            }],
            limit,
            properties: CONTACT_PROPERTIES,
        };

        let page: CollectionResponse<Contact> = self
            .send(
                self.client
                    .post(self.url("/crm/v3/objects/contacts/search"))
                    .json(&body),
            )
            .await?;

        Ok(page.results)
    }

    pub async fn create_contact(
        &self,
        properties: &Map<String, Value>,
    ) -> Result<Contact, UpstreamError> {
        let body = CreateObjectRequest {
            properties,
            associations: None,
        };
        self.send(self.client.post(self.url("/crm/v3/objects/contacts")).json(&body))
            .await
    }

    /// Creates a deal, associated with `contact_id` when one is given.
    pub async fn create_deal(
        &self,
        properties: &Map<String, Value>,
        contact_id: Option<&str>,
    ) -> Result<Deal, UpstreamError> {
        let associations: Vec<AssociationSpec<'_>> = contact_id
            .filter(|id| !id.is_empty())
            .map(|id| AssociationSpec {
                to: ObjectId { id },
                types: vec![AssociationType {
                    association_category: "HUBSPOT_DEFINED",
                    association_type_id: DEAL_TO_CONTACT_ASSOCIATION_TYPE,
                }],
            })
            .into_iter()
            .collect();

        let body = CreateObjectRequest {
            properties,
            associations: Some(associations),
        };
        self.send(self.client.post(self.url("/crm/v3/objects/deals")).json(&body))
            .await
    }

    /// First page of deals, returned as HubSpot sent it (including `paging`).
    pub async fn list_deals(&self, limit: u32) -> Result<CollectionResponse<Deal>, UpstreamError> {
        let limit = limit.to_string();
        let properties = DEAL_PROPERTIES.join(",");
        self.send(
            self.client
                .get(self.url("/crm/v3/objects/deals"))
                .query(&[("limit", limit.as_str()), ("properties", properties.as_str())]),
        )
        .await
    }

    pub async fn list_deal_ids_for_contact(
        &self,
        contact_id: &str,
    ) -> Result<Vec<String>, UpstreamError> {
        let path = format!(
            "/crm/v3/objects/contacts/{}/associations/deals",
            urlencoding::encode(contact_id)
        );
        let associations: CollectionResponse<AssociationRef> =
            self.send(self.client.get(self.url(&path))).await?;

        Ok(associations.results.into_iter().map(|a| a.id).collect())
    }

    pub async fn batch_read_deals(
        &self,
        ids: &[String],
        properties: &[&str],
    ) -> Result<CollectionResponse<Deal>, UpstreamError> {
        let body = BatchReadRequest {
            inputs: ids.iter().map(|id| ObjectId { id }).collect(),
            properties,
        };
        self.send(
            self.client
                .post(self.url("/crm/v3/objects/deals/batch/read"))
                .json(&body),
        )
        .await
    }

    pub async fn list_deals_for_contact(
        &self,
        contact_id: &str,
    ) -> Result<CollectionResponse<Deal>, UpstreamError> {
        self.list_deals_for_contact_with(contact_id, DEAL_PROPERTIES)
            .await
    }

    /// Association lookup, then a batch read with `properties`. Skips the
    /// batch read when the contact has no deals.
    pub async fn list_deals_for_contact_with(
        &self,
        contact_id: &str,
        properties: &[&str],
    ) -> Result<CollectionResponse<Deal>, UpstreamError> {
        let ids = self.list_deal_ids_for_contact(contact_id).await?;
        if ids.is_empty() {
            debug!("Contact {contact_id} has no associated deals");
            return Ok(CollectionResponse::empty());
        }
        self.batch_read_deals(&ids, properties).await
    }
}
