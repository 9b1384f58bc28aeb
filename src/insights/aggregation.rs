//! Joins the most recent contacts with their deals and totals the portfolio.

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::core::upstream::UpstreamError;
use crate::crm::types::{parse_amount, Contact, Deal, DEAL_SUMMARY_PROPERTIES};
use crate::crm::HubSpotClient;

pub const DEFAULT_OVERVIEW_LIMIT: u32 = 5;
/// HubSpot's search endpoint caps a page at 200 records.
pub const MAX_OVERVIEW_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closedate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub deal_type: Option<String>,
}

impl From<Deal> for DealSummary {
    fn from(deal: Deal) -> Self {
        let text = |name: &str| deal.property(name).map(String::from);
        Self {
            name: text("dealname"),
            amount: text("amount"),
            stage: text("dealstage"),
            closedate: text("closedate"),
            pipeline: text("pipeline"),
            deal_type: text("dealtype"),
            id: deal.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub createdate: Option<String>,
    pub deals: Vec<DealSummary>,
}

impl ContactSummary {
    pub fn new(contact: Contact, deals: Vec<Deal>) -> Self {
        let text = |name: &str| contact.property(name).map(String::from);
        Self {
            name: contact.display_name(),
            email: text("email"),
            phone: text("phone"),
            address: text("address"),
            city: text("city"),
            state: text("state"),
            country: text("country"),
            createdate: text("createdate"),
            id: contact.id,
            deals: deals.into_iter().map(DealSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub contacts: usize,
    pub deals: usize,
    pub deal_value: f64,
}

impl PortfolioTotals {
    pub fn from_summaries(summaries: &[ContactSummary]) -> Self {
        let all_deals = summaries.iter().flat_map(|s| s.deals.iter());
        let (deals, deal_value) = all_deals.fold((0, 0.0), |(count, sum), deal| {
            (count + 1, sum + parse_amount(deal.amount.as_deref()))
        });
        Self {
            contacts: summaries.len(),
            deals,
            deal_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityOverview {
    /// Effective contact limit the overview was built with.
    pub limit: u32,
    pub summaries: Vec<ContactSummary>,
    pub totals: PortfolioTotals,
}

/// Reads the `limit` of an overview request. Accepts numbers and numeric
/// strings (`true` reads as 1); anything missing, non-positive or
/// non-numeric means the default.
pub fn normalize_limit(raw: Option<&Value>) -> u32 {
    let value = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() && v >= 1.0 => (v.trunc() as u32).min(MAX_OVERVIEW_LIMIT),
        _ => DEFAULT_OVERVIEW_LIMIT,
    }
}

/// Fetches the `limit` newest contacts and resolves their deals one contact at
/// a time. A failed deal lookup leaves that contact with no deals.
pub async fn aggregate_recent_activity(
    crm: &HubSpotClient,
    limit: u32,
) -> Result<ActivityOverview, UpstreamError> {
    let contacts = crm.list_recent_contacts(limit).await?;
    let mut summaries = Vec::with_capacity(contacts.len());

    for contact in contacts {
        let deals = match crm
            .list_deals_for_contact_with(&contact.id, DEAL_SUMMARY_PROPERTIES)
            .await
        {
            Ok(batch) => batch.results,
            Err(e) => {
                warn!("Failed to fetch deals for contact {}: {}", contact.id, e.details());
                Vec::new()
            }
        };
        summaries.push(ContactSummary::new(contact, deals));
    }

    let totals = PortfolioTotals::from_summaries(&summaries);
    info!(
        "Aggregated {} contacts with {} deals (limit {})",
        totals.contacts, totals.deals, limit
    );

    Ok(ActivityOverview {
        limit,
        summaries,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubSpotConfig;
    use serde_json::json;

    fn deal(id: &str, amount: Option<&str>) -> DealSummary {
        DealSummary {
            id: id.to_string(),
            name: None,
            amount: amount.map(String::from),
            stage: None,
            closedate: None,
            pipeline: None,
            deal_type: None,
        }
    }

    fn summary(id: &str, deals: Vec<DealSummary>) -> ContactSummary {
        let contact: Contact = serde_json::from_value(json!({"id": id, "properties": {}})).unwrap();
        let mut s = ContactSummary::new(contact, Vec::new());
        s.deals = deals;
        s
    }

    #[test]
    fn test_totals_sum_over_all_summaries() {
        let summaries = vec![
            summary("1", vec![deal("a", Some("1000")), deal("b", Some("oops"))]),
            summary("2", vec![]),
            summary("3", vec![deal("c", Some("300")), deal("d", Some("200.00")), deal("e", None)]),
        ];
        let totals = PortfolioTotals::from_summaries(&summaries);
        assert_eq!(totals.contacts, 3);
        assert_eq!(totals.deals, 5);
        assert_eq!(totals.deal_value, 1500.0);
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(PortfolioTotals::from_summaries(&[]), PortfolioTotals::default());
    }

    #[test]
    fn test_normalize_limit() {
        assert_eq!(normalize_limit(None), DEFAULT_OVERVIEW_LIMIT);
        assert_eq!(normalize_limit(Some(&json!(3))), 3);
        assert_eq!(normalize_limit(Some(&json!("8"))), 8);
        assert_eq!(normalize_limit(Some(&json!(2.9))), 2);
        assert_eq!(normalize_limit(Some(&json!(0))), DEFAULT_OVERVIEW_LIMIT);
        assert_eq!(normalize_limit(Some(&json!(-4))), DEFAULT_OVERVIEW_LIMIT);
        assert_eq!(normalize_limit(Some(&json!("lots"))), DEFAULT_OVERVIEW_LIMIT);
        assert_eq!(normalize_limit(Some(&json!(null))), DEFAULT_OVERVIEW_LIMIT);
        assert_eq!(normalize_limit(Some(&json!(5000))), MAX_OVERVIEW_LIMIT);
        assert_eq!(normalize_limit(Some(&json!(true))), 1);
        assert_eq!(normalize_limit(Some(&json!(false))), DEFAULT_OVERVIEW_LIMIT);
    }

    #[test]
    fn test_summary_serializes_deal_type_as_type() {
        let deal: Deal = serde_json::from_value(json!({
            "id": "d9",
            "properties": {"dealname": "Expansion", "amount": "50", "dealtype": "newbusiness"}
        }))
        .unwrap();
        let v = serde_json::to_value(DealSummary::from(deal)).unwrap();
        assert_eq!(v["type"], "newbusiness");
        assert_eq!(v["name"], "Expansion");
        assert!(v.get("stage").is_none());
    }

    #[tokio::test]
    async fn test_failed_lookup_does_not_abort_aggregation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/crm/v3/objects/contacts/search")
            .with_status(200)
            .with_body(
                json!({"results": [
                    {"id": "1", "properties": {"firstname": "Ann"}},
                    {"id": "2", "properties": {"firstname": "Bob"}}
                ]})
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", "/crm/v3/objects/contacts/1/associations/deals")
            .with_status(500)
            .with_body(r#"{"message":"internal"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/crm/v3/objects/contacts/2/associations/deals")
            .with_status(200)
            .with_body(json!({"results": [{"id": "d1"}]}).to_string())
            .create_async()
            .await;
        server
            .mock("POST", "/crm/v3/objects/deals/batch/read")
            .with_status(200)
            .with_body(
                json!({"results": [{"id": "d1", "properties": {"amount": "75.5"}}]}).to_string(),
            )
            .create_async()
            .await;

        let crm = HubSpotClient::new(
            reqwest::Client::new(),
            &HubSpotConfig {
                access_token: "t".to_string(),
                api_base: server.url(),
            },
        );
        let overview = aggregate_recent_activity(&crm, 2).await.unwrap();

        assert_eq!(overview.summaries.len(), 2);
        assert_eq!(overview.summaries[0].name, "Ann");
        assert!(overview.summaries[0].deals.is_empty());
        assert_eq!(overview.summaries[1].deals.len(), 1);
        assert_eq!(overview.totals.deals, 1);
        assert_eq!(overview.totals.deal_value, 75.5);
    }
}
