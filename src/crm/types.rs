//! HubSpot v3 object shapes used by the dashboard.
//!
//! Records keep every field HubSpot sends (`createdAt`, `archived`, extra
//! properties, ...) in flattened maps so passthrough endpoints return them
//! unchanged.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

pub const CONTACT_PROPERTIES: &[&str] = &[
    "firstname",
    "lastname",
    "email",
    "phone",
    "address",
    "city",
    "state",
    "country",
    "createdate",
];

/// Projection for deal tables.
pub const DEAL_PROPERTIES: &[&str] = &["dealname", "amount", "dealstage", "closedate", "pipeline"];

/// Projection for the AI overview, which also reports the deal type.
pub const DEAL_SUMMARY_PROPERTIES: &[&str] = &[
    "dealname",
    "amount",
    "dealstage",
    "closedate",
    "pipeline",
    "dealtype",
];

/// HubSpot-defined association type id for deal → contact.
pub const DEAL_TO_CONTACT_ASSOCIATION_TYPE: u32 = 3;

/// Looks up a string-valued property; `null`, absent and non-string values
/// all read as `None`.
fn text_property<'a>(properties: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    properties.get(name).and_then(Value::as_str)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn property(&self, name: &str) -> Option<&str> {
        text_property(&self.properties, name)
    }

    /// `"first last"` trimmed, else the email, else the record id.
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.property("firstname").unwrap_or(""),
            self.property("lastname").unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        match self.property("email") {
            Some(email) if !email.is_empty() => email.to_string(),
            _ => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deal {
    pub fn property(&self, name: &str) -> Option<&str> {
        text_property(&self.properties, name)
    }
}

// Leading decimal number, the way a browser's parseFloat reads it.
static LEADING_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
});

/// Reads the longest numeric prefix (`"1500 USD"` is 1500, `"1,200"` is 1).
/// Missing, non-numeric and non-finite amounts are 0.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|s| LEADING_NUMBER_REGEX.find(s.trim_start()))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Any HubSpot list-shaped reply: search, batch read, paged list, associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    #[serde(default = "Vec::new", bound(deserialize = "T: Deserialize<'de>"))]
    pub results: Vec<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> CollectionResponse<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRef {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealRequest {
    #[serde(default)]
    pub deal_properties: Map<String, Value>,
    #[serde(default)]
    pub contact_id: Option<String>,
}

// Outbound request bodies

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub sorts: Vec<SearchSort<'a>>,
    pub limit: u32,
    pub properties: &'a [&'a str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchSort<'a> {
    pub property_name: &'a str,
    pub direction: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ObjectId<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchReadRequest<'a> {
    pub inputs: Vec<ObjectId<'a>>,
    pub properties: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateObjectRequest<'a> {
    pub properties: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<AssociationSpec<'a>>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssociationSpec<'a> {
    pub to: ObjectId<'a>,
    pub types: Vec<AssociationType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssociationType {
    pub association_category: &'static str,
    pub association_type_id: u32,
}
