#[derive(Debug)]
pub struct ApiUrls;

impl ApiUrls {
    pub const HEALTH: &'static str = "/health";

    // CRM passthrough - JSON APIs
    pub const CONTACTS: &'static str = "/api/contacts";
    pub const CONTACT_DEALS: &'static str = "/api/contacts/:id/deals";
    pub const DEALS: &'static str = "/api/deals";

    // AI
    pub const AI_OVERVIEW: &'static str = "/api/ai/overview";

    // UI fragments - HTML inside JSON
    pub const UI_CONTACTS: &'static str = "/ui/contacts";
    pub const UI_CONTACT_DEALS: &'static str = "/ui/contacts/:id/deals";
    pub const UI_AI_OVERVIEW: &'static str = "/ui/ai/overview";
}
