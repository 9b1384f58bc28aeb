//! Turns an [`ActivityOverview`] into prose, via the language model when one
//! is configured and a fixed summary otherwise.

use log::info;

use super::aggregation::{ActivityOverview, PortfolioTotals};
use crate::core::upstream::UpstreamError;
use crate::llm::LLMProvider;

pub const NO_INSIGHTS: &str = "No AI insights returned.";

pub fn fallback_summary(totals: &PortfolioTotals) -> String {
    [
        "AI Overview (fallback – GEMINI_API_KEY not configured)".to_string(),
        String::new(),
        format!("Most recent contacts examined: {}", totals.contacts),
        format!("Total associated deals: {}", totals.deals),
        format!("Approx total deal value: ${:.2}", totals.deal_value),
        String::new(),
        "Add GEMINI_API_KEY to .env to enable full Gemini-powered narrative insights.".to_string(),
    ]
    .join("\n")
}

pub fn build_prompt(overview: &ActivityOverview) -> String {
    let data = serde_json::to_string_pretty(&overview.summaries)
        .unwrap_or_else(|_| "[]".to_string());
    let totals = &overview.totals;

    format!(
        r#"
You are an assistant helping a sales/CS manager understand the most recent CRM activity.

You are given:
- The most recent {contacts} contacts (capped at {limit})
- Their key details (email, location)
- All {deals} deals associated with those contacts

Write a concise summary that includes:
- 2–3 key observations about the new contacts (who they are, where they are based)
- 2–3 insights about the deals: stages, value concentration, notable trends (e.g. many small deals vs a few large ones)
- 2–3 recommended next actions for the team (e.g. follow-up focus, upsell opportunities, regions to prioritize)

Keep it under ~250 words. Use a friendly, executive tone.

Here is the JSON data:

{data}
"#,
        contacts = totals.contacts,
        limit = overview.limit,
        deals = totals.deals,
        data = data,
    )
    .trim()
    .to_string()
}

pub async fn generate_insights(
    llm: Option<&dyn LLMProvider>,
    overview: &ActivityOverview,
) -> Result<String, UpstreamError> {
    let Some(llm) = llm else {
        return Ok(fallback_summary(&overview.totals));
    };

    let prompt = build_prompt(overview);
    let text = llm.generate(&prompt).await?;
    info!("{} returned {} chars of insights", llm.name(), text.len());

    if text.trim().is_empty() {
        Ok(NO_INSIGHTS.to_string())
    } else {
        Ok(text)
    }
}
