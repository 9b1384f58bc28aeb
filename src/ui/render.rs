//! HTML fragments for the dashboard tables.

use std::fmt::Write;

use super::markdown::markdown_to_html;
use super::pagination::Paginator;
use crate::crm::types::{Contact, Deal};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn cell(value: Option<&str>) -> String {
    format!("<td>{}</td>", escape_html(value.unwrap_or("")))
}

pub fn render_contact_row(contact: &Contact) -> String {
    format!(
        r#"<tr>{}{}{}{}{}<td><button class="view-deals-btn" data-contact-id="{}" data-contact-name="{}">View</button></td></tr>"#,
        cell(contact.property("firstname")),
        cell(contact.property("lastname")),
        cell(contact.property("email")),
        cell(contact.property("phone")),
        cell(contact.property("address")),
        escape_html(&contact.id),
        escape_html(&deals_header(contact)),
    )
}

/// Title of the deals panel for a contact: the full name, or "Deals".
pub fn deals_header(contact: &Contact) -> String {
    let name = format!(
        "{} {}",
        contact.property("firstname").unwrap_or(""),
        contact.property("lastname").unwrap_or("")
    );
    match name.trim() {
        "" => "Deals".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn render_pagination(page: &Paginator) -> String {
    let disabled = |flag: bool| if flag { "" } else { " disabled" };
    format!(
        r#"<nav class="pagination"><button class="page-btn" data-goto="{prev}"{prev_disabled}>Previous</button><span class="page-info">{info}</span><button class="page-btn" data-goto="{next}"{next_disabled}>Next</button></nav>"#,
        prev = page.current().saturating_sub(1).max(1),
        prev_disabled = disabled(page.has_prev()),
        info = page.page_info(),
        next = (page.current() + 1).min(page.total_pages()),
        next_disabled = disabled(page.has_next()),
    )
}

/// Every page of the contact table, pre-rendered. Only page 1 is visible;
/// the browser switches pages without another fetch.
pub fn render_contact_pages(contacts: &[Contact], page_size: usize) -> String {
    if contacts.is_empty() {
        return r#"<section class="contacts-page" data-page="1"><table class="contacts-table"><tbody><tr><td colspan="6">No contacts found.</td></tr></tbody></table></section>"#.to_string();
    }

    let pager = Paginator::new(contacts.len(), page_size, 1);
    let mut html = String::new();

    for page in pager.pages() {
        let hidden = if page.current() == 1 { "" } else { " hidden" };
        let _ = write!(
            html,
            r#"<section class="contacts-page" data-page="{}"{}><table class="contacts-table"><thead><tr><th>First name</th><th>Last name</th><th>Email</th><th>Phone</th><th>Address</th><th>Deals</th></tr></thead><tbody>"#,
            page.current(),
            hidden
        );
        for contact in page.slice(contacts) {
            html.push_str(&render_contact_row(contact));
        }
        html.push_str("</tbody></table>");
        if page.is_visible() {
            html.push_str(&render_pagination(&page));
        }
        html.push_str("</section>");
    }

    html
}

/// `<option>`s for the deal form's contact picker.
pub fn render_contact_options(contacts: &[Contact]) -> String {
    let mut html = String::from(r#"<option value="">Select a contact</option>"#);
    for contact in contacts {
        let _ = write!(
            html,
            r#"<option value="{}">{}</option>"#,
            escape_html(&contact.id),
            escape_html(&contact.display_name())
        );
    }
    html
}

pub fn render_deal_rows(deals: &[Deal]) -> String {
    if deals.is_empty() {
        return r#"<tr><td colspan="3">No deals.</td></tr>"#.to_string();
    }

    deals
        .iter()
        .map(|deal| {
            format!(
                "<tr>{}{}{}</tr>",
                cell(deal.property("dealname")),
                cell(deal.property("amount")),
                cell(deal.property("dealstage"))
            )
        })
        .collect()
}

/// Model or fallback text as HTML. The text is escaped before the Markdown
/// subset is applied.
pub fn render_insights(text: &str) -> String {
    markdown_to_html(&escape_html(text))
}
