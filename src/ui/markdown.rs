//! The small Markdown subset the AI overview uses: bold, italic, inline code
//! and heading lines. Substitutions run in a fixed order; this is not a
//! general Markdown parser.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));

static ITALIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("valid code regex"));

// Headings render as bold lines.
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^#+\s*(.*)$").expect("valid heading regex"));

pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = BOLD_REGEX.replace_all(text, "<strong>${1}</strong>");
    let html = ITALIC_REGEX.replace_all(&html, "<em>${1}</em>");
    let html = CODE_REGEX.replace_all(&html, "<code>${1}</code>");
    let html = HEADING_REGEX.replace_all(&html, "<strong>${1}</strong>");
    html.trim().to_string()
}
