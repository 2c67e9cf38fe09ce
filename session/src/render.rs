//! Text formatting for conversation entries, shared by the web and
//! terminal front ends.

use std::fmt::Write;

use crate::api::AnalysisReport;
use crate::conversation::ConversationEntry;

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

/// Heading shown above every bot report.
pub const REPORT_HEADING: &str = "Analysis Result:";

/// Comma-separated allergen list, or `"None"` when empty.
#[must_use]
pub fn format_allergens(allergens: &[String]) -> String {
    if allergens.is_empty() { "None".to_owned() } else { allergens.join(", ") }
}

/// Ethical score without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score}")
}

/// Multi-line plain-text rendering of a report.
#[must_use]
pub fn report_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_HEADING}");
    let _ = writeln!(out, "  Detected Allergens: {}", format_allergens(&report.detected_allergens));
    let _ = writeln!(out, "  Risk Level: {}", report.risk_level);
    let _ = writeln!(out, "  Ethical Score: {}", format_score(report.ethical_score));
    let _ = writeln!(out, "  Recommendations:");
    for rec in &report.recommendations {
        let _ = writeln!(out, "    - {rec}");
    }
    out
}

/// Plain-text rendering of any entry, prefixed by speaker.
#[must_use]
pub fn entry_text(entry: &ConversationEntry) -> String {
    match entry {
        ConversationEntry::User { text } => format!("you> {text}\n"),
        ConversationEntry::Bot(report) => report_text(report),
    }
}
