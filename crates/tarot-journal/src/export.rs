//! Markdown and plain-text export of reading history.

use tarot_core::{Reading, get_spread};

fn spread_title(reading: &Reading) -> String {
    get_spread(reading.spread_type())
        .map(|s| s.display_name.to_string())
        .unwrap_or_else(|_| reading.spread_type().to_string())
}

/// Export readings as a markdown document, oldest first.
pub fn export_markdown(readings: &[Reading]) -> String {
    let mut out = String::from("# Tarot Reading History\n\n");
    for reading in readings {
        out.push_str(&format!(
            "## {} ({})\n\n",
            spread_title(reading),
            reading.timestamp().format("%Y-%m-%d %H:%M UTC")
        ));
        out.push_str(&format!("**Focus**: {}\n", reading.focus_area()));
        if let Some(question) = reading.question() {
            out.push_str(&format!("**Question**: {question}\n"));
        }
        out.push('\n');
        for card in reading.cards() {
            out.push_str(&format!(
                "- **{}**: {} ({})\n",
                card.position_meaning,
                card.card.name,
                card.orientation()
            ));
        }
        out.push('\n');
        if let Some(text) = reading.interpretation() {
            out.push_str("### Interpretation\n\n");
            out.push_str(text);
            out.push_str("\n\n");
        }
        out.push_str("---\n\n");
    }
    out
}

/// Export readings as plain text, oldest first.
pub fn export_text(readings: &[Reading]) -> String {
    let mut out = String::from("Tarot Reading History\n\n");
    for reading in readings {
        out.push_str(&format!(
            "=== {} ({}) ===\n",
            spread_title(reading),
            reading.timestamp().format("%Y-%m-%d %H:%M UTC")
        ));
        out.push_str(&format!("Focus: {}\n", reading.focus_area()));
        if let Some(question) = reading.question() {
            out.push_str(&format!("Question: {question}\n"));
        }
        for card in reading.cards() {
            out.push_str(&format!(
                "  {}: {} ({})\n",
                card.position_meaning,
                card.card.name,
                card.orientation()
            ));
        }
        if let Some(text) = reading.interpretation() {
            out.push_str(&format!("\n{text}\n"));
        }
        out.push('\n');
    }
    out
}
