//! Prompt construction for interpretation requests.

use tarot_core::{FocusArea, Reading, get_spread};

/// Framing paragraph for a focus area.
pub fn focus_context(focus: FocusArea) -> &'static str {
    match focus {
        FocusArea::Career => {
            "This reading relates to professional development, career decisions, \
             work situations, and vocational path. Provide practical guidance \
             for professional growth and decision-making."
        }
        FocusArea::Relationships => {
            "This reading relates to interpersonal connections, romantic partnerships, \
             friendships, and social dynamics. Offer insight into relationship patterns \
             and emotional connections."
        }
        FocusArea::PersonalGrowth => {
            "This reading relates to self-development, inner work, personal \
             transformation, and spiritual evolution. Focus on insights for personal \
             development and self-understanding."
        }
        FocusArea::Spiritual => {
            "This reading relates to spiritual practices, consciousness exploration, \
             higher purpose, and metaphysical understanding. Provide guidance for \
             spiritual development."
        }
        FocusArea::General => {
            "This reading provides general life guidance across multiple areas. \
             Offer holistic perspective on the querent's current situation."
        }
    }
}

const GUIDELINES: &[&str] = &[
    "\nPlease provide a cohesive interpretation that:",
    "1. Addresses the focus area and question (if provided)",
    "2. Integrates the cards' positions and traditional meanings",
    "3. References specific symbolic elements from the imagery descriptions",
    "   (serpents, robes, objects, colors, positioning)",
    "4. Offers practical, grounded insight for the querent's situation",
    "5. Maintains respect for traditional tarot symbolism",
    "\nKeep the interpretation concise (200-300 words) and actionable.",
];

/// Build the full prompt for `reading`.
///
/// Every card contributes its position, name, orientation, imagery and the
/// meaning for its orientation.
pub fn build_prompt(reading: &Reading) -> String {
    let spread_title = get_spread(reading.spread_type())
        .map(|s| s.display_name.to_string())
        .unwrap_or_else(|_| reading.spread_type().to_string());

    let mut parts = vec![
        "Provide a tarot reading interpretation for the following spread.\n".to_string(),
        format!("**Spread Type**: {spread_title}"),
        format!("**Focus Area**: {}\n", focus_context(reading.focus_area())),
    ];

    if let Some(question) = reading.question() {
        parts.push(format!("**Querent's Question**: {question}\n"));
    }

    parts.push("**Cards Drawn**:".to_string());
    let cards: Vec<String> = reading
        .cards()
        .iter()
        .map(|c| {
            format!(
                "**{}**: {} ({})\nImagery: {}\nTraditional Meaning: {}\n",
                c.position_meaning,
                c.card.name,
                c.orientation(),
                c.card.description,
                c.effective_meaning()
            )
        })
        .collect();
    parts.push(cards.join("\n"));

    parts.extend(GUIDELINES.iter().map(|s| s.to_string()));
    parts.join("\n")
}
