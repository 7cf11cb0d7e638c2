//! Spread layouts and baseline interpretation.
//!
//! A spread is a static template: an ordered list of position labels. The
//! i-th card drawn is bound to the i-th position, so draw order carries the
//! spread's meaning (the first card of a three-card spread is the "Past").

use chrono::{DateTime, Utc};

use crate::card::DrawnCard;
use crate::error::{TarotError, TarotResult};
use crate::reading::{FocusArea, Reading};

/// A named spread template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadLayout {
    /// Registry key (e.g. `three`).
    pub name: &'static str,
    /// Title shown to the user.
    pub display_name: &'static str,
    /// Position labels in draw order. Never empty.
    pub positions: &'static [&'static str],
    /// One-line description.
    pub description: &'static str,
}

/// One card for immediate guidance or a daily draw.
pub const SINGLE_CARD: SpreadLayout = SpreadLayout {
    name: "single",
    display_name: "Single Card",
    positions: &["Present"],
    description: "One card for immediate guidance or daily draw",
};

/// Past, present, and future.
pub const THREE_CARD: SpreadLayout = SpreadLayout {
    name: "three",
    display_name: "Three Card Spread",
    positions: &["Past", "Present", "Future"],
    description: "Classic three-card timeline spread",
};

/// The ten-card Celtic Cross.
pub const CELTIC_CROSS: SpreadLayout = SpreadLayout {
    name: "celtic",
    display_name: "Celtic Cross",
    positions: &[
        "Present Situation",
        "Challenge/Crossing",
        "Distant Past/Foundation",
        "Recent Past",
        "Possible Future",
        "Near Future",
        "Self Perception",
        "External Influences",
        "Hopes and Fears",
        "Outcome",
    ],
    description: "Comprehensive 10-card spread for deep inquiry",
};

const SPREADS: &[SpreadLayout] = &[SINGLE_CARD, THREE_CARD, CELTIC_CROSS];

/// All registered spreads in menu order.
pub fn all_spreads() -> &'static [SpreadLayout] {
    SPREADS
}

/// Look up a spread by registry key (case-insensitive).
pub fn get_spread(name: &str) -> TarotResult<&'static SpreadLayout> {
    let lower = name.trim().to_lowercase();
    SPREADS
        .iter()
        .find(|s| s.name == lower)
        .ok_or_else(|| TarotError::UnknownSpread {
            name: name.to_string(),
            available: SPREADS
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

impl SpreadLayout {
    /// Number of cards this spread needs.
    pub fn card_count(&self) -> usize {
        self.positions.len()
    }

    /// Lay `cards` into this spread and build a reading stamped with the current time.
    pub fn create_reading(
        &self,
        cards: Vec<DrawnCard>,
        focus_area: FocusArea,
        question: Option<String>,
    ) -> TarotResult<Reading> {
        self.create_reading_at(cards, focus_area, question, Utc::now())
    }

    /// Like [`create_reading`](Self::create_reading) with an explicit timestamp.
    pub fn create_reading_at(
        &self,
        mut cards: Vec<DrawnCard>,
        focus_area: FocusArea,
        question: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> TarotResult<Reading> {
        if cards.len() != self.positions.len() {
            return Err(TarotError::CardCountMismatch {
                spread: self.name.to_string(),
                expected: self.positions.len(),
                actual: cards.len(),
            });
        }

        for (card, position) in cards.iter_mut().zip(self.positions) {
            card.position_meaning = (*position).to_string();
        }

        let question = question.filter(|q| !q.trim().is_empty());
        let baseline = self.baseline_text(&cards, focus_area, question.as_deref());

        Ok(Reading::new(
            self.name.to_string(),
            focus_area,
            question,
            cards,
            baseline,
            timestamp,
        ))
    }

    /// Build the non-generated interpretation from catalog text.
    ///
    /// Pure: identical inputs always give identical output.
    pub fn baseline_text(
        &self,
        cards: &[DrawnCard],
        focus_area: FocusArea,
        question: Option<&str>,
    ) -> String {
        let mut parts = vec![format!("# {}", self.display_name)];

        if let Some(q) = question {
            parts.push(format!("\n**Question**: {q}"));
        }
        parts.push(format!("**Focus**: {}", focus_area.label()));
        parts.push(String::new());

        for card in cards {
            parts.push(format!(
                "## {}: {} ({})\n{}",
                card.position_meaning,
                card.card.name,
                card.orientation(),
                card.effective_meaning()
            ));
        }

        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::card::tests::sample_card;
    use crate::catalog::Catalog;
    use crate::deck::Deck;

    fn drawn(names: &[&str]) -> Vec<DrawnCard> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| DrawnCard::new(sample_card(&format!("c{i}"), n), i % 2 == 1, i))
            .collect()
    }

    #[test]
    fn registry_lookup() {
        assert_eq!(get_spread("three").unwrap().card_count(), 3);
        assert_eq!(get_spread("Celtic").unwrap().card_count(), 10);
        assert_eq!(get_spread("single").unwrap().positions, &["Present"]);
        let err = get_spread("pyramid").unwrap_err();
        assert!(err.to_string().contains("single, three, celtic"));
    }

    #[test]
    fn every_spread_has_positions() {
        for spread in all_spreads() {
            assert!(spread.card_count() > 0, "{}", spread.name);
        }
    }

    #[test]
    fn positions_bound_in_draw_order() {
        let reading = THREE_CARD
            .create_reading(drawn(&["A", "B", "C"]), FocusArea::General, None)
            .unwrap();
        let bound: Vec<(&str, &str)> = reading
            .cards()
            .iter()
            .map(|c| (c.card.name.as_str(), c.position_meaning.as_str()))
            .collect();
        assert_eq!(bound, vec![("A", "Past"), ("B", "Present"), ("C", "Future")]);
        assert!(reading.interpretation().is_none());
        assert_eq!(reading.spread_type(), "three");
    }

    #[test]
    fn count_mismatch_names_expected() {
        let err = CELTIC_CROSS
            .create_reading(drawn(&["A", "B", "C"]), FocusArea::Career, None)
            .unwrap_err();
        assert!(matches!(
            err,
            TarotError::CardCountMismatch {
                expected: 10,
                actual: 3,
                ..
            }
        ));
        assert!(err.to_string().contains("requires 10 cards"));
    }

    #[test]
    fn baseline_exact_format() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let reading = THREE_CARD
            .create_reading_at(
                drawn(&["A", "B", "C"]),
                FocusArea::PersonalGrowth,
                Some("Should I freelance?".to_string()),
                ts,
            )
            .unwrap();
        let expected = "# Three Card Spread\n\
                        \n\
                        **Question**: Should I freelance?\n\
                        **Focus**: Personal Growth\n\
                        \n\
                        ## Past: A (Upright)\n\
                        A upright\n\
                        ## Present: B (Reversed)\n\
                        B reversed\n\
                        ## Future: C (Upright)\n\
                        C upright";
        assert_eq!(reading.baseline_interpretation(), expected);
        assert_eq!(reading.timestamp(), ts);
    }

    #[test]
    fn baseline_without_question() {
        let reading = SINGLE_CARD
            .create_reading(drawn(&["A"]), FocusArea::Career, None)
            .unwrap();
        assert_eq!(
            reading.baseline_interpretation(),
            "# Single Card\n**Focus**: Career\n\n## Present: A (Upright)\nA upright"
        );
        assert!(!reading.baseline_interpretation().contains("Question"));
    }

    #[test]
    fn blank_question_is_dropped() {
        let reading = SINGLE_CARD
            .create_reading(drawn(&["A"]), FocusArea::Career, Some("   ".to_string()))
            .unwrap();
        assert!(reading.question().is_none());
    }

    #[test]
    fn baseline_is_pure() {
        let cards = drawn(&["A", "B", "C"]);
        let r1 = THREE_CARD
            .create_reading(cards.clone(), FocusArea::Spiritual, Some("Why?".into()))
            .unwrap();
        let r2 = THREE_CARD
            .create_reading(cards, FocusArea::Spiritual, Some("Why?".into()))
            .unwrap();
        assert_eq!(r1.baseline_interpretation(), r2.baseline_interpretation());
    }

    #[test]
    fn baseline_mentions_every_card_from_real_deck() {
        let mut deck = Deck::with_seed(Catalog::bundled().unwrap(), 8);
        deck.shuffle(None);
        let cards = deck.draw(CELTIC_CROSS.card_count()).unwrap();
        let reading = CELTIC_CROSS
            .create_reading(cards, FocusArea::Relationships, None)
            .unwrap();
        let text = reading.baseline_interpretation();
        assert!(!text.is_empty());
        for card in reading.cards() {
            assert!(text.contains(&card.card.name));
            assert!(text.contains(&card.position_meaning));
            assert!(text.contains(card.effective_meaning()));
        }
    }
}
