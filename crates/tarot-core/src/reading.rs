//! Readings and focus areas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::DrawnCard;
use crate::error::{TarotError, TarotResult};
use crate::spread::get_spread;

/// The life area a reading is meant to speak to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    /// Work, vocation, professional decisions.
    Career,
    /// Partnerships, friendships, social ties.
    Relationships,
    /// Self-development and inner work.
    PersonalGrowth,
    /// Spiritual practice and higher purpose.
    Spiritual,
    /// Broad life guidance.
    General,
}

impl FocusArea {
    /// All focus areas in menu order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Career,
            Self::Relationships,
            Self::PersonalGrowth,
            Self::Spiritual,
            Self::General,
        ]
    }

    /// The snake_case key used in JSON and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Relationships => "relationships",
            Self::PersonalGrowth => "personal_growth",
            Self::Spiritual => "spiritual",
            Self::General => "general",
        }
    }

    /// Human-readable title, e.g. "Personal Growth".
    pub fn label(self) -> &'static str {
        match self {
            Self::Career => "Career",
            Self::Relationships => "Relationships",
            Self::PersonalGrowth => "Personal Growth",
            Self::Spiritual => "Spiritual",
            Self::General => "General",
        }
    }

    /// Parse a focus area from user input.
    ///
    /// Accepts the snake_case key, spaces, or hyphens, in any case.
    pub fn parse(s: &str) -> TarotResult<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::all()
            .iter()
            .copied()
            .find(|f| f.key() == normalized)
            .ok_or_else(|| TarotError::UnknownFocus(s.to_string()))
    }
}

impl std::fmt::Display for FocusArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for FocusArea {
    type Err = TarotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The result of laying drawn cards into a spread.
///
/// Created by [`SpreadLayout::create_reading`](crate::spread::SpreadLayout::create_reading).
/// The baseline interpretation is always present; the generated
/// interpretation may be attached once afterwards. Deserializing checks the
/// same invariants, so a stored record that breaks them fails to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReading")]
pub struct Reading {
    spread_type: String,
    focus_area: FocusArea,
    question: Option<String>,
    cards: Vec<DrawnCard>,
    interpretation: Option<String>,
    baseline_interpretation: String,
    timestamp: DateTime<Utc>,
}

/// A stored reading before its invariants are checked.
#[derive(Deserialize)]
struct RawReading {
    spread_type: String,
    focus_area: FocusArea,
    question: Option<String>,
    cards: Vec<DrawnCard>,
    interpretation: Option<String>,
    baseline_interpretation: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<RawReading> for Reading {
    type Error = TarotError;

    fn try_from(raw: RawReading) -> TarotResult<Self> {
        if raw.baseline_interpretation.trim().is_empty() {
            return Err(TarotError::InvalidReading(
                "baseline interpretation is empty".into(),
            ));
        }
        if raw
            .interpretation
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            return Err(TarotError::InvalidReading("interpretation is empty".into()));
        }
        let layout = get_spread(&raw.spread_type)?;
        if raw.cards.len() != layout.card_count() {
            return Err(TarotError::CardCountMismatch {
                spread: layout.name.to_string(),
                expected: layout.card_count(),
                actual: raw.cards.len(),
            });
        }

        Ok(Self {
            spread_type: raw.spread_type,
            focus_area: raw.focus_area,
            question: raw.question,
            cards: raw.cards,
            interpretation: raw.interpretation,
            baseline_interpretation: raw.baseline_interpretation,
            timestamp: raw.timestamp,
        })
    }
}

impl Reading {
    pub(crate) fn new(
        spread_type: String,
        focus_area: FocusArea,
        question: Option<String>,
        cards: Vec<DrawnCard>,
        baseline_interpretation: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            spread_type,
            focus_area,
            question,
            cards,
            interpretation: None,
            baseline_interpretation,
            timestamp,
        }
    }

    /// Registry key of the spread used.
    pub fn spread_type(&self) -> &str {
        &self.spread_type
    }

    /// The reading's focus area.
    pub fn focus_area(&self) -> FocusArea {
        self.focus_area
    }

    /// The querent's question, if one was asked.
    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// Cards in draw order, which is also position order.
    pub fn cards(&self) -> &[DrawnCard] {
        &self.cards
    }

    /// The generated interpretation, if one has been attached.
    pub fn interpretation(&self) -> Option<&str> {
        self.interpretation.as_deref()
    }

    /// Deterministic interpretation built from catalog text.
    pub fn baseline_interpretation(&self) -> &str {
        &self.baseline_interpretation
    }

    /// When the reading was created (UTC).
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The timestamp as an ISO-8601 string.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339()
    }

    /// Attach a generated interpretation. Fails if one is already set.
    pub fn set_interpretation(&mut self, text: impl Into<String>) -> TarotResult<()> {
        if self.interpretation.is_some() {
            return Err(TarotError::InterpretationAlreadySet);
        }
        self.interpretation = Some(text.into());
        Ok(())
    }

    /// The text to show: the generated interpretation, else the baseline.
    pub fn display_text(&self) -> &str {
        self.interpretation
            .as_deref()
            .unwrap_or(&self.baseline_interpretation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::tests::sample_card;

    fn reading() -> Reading {
        Reading::new(
            "single".to_string(),
            FocusArea::General,
            None,
            vec![DrawnCard::new(sample_card("ar01", "The Magician"), false, 0)],
            "# Single Card".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn focus_parse_variants() {
        assert_eq!(FocusArea::parse("career").unwrap(), FocusArea::Career);
        assert_eq!(
            FocusArea::parse("Personal Growth").unwrap(),
            FocusArea::PersonalGrowth
        );
        assert_eq!(
            FocusArea::parse("personal-growth").unwrap(),
            FocusArea::PersonalGrowth
        );
        assert_eq!(FocusArea::parse("GENERAL").unwrap(), FocusArea::General);
        assert!(matches!(
            FocusArea::parse("invalid_focus"),
            Err(TarotError::UnknownFocus(_))
        ));
    }

    #[test]
    fn focus_serializes_snake_case() {
        let json = serde_json::to_string(&FocusArea::PersonalGrowth).unwrap();
        assert_eq!(json, "\"personal_growth\"");
        assert_eq!(FocusArea::PersonalGrowth.label(), "Personal Growth");
    }

    #[test]
    fn interpretation_set_once() {
        let mut r = reading();
        assert_eq!(r.display_text(), "# Single Card");
        r.set_interpretation("The cards speak.").unwrap();
        assert_eq!(r.interpretation(), Some("The cards speak."));
        assert_eq!(r.display_text(), "The cards speak.");
        assert!(matches!(
            r.set_interpretation("again"),
            Err(TarotError::InterpretationAlreadySet)
        ));
        assert_eq!(r.baseline_interpretation(), "# Single Card");
    }

    #[test]
    fn serde_round_trip_keeps_timestamp() {
        let r = reading();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"baseline_interpretation\""));
        assert!(json.contains("\"interpretation\":null"));
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    fn stored(r: &Reading, key: &str, value: serde_json::Value) -> String {
        let mut json = serde_json::to_value(r).unwrap();
        json[key] = value;
        json.to_string()
    }

    #[test]
    fn empty_baseline_is_rejected_on_load() {
        let line = stored(&reading(), "baseline_interpretation", "".into());
        let err = serde_json::from_str::<Reading>(&line).unwrap_err();
        assert!(err.to_string().contains("baseline interpretation is empty"));
    }

    #[test]
    fn empty_interpretation_is_rejected_on_load() {
        let line = stored(&reading(), "interpretation", "  ".into());
        assert!(serde_json::from_str::<Reading>(&line).is_err());
    }

    #[test]
    fn card_count_must_match_spread_on_load() {
        let line = stored(&reading(), "spread_type", "celtic".into());
        let err = serde_json::from_str::<Reading>(&line).unwrap_err();
        assert!(err.to_string().contains("requires 10 cards, got 1"));

        let line = stored(&reading(), "spread_type", "pyramid".into());
        assert!(serde_json::from_str::<Reading>(&line).is_err());
    }
}
