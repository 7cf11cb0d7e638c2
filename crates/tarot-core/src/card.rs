//! Card records and drawn-card state.

use serde::{Deserialize, Serialize};

/// Which arcana a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    /// One of the 22 trump cards.
    Major,
    /// One of the 56 suit cards.
    Minor,
}

impl std::fmt::Display for Arcana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "Major Arcana"),
            Self::Minor => write!(f, "Minor Arcana"),
        }
    }
}

/// The four minor arcana suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Fire; enterprise and energy.
    Wands,
    /// Water; emotion and relationships.
    Cups,
    /// Air; intellect and conflict.
    Swords,
    /// Earth; work and material matters.
    Pentacles,
}

impl Suit {
    /// All suits in catalog order.
    pub fn all() -> &'static [Self] {
        &[Self::Wands, Self::Cups, Self::Swords, Self::Pentacles]
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wands => write!(f, "Wands"),
            Self::Cups => write!(f, "Cups"),
            Self::Swords => write!(f, "Swords"),
            Self::Pentacles => write!(f, "Pentacles"),
        }
    }
}

/// A single catalog entry. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique key, e.g. `ar01` for The Magician.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Major or minor arcana.
    #[serde(rename = "type")]
    pub arcana: Arcana,
    /// Suit, present only for minor arcana.
    pub suit: Option<Suit>,
    /// Display value ("0", "ace", "queen", ...).
    pub value: String,
    /// Numeric sort key.
    pub value_int: u32,
    /// Meaning when drawn upright.
    pub upright_meaning: String,
    /// Meaning when drawn reversed.
    pub reversed_meaning: String,
    /// Imagery description.
    pub description: String,
}

/// Upright or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Drawn right way up.
    Upright,
    /// Drawn upside down.
    Reversed,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upright => write!(f, "Upright"),
            Self::Reversed => write!(f, "Reversed"),
        }
    }
}

/// A card as placed into a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    /// The catalog card.
    pub card: Card,
    /// Whether the card came up reversed.
    pub reversed: bool,
    /// 0-indexed order within the draw that produced it.
    pub position: usize,
    /// Spread position label; empty until a spread lays the card out.
    #[serde(default)]
    pub position_meaning: String,
}

impl DrawnCard {
    /// Create a drawn card with no position label yet.
    pub fn new(card: Card, reversed: bool, position: usize) -> Self {
        Self {
            card,
            reversed,
            position,
            position_meaning: String::new(),
        }
    }

    /// The card's orientation.
    pub fn orientation(&self) -> Orientation {
        if self.reversed {
            Orientation::Reversed
        } else {
            Orientation::Upright
        }
    }

    /// The meaning that applies in this orientation.
    pub fn effective_meaning(&self) -> &str {
        if self.reversed {
            &self.card.reversed_meaning
        } else {
            &self.card.upright_meaning
        }
    }
}
