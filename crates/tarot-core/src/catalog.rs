//! The fixed 78-card catalog.
//!
//! Cards are read from line-delimited JSON, one record per line. Every line
//! is validated independently, the total must be exactly 78, and the result
//! is sorted by `value_int` so that the base ordering is deterministic.

use std::collections::HashSet;
use std::path::Path;

use crate::card::{Arcana, Card};
use crate::error::{TarotError, TarotResult};
use crate::lookup::{self, CardMatch};

/// Number of cards in a complete deck.
pub const CATALOG_SIZE: usize = 78;

/// Rider-Waite dataset compiled into the binary.
const BUNDLED_DATA: &str = include_str!("../data/tarot_cards_RW.jsonl");

/// Parse and validate a line-delimited JSON catalog.
///
/// Blank lines are ignored. Line numbers in errors are 1-based.
pub fn load(source: &str) -> TarotResult<Vec<Card>> {
    let mut entries = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let card: Card = serde_json::from_str(trimmed).map_err(|e| TarotError::Parse {
            line: idx + 1,
            message: e.to_string(),
        })?;
        entries.push((idx + 1, card));
    }
    checked(entries)
}

/// Validate cards tagged with their 1-based source line, reject duplicate
/// ids, enforce the catalog size, and sort by `value_int`.
fn checked(entries: Vec<(usize, Card)>) -> TarotResult<Vec<Card>> {
    {
        let mut seen = HashSet::new();
        for (line, card) in &entries {
            let fail = |message| TarotError::Parse {
                line: *line,
                message,
            };
            validate_card(card).map_err(fail)?;
            if !seen.insert(card.id.as_str()) {
                return Err(fail(format!("duplicate card id \"{}\"", card.id)));
            }
        }
    }

    if entries.len() != CATALOG_SIZE {
        return Err(TarotError::CatalogSize {
            expected: CATALOG_SIZE,
            found: entries.len(),
        });
    }

    let mut cards: Vec<Card> = entries.into_iter().map(|(_, card)| card).collect();
    cards.sort_by_key(|c| c.value_int);
    Ok(cards)
}

fn validate_card(card: &Card) -> Result<(), String> {
    if card.id.trim().is_empty() {
        return Err("card id is empty".into());
    }
    if card.name.trim().is_empty() {
        return Err(format!("card \"{}\" has no name", card.id));
    }
    match (card.arcana, card.suit) {
        (Arcana::Major, Some(suit)) => Err(format!(
            "major arcana card \"{}\" must not have a suit (found {suit})",
            card.id
        )),
        (Arcana::Minor, None) => Err(format!(
            "minor arcana card \"{}\" is missing its suit",
            card.id
        )),
        _ => Ok(()),
    }
}

/// A validated, sorted set of 78 cards.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// Parse a catalog from line-delimited JSON text.
    pub fn parse(source: &str) -> TarotResult<Self> {
        Ok(Self {
            cards: load(source)?,
        })
    }

    /// Read and parse a catalog file.
    pub fn load_file(path: &Path) -> TarotResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            TarotError::io(format!("card data not found at {}", path.display()), e)
        })?;
        log::debug!("loading card catalog from {}", path.display());
        Self::parse(&source)
    }

    /// The Rider-Waite catalog shipped with the crate.
    pub fn bundled() -> TarotResult<Self> {
        Self::parse(BUNDLED_DATA)
    }

    /// Build a catalog from cards already in memory, applying the same checks as [`load`].
    pub fn from_cards(cards: Vec<Card>) -> TarotResult<Self> {
        let entries = cards.into_iter().enumerate().map(|(i, c)| (i + 1, c)).collect();
        Ok(Self {
            cards: checked(entries)?,
        })
    }

    /// All cards in base (`value_int`) order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards (always 78).
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find a card by id.
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Resolve a free-text query to catalog entries.
    pub fn lookup(&self, query: &str) -> CardMatch<'_> {
        lookup::lookup_card(&self.cards, query)
    }

    /// Card names resembling `query`, best first.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        lookup::suggest(&self.cards, query, limit)
    }
}
