//! Core types for Tarot: the card catalog, deck, lookup, spreads, and readings.
//!
//! Everything here is synchronous and free of I/O except catalog and config
//! file loading. A typical reading flows catalog → [`Deck`] → [`SpreadLayout`]
//! → [`Reading`]; interpretation and persistence live in sibling crates.

/// Card, suit, arcana, and drawn-card types.
pub mod card;
/// Loading and validating the 78-card dataset.
pub mod catalog;
/// Layered configuration (defaults, user file, environment).
pub mod config;
/// Shuffling and drawing.
pub mod deck;
/// Error types used throughout the crate.
pub mod error;
/// Free-text card lookup.
pub mod lookup;
/// Readings and focus areas.
pub mod reading;
/// Spread registry and baseline interpretation.
pub mod spread;

/// Re-export card types.
pub use card::{Arcana, Card, DrawnCard, Orientation, Suit};
/// Re-export the catalog.
pub use catalog::Catalog;
/// Re-export configuration types.
pub use config::{Config, ModelConfig};
/// Re-export the deck.
pub use deck::Deck;
/// Re-export error types.
pub use error::{TarotError, TarotResult};
/// Re-export lookup results.
pub use lookup::CardMatch;
/// Re-export reading types.
pub use reading::{FocusArea, Reading};
/// Re-export spread types.
pub use spread::{SpreadLayout, all_spreads, get_spread};
