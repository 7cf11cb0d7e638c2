//! Error types for the tarot core.

/// Alias for `Result<T, TarotError>`.
pub type TarotResult<T> = Result<T, TarotError>;

/// Errors that can occur while loading the catalog, drawing, or laying out a spread.
#[derive(Debug, thiserror::Error)]
pub enum TarotError {
    /// A catalog line is not valid JSON or violates the card invariants.
    #[error("invalid card data at line {line}: {message}")]
    Parse {
        /// 1-based line number in the catalog source.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The catalog does not contain exactly the expected number of cards.
    #[error("expected {expected} cards, found {found}")]
    CatalogSize {
        /// Required card count.
        expected: usize,
        /// Cards actually present.
        found: usize,
    },

    /// More cards were requested than remain in the current shuffle.
    #[error("cannot draw {requested} cards, only {available} remaining")]
    InsufficientCards {
        /// Cards requested.
        requested: usize,
        /// Cards left in the deck.
        available: usize,
    },

    /// The number of drawn cards does not match the spread's positions.
    #[error("spread '{spread}' requires {expected} cards, got {actual}")]
    CardCountMismatch {
        /// Spread registry key.
        spread: String,
        /// Positions in the spread.
        expected: usize,
        /// Cards supplied.
        actual: usize,
    },

    /// No spread is registered under this name.
    #[error("unknown spread '{name}'. Available: {available}")]
    UnknownSpread {
        /// The requested name.
        name: String,
        /// Comma-separated list of registered spreads.
        available: String,
    },

    /// The focus area string could not be parsed.
    #[error("unknown focus area '{0}'. Available: career, relationships, personal_growth, spiritual, general")]
    UnknownFocus(String),

    /// A reading's interpretation can only be set once.
    #[error("reading already has an interpretation")]
    InterpretationAlreadySet,

    /// A stored reading violates the reading invariants.
    #[error("invalid reading: {0}")]
    InvalidReading(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure.
    #[error("{context}: {source}")]
    Io {
        /// What was being accessed.
        context: String,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl TarotError {
    /// Wrap an I/O error with a short description of what was being accessed.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_cards_reports_remaining() {
        let err = TarotError::InsufficientCards {
            requested: 10,
            available: 8,
        };
        assert_eq!(err.to_string(), "cannot draw 10 cards, only 8 remaining");
    }

    #[test]
    fn mismatch_names_expected_count() {
        let err = TarotError::CardCountMismatch {
            spread: "celtic".to_string(),
            expected: 10,
            actual: 3,
        };
        assert!(err.to_string().contains("requires 10 cards"));
    }
}
