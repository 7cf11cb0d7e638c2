//! Free-text card lookup with suit aliases and fuzzy suggestions.

use strsim::jaro_winkler;

use crate::card::Card;

/// Minimum similarity for a name to be offered as a suggestion (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.75;

/// Shorthand words and the suit name they stand for.
const ALIASES: &[(&str, &str)] = &[
    ("pents", "pentacles"),
    ("coins", "pentacles"),
    ("disks", "pentacles"),
    ("discs", "pentacles"),
    ("rods", "wands"),
    ("staves", "wands"),
    ("batons", "wands"),
    ("blades", "swords"),
    ("chalices", "cups"),
    ("cup", "cups"),
];

/// The outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMatch<'a> {
    /// Nothing matched.
    NotFound,
    /// A single card was identified.
    One(&'a Card),
    /// Several cards matched and none was an exact name match.
    Ambiguous(Vec<&'a Card>),
}

impl<'a> CardMatch<'a> {
    /// The single matched card, if any.
    pub fn card(&self) -> Option<&'a Card> {
        match self {
            Self::One(card) => Some(*card),
            _ => None,
        }
    }
}

/// Replace alias words in `query` with their suit name.
///
/// Each whitespace-separated word is checked once against the alias table;
/// replacements are not scanned again, and whitespace is kept as written.
pub fn expand_aliases(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        if word.is_empty() {
            return;
        }
        let lower = word.to_lowercase();
        match ALIASES.iter().find(|(alias, _)| *alias == lower) {
            Some((_, canonical)) => out.push_str(canonical),
            None => out.push_str(word),
        }
        word.clear();
    };

    for ch in query.chars() {
        if ch.is_whitespace() {
            flush(&mut word, &mut out);
            out.push(ch);
        } else {
            word.push(ch);
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Resolve `query` against `cards` by case-insensitive substring of the name.
///
/// An empty query matches every card and comes back as [`CardMatch::Ambiguous`].
pub fn lookup_card<'a>(cards: &'a [Card], query: &str) -> CardMatch<'a> {
    let expanded = expand_aliases(query).to_lowercase();

    let matches: Vec<&Card> = cards
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&expanded))
        .collect();

    match matches.len() {
        0 => CardMatch::NotFound,
        1 => CardMatch::One(matches[0]),
        _ => {
            let exact: Vec<&Card> = matches
                .iter()
                .copied()
                .filter(|c| c.name.to_lowercase() == expanded)
                .collect();
            if exact.len() == 1 {
                CardMatch::One(exact[0])
            } else {
                CardMatch::Ambiguous(matches)
            }
        }
    }
}

/// Suggest card names resembling `query`, best first.
pub fn suggest<'a>(cards: &'a [Card], query: &str, limit: usize) -> Vec<&'a str> {
    let query_lower = expand_aliases(query).to_lowercase();
    let mut scored: Vec<(&str, f64)> = cards
        .iter()
        .filter_map(|c| {
            let score = jaro_winkler(&query_lower, &c.name.to_lowercase());
            (score >= SUGGEST_THRESHOLD).then_some((c.name.as_str(), score))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(name, _)| name).collect()
}
