use colored::Colorize;
use tarot_core::{CardMatch, Config};

use crate::display::render_card;

pub fn run(config: &Config, name: &str, show_imagery: bool) -> Result<(), String> {
    let query = name.trim();
    if query.is_empty() {
        return Err("card name must not be empty".into());
    }
    let catalog = super::load_catalog(config)?;

    match catalog.lookup(query) {
        CardMatch::One(card) => print!("{}", render_card(card, show_imagery)),
        CardMatch::Ambiguous(cards) => {
            println!("  Multiple cards match '{query}':");
            for card in cards {
                println!("    - {}", card.name);
            }
            println!();
            println!("  {}", "Try a more specific name.".dimmed());
        }
        CardMatch::NotFound => {
            println!("  No card found matching '{query}'.");
            let suggestions = catalog.suggest(query, 3);
            if !suggestions.is_empty() {
                println!("  Did you mean: {}?", suggestions.join(", "));
            }
        }
    }
    Ok(())
}
