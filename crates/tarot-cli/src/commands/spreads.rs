use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tarot_core::all_spreads;

pub fn run(terminal: bool) -> Result<(), String> {
    if !terminal {
        println!("# Available Spreads\n");
        for spread in all_spreads() {
            println!(
                "- **{}** ({}, {} cards): {}",
                spread.display_name,
                spread.name,
                spread.card_count(),
                spread.description
            );
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Spread", "Key", "Cards", "Positions", "Description"]);
    for spread in all_spreads() {
        table.add_row(vec![
            spread.display_name.to_string(),
            spread.name.to_string(),
            spread.card_count().to_string(),
            spread.positions.join(", "),
            spread.description.to_string(),
        ]);
    }

    println!("  {}", "Available Spreads".bold());
    println!("{table}");
    Ok(())
}
