//! Reading and card output: colored tables on a terminal, markdown otherwise.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table, presets};
use tarot_core::{Card, Reading, get_spread};

/// What to include beyond the cards and interpretation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    pub show_baseline: bool,
    pub show_imagery: bool,
}

fn title(reading: &Reading) -> String {
    let spread = get_spread(reading.spread_type())
        .map(|s| s.display_name.to_string())
        .unwrap_or_else(|_| reading.spread_type().to_string());
    format!("{spread} - {}", reading.focus_area())
}

pub fn print_reading(reading: &Reading, opts: DisplayOptions, terminal: bool) {
    if terminal {
        print_reading_rich(reading, opts);
    } else {
        print!("{}", render_plain(reading, opts));
    }
}

/// Markdown rendering for pipes and files.
pub fn render_plain(reading: &Reading, opts: DisplayOptions) -> String {
    let mut out = format!("\n# {}\n\n", title(reading));

    if let Some(q) = reading.question() {
        out.push_str(&format!("**Question:** {q}\n\n"));
    }

    out.push_str("## Cards Drawn\n\n");
    for card in reading.cards() {
        out.push_str(&format!(
            "- **{}:** {} ({})\n",
            card.position_meaning,
            card.card.name,
            card.orientation()
        ));
    }

    if opts.show_imagery {
        out.push_str("\n## Imagery (Waite 1911)\n\n");
        for card in reading.cards() {
            out.push_str(&format!("### {}\n\n{}\n\n", card.card.name, card.card.description));
        }
    }

    out.push_str("\n## Interpretation\n\n");
    out.push_str(reading.display_text());
    out.push('\n');

    if opts.show_baseline && reading.interpretation().is_some() {
        out.push_str("\n## Baseline Interpretation\n\n");
        out.push_str(reading.baseline_interpretation());
        out.push('\n');
    }
    out
}

fn print_reading_rich(reading: &Reading, opts: DisplayOptions) {
    println!();
    println!("  {}", title(reading).bold().cyan());
    if let Some(q) = reading.question() {
        println!();
        println!("  {} {q}", "Question:".bold());
    }
    println!();

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for card in reading.cards() {
        let orientation = if card.reversed {
            "↓ Reversed".red().to_string()
        } else {
            "↑ Upright".green().to_string()
        };
        table.add_row(vec![
            format!("{}:", card.position_meaning).dimmed().to_string(),
            card.card.name.clone(),
            orientation,
        ]);
    }
    println!("{table}");

    if opts.show_imagery {
        println!();
        println!("  {}", "Imagery (Waite 1911)".bold().yellow());
        for card in reading.cards() {
            println!();
            println!("  {}", card.card.name.bold());
            println!("  {}", card.card.description);
        }
    }

    println!();
    let heading = if reading.interpretation().is_some() {
        "Interpretation"
    } else {
        "Interpretation (baseline)"
    };
    println!("  {}", heading.bold().magenta());
    println!();
    print_markdown(reading.display_text());

    if opts.show_baseline && reading.interpretation().is_some() {
        println!();
        println!("  {}", "Baseline Interpretation".bold().magenta());
        println!();
        print_markdown(reading.baseline_interpretation());
    }
}

/// Print markdown text, highlighting headings.
fn print_markdown(text: &str) {
    for line in text.lines() {
        if let Some(h) = line.strip_prefix("## ") {
            println!("  {}", h.bold().cyan());
        } else if let Some(h) = line.strip_prefix("# ") {
            println!("  {}", h.bold().magenta());
        } else {
            println!("  {line}");
        }
    }
}

/// Full card details for `lookup`.
pub fn render_card(card: &Card, show_imagery: bool) -> String {
    let kind = match card.suit {
        Some(suit) => format!("Minor Arcana, {suit}"),
        None => "Major Arcana".to_string(),
    };
    let mut out = format!("\n  {} [{}]\n\n", card.name.bold(), kind.dimmed());
    out.push_str(&format!("  {}\n", "↑ UPRIGHT".green().bold()));
    out.push_str(&format!("  {}\n\n", card.upright_meaning));
    out.push_str(&format!("  {}\n", "↓ REVERSED".red().bold()));
    out.push_str(&format!("  {}\n", card.reversed_meaning));
    if show_imagery {
        out.push_str(&format!("\n  {}\n", "IMAGERY".yellow().bold()));
        out.push_str(&format!("  {}\n", card.description));
    }
    out
}
