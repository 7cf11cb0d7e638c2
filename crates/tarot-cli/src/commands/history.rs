use std::io;
use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tarot_core::{Config, Reading};
use tarot_journal::{ReadingLog, export_markdown, export_text};

use crate::prompt::Prompter;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Export all saved readings
    Export {
        /// Output format: markdown, text
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete the most recent readings
    DeleteLast {
        /// How many readings to delete
        count: usize,
    },

    /// Delete all saved readings
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn run(
    config: &Config,
    action: Option<HistoryAction>,
    last: usize,
    json: bool,
    terminal: bool,
) -> Result<(), String> {
    let history = ReadingLog::new(config.readings_path());

    match action {
        None => show(&history, last, json, terminal),
        Some(HistoryAction::Export { format, output }) => export(&history, &format, output),
        Some(HistoryAction::DeleteLast { count }) => {
            let removed = history.delete_last(count).map_err(|e| e.to_string())?;
            println!("  Deleted {removed} reading{}.", plural(removed));
            Ok(())
        }
        Some(HistoryAction::Clear { yes }) => {
            if !yes {
                let stdin = io::stdin();
                let mut prompter = Prompter::new(stdin.lock(), io::stderr());
                if !prompter.confirm("Delete all saved readings?", false)? {
                    println!("  Cancelled.");
                    return Ok(());
                }
            }
            history.clear_all().map_err(|e| e.to_string())?;
            println!("  Reading history cleared.");
            Ok(())
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn card_summary(reading: &Reading) -> String {
    reading
        .cards()
        .iter()
        .map(|c| {
            if c.reversed {
                format!("{} (R)", c.card.name)
            } else {
                c.card.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn show(history: &ReadingLog, last: usize, json: bool, terminal: bool) -> Result<(), String> {
    let readings = history.load_last(last).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&readings)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if readings.is_empty() {
        println!("  No readings in history.");
        return Ok(());
    }

    if !terminal {
        for reading in &readings {
            println!(
                "- {} | {} | {} | {}",
                reading.timestamp().format("%Y-%m-%d %H:%M"),
                reading.spread_type(),
                reading.focus_area(),
                card_summary(reading)
            );
            if let Some(q) = reading.question() {
                println!("  Question: {q}");
            }
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When", "Spread", "Focus", "Question", "Cards"]);
    for reading in &readings {
        table.add_row(vec![
            reading.timestamp().format("%Y-%m-%d %H:%M").to_string(),
            reading.spread_type().to_string(),
            reading.focus_area().to_string(),
            reading.question().unwrap_or("—").to_string(),
            card_summary(reading),
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  {}",
        format!("{} reading{}", readings.len(), plural(readings.len())).dimmed()
    );
    Ok(())
}

fn export(history: &ReadingLog, format: &str, output: Option<PathBuf>) -> Result<(), String> {
    let readings = history.load_all().map_err(|e| e.to_string())?;
    let content = match format {
        "markdown" | "md" => export_markdown(&readings),
        "text" | "txt" => export_text(&readings),
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: markdown, text"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(&path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported {} reading{} to {}", readings.len(), plural(readings.len()), path.display());
    } else {
        print!("{content}");
    }
    Ok(())
}
