use std::io::{self, BufRead, Write};
use std::time::Duration;

use colored::Colorize;
use tarot_core::{Config, Deck, FocusArea, all_spreads, get_spread};
use tarot_journal::ReadingLog;
use tarot_oracle::{Interpretation, apply_interpretation, interpret, provider_from_config};

use crate::display::{DisplayOptions, print_reading};
use crate::prompt::Prompter;

pub struct ReadArgs {
    pub spread: Option<String>,
    pub focus: Option<String>,
    pub question: Option<String>,
    pub no_ai: bool,
    pub provider: Option<String>,
    pub json: bool,
    pub show_imagery: bool,
    pub show_baseline: bool,
    pub seed: Option<u64>,
    pub timeout: Option<u64>,
}

/// Everything needed to draw and present a reading.
#[derive(Debug, PartialEq)]
struct Choices {
    spread: String,
    focus: FocusArea,
    question: Option<String>,
    use_ai: bool,
    show_imagery: bool,
}

/// Fill in whatever the flags left out by asking on `prompter`.
///
/// Prompting happens only when the spread or focus is missing.
fn gather<R: BufRead, W: Write>(
    config: &Config,
    args: &ReadArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<Choices, String> {
    let configured_imagery = config.get_bool("display.show_imagery");

    if let (Some(spread), Some(focus)) = (&args.spread, &args.focus) {
        return Ok(Choices {
            spread: spread.clone(),
            focus: FocusArea::parse(focus).map_err(|e| e.to_string())?,
            question: args.question.clone(),
            use_ai: !args.no_ai,
            show_imagery: args.show_imagery || configured_imagery.unwrap_or(false),
        });
    }

    let spread = match &args.spread {
        Some(s) => s.clone(),
        None => {
            let options: Vec<String> = all_spreads()
                .iter()
                .map(|s| format!("{} - {}", s.display_name, s.description))
                .collect();
            let idx = prompter.choose("Select spread type:", &options)?;
            all_spreads()[idx].name.to_string()
        }
    };

    let focus = match &args.focus {
        Some(f) => FocusArea::parse(f).map_err(|e| e.to_string())?,
        None => {
            let options: Vec<String> = FocusArea::all()
                .iter()
                .map(|f| f.label().to_string())
                .collect();
            let idx = prompter.choose("What is the focus of this reading?", &options)?;
            FocusArea::all()[idx]
        }
    };

    let question = match &args.question {
        Some(q) => Some(q.clone()),
        None => prompter.text("Specific question (press Enter to skip): ")?,
    };

    let use_ai = if args.no_ai {
        false
    } else {
        let provider = args
            .provider
            .clone()
            .unwrap_or_else(|| config.default_provider());
        prompter.confirm(&format!("Use AI interpretation? (provider: {provider})"), true)?
    };

    let show_imagery = match (args.show_imagery, configured_imagery) {
        (true, _) => true,
        (false, Some(configured)) => configured,
        (false, None) => prompter.confirm("Include Waite's imagery descriptions?", false)?,
    };

    Ok(Choices {
        spread,
        focus,
        question,
        use_ai,
        show_imagery,
    })
}

pub fn run(config: &Config, args: ReadArgs, terminal: bool) -> Result<(), String> {
    let choices = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stderr());
        gather(config, &args, &mut prompter)?
    };

    let layout = get_spread(&choices.spread).map_err(|e| e.to_string())?;
    let catalog = super::load_catalog(config)?;

    let mut deck = Deck::new(catalog);
    deck.shuffle(args.seed);
    let cards = deck
        .draw(layout.card_count())
        .map_err(|e| e.to_string())?;
    let mut reading = layout
        .create_reading(cards, choices.focus, choices.question)
        .map_err(|e| e.to_string())?;

    if choices.use_ai {
        let timeout = args
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.timeout());
        if !args.json {
            eprintln!("  {}", "Consulting the cards...".dimmed());
        }
        let outcome = match provider_from_config(config, args.provider.as_deref()) {
            Ok(provider) => interpret(&reading, provider.as_ref(), timeout),
            Err(e) => Interpretation::fallback(&reading, &e),
        };
        apply_interpretation(&mut reading, &outcome).map_err(|e| e.to_string())?;
    }

    if config.persistence_enabled() {
        let history = ReadingLog::new(config.readings_path());
        if let Err(e) = history.save(&reading) {
            log::warn!("could not save reading: {e}");
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&reading)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let show_baseline = args.show_baseline
        || config
            .get_bool("display.show_baseline")
            .unwrap_or(false);
    print_reading(
        &reading,
        DisplayOptions {
            show_baseline,
            show_imagery: choices.show_imagery,
        },
        terminal,
    );
    Ok(())
}
