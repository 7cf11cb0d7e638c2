//! CLI frontend for tarot readings.

mod commands;
mod display;
mod prompt;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tarot_core::Config;

#[derive(Parser)]
#[command(
    name = "tarot",
    about = "Tarot readings in the terminal, with optional AI interpretation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file to use instead of the default search
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perform a reading (prompts for anything not given)
    Read {
        /// Spread: single, three, celtic
        #[arg(short, long)]
        spread: Option<String>,

        /// Focus: career, relationships, personal_growth, spiritual, general
        #[arg(short, long)]
        focus: Option<String>,

        /// Question to ask the cards
        #[arg(short, long)]
        question: Option<String>,

        /// Skip AI interpretation and show the baseline only
        #[arg(long)]
        no_ai: bool,

        /// Interpretation provider (claude, openai, openrouter, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,

        /// Include card imagery descriptions
        #[arg(long)]
        show_imagery: bool,

        /// Also show the baseline interpretation after the AI one
        #[arg(long)]
        show_baseline: bool,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Interpretation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Look up a card by name
    Lookup {
        /// Card name or part of it (e.g. "magician", "ace of pents")
        name: String,

        /// Include the imagery description
        #[arg(long)]
        show_imagery: bool,
    },

    /// List available spreads
    ListSpreads,

    /// Show the active configuration
    ConfigInfo,

    /// Show, export, or prune reading history
    History {
        #[command(subcommand)]
        action: Option<commands::history::HistoryAction>,

        /// Number of recent readings to show
        #[arg(short = 'n', long = "last", default_value = "10")]
        last: usize,

        /// Print readings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the version
    Version,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config, String> {
    Config::load(path).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let terminal = std::io::stdout().is_terminal();
    if !terminal {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Read {
            spread,
            focus,
            question,
            no_ai,
            provider,
            json,
            show_imagery,
            show_baseline,
            seed,
            timeout,
        } => load_config(config_path).and_then(|config| {
            commands::read::run(
                &config,
                commands::read::ReadArgs {
                    spread,
                    focus,
                    question,
                    no_ai,
                    provider,
                    json,
                    show_imagery,
                    show_baseline,
                    seed,
                    timeout,
                },
                terminal,
            )
        }),
        Commands::Lookup { name, show_imagery } => load_config(config_path)
            .and_then(|config| commands::lookup::run(&config, &name, show_imagery)),
        Commands::ListSpreads => commands::spreads::run(terminal),
        Commands::ConfigInfo => {
            load_config(config_path).and_then(|config| commands::config_info::run(&config))
        }
        Commands::History { action, last, json } => load_config(config_path)
            .and_then(|config| commands::history::run(&config, action, last, json, terminal)),
        Commands::Version => {
            println!("TarotCLI version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
