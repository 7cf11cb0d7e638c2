use colored::Colorize;
use tarot_core::Config;
use tarot_core::config::{api_key_var, user_config_candidates};

use super::CARD_DATA_FILE;

pub fn run(config: &Config) -> Result<(), String> {
    let provider = config.default_provider();
    let model = config
        .model_config(&provider)
        .map(|m| m.model)
        .unwrap_or_else(|| "(not configured)".to_string());
    let data = config
        .data_path(CARD_DATA_FILE)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(bundled)".to_string());
    let key = match api_key_var(&provider) {
        Some(var) if config.api_key(&provider).is_some() => format!("set ({var})"),
        Some(var) => format!("not set ({var})"),
        None => "not required".to_string(),
    };
    let persistence = if config.persistence_enabled() {
        "enabled".green()
    } else {
        "disabled".dimmed()
    };

    println!("  {}", "TarotCLI Configuration".bold());
    println!();
    println!("  Default Provider: {provider}");
    println!("  Model:            {model}");
    println!("  API Key:          {key}");
    println!("  Timeout:          {}s", config.timeout().as_secs());
    println!("  Data Path:        {data}");
    println!("  Readings Path:    {}", config.readings_path().display());
    println!("  Persistence:      {persistence}");
    println!();
    println!("  Config files searched:");
    for path in user_config_candidates() {
        let marker = if path.is_file() { "found" } else { "absent" };
        println!("    {} ({marker})", path.display());
    }
    Ok(())
}
