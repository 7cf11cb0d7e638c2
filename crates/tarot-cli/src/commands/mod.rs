pub mod config_info;
pub mod history;
pub mod lookup;
pub mod read;
pub mod spreads;

use tarot_core::{Catalog, Config};

/// File name looked up under a custom data directory.
pub const CARD_DATA_FILE: &str = "tarot_cards_RW.jsonl";

/// Load the configured card data, or the bundled catalog.
fn load_catalog(config: &Config) -> Result<Catalog, String> {
    let catalog = match config.data_path(CARD_DATA_FILE) {
        Some(path) => Catalog::load_file(&path),
        None => Catalog::bundled(),
    };
    catalog.map_err(|e| format!("failed to load card data: {e}"))
}
