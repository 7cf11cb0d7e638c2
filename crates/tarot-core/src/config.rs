//! Layered configuration.
//!
//! Three layers, lowest first: the bundled defaults, an optional user file,
//! and `TAROTCLI_*` environment variables. Files are JSON objects and are
//! deep-merged, so a user file may override a single nested key. The
//! environment is captured when the config is built; lookups never read the
//! process environment directly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{TarotError, TarotResult};

/// Prefix of environment variables that override config keys.
pub const ENV_PREFIX: &str = "TAROTCLI_";

/// File name of the per-project config.
pub const LOCAL_CONFIG_FILE: &str = "tarot.json";

const DEFAULT_CONFIG: &str = include_str!("../data/default_config.json");
const DEFAULT_PROVIDER: &str = "claude";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Model parameters for one interpretation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Response token limit.
    pub max_tokens: u64,
    /// Base URL override for the provider API.
    pub api_base: Option<String>,
}

/// Merged configuration with an environment snapshot.
#[derive(Debug, Clone)]
pub struct Config {
    merged: Value,
    env: BTreeMap<String, String>,
}

impl Config {
    /// Load defaults, the first user file found, and the process environment.
    ///
    /// `explicit` replaces the user file search. A user file that cannot be
    /// read or parsed is an error; a missing one is not.
    pub fn load(explicit: Option<&Path>) -> TarotResult<Self> {
        let user = match explicit {
            Some(path) => read_config_file(path)?,
            None => match user_config_candidates().into_iter().find(|p| p.is_file()) {
                Some(path) => read_config_file(&path)?,
                None => Value::Object(Map::new()),
            },
        };
        Ok(Self::from_layers(user, std::env::vars()))
    }

    /// Build from an explicit user layer and environment.
    pub fn from_layers(user: Value, env: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut merged = bundled_defaults();
        deep_merge(&mut merged, user);
        Self {
            merged,
            env: env.into_iter().collect(),
        }
    }

    /// Bundled defaults only, with an empty environment.
    pub fn defaults() -> Self {
        Self::from_layers(Value::Object(Map::new()), std::iter::empty())
    }

    /// Look up a dot-separated key. Environment overrides win.
    pub fn get(&self, key_path: &str) -> Option<Value> {
        if let Some(raw) = self.env.get(&env_key(key_path)) {
            return Some(parse_env_value(raw));
        }
        key_path
            .split('.')
            .try_fold(&self.merged, |value, key| value.get(key))
            .cloned()
    }

    /// String value, or `default` when absent or not a string.
    pub fn get_str(&self, key_path: &str, default: &str) -> String {
        match self.get(key_path) {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => default.to_string(),
        }
    }

    /// Boolean value; integers 0 and 1 are accepted.
    pub fn get_bool(&self, key_path: &str) -> Option<bool> {
        match self.get(key_path)? {
            Value::Bool(b) => Some(b),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            _ => None,
        }
    }

    /// Floating-point value, or `default`.
    pub fn get_f64(&self, key_path: &str, default: f64) -> f64 {
        self.get(key_path)
            .and_then(|v| v.as_f64())
            .unwrap_or(default)
    }

    /// Unsigned integer value, or `default`.
    pub fn get_u64(&self, key_path: &str, default: u64) -> u64 {
        self.get(key_path)
            .and_then(|v| v.as_u64())
            .unwrap_or(default)
    }

    /// The provider used when none is named explicitly.
    pub fn default_provider(&self) -> String {
        self.get_str("models.default_provider", DEFAULT_PROVIDER)
    }

    /// Model parameters for `provider`, or `None` if it is not configured.
    pub fn model_config(&self, provider: &str) -> Option<ModelConfig> {
        let prefix = format!("models.providers.{provider}");
        let model = match self.get(&format!("{prefix}.model"))? {
            Value::String(s) => s,
            _ => return None,
        };
        let api_base = match self.get(&format!("{prefix}.api_base")) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        Some(ModelConfig {
            model,
            temperature: self.get_f64(&format!("{prefix}.temperature"), 0.7),
            max_tokens: self.get_u64(&format!("{prefix}.max_tokens"), 2000),
            api_base,
        })
    }

    /// API key for `provider`, taken only from the environment.
    ///
    /// Local providers and unknown names have no key.
    pub fn api_key(&self, provider: &str) -> Option<String> {
        let var = api_key_var(provider)?;
        self.env.get(var).filter(|k| !k.is_empty()).cloned()
    }

    /// Path to a custom card data file, if one is configured.
    ///
    /// `TAROTCLI_DATA_DIR` selects a directory holding `filename`; otherwise
    /// `data.path` may name a file. `None` means use the bundled catalog.
    pub fn data_path(&self, filename: &str) -> Option<PathBuf> {
        if let Some(dir) = self.env.get("TAROTCLI_DATA_DIR").filter(|d| !d.is_empty()) {
            return Some(Path::new(dir).join(filename));
        }
        match self.get("data.path") {
            Some(Value::String(p)) if !p.is_empty() => Some(PathBuf::from(p)),
            _ => None,
        }
    }

    /// Where reading history is stored.
    pub fn readings_path(&self) -> PathBuf {
        let configured = self
            .get("persistence.readings_path")
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|p| !p.is_empty());
        configured.map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tarotcli")
                .join("readings.jsonl")
        })
    }

    /// Whether completed readings are saved to history.
    pub fn persistence_enabled(&self) -> bool {
        self.get_bool("persistence.enabled").unwrap_or(false)
    }

    /// Timeout for interpretation requests.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64("ai.timeout_secs", DEFAULT_TIMEOUT_SECS))
    }
}

/// Environment variable holding the API key for `provider`.
pub fn api_key_var(provider: &str) -> Option<&'static str> {
    match provider {
        "claude" | "anthropic" => Some("ANTHROPIC_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        "openrouter" => Some("OPENROUTER_API_KEY"),
        _ => None,
    }
}

/// User config files searched in order when none is given explicitly.
pub fn user_config_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("tarotcli").join("config.json"));
    }
    paths
}

fn read_config_file(path: &Path) -> TarotResult<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| TarotError::io(format!("cannot read config {}", path.display()), e))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| TarotError::Config(format!("{}: {e}", path.display())))?;
    if !value.is_object() {
        return Err(TarotError::Config(format!(
            "{}: top level must be an object",
            path.display()
        )));
    }
    log::debug!("loaded user config from {}", path.display());
    Ok(value)
}

fn bundled_defaults() -> Value {
    serde_json::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("bundled default config is invalid: {e}");
        Value::Object(Map::new())
    })
}

/// Recursively merge `overlay` into `base`. Objects merge key by key; any
/// other value replaces what was there.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// `models.default_provider` becomes `TAROTCLI_MODELS_DEFAULT_PROVIDER`.
pub fn env_key(key_path: &str) -> String {
    format!("{ENV_PREFIX}{}", key_path.to_uppercase().replace('.', "_"))
}

/// Interpret an environment string as a typed JSON value.
///
/// Integers and floats (anything containing `.`) parse as numbers; the
/// words true/yes/on and false/no/off parse as booleans; everything else is
/// a string.
pub fn parse_env_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(f) = trimmed.parse::<f64>().ok().filter(|_| trimmed.contains('.')) {
        return Value::from(f);
    }
    match trimmed.to_lowercase().as_str() {
        "true" | "yes" | "on" => Value::Bool(true),
        "false" | "no" | "off" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}
