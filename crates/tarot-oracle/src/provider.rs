//! HTTP interpretation providers.
//!
//! Two wire formats cover the configured providers: the Anthropic messages
//! API (`claude`) and the OpenAI-style chat completions API (`openai`,
//! `openrouter`, `ollama`). Each request is a single attempt bounded by the
//! caller's timeout.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tarot_core::{Config, ModelConfig};

use crate::error::{InterpretationError, InterpretationResult};

const ANTHROPIC_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_BASE: &str = "https://api.openai.com";
const OLLAMA_BASE: &str = "http://localhost:11434";
const MAX_ERROR_BODY: usize = 500;

/// Something that can turn a prompt into interpretation text.
pub trait InterpretationProvider {
    /// Provider name, for logs and messages.
    fn name(&self) -> &str;

    /// Send `prompt` and return the generated text.
    fn generate(&self, prompt: &str, timeout: Duration) -> InterpretationResult<String>;
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u64,
    temperature: f64,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u64,
    temperature: f64,
    stream: bool,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// The Anthropic messages API.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    model: ModelConfig,
    api_key: String,
}

impl AnthropicProvider {
    /// Create a provider for `model` authenticated with `api_key`.
    pub fn new(model: ModelConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model,
            api_key: api_key.into(),
        }
    }

    /// Full URL of the messages endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.model.api_base.as_deref().unwrap_or(ANTHROPIC_BASE);
        format!("{}/v1/messages", base.trim_end_matches('/'))
    }
}

impl InterpretationProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "claude"
    }

    fn generate(&self, prompt: &str, timeout: Duration) -> InterpretationResult<String> {
        let body = AnthropicRequest {
            model: &self.model.model,
            max_tokens: self.model.max_tokens,
            temperature: self.model.temperature,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };
        let request = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        let text = send(request, timeout)?;
        anthropic_text(&text)
    }
}

/// Any OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct ChatCompletionsProvider {
    client: Client,
    name: String,
    model: ModelConfig,
    api_key: Option<String>,
    base: String,
}

impl ChatCompletionsProvider {
    /// Create a provider named `name`.
    ///
    /// Without an `api_base` in `model`, Ollama defaults to the local server
    /// and everything else to the OpenAI API.
    pub fn new(name: impl Into<String>, model: ModelConfig, api_key: Option<String>) -> Self {
        let name = name.into();
        let base = model.api_base.clone().unwrap_or_else(|| {
            if name == "ollama" {
                OLLAMA_BASE.to_string()
            } else {
                OPENAI_BASE.to_string()
            }
        });
        Self {
            client: Client::new(),
            name,
            model,
            api_key,
            base,
        }
    }

    /// Full URL of the chat completions endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.base.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{base}/chat/completions")
        } else {
            format!("{base}/v1/chat/completions")
        }
    }
}

impl InterpretationProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, prompt: &str, timeout: Duration) -> InterpretationResult<String> {
        let body = ChatRequest {
            model: &self.model.model,
            max_tokens: self.model.max_tokens,
            temperature: self.model.temperature,
            stream: false,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };
        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let text = send(request, timeout)?;
        chat_text(&text)
    }
}

fn send(request: RequestBuilder, timeout: Duration) -> InterpretationResult<String> {
    let response = request
        .timeout(timeout)
        .send()
        .map_err(|e| InterpretationError::from_reqwest(e, timeout))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| InterpretationError::from_reqwest(e, timeout))?;
    log::debug!("provider responded with {status}");
    if !status.is_success() {
        return Err(InterpretationError::Status {
            code: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        });
    }
    Ok(body)
}

/// Concatenate the text blocks of a messages API response.
fn anthropic_text(body: &str) -> InterpretationResult<String> {
    let response: AnthropicResponse =
        serde_json::from_str(body).map_err(|e| InterpretationError::Decode(e.to_string()))?;
    let text: String = response
        .content
        .into_iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text)
        .collect();
    non_empty(text)
}

/// Take the first choice of a chat completions response.
fn chat_text(body: &str) -> InterpretationResult<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| InterpretationError::Decode(e.to_string()))?;
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();
    non_empty(text)
}

fn non_empty(text: String) -> InterpretationResult<String> {
    if text.trim().is_empty() {
        Err(InterpretationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Resolve a provider by name from `config`.
///
/// `None` selects the configured default. Keyed providers without a key in
/// the environment fail with [`InterpretationError::MissingApiKey`].
pub fn provider_from_config(
    config: &Config,
    name: Option<&str>,
) -> InterpretationResult<Box<dyn InterpretationProvider>> {
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| config.default_provider());
    let model = config
        .model_config(&name)
        .ok_or_else(|| InterpretationError::UnknownProvider(name.clone()))?;
    let api_key = config.api_key(&name);

    match name.as_str() {
        "claude" | "anthropic" => {
            let key = api_key.ok_or_else(|| InterpretationError::MissingApiKey(name.clone()))?;
            Ok(Box::new(AnthropicProvider::new(model, key)))
        }
        "ollama" => Ok(Box::new(ChatCompletionsProvider::new(name, model, None))),
        _ => {
            let key = api_key.ok_or_else(|| InterpretationError::MissingApiKey(name.clone()))?;
            Ok(Box::new(ChatCompletionsProvider::new(name, model, Some(key))))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn model(api_base: Option<&str>) -> ModelConfig {
        ModelConfig {
            model: "test-model".into(),
            temperature: 0.7,
            max_tokens: 100,
            api_base: api_base.map(String::from),
        }
    }

    fn config(env: &[(&str, &str)]) -> Config {
        Config::from_layers(
            json!({}),
            env.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn chat_endpoints() {
        let ollama = ChatCompletionsProvider::new("ollama", model(None), None);
        assert_eq!(ollama.endpoint(), "http://localhost:11434/v1/chat/completions");

        let router = ChatCompletionsProvider::new(
            "openrouter",
            model(Some("https://openrouter.ai/api/v1")),
            Some("k".into()),
        );
        assert_eq!(router.endpoint(), "https://openrouter.ai/api/v1/chat/completions");

        let openai = ChatCompletionsProvider::new("openai", model(None), Some("k".into()));
        assert_eq!(openai.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn anthropic_endpoint() {
        let p = AnthropicProvider::new(model(None), "k");
        assert_eq!(p.endpoint(), "https://api.anthropic.com/v1/messages");
        let p = AnthropicProvider::new(model(Some("http://proxy:8080/")), "k");
        assert_eq!(p.endpoint(), "http://proxy:8080/v1/messages");
    }

    #[test]
    fn parse_anthropic_body() {
        let body = r#"{"content":[{"type":"text","text":"The cards "},{"type":"text","text":"speak."}]}"#;
        assert_eq!(anthropic_text(body).unwrap(), "The cards speak.");
        assert!(matches!(
            anthropic_text(r#"{"content":[]}"#),
            Err(InterpretationError::EmptyResponse)
        ));
        assert!(matches!(
            anthropic_text("not json"),
            Err(InterpretationError::Decode(_))
        ));
    }

    #[test]
    fn parse_chat_body() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#;
        assert_eq!(chat_text(body).unwrap(), "Hello");
        assert!(matches!(
            chat_text(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(InterpretationError::EmptyResponse)
        ));
        assert!(matches!(
            chat_text(r#"{"choices":[]}"#),
            Err(InterpretationError::EmptyResponse)
        ));
    }

    #[test]
    fn resolve_providers() {
        let cfg = config(&[("ANTHROPIC_API_KEY", "sk-ant"), ("OPENROUTER_API_KEY", "sk-or")]);
        assert_eq!(provider_from_config(&cfg, None).unwrap().name(), "claude");
        assert_eq!(
            provider_from_config(&cfg, Some("openrouter")).unwrap().name(),
            "openrouter"
        );
        assert_eq!(
            provider_from_config(&cfg, Some("ollama")).unwrap().name(),
            "ollama"
        );
    }

    #[test]
    fn missing_key_and_unknown_provider() {
        let cfg = config(&[]);
        assert!(matches!(
            provider_from_config(&cfg, Some("claude")),
            Err(InterpretationError::MissingApiKey(p)) if p == "claude"
        ));
        assert!(matches!(
            provider_from_config(&cfg, Some("openai")),
            Err(InterpretationError::MissingApiKey(_))
        ));
        assert!(matches!(
            provider_from_config(&cfg, Some("nonexistent")),
            Err(InterpretationError::UnknownProvider(_))
        ));
    }

    #[test]
    fn unreachable_server_is_an_error() {
        let p = ChatCompletionsProvider::new("ollama", model(Some("http://127.0.0.1:9")), None);
        assert!(p.generate("hi", Duration::from_secs(2)).is_err());
    }

    #[test]
    fn silent_server_times_out() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                std::thread::sleep(Duration::from_secs(10));
                drop(stream);
            }
        });

        let p = ChatCompletionsProvider::new("ollama", model(Some(&format!("http://{addr}"))), None);
        let limit = Duration::from_secs(1);
        let started = std::time::Instant::now();
        let result = p.generate("hi", limit);
        let elapsed = started.elapsed();

        assert!(
            matches!(result, Err(InterpretationError::Timeout(d)) if d == limit),
            "{result:?}"
        );
        assert!(elapsed >= Duration::from_millis(900), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");
    }
}
