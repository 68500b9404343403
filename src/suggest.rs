//! Remote suggestion source: asks a hosted language model for candidates.
//!
//! This is an optional collaborator, not part of the core. Its output is an
//! extra, unfiltered pool that the pipeline unions in before the length
//! filter. Nothing that goes wrong here may stop a run: [`gather`] logs the
//! failure and contributes nothing.
//!
//! ## Providers
//!
//! | Provider | Wire format | Default endpoint | Default model |
//! |----------|-------------|------------------|---------------|
//! | `openai` | chat completions | `https://api.openai.com` | `gpt-3.5-turbo` |
//! | `grok` | chat completions | `https://api.grok.ai` | `grok-1` |
//! | `deepseek` | chat completions | `https://api.deepseek.com` | `deepseek-r1` |
//! | `llama3` | chat completions | `https://api.llama.ai` | `llama-3` |
//! | `gemini` | generateContent | `https://generativelanguage.googleapis.com` | `gemini-pro` |
//!
//! Chat-completion providers authenticate with a bearer token; Gemini takes
//! the key as a query parameter. `base_url` replaces the endpoint root for
//! every provider, which is how self-hosted models are reached.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SuggestConfig;
use crate::filter::LengthWindow;
use crate::profile::{Field, ListField, Profile};
use crate::types::Pool;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 500;

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("no API key (set {0} or pass --api-key)")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("reading response failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response had no suggestions")]
    Empty,
}

impl From<ureq::Error> for SuggestError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => SuggestError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => SuggestError::Transport(transport.to_string()),
        }
    }
}

/// Hosted model family; decides endpoint, wire format and defaults.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "gemini")]
    Gemini,
    #[value(name = "grok")]
    Grok,
    #[value(name = "deepseek")]
    DeepSeek,
    #[value(name = "llama3")]
    Llama3,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Grok => "grok",
            Provider::DeepSeek => "deepseek",
            Provider::Llama3 => "llama3",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com",
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::Grok => "https://api.grok.ai",
            Provider::DeepSeek => "https://api.deepseek.com",
            Provider::Llama3 => "https://api.llama.ai",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Gemini => "gemini-pro",
            Provider::Grok => "grok-1",
            Provider::DeepSeek => "deepseek-r1",
            Provider::Llama3 => "llama-3",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can turn a prompt into candidate strings.
pub trait SuggestionSource {
    fn suggest(&self, prompt: &str) -> Result<Vec<String>, SuggestError>;
}

/// Assemble the request prompt from the profile and the length window.
///
/// Only present fields are listed.
pub fn build_prompt(profile: &Profile, window: LengthWindow, count: usize) -> String {
    let mut prompt = format!(
        "Generate a list of {count} creative password variations based on the following \
         information.\nOnly output the passwords, one per line, with no additional text or \
         explanation:\n\n"
    );
    for field in Field::ALL {
        if let Some(value) = profile.get(field) {
            prompt.push_str(&format!("{}: {value}\n", field.label()));
        }
    }
    for list in ListField::ALL {
        let items = profile.list(list);
        if !items.is_empty() {
            prompt.push_str(&format!("{}: {}\n", list.label(), items.join(", ")));
        }
    }
    prompt.push_str(&format!(
        "\nMinimum password length: {} characters\nMaximum password length: {} characters\n",
        window.min, window.max
    ));
    prompt.push_str(
        "\nGenerate passwords that combine this information with common patterns, special \
         characters, substitutions, and numbers. Focus on realistic combinations that people \
         might actually use.\n",
    );
    prompt
}

/// Split model output into candidates: one per line, trimmed, no blanks.
pub fn split_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Wire formats
// =============================================================================

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
    content: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

/// Pull the generated text out of a provider's JSON response body.
pub fn extract_text(provider: Provider, body: &str) -> Result<String, SuggestError> {
    let text = match provider {
        Provider::Gemini => {
            let response: GeminiResponse = serde_json::from_str(body)?;
            response
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content.parts.into_iter().next())
                .map(|p| p.text)
        }
        _ => {
            let response: ChatResponse = serde_json::from_str(body)?;
            response
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
        }
    };
    text.ok_or(SuggestError::Empty)
}

// =============================================================================
// HTTP client
// =============================================================================

/// Blocking HTTP client for one provider.
pub struct HttpSuggester {
    provider: Provider,
    api_key: String,
    base_url: String,
    model: String,
    agent: ureq::Agent,
}

impl HttpSuggester {
    pub fn new(config: &SuggestConfig, api_key: String) -> Self {
        let provider = config.provider;
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/')
            .to_string();
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            provider,
            api_key,
            base_url,
            model,
            agent,
        }
    }

    /// Full request URL, without credentials.
    pub fn endpoint(&self) -> String {
        match self.provider {
            Provider::Gemini => format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ),
            _ => format!("{}/v1/chat/completions", self.base_url),
        }
    }

    /// JSON request body for `prompt`.
    pub fn request_body(&self, prompt: &str) -> serde_json::Value {
        match self.provider {
            Provider::Gemini => serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "temperature": TEMPERATURE,
                    "maxOutputTokens": MAX_TOKENS,
                },
            }),
            _ => serde_json::json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
                "temperature": TEMPERATURE,
                "max_tokens": MAX_TOKENS,
            }),
        }
    }
}

impl SuggestionSource for HttpSuggester {
    fn suggest(&self, prompt: &str) -> Result<Vec<String>, SuggestError> {
        let body = self.request_body(prompt);
        let request = self
            .agent
            .post(&self.endpoint())
            .set("Content-Type", "application/json");
        let request = match self.provider {
            Provider::Gemini => request.query("key", &self.api_key),
            _ => request.set("Authorization", &format!("Bearer {}", self.api_key)),
        };
        debug!(provider = %self.provider, model = %self.model, "Requesting suggestions");
        let response = request.send_json(body)?;
        let text = extract_text(self.provider, &response.into_string()?)?;
        Ok(split_suggestions(&text))
    }
}

/// API key from the command line, else from the named environment variable.
pub fn resolve_api_key(explicit: Option<&str>, env_var: &str) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|key| !key.trim().is_empty())
}

/// Ask `source` for suggestions. Failures are logged and yield an empty pool.
pub fn gather(source: &dyn SuggestionSource, prompt: &str) -> Pool {
    match source.suggest(prompt) {
        Ok(suggestions) => {
            debug!(count = suggestions.len(), "Received suggestions");
            suggestions.into_iter().collect()
        }
        Err(err) => {
            warn!("Skipping remote suggestions: {err}");
            Pool::new()
        }
    }
}

/// Build the configured source and gather from it.
///
/// A missing API key is reported the same way as any other failure.
pub fn gather_configured(
    config: &SuggestConfig,
    api_key: Option<String>,
    profile: &Profile,
    window: LengthWindow,
) -> Pool {
    let Some(api_key) = api_key else {
        warn!(
            "Skipping remote suggestions: {}",
            SuggestError::MissingApiKey(config.api_key_env.clone())
        );
        return Pool::new();
    };
    let source = HttpSuggester::new(config, api_key);
    let prompt = build_prompt(profile, window, config.count);
    gather(&source, &prompt)
}
