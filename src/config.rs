//! Generation configuration.
//!
//! Two layers live here:
//!
//! - [`AppConfig`]: what `wordforge.toml` and the CLI flags describe. Raw
//!   numbers, exactly as the operator typed them.
//! - [`GenerationConfig`]: the validated parameters the pipeline consumes.
//!   Built by [`GenerationSettings::validate`], immutable afterwards.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [generation]
//! target_count = 100        # How many candidates to emit
//! min_length = 8            # Shortest candidate kept
//! max_length = 16           # Longest candidate kept
//! apply_prefixes = false    # Also prepend "The", "My", ... to the pool
//! # seed = 42               # Fixed RNG seed for reproducible output
//!
//! [suggest]
//! enabled = false
//! provider = "openai"       # openai | gemini | grok | deepseek | llama3
//! api_key_env = "WORDFORGE_API_KEY"
//! count = 20
//! timeout_secs = 30
//! # model = "gpt-3.5-turbo"
//! # base_url = "http://localhost:8000"
//! ```
//!
//! ## Normalization, not rejection
//!
//! Bad generation numbers never fail a run. They are corrected and each
//! correction is returned as a [`ConfigAdjustment`] for the caller to show:
//!
//! - `target_count < 1` → 100
//! - `min_length < 1` → 8
//! - `max_length < min_length` → `max(16, 2 × min_length)`
//!
//! Non-numeric settings (network timeout, suggestion count) are validated
//! strictly; those belong to the I/O layer and surface as [`ConfigError`].

use crate::filter::LengthWindow;
use crate::suggest::Provider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_TARGET_COUNT: usize = 100;
pub const DEFAULT_MIN_LENGTH: usize = 8;
pub const DEFAULT_MAX_LENGTH: usize = 16;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `wordforge.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Candidate count, length window, prefixing, seed.
    pub generation: GenerationSettings,
    /// Optional remote suggestion source.
    pub suggest: SuggestConfig,
}

impl AppConfig {
    /// Validate the settings that cannot be normalized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggest.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "suggest.timeout_secs must be at least 1".into(),
            ));
        }
        if self.suggest.count == 0 {
            return Err(ConfigError::Validation(
                "suggest.count must be at least 1".into(),
            ));
        }
        if self.suggest.api_key_env.trim().is_empty() {
            return Err(ConfigError::Validation(
                "suggest.api_key_env must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Raw generation numbers, as read from config or operator input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSettings {
    pub target_count: i64,
    pub min_length: i64,
    pub max_length: i64,
    pub apply_prefixes: bool,
    /// Fixed RNG seed. When absent each run draws fresh entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT as i64,
            min_length: DEFAULT_MIN_LENGTH as i64,
            max_length: DEFAULT_MAX_LENGTH as i64,
            apply_prefixes: false,
            seed: None,
        }
    }
}

impl GenerationSettings {
    /// Build settings from free-text answers (count, min length, max length).
    ///
    /// Empty answers take the default. If any answer is not an integer, all
    /// three numbers fall back to their defaults and the bad input is
    /// reported.
    pub fn from_text(count: &str, min: &str, max: &str) -> (Self, Option<ConfigAdjustment>) {
        let defaults = Self::default();
        let parsed = (
            parse_or(count, defaults.target_count),
            parse_or(min, defaults.min_length),
            parse_or(max, defaults.max_length),
        );
        match parsed {
            (Ok(target_count), Ok(min_length), Ok(max_length)) => (
                Self {
                    target_count,
                    min_length,
                    max_length,
                    ..defaults
                },
                None,
            ),
            (count, min, max) => {
                let input = [count, min, max]
                    .into_iter()
                    .find_map(Result::err)
                    .unwrap_or_default();
                (defaults, Some(ConfigAdjustment::InvalidNumber { input }))
            }
        }
    }

    /// Normalize into a [`GenerationConfig`], listing every correction made.
    pub fn validate(&self) -> (GenerationConfig, Vec<ConfigAdjustment>) {
        let mut adjustments = Vec::new();

        let target_count = if self.target_count < 1 {
            adjustments.push(ConfigAdjustment::TargetCount {
                given: self.target_count,
                used: DEFAULT_TARGET_COUNT,
            });
            DEFAULT_TARGET_COUNT
        } else {
            self.target_count as usize
        };

        let min_length = if self.min_length < 1 {
            adjustments.push(ConfigAdjustment::MinLength {
                given: self.min_length,
                used: DEFAULT_MIN_LENGTH,
            });
            DEFAULT_MIN_LENGTH
        } else {
            self.min_length as usize
        };

        let max_length = if self.max_length < min_length as i64 {
            let used = DEFAULT_MAX_LENGTH.max(min_length * 2);
            adjustments.push(ConfigAdjustment::MaxLength {
                given: self.max_length,
                used,
            });
            used
        } else {
            self.max_length as usize
        };

        let config = GenerationConfig {
            target_count,
            min_length,
            max_length,
            apply_prefixes: self.apply_prefixes,
        };
        (config, adjustments)
    }
}

fn parse_or(input: &str, default: i64) -> Result<i64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse::<i64>().map_err(|_| trimmed.to_string())
}

/// A correction applied while normalizing generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAdjustment {
    InvalidNumber { input: String },
    TargetCount { given: i64, used: usize },
    MinLength { given: i64, used: usize },
    MaxLength { given: i64, used: usize },
}

impl fmt::Display for ConfigAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigAdjustment::InvalidNumber { input } => {
                write!(f, "invalid numeric input {input:?}, using default values")
            }
            ConfigAdjustment::TargetCount { given, used } => {
                write!(f, "count must be at least 1 (got {given}), using {used}")
            }
            ConfigAdjustment::MinLength { given, used } => {
                write!(f, "minimum length must be at least 1 (got {given}), using {used}")
            }
            ConfigAdjustment::MaxLength { given, used } => write!(
                f,
                "maximum length must be >= minimum length (got {given}), using {used}"
            ),
        }
    }
}

/// Validated generation parameters. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    target_count: usize,
    min_length: usize,
    max_length: usize,
    apply_prefixes: bool,
}

impl GenerationConfig {
    /// Normalize raw numbers into a config, discarding the adjustment list.
    pub fn new(target_count: i64, min_length: i64, max_length: i64) -> Self {
        GenerationSettings {
            target_count,
            min_length,
            max_length,
            ..GenerationSettings::default()
        }
        .validate()
        .0
    }

    /// Same config with prefix application switched on or off.
    pub fn with_prefixes(mut self, apply: bool) -> Self {
        self.apply_prefixes = apply;
        self
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn apply_prefixes(&self) -> bool {
        self.apply_prefixes
    }

    pub fn window(&self) -> LengthWindow {
        LengthWindow::new(self.min_length, self.max_length)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationSettings::default().validate().0
    }
}

/// Remote suggestion source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestConfig {
    /// Ask the remote model for extra candidates.
    pub enabled: bool,
    pub provider: Provider,
    /// Model name; the provider's default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Endpoint root override for self-hosted or proxied models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// How many candidates to ask for.
    pub count: usize,
    pub timeout_secs: u64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: Provider::OpenAi,
            model: None,
            base_url: None,
            api_key_env: "WORDFORGE_API_KEY".to_string(),
            count: 20,
            timeout_secs: 30,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when absent.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `wordforge.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# wordforge configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Candidate generation
# ---------------------------------------------------------------------------
[generation]
# Number of candidates to write. Values below 1 fall back to 100.
target_count = 100

# Inclusive length window, counted in characters.
# A minimum below 1 falls back to 8. A maximum below the minimum is
# raised to max(16, 2 * minimum).
min_length = 8
max_length = 16

# Also prepend "The", "My", "A", "Secret", "Super" to every pool entry.
apply_prefixes = false

# Fixed seed for reproducible output. Omit for fresh randomness each run.
# seed = 42

# ---------------------------------------------------------------------------
# Remote suggestions
# ---------------------------------------------------------------------------
[suggest]
# Ask a hosted model for extra candidates. Failures are logged, never fatal.
enabled = false

# openai | gemini | grok | deepseek | llama3
provider = "openai"

# Environment variable holding the API key (or pass --api-key).
api_key_env = "WORDFORGE_API_KEY"

# How many candidates to ask for.
count = 20

# Request timeout in seconds.
timeout_secs = 30

# Model name override (defaults depend on the provider).
# model = "gpt-3.5-turbo"

# Endpoint root for self-hosted or proxied models.
# base_url = "http://localhost:8000"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_generation_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.target_count(), 100);
        assert_eq!(config.min_length(), 8);
        assert_eq!(config.max_length(), 16);
        assert!(!config.apply_prefixes());
    }

    #[test]
    fn valid_settings_pass_through() {
        let (config, adjustments) = GenerationSettings {
            target_count: 50,
            min_length: 6,
            max_length: 12,
            ..Default::default()
        }
        .validate();
        assert!(adjustments.is_empty());
        assert_eq!(config.target_count(), 50);
        assert_eq!(config.window(), LengthWindow::new(6, 12));
    }

    #[test]
    fn inverted_window_raises_max() {
        let config = GenerationConfig::new(100, 20, 10);
        assert_eq!(config.min_length(), 20);
        assert_eq!(config.max_length(), 40);
    }

    #[test]
    fn inverted_small_window_raises_max_to_sixteen() {
        let config = GenerationConfig::new(100, 5, 3);
        assert_eq!(config.max_length(), 16);
    }

    #[test]
    fn equal_bounds_are_kept() {
        let config = GenerationConfig::new(10, 9, 9);
        assert_eq!(config.window(), LengthWindow::new(9, 9));
    }

    #[test]
    fn zero_count_resets_to_default() {
        let (config, adjustments) = GenerationSettings {
            target_count: 0,
            ..Default::default()
        }
        .validate();
        assert_eq!(config.target_count(), 100);
        assert_eq!(
            adjustments,
            vec![ConfigAdjustment::TargetCount { given: 0, used: 100 }]
        );
    }

    #[test]
    fn negative_min_resets_before_max_check() {
        let (config, adjustments) = GenerationSettings {
            min_length: -3,
            max_length: 4,
            ..Default::default()
        }
        .validate();
        assert_eq!(config.min_length(), 8);
        assert_eq!(config.max_length(), 16);
        assert_eq!(adjustments.len(), 2);
    }

    #[test]
    fn from_text_empty_uses_defaults() {
        let (settings, adjustment) = GenerationSettings::from_text("", " ", "");
        assert_eq!(settings, GenerationSettings::default());
        assert!(adjustment.is_none());
    }

    #[test]
    fn from_text_parses_numbers() {
        let (settings, adjustment) = GenerationSettings::from_text("50", "6", "12");
        assert_eq!(settings.target_count, 50);
        assert_eq!(settings.min_length, 6);
        assert_eq!(settings.max_length, 12);
        assert!(adjustment.is_none());
    }

    #[test]
    fn from_text_garbage_resets_everything() {
        let (settings, adjustment) = GenerationSettings::from_text("50", "six", "12");
        assert_eq!(settings, GenerationSettings::default());
        assert_eq!(
            adjustment,
            Some(ConfigAdjustment::InvalidNumber {
                input: "six".to_string()
            })
        );
    }

    #[test]
    fn from_text_negative_is_parsed_then_normalized() {
        let (settings, adjustment) = GenerationSettings::from_text("-5", "", "");
        assert!(adjustment.is_none());
        let (config, adjustments) = settings.validate();
        assert_eq!(config.target_count(), 100);
        assert_eq!(adjustments.len(), 1);
    }

    #[test]
    fn adjustment_messages() {
        let msg = ConfigAdjustment::MaxLength { given: 10, used: 40 }.to_string();
        assert!(msg.contains("40"));
    }

    #[test]
    fn merge_toml_overrides_nested_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[generation]\nmin_length = 10\n").unwrap();
        let config: AppConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(config.generation.min_length, 10);
        assert_eq!(config.generation.max_length, 16);
        assert_eq!(config.suggest.count, 20);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("wordforge.toml")).unwrap();
        assert_eq!(config.generation, GenerationSettings::default());
        assert!(!config.suggest.enabled);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wordforge.toml");
        fs::write(
            &path,
            r#"
[generation]
target_count = 500
seed = 7

[suggest]
enabled = true
provider = "gemini"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.generation.target_count, 500);
        assert_eq!(config.generation.seed, Some(7));
        assert!(config.suggest.enabled);
        assert_eq!(config.suggest.provider, Provider::Gemini);
        assert_eq!(config.suggest.timeout_secs, 30);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wordforge.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wordforge.toml");
        fs::write(&path, "[generation]\ncount = 5\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wordforge.toml");
        fs::write(&path, "[suggest]\nprovider = \"clippy\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn zero_timeout_is_validation_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wordforge.toml");
        fs::write(&path, "[suggest]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_is_valid_and_matches_defaults() {
        let config: AppConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.generation, GenerationSettings::default());
        assert_eq!(config.suggest, SuggestConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[generation]"));
        assert!(content.contains("[suggest]"));
    }
}
