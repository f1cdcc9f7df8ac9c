use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::llm::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::domain::ProviderConfig;
use crate::infrastructure::plugin::PluginSettings;
use crate::infrastructure::services::RequestDefaults;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub request: RequestConfig,
    /// Providers in registration order
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Index into `providers` to select after registration
    #[serde(default)]
    pub active_provider: Option<usize>,
    #[serde(default)]
    pub plugins: PluginSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: None,
        }
    }
}

impl RequestConfig {
    pub fn defaults(&self) -> RequestDefaults {
        RequestDefaults {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

impl AppConfig {
    /// Load `config/default`, `config/local`, then `path` if given, then
    /// `VIBE__*` environment variables; later sources win
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("VIBE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Providers with `${VAR}` credentials replaced by the variable's value
    pub fn resolved_providers(&self) -> Vec<ProviderConfig> {
        self.resolved_providers_with(|name| std::env::var(name).ok())
    }

    fn resolved_providers_with<F>(&self, lookup: F) -> Vec<ProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.providers
            .iter()
            .map(|provider| {
                let mut provider = provider.clone();
                provider.credential = expand_credential(&provider.credential, &lookup);
                provider
            })
            .collect()
    }
}

/// Expand a credential written as `${VAR}`; unset variables expand to an empty string
fn expand_credential<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(name) if !name.is_empty() => lookup(name).unwrap_or_default(),
        _ => raw.to_string(),
    }
}
