use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend family a provider talks to
///
/// Parsing never fails: tags that are not recognized are kept verbatim in
/// `Unknown` so registration can degrade to a mock instead of rejecting the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderKind {
    Mock,
    Ollama,
    OpenAi,
    Anthropic,
    Unknown(String),
}

impl ProviderKind {
    /// Label used as the default display name
    pub fn label(&self) -> &str {
        match self {
            ProviderKind::Mock => "Mock",
            ProviderKind::Ollama => "Ollama",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Unknown(raw) => raw,
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "http://localhost:11434",
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::Mock | ProviderKind::Unknown(_) => "mock://local",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "llama3",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-sonnet-latest",
            ProviderKind::Mock | ProviderKind::Unknown(_) => "mock-model-v1",
        }
    }

    /// Whether requests cannot be sent without a credential
    pub fn requires_credential(&self) -> bool {
        matches!(self, ProviderKind::OpenAi | ProviderKind::Anthropic)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ProviderKind::Unknown(_))
    }
}

impl From<&str> for ProviderKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => ProviderKind::Mock,
            "ollama" => ProviderKind::Ollama,
            "openai" | "open_ai" => ProviderKind::OpenAi,
            "anthropic" => ProviderKind::Anthropic,
            _ => ProviderKind::Unknown(value.to_string()),
        }
    }
}

impl From<String> for ProviderKind {
    fn from(value: String) -> Self {
        ProviderKind::from(value.as_str())
    }
}

impl From<ProviderKind> for String {
    fn from(kind: ProviderKind) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Settings for one backend; immutable once a provider is built from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub credential: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    pub fn new(kind: impl Into<ProviderKind>) -> Self {
        Self {
            kind: kind.into(),
            display_name: None,
            credential: String::new(),
            endpoint: None,
            model: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.kind.label(),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self.endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint,
            _ => self.kind.default_endpoint(),
        }
    }

    pub fn model(&self) -> &str {
        match self.model.as_deref() {
            Some(model) if !model.trim().is_empty() => model,
            _ => self.kind.default_model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!(ProviderKind::from("Ollama"), ProviderKind::Ollama);
        assert_eq!(ProviderKind::from("OPENAI"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::from("anthropic"), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::from("Mock"), ProviderKind::Mock);
    }

    #[test]
    fn test_unknown_kind_keeps_raw_tag() {
        let kind = ProviderKind::from("Gemini");
        assert_eq!(kind, ProviderKind::Unknown("Gemini".to_string()));
        assert_eq!(kind.label(), "Gemini");
        assert!(!kind.is_recognized());
    }

    #[test]
    fn test_config_defaults() {
        let config = ProviderConfig::new(ProviderKind::Ollama);

        assert_eq!(config.name(), "Ollama");
        assert_eq!(config.endpoint(), "http://localhost:11434");
        assert_eq!(config.model(), "llama3");
    }

    #[test]
    fn test_config_overrides() {
        let config = ProviderConfig::new("openai")
            .with_display_name("Work GPT")
            .with_credential("sk-test")
            .with_endpoint("http://localhost:8080")
            .with_model("gpt-4o");

        assert_eq!(config.name(), "Work GPT");
        assert_eq!(config.endpoint(), "http://localhost:8080");
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.credential, "sk-test");
    }

    #[test]
    fn test_blank_display_name_falls_back_to_kind() {
        let config = ProviderConfig::new(ProviderKind::Anthropic).with_display_name("  ");
        assert_eq!(config.name(), "Anthropic");
    }

    #[test]
    fn test_config_deserialization() {
        let json = serde_json::json!({
            "kind": "Ollama",
            "model": "codellama"
        });

        let config: ProviderConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.kind, ProviderKind::Ollama);
        assert_eq!(config.model(), "codellama");
        assert!(config.credential.is_empty());
        assert!(config.display_name.is_none());
    }
}
