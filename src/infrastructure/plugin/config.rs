//! Plugin configuration
//!
//! Which built-in plugins are registered at startup. Read from the
//! `[plugins]` table of the application config.

use serde::{Deserialize, Serialize};

/// Toggles for the built-in plugins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Upper-case every prompt before dispatch (default: false)
    #[serde(default)]
    pub uppercase: bool,

    /// Annotate code blocks in replies (default: false)
    #[serde(default)]
    pub code_formatter: bool,
}

impl PluginSettings {
    /// Names of enabled plugins, in registration order
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut enabled = Vec::new();
        if self.uppercase {
            enabled.push("uppercase");
        }
        if self.code_formatter {
            enabled.push("code_formatter");
        }
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_enable_nothing() {
        let settings = PluginSettings::default();
        assert!(settings.enabled().is_empty());
    }

    #[test]
    fn test_deserialize_partial_table() {
        let settings: PluginSettings =
            serde_json::from_value(serde_json::json!({"code_formatter": true})).unwrap();

        assert!(!settings.uppercase);
        assert_eq!(settings.enabled(), vec!["code_formatter"]);
    }
}
