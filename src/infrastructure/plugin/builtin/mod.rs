//! Built-in Plugins
//!
//! Plugins that ship with the application and are switched on by configuration.

mod code_formatter;
mod uppercase;

pub use code_formatter::CodeFormatterPlugin;
pub use uppercase::UppercasePlugin;

use crate::domain::plugin::Plugin;
use crate::infrastructure::plugin::config::PluginSettings;
use std::sync::Arc;
use tracing::debug;

/// Instantiate the built-in plugins enabled in `settings`, in registration order
pub fn builtin_plugins(settings: &PluginSettings) -> Vec<Arc<dyn Plugin>> {
    settings
        .enabled()
        .into_iter()
        .filter_map(|name| {
            let plugin: Arc<dyn Plugin> = match name {
                "uppercase" => Arc::new(UppercasePlugin::new()),
                "code_formatter" => Arc::new(CodeFormatterPlugin::new()),
                _ => return None,
            };
            debug!(plugin = name, "Built-in plugin enabled");
            Some(plugin)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_follow_settings() {
        let settings = PluginSettings {
            uppercase: true,
            code_formatter: true,
        };

        let names: Vec<String> = builtin_plugins(&settings)
            .iter()
            .map(|plugin| plugin.metadata().name.clone())
            .collect();

        assert_eq!(names, vec!["Uppercase Converter", "Code Formatter"]);
        assert!(builtin_plugins(&PluginSettings::default()).is_empty());
    }
}
