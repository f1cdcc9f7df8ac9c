//! Plugin Infrastructure
//!
//! This module provides the infrastructure layer for the plugin system:
//! the registry that runs the pre/post chains, the built-in plugins and the
//! settings that enable them.

pub mod builtin;
pub mod config;
pub mod registry;

pub use builtin::{builtin_plugins, CodeFormatterPlugin, UppercasePlugin};
pub use config::PluginSettings;
pub use registry::PluginRegistry;
