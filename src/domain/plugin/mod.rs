//! Plugin domain module
//!
//! A plugin is a named, versioned transform step. Plugins declaring the
//! `PreProcessor` capability rewrite prompts before dispatch; plugins declaring
//! `PostProcessor` rewrite replies after it.

mod entity;
mod error;

pub use entity::{Plugin, PluginCapability, PluginMetadata};
pub use error::PluginError;
