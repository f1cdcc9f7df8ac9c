//! Infrastructure layer - Provider backends, plugin runtime and services

pub mod llm;
pub mod logging;
pub mod plugin;
pub mod services;
