//! Application services

mod orchestrator;

pub use orchestrator::{Orchestrator, RequestDefaults};
