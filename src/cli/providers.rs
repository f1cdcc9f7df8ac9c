//! Providers command - list configured providers

use std::path::Path;

use super::load_config;
use crate::infrastructure::logging;

pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    logging::init_logging(&config.logging);

    let orchestrator = crate::create_orchestrator(&config).await?;
    let active = orchestrator.active_provider().await;
    let names = orchestrator.list_providers().await;

    if names.is_empty() {
        println!("No providers configured; prompts are answered by the mock provider.");
        return Ok(());
    }

    for line in format_listing(&names, active) {
        println!("{}", line);
    }

    Ok(())
}

fn format_listing(names: &[String], active: Option<usize>) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let marker = if Some(index) == active { '*' } else { ' ' };
            format!("{} {}: {}", marker, index, name)
        })
        .collect()
}
