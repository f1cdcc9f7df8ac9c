//! Ask command - send one prompt through the full pipeline

use std::path::Path;

use clap::Args;
use tracing::{error, info};

use super::{load_config, output};
use crate::infrastructure::logging;

/// Arguments for the ask command
#[derive(Args, Clone)]
pub struct AskArgs {
    /// Index of the provider to use (overrides `active_provider`)
    #[arg(long)]
    pub provider: Option<usize>,

    /// Print the parsed blocks as JSON
    #[arg(long)]
    pub json: bool,

    /// Prompt text; multiple words are joined with spaces
    #[arg(required = true)]
    pub prompt: Vec<String>,
}

pub async fn run(config_path: Option<&Path>, args: AskArgs) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    logging::init_logging(&config.logging);

    let orchestrator = crate::create_orchestrator(&config).await?;

    if let Some(index) = args.provider {
        orchestrator.set_active_provider(index).await?;
    }

    let prompt = args.prompt.join(" ");
    info!(providers = orchestrator.list_providers().await.len(), "Sending prompt");

    let reply = match orchestrator.send_prompt(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Prompt failed");
            return Err(e.into());
        }
    };
    let parsed = orchestrator.parse_response(&reply);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print!("{}", output::render(&parsed));
    }

    Ok(())
}
