//! Parse command - parse markdown without contacting a provider

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::io::AsyncReadExt;

use crate::domain::parse_response;

/// Arguments for the parse command
#[derive(Args, Clone)]
pub struct ParseArgs {
    /// Markdown file to parse; reads stdin when omitted
    pub file: Option<PathBuf>,
}

pub async fn run(args: ParseArgs) -> anyhow::Result<()> {
    let text = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            text
        }
    };

    let parsed = parse_response(&text);
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    Ok(())
}
