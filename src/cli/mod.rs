//! CLI module for vibe-coder
//!
//! Provides subcommands for working with the prompt pipeline:
//! - `ask`: send a prompt and print the parsed reply
//! - `providers`: list configured providers
//! - `parse`: parse markdown from a file or stdin

pub mod ask;
pub mod output;
pub mod parse;
pub mod providers;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// vibe-coder - Send prompts to AI providers and get structured replies
#[derive(Parser)]
#[command(name = "vibe-coder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file loaded on top of config/default.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a prompt through the plugin chain and the active provider
    Ask(ask::AskArgs),

    /// List configured providers
    Providers,

    /// Parse a markdown reply into content blocks
    Parse(parse::ParseArgs),
}

/// Load configuration; an explicit file must exist and parse
fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    match path {
        Some(path) => Ok(AppConfig::load(Some(path))?),
        None => Ok(AppConfig::load(None).unwrap_or_default()),
    }
}
