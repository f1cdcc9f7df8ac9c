use clap::Parser;
use vibe_coder::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Command::Ask(args) => cli::ask::run(config, args).await,
        Command::Providers => cli::providers::run(config).await,
        Command::Parse(args) => cli::parse::run(args).await,
    }
}
