//! Binary for the route bot: `run` starts the Telegram bot, `route` plans one route from the shell.

use anyhow::Result;
use clap::Parser;
use route_bot::{cli::handle_route, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Route { text } => handle_route(text).await,
    }
}
