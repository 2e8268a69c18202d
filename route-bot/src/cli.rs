//! CLI parser, config loading, and the one-shot `route` command.

use std::io::Read;

use address_parser::ParserConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directions_client::DirectionsConfig;

use crate::components::{build_address_parser, build_route_requester};
use crate::config::BotConfig;
use crate::pipeline::RoutePipeline;

#[derive(Parser)]
#[command(name = "route-bot")]
#[command(about = "Telegram route bot: addresses in, map link and distance out", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Plan one route and print the reply the bot would send. Reads stdin when TEXT is omitted.
    Route {
        text: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Handle the route command: directions and parser config from env, no Telegram token needed.
pub async fn handle_route(text: Option<String>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Read addresses from stdin")?;
            buf
        }
    };

    let directions = DirectionsConfig::from_env()
        .context("Load directions config from .env (GOOGLE_MAPS_API_KEY, ROUTE_START, ...)")?;
    directions.validate()?;
    let parser = ParserConfig::from_env()?;

    let pipeline = RoutePipeline::new(
        build_address_parser(&parser)?,
        build_route_requester(&directions)?,
    );

    println!("{}", pipeline.reply_for(&text).await);
    Ok(())
}
