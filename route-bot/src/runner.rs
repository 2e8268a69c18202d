//! Bot runner: RouteBot (config + handler chain) and run_bot, the `route-bot run` entry point.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot, Message as CoreMessage, ToCoreMessage};
use crate::telegram::{run_repl, run_webhook, TelegramMessageWrapper};

/// Config and handler chain, without a running update loop.
pub struct RouteBot {
    pub config: BotConfig,
    pub handler_chain: HandlerChain,
}

impl RouteBot {
    /// Builds components from config; replies go through Telegram.
    pub fn new(config: BotConfig) -> Result<Self> {
        Self::with_bot(config, None)
    }

    /// Like [`RouteBot::new`], with `bot` replacing the Telegram reply bot when given.
    pub fn with_bot(config: BotConfig, bot: Option<Arc<dyn Bot>>) -> Result<Self> {
        let components = build_bot_components(&config, bot)?;
        let handler_chain = build_handler_chain(&config, &components);
        Ok(Self {
            config,
            handler_chain,
        })
    }

    /// Handles one Telegram message (callable from tests).
    pub async fn handle_message(&self, msg: &teloxide::types::Message) -> Result<()> {
        let core_msg = TelegramMessageWrapper(msg).to_core();
        self.handle_core_message(&core_msg).await
    }

    /// Drives the handler chain with a core Message. Chain errors are logged, not returned.
    pub async fn handle_core_message(&self, message: &CoreMessage) -> Result<()> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Handling core message"
        );
        if let Err(e) = self.handler_chain.handle(message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
        Ok(())
    }
}

/// Main entry: validate config, init logging, build components, then serve updates by webhook
/// (WEBHOOK_URL / RENDER_EXTERNAL_URL set) or long polling.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        start = %config.directions().start,
        end = %config.directions().end,
        allowlist = config.base().allowed_user_ids.len(),
        "Initializing bot"
    );

    let components = build_bot_components(&config, None)?;
    let handler_chain = build_handler_chain(&config, &components);
    let teloxide_bot = components.teloxide_bot.clone();

    info!("Bot started successfully");

    match config.base().webhook_url()? {
        Some(url) => run_webhook(teloxide_bot, handler_chain, url, config.base().port).await,
        None => run_repl(teloxide_bot, handler_chain).await,
    }
}
