//! Update runners: long-polling REPL or webhook. Each message is converted to core::Message and
//! handled by the HandlerChain in its own task.

use std::net::SocketAddr;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;
use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;

/// Converts the message and runs the chain in a spawned task so the dispatcher returns immediately.
fn dispatch(chain: &HandlerChain, msg: &teloxide::types::Message) {
    let core_msg = TelegramMessageWrapper(msg).to_core();
    if msg.text().is_some() {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received message"
        );
    } else {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received non-text message"
        );
    }

    let chain = chain.clone();
    tokio::spawn(async move {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            "step: processing message (handler chain started)"
        );
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}

async fn log_identity(bot: &teloxide::Bot) {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "step: connected to Telegram"
        ),
        Err(e) => error!(error = %e, "getMe failed"),
    }
}

/// Starts long polling with the given teloxide Bot and HandlerChain.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    log_identity(&bot).await;
    info!("step: long polling started");

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        async move {
            dispatch(&chain, &msg);
            respond(())
        }
    })
    .await;

    Ok(())
}

/// Registers `url` as the Telegram webhook and serves updates on `0.0.0.0:port`.
#[instrument(skip(bot, handler_chain, url), fields(url = %url))]
pub async fn run_webhook(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    url: reqwest::Url,
    port: u16,
) -> Result<()> {
    log_identity(&bot).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = webhooks::axum(bot.clone(), webhooks::Options::new(addr, url))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to set up webhook: {}", e))?;
    info!(port = port, "step: webhook server started");

    teloxide::repl_with_listener(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = handler_chain.clone();
            async move {
                dispatch(&chain, &msg);
                respond(())
            }
        },
        listener,
    )
    .await;

    Ok(())
}
