//! Turns a text message into a route reply and sends it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::pipeline::RoutePipeline;
use crate::reply::help_reply;

/// Last handler in the chain: answers `/start` and `/help` with usage, everything else is planned
/// as a route. Failures become replies too, so every text message gets an answer.
pub struct RouteHandler {
    bot: Arc<dyn Bot>,
    pipeline: RoutePipeline,
}

impl RouteHandler {
    pub fn new(bot: Arc<dyn Bot>, pipeline: RoutePipeline) -> Self {
        Self { bot, pipeline }
    }

    async fn reply_text(&self, message: &Message) -> String {
        match message.command() {
            Some(command) => {
                info!(command = %command, "step: command received");
                help_reply(self.pipeline.start(), self.pipeline.end())
            }
            None => self.pipeline.reply_for(&message.content).await,
        }
    }
}

#[async_trait]
impl Handler for RouteHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim().is_empty() && message.message_type != "text" {
            return Ok(HandlerResponse::Continue);
        }

        let text = self.reply_text(message).await;
        self.bot.reply_to(message, &text).await?;
        info!(reply_len = text.len(), "step: reply sent");
        Ok(HandlerResponse::Reply(text))
    }
}
