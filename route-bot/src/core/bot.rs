//! Bot abstraction for sending replies. Production uses teloxide; tests substitute a recording impl.

use async_trait::async_trait;

use super::error::{BotError, Result};
use super::types::{Chat, Message};

/// Sends messages to a chat transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends `text` as a reply to `message` (same chat, quoting it when the transport supports it).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
}

/// Parses a transport message id (Telegram numeric string) into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Bot(format!("Invalid message_id: {}", s)))
}
