//! Handlers for logging and the optional user allowlist.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_type = %message.message_type,
            content_len = message.content.chars().count(),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let replied = matches!(response, HandlerResponse::Reply(_));
        debug!(message_id = %message.id, replied = replied, "Processed message");
        Ok(())
    }
}

/// Stops the chain with Unauthorized if message.user.id is not in the allowlist.
pub struct AuthHandler {
    allowed_users: Vec<i64>,
}

impl AuthHandler {
    pub fn new(allowed_users: Vec<i64>) -> Self {
        Self { allowed_users }
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user_id = message.user.id;
        if self.allowed_users.contains(&user_id) {
            debug!(user_id = user_id, "User authorized");
            Ok(true)
        } else {
            warn!(user_id = user_id, "Unauthorized access attempt");
            Err(crate::core::HandlerError::Unauthorized.into())
        }
    }
}
