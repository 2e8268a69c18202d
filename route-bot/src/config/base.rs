//! Base config: Telegram Bot connection, logging, webhook, allowlist. Loaded from env.

use anyhow::{Context, Result};
use std::env;

/// Telegram-related, logging, and delivery config.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// ALLOWED_USER_IDS (comma-separated); empty means everyone may use the bot.
    pub allowed_user_ids: Vec<i64>,
    /// WEBHOOK_URL or RENDER_EXTERNAL_URL; when set the bot receives updates by webhook instead of polling.
    pub webhook_base_url: Option<String>,
    /// PORT the webhook server listens on.
    pub port: u16,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                .context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/route-bot.log".to_string());
        let allowed_user_ids = match env::var("ALLOWED_USER_IDS") {
            Ok(s) => parse_user_ids(&s)?,
            Err(_) => Vec::new(),
        };
        let webhook_base_url = env::var("WEBHOOK_URL")
            .or_else(|_| env::var("RENDER_EXTERNAL_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let port = match env::var("PORT") {
            Ok(s) => s
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port: {}", s))?,
            Err(_) => 5000,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            allowed_user_ids,
            webhook_base_url,
            port,
        })
    }

    /// Validate config (URLs must parse if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.webhook_base_url.is_some() {
            self.webhook_url()?;
        }
        Ok(())
    }

    /// Full webhook endpoint: `<base>/webhook`. None when running with long polling.
    pub fn webhook_url(&self) -> Result<Option<reqwest::Url>> {
        let Some(base) = &self.webhook_base_url else {
            return Ok(None);
        };
        let url = format!("{}/webhook", base.trim_end_matches('/'));
        reqwest::Url::parse(&url).map(Some).map_err(|_| {
            anyhow::anyhow!(
                "WEBHOOK_URL (or RENDER_EXTERNAL_URL) is not a valid URL: {}",
                base
            )
        })
    }
}

fn parse_user_ids(s: &str) -> Result<Vec<i64>> {
    s.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse()
                .map_err(|_| anyhow::anyhow!("ALLOWED_USER_IDS contains an invalid id: {}", id))
        })
        .collect()
}
