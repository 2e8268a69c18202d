//! Bot configuration: BaseConfig (Telegram, logging, webhook, allowlist) + directions + parser config.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
