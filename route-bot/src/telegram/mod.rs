//! Telegram layer: adapters, Bot implementation, long-polling REPL and webhook runners.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::{run_repl, run_webhook};
