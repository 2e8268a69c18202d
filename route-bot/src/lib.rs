//! # Route bot
//!
//! Telegram bot that turns a message with addresses into a day route: the addresses are parsed
//! (`address-parser`), sent to Google Directions between the fixed start and finish
//! (`directions-client`), and the reply carries the map link and total distance.
//!
//! Core (Handler, Bot, Message), chain (HandlerChain), handlers, and telegram (REPL / webhook,
//! adapters) live here; `run_bot` wires them from env config.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod pipeline;
pub mod reply;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_message_id, Bot, BotError, Chat, Handler, HandlerError, HandlerResponse,
    Message, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{
    run_repl, run_webhook, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper,
};

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig};
pub use handlers::{AuthHandler, LoggingHandler, RouteHandler};
pub use pipeline::{PlanError, RoutePipeline};
pub use runner::{run_bot, RouteBot};
