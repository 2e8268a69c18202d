//! Component factory: builds BotComponents and the handler chain from config.

use std::sync::Arc;

use address_parser::{AddressParser, ParserConfig};
use anyhow::Result;
use directions_client::{DirectionsConfig, GoogleDirectionsClient, RouteRequester};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{AuthHandler, LoggingHandler, RouteHandler};
use crate::pipeline::RoutePipeline;
use crate::telegram::TelegramBotAdapter;

/// Everything the runner needs besides config.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: Bot,
    /// Bot used by handlers to reply; tests substitute a recording impl.
    pub bot: Arc<dyn CoreBot>,
    pub pipeline: RoutePipeline,
}

/// teloxide Bot pointed at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Google Directions client wrapped in a RouteRequester (retry per DIRECTIONS_MAX_RETRIES).
pub fn build_route_requester(config: &DirectionsConfig) -> Result<Arc<RouteRequester>> {
    let client = GoogleDirectionsClient::from_config(config)?;
    Ok(Arc::new(RouteRequester::new(Arc::new(client), config)))
}

pub fn build_address_parser(config: &ParserConfig) -> Result<Arc<AddressParser>> {
    Ok(Arc::new(AddressParser::new(config.clone())?))
}

/// Builds BotComponents. `bot_override` replaces the Telegram reply bot (tests).
#[instrument(skip(config, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config);
    let bot = bot_override
        .unwrap_or_else(|| Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())));
    let pipeline = RoutePipeline::new(
        build_address_parser(config.parser())?,
        build_route_requester(config.directions())?,
    );

    info!(
        start = %pipeline.start(),
        end = %pipeline.end(),
        travel_mode = %config.directions().travel_mode,
        "step: components built"
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        pipeline,
    })
}

/// Chain: LoggingHandler → AuthHandler (when ALLOWED_USER_IDS is set) → RouteHandler.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let mut chain = HandlerChain::new().add_handler(Arc::new(LoggingHandler));
    let allowed = &config.base().allowed_user_ids;
    if !allowed.is_empty() {
        info!(count = allowed.len(), "step: allowlist enabled");
        chain = chain.add_handler(Arc::new(AuthHandler::new(allowed.clone())));
    }
    chain.add_handler(Arc::new(RouteHandler::new(
        components.bot.clone(),
        components.pipeline.clone(),
    )))
}
