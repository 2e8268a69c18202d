//! BotConfig: BaseConfig + directions + address parser config. Use load() for env-based loading.

use address_parser::ParserConfig;
use anyhow::Result;
use directions_client::DirectionsConfig;

/// Full bot config. Use BotConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: super::BaseConfig,
    pub directions: DirectionsConfig,
    pub parser: ParserConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = super::BaseConfig::load(token)?;
        let directions = DirectionsConfig::from_env()?;
        let parser = ParserConfig::from_env()?;
        Ok(Self {
            base,
            directions,
            parser,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.directions.validate()
    }

    pub fn base(&self) -> &super::BaseConfig {
        &self.base
    }
    pub fn directions(&self) -> &DirectionsConfig {
        &self.directions
    }
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
