//! Handlers in the bot chain: logging, optional allowlist, route planning.

mod logging_auth;
mod route_handler;

pub use logging_auth::{AuthHandler, LoggingHandler};
pub use route_handler::RouteHandler;
