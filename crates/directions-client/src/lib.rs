//! # Directions client
//!
//! Route Requester for the route bot: wraps the start/end waypoints around an
//! [`address_parser::AddressList`], asks a [`DirectionsService`] for the route once, sums the leg
//! distances and builds a shareable Google Maps link for the same ordered waypoints.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use address_parser::parse_addresses;
//! use directions_client::{DirectionsConfig, GoogleDirectionsClient, RouteRequester};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let config = DirectionsConfig::new("your-api-key".to_string());
//!     let client = GoogleDirectionsClient::from_config(&config)?;
//!     let requester = RouteRequester::new(Arc::new(client), &config);
//!
//!     let addresses = parse_addresses("Хрещатик 1, Буча")?;
//!     let result = requester.request_route(&addresses).await?;
//!     println!("{} {}", result.formatted_distance(), result.map_url());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

mod config;
mod error;
mod google;
mod map_url;
mod requester;
mod retry;
mod types;

pub use config::{DirectionsConfig, TravelMode, DEFAULT_API_URL, DEFAULT_BASE_POINT};
pub use error::RouteError;
pub use google::GoogleDirectionsClient;
pub use map_url::{build_map_url, map_url_waypoints, MAP_URL_BASE};
pub use requester::RouteRequester;
pub use retry::{retry_policy_from_config, BackoffRetry, NoRetry, RetryPolicy};
pub use types::{Leg, Route, RouteOptions, RouteResult, RouteWaypoints};

/// External directions service: computes one route through the given waypoints.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    /// Issues exactly one request for `waypoints` in visiting order.
    async fn fetch_route(
        &self,
        waypoints: &RouteWaypoints,
        options: &RouteOptions,
    ) -> Result<Route, RouteError>;
}

/// Masks an API key for safe logging: first 7 + "***" + last 4 chars; keys of length <= 11 become "***".
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}
