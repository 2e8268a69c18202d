//! Google Directions API implementation of [`DirectionsService`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::RouteError;
use crate::types::{Leg, Route, RouteOptions, RouteWaypoints};
use crate::{mask_token, DirectionsService};

const BODY_PREVIEW_LEN: usize = 200;

/// HTTP client for `maps/api/directions/json`. Every call is bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GoogleDirectionsClient {
    /// Builds the client with the key, endpoint and timeout from `config`.
    pub fn from_config(config: &DirectionsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!(
            api_url = %config.api_url,
            api_key = %mask_token(&config.api_key),
            timeout_secs = config.timeout_secs,
            "Directions client created"
        );

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
        })
    }

    fn query_params(
        &self,
        waypoints: &RouteWaypoints,
        options: &RouteOptions,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", waypoints.start().to_string()),
            ("destination", waypoints.end().to_string()),
            ("mode", options.travel_mode.as_str().to_string()),
        ];
        if !waypoints.stops().is_empty() {
            let joined = waypoints.stops().join("|");
            let value = if options.optimize_waypoints {
                format!("optimize:true|{}", joined)
            } else {
                joined
            };
            params.push(("waypoints", value));
        }
        if let Some(language) = &options.language {
            params.push(("language", language.clone()));
        }
        if let Some(region) = &options.region {
            params.push(("region", region.clone()));
        }
        params.push(("key", self.api_key.clone()));
        params
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: ApiDistance,
    #[serde(default)]
    start_address: String,
    #[serde(default)]
    end_address: String,
}

#[derive(Debug, Deserialize)]
struct ApiDistance {
    /// Meters.
    value: u64,
}

/// Turns a decoded response into a [`Route`] or the matching error.
fn interpret(response: DirectionsResponse) -> Result<Route, RouteError> {
    if response.status != "OK" {
        return Err(RouteError::from_status(&response.status, response.error_message));
    }
    let Some(route) = response.routes.into_iter().next() else {
        return Err(RouteError::NoRouteFound {
            status: "OK without routes".to_string(),
        });
    };
    if route.legs.is_empty() {
        return Err(RouteError::NoRouteFound {
            status: "OK without legs".to_string(),
        });
    }
    let legs = route
        .legs
        .into_iter()
        .map(|leg| Leg {
            start_address: leg.start_address,
            end_address: leg.end_address,
            distance_meters: leg.distance.value,
        })
        .collect();
    Ok(Route {
        legs,
        waypoint_order: route.waypoint_order,
    })
}

/// Transport failures; the URL (which carries the key) is stripped from the message.
fn unavailable(e: reqwest::Error) -> RouteError {
    let reason = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    RouteError::UpstreamUnavailable(format!("{}: {}", reason, e.without_url()))
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_LEN).collect()
}

#[async_trait]
impl DirectionsService for GoogleDirectionsClient {
    #[instrument(skip(self, waypoints, options), fields(stops = waypoints.stops().len()))]
    async fn fetch_route(
        &self,
        waypoints: &RouteWaypoints,
        options: &RouteOptions,
    ) -> Result<Route, RouteError> {
        info!(
            origin = %waypoints.start(),
            destination = %waypoints.end(),
            mode = %options.travel_mode,
            optimize = options.optimize_waypoints,
            "step: directions request"
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&self.query_params(waypoints, options))
            .send()
            .await
            .map_err(unavailable)?;

        let http_status = response.status();
        let body = response.text().await.map_err(unavailable)?;

        if http_status == StatusCode::TOO_MANY_REQUESTS {
            warn!(http_status = %http_status, "Directions rate limited");
            return Err(RouteError::QuotaExceeded {
                status: http_status.to_string(),
            });
        }
        if http_status.is_server_error() {
            warn!(http_status = %http_status, body = %preview(&body), "Directions server error");
            return Err(RouteError::UpstreamUnavailable(format!(
                "server returned {}",
                http_status
            )));
        }

        let decoded: DirectionsResponse = match serde_json::from_str(&body) {
            Ok(decoded) => decoded,
            Err(_) if !http_status.is_success() => {
                return Err(RouteError::Rejected {
                    status: http_status.to_string(),
                    message: preview(&body),
                });
            }
            Err(e) => return Err(RouteError::MalformedResponse(e.to_string())),
        };

        let result = interpret(decoded);
        match &result {
            Ok(route) => info!(
                legs = route.legs.len(),
                total_meters = route.total_distance_meters(),
                "step: directions response OK"
            ),
            Err(e) => warn!(error = %e, "Directions request failed"),
        }
        result
    }
}
