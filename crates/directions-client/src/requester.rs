//! Route Requester: one route per address list, distance total and map link.

use std::sync::Arc;

use address_parser::AddressList;
use tracing::{info, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::RouteError;
use crate::map_url::build_map_url;
use crate::retry::{retry_policy_from_config, RetryPolicy};
use crate::types::{Route, RouteOptions, RouteResult, RouteWaypoints};
use crate::DirectionsService;

/// Wraps addresses in the fixed start/end and asks the directions service for the route.
/// Stateless between calls; safe to share across concurrent messages.
#[derive(Clone)]
pub struct RouteRequester {
    service: Arc<dyn DirectionsService>,
    start: String,
    end: String,
    options: RouteOptions,
    retry: Arc<dyn RetryPolicy>,
}

impl RouteRequester {
    /// Uses start/end and request options from `config`; retry follows DIRECTIONS_MAX_RETRIES.
    pub fn new(service: Arc<dyn DirectionsService>, config: &DirectionsConfig) -> Self {
        Self {
            service,
            start: config.start.clone(),
            end: config.end.clone(),
            options: RouteOptions::from(config),
            retry: retry_policy_from_config(config),
        }
    }

    pub fn with_retry_policy(mut self, retry: Arc<dyn RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Requests the route start → addresses... → end and derives distance and map link.
    ///
    /// No map URL is built when the request fails.
    #[instrument(skip(self, addresses), fields(stops = addresses.len()))]
    pub async fn request_route(&self, addresses: &AddressList) -> Result<RouteResult, RouteError> {
        let waypoints =
            RouteWaypoints::new(self.start.clone(), addresses.clone(), self.end.clone());

        let route = self.fetch_with_retry(&waypoints).await?;

        if route.legs.len() != waypoints.leg_count() {
            warn!(
                expected = waypoints.leg_count(),
                actual = route.legs.len(),
                "Leg count differs from waypoint count"
            );
        }

        let visiting = self.visiting_order(waypoints, &route);
        let map_url = build_map_url(&visiting, self.options.travel_mode)?;
        let result = RouteResult::new(visiting, route.legs, map_url);

        info!(
            total_meters = result.total_distance_meters(),
            distance = %result.formatted_distance(),
            "step: route ready"
        );
        Ok(result)
    }

    async fn fetch_with_retry(&self, waypoints: &RouteWaypoints) -> Result<Route, RouteError> {
        let mut attempt = 0u32;
        loop {
            match self.service.fetch_route(waypoints, &self.options).await {
                Ok(route) => return Ok(route),
                Err(e) => {
                    attempt += 1;
                    let Some(delay) = self.retry.next_delay(attempt, &e) else {
                        return Err(e);
                    };
                    warn!(
                        error = %e,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying directions request"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Applies the service's waypoint order when optimization was requested and the order is valid.
    fn visiting_order(&self, waypoints: RouteWaypoints, route: &Route) -> RouteWaypoints {
        if !self.options.optimize_waypoints || route.waypoint_order.is_empty() {
            return waypoints;
        }
        match waypoints.reordered(&route.waypoint_order) {
            Some(reordered) => reordered,
            None => {
                warn!(order = ?route.waypoint_order, "Ignoring invalid waypoint order");
                waypoints
            }
        }
    }
}
